use pretty_assertions::assert_eq;
use rstest::rstest;
use signup_validation::{
    sanitize_form, sanitize_input, validate_registration, ErrorKind, Field, FieldValue, FormInput,
    PasswordViolation, RuleSet,
};

fn valid_names_form() -> FormInput {
    FormInput::new()
        .with("first_name", "John")
        .with("last_name", "Doe")
        .with("email", "john.doe@example.com")
        .with("password", "SecurePass123!")
        .with("confirm_password", "SecurePass123!")
}

fn valid_username_form() -> FormInput {
    FormInput::new()
        .with("username", "john_doe")
        .with("email", "john@example.com")
        .with("password", "SecurePass123!")
        .with("confirm_password", "SecurePass123!")
}

fn error_kind(input: &FormInput, field: Field) -> Option<ErrorKind> {
    validate_registration(input).error(field).map(|e| e.kind())
}

#[test]
fn test_full_valid_payload() {
    let outcome = validate_registration(&valid_names_form());
    assert!(outcome.is_valid());
    assert_eq!(outcome.error_count(), 0);
}

#[test]
fn test_all_empty_payload_reports_every_required_field() {
    let input = FormInput::new()
        .with("first_name", "")
        .with("last_name", "")
        .with("email", "")
        .with("password", "")
        .with("confirm_password", "");

    let outcome = validate_registration(&input);

    assert!(!outcome.is_valid());
    assert_eq!(outcome.error_count(), 5);
    assert!(outcome.errors().values().all(|e| e.kind() == ErrorKind::Required));
    assert_eq!(
        outcome.messages().into_iter().map(|(field, _)| field).collect::<Vec<_>>(),
        vec!["first_name", "last_name", "email", "password", "confirm_password"]
    );
}

#[test]
fn test_missing_keys_count_as_empty() {
    let outcome = validate_registration(&FormInput::new());
    assert_eq!(outcome.error_count(), RuleSet::names().required_count());
}

#[test]
fn test_valid_flag_matches_error_map() {
    let inputs = [
        valid_names_form(),
        FormInput::new(),
        valid_names_form().with("age", 12),
        valid_names_form().with("phone", "123"),
        valid_names_form().with("password", "weak"),
    ];

    for input in inputs {
        let outcome = validate_registration(&input);
        assert_eq!(outcome.is_valid(), outcome.errors().is_empty());
    }
}

#[test]
fn test_repeat_validation_is_identical() {
    let input = valid_names_form().with("email", "bad").with("age", "abc");
    assert_eq!(validate_registration(&input), validate_registration(&input));

    let rules = RuleSet::names();
    assert_eq!(rules.validate(&input), rules.validate(&input));
}

#[test]
fn test_no_short_circuit_across_fields() {
    let input = FormInput::new()
        .with("first_name", "J")
        .with("last_name", "D0e")
        .with("email", "user@domain")
        .with("password", "password123!")
        .with("confirm_password", "different")
        .with("age", 12)
        .with("phone", "abc");

    let outcome = validate_registration(&input);
    assert_eq!(outcome.error_count(), 7);
}

#[test]
fn test_short_password_mentions_minimum_length() {
    let input = valid_names_form().with("password", "Pass1!").with("confirm_password", "Pass1!");
    let outcome = validate_registration(&input);

    let error = outcome.error(Field::Password).expect("password error");
    assert_eq!(error.kind(), ErrorKind::PolicyViolation);
    assert!(error.to_string().contains("at least 8 characters"));
    assert!(outcome.error(Field::ConfirmPassword).is_none());
}

#[test]
fn test_password_without_uppercase_mentions_uppercase() {
    let input = valid_names_form()
        .with("password", "password123!")
        .with("confirm_password", "password123!");
    let outcome = validate_registration(&input);

    let error = outcome.error(Field::Password).expect("password error");
    assert!(error.to_string().contains("uppercase"));
    assert_eq!(error.violations(), &[PasswordViolation::MissingUppercase]);
}

#[test]
fn test_password_reports_all_failing_rules() {
    let input = valid_names_form().with("password", "pass").with("confirm_password", "pass");
    let outcome = validate_registration(&input);

    let violations = outcome.error(Field::Password).unwrap().violations().to_vec();
    assert_eq!(
        violations,
        vec![
            PasswordViolation::TooShort { min: 8 },
            PasswordViolation::MissingUppercase,
            PasswordViolation::MissingDigit,
            PasswordViolation::MissingSpecial,
        ]
    );
}

#[rstest]
#[case("PASSWORD123!", PasswordViolation::MissingLowercase)]
#[case("Password!", PasswordViolation::MissingDigit)]
#[case("Password123", PasswordViolation::MissingSpecial)]
fn test_single_password_violation(#[case] password: &str, #[case] expected: PasswordViolation) {
    let input = valid_names_form().with("password", password).with("confirm_password", password);
    let outcome = validate_registration(&input);
    assert_eq!(outcome.error(Field::Password).unwrap().violations(), &[expected]);
}

#[test]
fn test_matching_strong_password_has_no_password_errors() {
    let outcome = validate_registration(&valid_names_form());
    assert!(outcome.error(Field::Password).is_none());
    assert!(outcome.error(Field::ConfirmPassword).is_none());
}

#[test]
fn test_confirmation_mismatch() {
    let input = valid_names_form().with("confirm_password", "SecurePass123?");
    assert_eq!(error_kind(&input, Field::ConfirmPassword), Some(ErrorKind::Mismatch));
}

#[test]
fn test_confirmation_checked_even_when_password_invalid() {
    let input = valid_names_form().with("password", "weak").with("confirm_password", "weak");
    let outcome = validate_registration(&input);
    assert!(outcome.error(Field::Password).is_some());
    assert!(outcome.error(Field::ConfirmPassword).is_none());
}

#[rstest]
#[case("user@example.com")]
#[case("john.doe@example.co.uk")]
#[case("test+tag@domain.org")]
#[case("user123@test-domain.com")]
fn test_valid_emails(#[case] email: &str) {
    assert_eq!(error_kind(&valid_names_form().with("email", email), Field::Email), None);
}

#[rstest]
#[case("invalid")]
#[case("@example.com")]
#[case("user@")]
#[case("user @example.com")]
#[case("user@domain")]
fn test_invalid_emails(#[case] email: &str) {
    assert_eq!(
        error_kind(&valid_names_form().with("email", email), Field::Email),
        Some(ErrorKind::InvalidFormat)
    );
}

#[test]
fn test_email_too_long() {
    let email = format!("{}@example.com", "a".repeat(250));
    let outcome = validate_registration(&valid_names_form().with("email", email));
    let error = outcome.error(Field::Email).unwrap();
    assert_eq!(error.kind(), ErrorKind::TooLong);
    assert_eq!(error.to_string(), "Email address is too long");
}

#[rstest]
#[case("John")]
#[case("Mary-Jane")]
#[case("O'Connor")]
#[case("Jean Paul")]
fn test_valid_names(#[case] name: &str) {
    assert_eq!(error_kind(&valid_names_form().with("first_name", name), Field::FirstName), None);
}

#[rstest]
#[case("A", ErrorKind::LengthOutOfRange)]
#[case(" A ", ErrorKind::LengthOutOfRange)]
#[case("John123", ErrorKind::InvalidFormat)]
#[case("John@Doe", ErrorKind::InvalidFormat)]
fn test_invalid_names(#[case] name: &str, #[case] expected: ErrorKind) {
    assert_eq!(
        error_kind(&valid_names_form().with("last_name", name), Field::LastName),
        Some(expected)
    );
}

#[test]
fn test_name_too_long() {
    let outcome = validate_registration(&valid_names_form().with("first_name", "A".repeat(51)));
    assert_eq!(
        outcome.error(Field::FirstName).unwrap().to_string(),
        "First Name is too long (max 50 characters)"
    );
}

#[test]
fn test_padded_name_over_maximum() {
    let padded = format!("  {}  ", "A".repeat(50));
    let outcome = validate_registration(&valid_names_form().with("first_name", padded));
    assert_eq!(
        outcome.error(Field::FirstName).unwrap().to_string(),
        "First Name is too long (max 50 characters)"
    );
}

#[test]
fn test_age_absent_or_null_is_valid() {
    assert_eq!(error_kind(&valid_names_form(), Field::Age), None);
    assert_eq!(error_kind(&valid_names_form().with("age", FieldValue::Null), Field::Age), None);
}

#[rstest]
#[case(FieldValue::Integer(12), Some(ErrorKind::OutOfRange))]
#[case(FieldValue::Integer(151), Some(ErrorKind::OutOfRange))]
#[case(FieldValue::Integer(13), None)]
#[case(FieldValue::Integer(150), None)]
#[case(FieldValue::Text("25".to_string()), None)]
#[case(FieldValue::Text("abc".to_string()), Some(ErrorKind::InvalidFormat))]
#[case(FieldValue::Float(25.5), Some(ErrorKind::InvalidFormat))]
#[case(FieldValue::Bool(true), Some(ErrorKind::InvalidFormat))]
#[case(FieldValue::Text(String::new()), Some(ErrorKind::InvalidFormat))]
#[case(FieldValue::Text("   ".to_string()), Some(ErrorKind::InvalidFormat))]
fn test_age_rules(#[case] age: FieldValue, #[case] expected: Option<ErrorKind>) {
    assert_eq!(error_kind(&valid_names_form().with("age", age), Field::Age), expected);
}

#[rstest]
#[case("+1 (555) 123-4567", None)]
#[case("555-123-4567", None)]
#[case("", None)]
#[case("   ", Some(ErrorKind::InvalidFormat))]
#[case("123", Some(ErrorKind::InvalidFormat))]
#[case("phone-number", Some(ErrorKind::InvalidFormat))]
fn test_phone_rules(#[case] phone: &str, #[case] expected: Option<ErrorKind>) {
    assert_eq!(error_kind(&valid_names_form().with("phone", phone), Field::Phone), expected);
}

#[test]
fn test_username_profile() {
    let rules = RuleSet::username();
    assert!(rules.validate(&valid_username_form()).is_valid());

    let kind = |username: &str| {
        rules
            .validate(&valid_username_form().with("username", username))
            .error(Field::Username)
            .map(|e| e.kind())
    };

    assert_eq!(kind("ab"), Some(ErrorKind::LengthOutOfRange));
    assert_eq!(kind("a".repeat(21).as_str()), Some(ErrorKind::LengthOutOfRange));
    assert_eq!(kind("user-name"), Some(ErrorKind::InvalidFormat));
    assert_eq!(kind("user name"), Some(ErrorKind::InvalidFormat));
    assert_eq!(kind(""), Some(ErrorKind::Required));
    assert_eq!(kind("test_user_2023"), None);
}

#[test]
fn test_username_profile_ignores_name_fields() {
    let outcome = RuleSet::username().validate(&valid_username_form().with("first_name", "X"));
    assert!(outcome.is_valid());
}

#[test]
fn test_sanitize_then_validate() {
    let raw = valid_names_form()
        .with("first_name", "  Jo\u{0}hn   ")
        .with("last_name", "Van    Dyke")
        .with("email", " john.doe@example.com\n");

    let cleaned = sanitize_form(&raw);

    assert_eq!(cleaned.text(Field::FirstName).as_deref(), Some("John"));
    assert_eq!(cleaned.text(Field::LastName).as_deref(), Some("Van Dyke"));
    assert!(validate_registration(&cleaned).is_valid());
    assert_eq!(sanitize_input("a\u{0}b   c "), "ab c");
}
