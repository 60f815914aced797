use super::*;

#[test]
fn form_input_with_only_required_fields_builds_user() {
    let user = UserInfo::from_form("  Lina ", "1990-08-10", "", "   ").expect("valid user");
    assert_eq!(user.name, "Lina");
    assert_eq!(user.birth_date_label(), "1990-08-10");
    assert_eq!(user.birth_time, None);
    assert_eq!(user.birth_location, None);
}

#[test]
fn form_input_keeps_optional_time_and_location() {
    let user = UserInfo::from_form("Omar", "1988-02-29", "07:45", "Cairo").expect("valid user");
    assert_eq!(user.birth_time_label().as_deref(), Some("07:45"));
    assert_eq!(user.birth_location.as_deref(), Some("Cairo"));
}

#[test]
fn empty_name_is_rejected_before_date_parsing() {
    let err = UserInfo::from_form("   ", "not-a-date", "", "").expect_err("must fail");
    assert_eq!(err, ValidationError::EmptyName);
    assert_eq!(err.field(), "name");
}

#[test]
fn empty_and_malformed_dates_are_rejected() {
    assert_eq!(
        UserInfo::from_form("Lina", " ", "", "").expect_err("empty"),
        ValidationError::EmptyBirthDate
    );
    assert_eq!(
        UserInfo::from_form("Lina", "1990-13-01", "", "").expect_err("bad month"),
        ValidationError::InvalidBirthDate("1990-13-01".to_string())
    );
}

#[test]
fn malformed_time_is_rejected() {
    let err = UserInfo::from_form("Lina", "1990-08-10", "25:99", "").expect_err("bad time");
    assert_eq!(err.field(), "birth_time");
}

#[test]
fn time_with_seconds_is_accepted() {
    let time = parse_birth_time("06:30:15").expect("time with seconds");
    assert_eq!(time.format(BIRTH_TIME_FORMAT).to_string(), "06:30");
}

#[test]
fn language_parses_codes_and_names() {
    assert_eq!(Language::parse("AR"), Some(Language::Arabic));
    assert_eq!(Language::parse("english"), Some(Language::English));
    assert_eq!(Language::parse("fr"), None);
    assert_eq!(Language::default(), Language::English);
}

#[test]
fn sign_names_follow_language() {
    assert_eq!(ZodiacSign::Leo.name(Language::English), "Leo");
    assert_eq!(ZodiacSign::Leo.name(Language::Arabic), "الأسد");
    assert_eq!(ZodiacSign::Pisces.to_string(), "Pisces");
}
