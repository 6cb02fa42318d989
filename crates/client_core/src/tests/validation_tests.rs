use serde_json::json;
use shared::domain::{FieldKind, FieldSpec, FieldStatus, FormSchema, FormState};

use crate::validation::{
    build_payload, parse_float_prefix, parse_int_prefix, validate_field, validate_form,
    ValidationRules, REQUIRED_MESSAGE,
};

fn year_spec() -> FieldSpec {
    FieldSpec::new("year", FieldKind::Numeric).required()
}

fn range_error() -> FieldStatus {
    FieldStatus::Invalid("Year must be between 2550 and 2580".into())
}

#[test]
fn year_bounds_are_inclusive() {
    let rules = ValidationRules::default();
    assert_eq!(validate_field(&year_spec(), "2550", &rules), FieldStatus::Valid);
    assert_eq!(validate_field(&year_spec(), "2580", &rules), FieldStatus::Valid);
    assert_eq!(validate_field(&year_spec(), "2549", &rules), range_error());
    assert_eq!(validate_field(&year_spec(), "2581", &rules), range_error());
}

#[test]
fn non_numeric_year_gets_range_message() {
    let rules = ValidationRules::default();
    assert_eq!(validate_field(&year_spec(), "abc", &rules), range_error());
    assert_eq!(validate_field(&year_spec(), " -- ", &rules), range_error());
}

#[test]
fn empty_required_field_reports_required_before_range() {
    let rules = ValidationRules::default();
    let expected = FieldStatus::Invalid(REQUIRED_MESSAGE.into());
    assert_eq!(validate_field(&year_spec(), "   ", &rules), expected);

    let area = FieldSpec::new("area", FieldKind::Select).required();
    assert_eq!(validate_field(&area, "", &rules), expected);
    assert_eq!(validate_field(&area, "รวม", &rules), FieldStatus::Valid);
}

#[test]
fn optional_text_field_is_always_valid() {
    let note = FieldSpec::new("note", FieldKind::Text);
    assert_eq!(
        validate_field(&note, "", &ValidationRules::default()),
        FieldStatus::Valid
    );
}

#[test]
fn year_range_is_configurable() {
    let rules = ValidationRules {
        year_min: 2500,
        year_max: 2600,
    };
    assert_eq!(validate_field(&year_spec(), "2549", &rules), FieldStatus::Valid);
    assert_eq!(
        validate_field(&year_spec(), "2601", &rules),
        FieldStatus::Invalid("Year must be between 2500 and 2600".into())
    );
}

#[test]
fn validate_form_treats_missing_values_as_empty() {
    let state: FormState = [("year", "2567")].into_iter().collect();
    let verdicts = validate_form(&FormSchema::lfpr(), &state, &ValidationRules::default());
    assert_eq!(verdicts.len(), 5);
    assert_eq!(verdicts[0], ("year".to_string(), FieldStatus::Valid));
    assert!(verdicts[1..].iter().all(|(_, status)| !status.is_valid()));
}

#[test]
fn integer_prefix_parsing() {
    assert_eq!(parse_int_prefix("2567"), Some(2567));
    assert_eq!(parse_int_prefix("  2567abc"), Some(2567));
    assert_eq!(parse_int_prefix("2567.9"), Some(2567));
    assert_eq!(parse_int_prefix("-12"), Some(-12));
    assert_eq!(parse_int_prefix("+7"), Some(7));
    assert_eq!(parse_int_prefix(""), None);
    assert_eq!(parse_int_prefix("-"), None);
    assert_eq!(parse_int_prefix("x1"), None);
    assert_eq!(parse_int_prefix("99999999999999999999999"), None);
}

#[test]
fn float_prefix_parsing() {
    assert_eq!(parse_float_prefix("7"), Some(7.0));
    assert_eq!(parse_float_prefix("7.5kg"), Some(7.5));
    assert_eq!(parse_float_prefix("5."), Some(5.0));
    assert_eq!(parse_float_prefix(".5"), Some(0.5));
    assert_eq!(parse_float_prefix("-.5"), Some(-0.5));
    assert_eq!(parse_float_prefix("1e2x"), Some(100.0));
    assert_eq!(parse_float_prefix("1e"), Some(1.0));
    assert_eq!(parse_float_prefix(" 3"), Some(3.0));
    assert_eq!(parse_float_prefix("."), None);
    assert_eq!(parse_float_prefix(""), None);
    assert_eq!(parse_float_prefix("abc"), None);
}

#[test]
fn payload_coerces_year_and_education_to_numbers() {
    let state: FormState = [
        ("year", "2567"),
        ("education", "7"),
        ("area", "รวม"),
        ("sex", "ชาย"),
        ("quarter", ""),
    ]
    .into_iter()
    .collect();

    let body = serde_json::to_value(build_payload(&state)).expect("encode");
    assert_eq!(
        body,
        json!({
            "year": 2567,
            "education": 7.0,
            "area": "รวม",
            "sex": "ชาย",
            "quarter": ""
        })
    );
    assert!(body["year"].is_i64());
    assert!(body["education"].is_f64());
}

#[test]
fn payload_sends_null_for_unparseable_numbers() {
    let state: FormState = [("year", "soon"), ("education", "")].into_iter().collect();
    let payload = build_payload(&state);
    assert_eq!(payload.year, None);
    assert_eq!(payload.education, None);
    assert!(payload.fields.is_empty());
}
