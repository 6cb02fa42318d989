//! Field validation and form serialization. Pure functions over form values.

use std::collections::BTreeMap;

use shared::{
    domain::{
        FieldKind, FieldSpec, FieldStatus, FormSchema, FormState, EDUCATION_FIELD, YEAR_FIELD,
    },
    protocol::PredictionPayload,
};

pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Inclusive bounds accepted for numeric (year) fields. The defaults are the
/// Buddhist-calendar years the deployed model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub year_min: i64,
    pub year_max: i64,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            year_min: 2550,
            year_max: 2580,
        }
    }
}

impl ValidationRules {
    pub fn year_range_message(&self) -> String {
        format!(
            "Year must be between {} and {}",
            self.year_min, self.year_max
        )
    }
}

pub fn validate_field(spec: &FieldSpec, value: &str, rules: &ValidationRules) -> FieldStatus {
    let value = value.trim();

    if spec.required && value.is_empty() {
        return FieldStatus::Invalid(REQUIRED_MESSAGE.to_string());
    }

    if spec.kind == FieldKind::Numeric {
        match parse_int_prefix(value) {
            Some(year) if (rules.year_min..=rules.year_max).contains(&year) => {}
            _ => return FieldStatus::Invalid(rules.year_range_message()),
        }
    }

    FieldStatus::Valid
}

/// Validates every schema field against `state`; missing values count as empty.
pub fn validate_form(
    schema: &FormSchema,
    state: &FormState,
    rules: &ValidationRules,
) -> Vec<(String, FieldStatus)> {
    schema
        .fields()
        .iter()
        .map(|spec| {
            let value = state.get(&spec.name).unwrap_or_default();
            (spec.name.clone(), validate_field(spec, value, rules))
        })
        .collect()
}

/// Builds the request body: `year` as an integer, `education` as a float,
/// everything else passed through untouched.
pub fn build_payload(state: &FormState) -> PredictionPayload {
    let fields: BTreeMap<String, String> = state
        .iter()
        .filter(|(name, _)| *name != YEAR_FIELD && *name != EDUCATION_FIELD)
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    PredictionPayload {
        year: state.get(YEAR_FIELD).and_then(parse_int_prefix),
        education: state.get(EDUCATION_FIELD).and_then(parse_float_prefix),
        fields,
    }
}

/// Parses the longest leading decimal integer, ignoring leading whitespace and
/// any trailing garbage. `"2567abc"` yields 2567, `"abc"` yields `None`.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// Float counterpart of [`parse_int_prefix`]: sign, digits, an optional
/// fraction and an optional exponent, stopping at the first character that
/// cannot extend the number.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(s.starts_with(['+', '-']));

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let number = s[..end].trim_end_matches('.');
    let parsed: f64 = match number.strip_prefix(['+', '-']) {
        Some(rest) if rest.starts_with('.') => {
            format!("{}0{rest}", &number[..1]).parse().ok()?
        }
        _ if number.starts_with('.') => format!("0{number}").parse().ok()?,
        _ => number.parse().ok()?,
    };
    parsed.is_finite().then_some(parsed)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
