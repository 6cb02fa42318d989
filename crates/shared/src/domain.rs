use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const YEAR_FIELD: &str = "year";
pub const EDUCATION_FIELD: &str = "education";
pub const AREA_FIELD: &str = "area";
pub const SEX_FIELD: &str = "sex";
pub const QUARTER_FIELD: &str = "quarter";

/// Option value meaning "all groups combined" for area and sex.
pub const ALL_GROUPS: &str = "รวม";

pub const AREA_OPTIONS: [&str; 3] = [ALL_GROUPS, "เขตเทศบาล", "นอกเขตเทศบาล"];
pub const SEX_OPTIONS: [&str; 3] = [ALL_GROUPS, "ชาย", "หญิง"];
pub const QUARTER_OPTIONS: [&str; 4] = ["1", "2", "3", "4"];

const EDUCATION_LABELS: [&str; 13] = [
    "ไม่มีการศึกษา",
    "ต่ำกว่าประถมศึกษา",
    "ประถมศึกษา",
    "มัธยมศึกษาตอนต้น",
    "มัธยมศึกษาตอนปลาย สายสามัญ",
    "มัธยมศึกษาตอนปลาย สายอาชีวศึกษา",
    "มัธยมศึกษาตอนปลาย สายวิชาการศึกษา",
    "อุดมศึกษา สายวิชาการ",
    "อุดมศึกษา สายวิชาชีพ",
    "อุดมศึกษา สายวิชาการศึกษา",
    "อื่น ๆ",
    "ไม่ทราบ",
    "รวม",
];

/// Label of an education level code as it appears in the form's select box.
pub fn education_label(code: &str) -> Option<&'static str> {
    let index: usize = code.trim().parse().ok()?;
    EDUCATION_LABELS.get(index).copied()
}

pub fn education_codes() -> impl Iterator<Item = (u8, &'static str)> {
    EDUCATION_LABELS
        .iter()
        .enumerate()
        .map(|(code, label)| (code as u8, *label))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Numeric,
    Select,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Value restored by a form reset.
    #[serde(default)]
    pub default: String,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            default: String::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }
}

/// Ordered set of inputs rendered by the prediction form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// The LFPR form as deployed: year, education, area, sex and quarter.
    pub fn lfpr() -> Self {
        Self::new(vec![
            FieldSpec::new(YEAR_FIELD, FieldKind::Numeric).required(),
            FieldSpec::new(EDUCATION_FIELD, FieldKind::Select).required(),
            FieldSpec::new(AREA_FIELD, FieldKind::Select)
                .required()
                .with_default(ALL_GROUPS),
            FieldSpec::new(SEX_FIELD, FieldKind::Select)
                .required()
                .with_default(ALL_GROUPS),
            FieldSpec::new(QUARTER_FIELD, FieldKind::Select)
                .required()
                .with_default("1"),
        ])
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn defaults(&self) -> FormState {
        self.fields
            .iter()
            .map(|field| (field.name.clone(), field.default.clone()))
            .collect()
    }
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::lfpr()
    }
}

/// Snapshot of the values currently held by the form's inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState(BTreeMap<String, String>);

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Illustrative values written by the "load sample data" action.
pub fn sample_values() -> [(&'static str, &'static str); 5] {
    [
        (YEAR_FIELD, "2567"),
        (EDUCATION_FIELD, "7"),
        (AREA_FIELD, ALL_GROUPS),
        (SEX_FIELD, ALL_GROUPS),
        (QUARTER_FIELD, "1"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldStatus {
    Valid,
    Invalid(String),
}

impl FieldStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }
}
