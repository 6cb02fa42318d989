//! Rendering target driven by the form controller.

use std::collections::BTreeMap;

use shared::domain::{FieldStatus, FormState};

/// Display regions the controller toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Container for the loading indicator and both result panels.
    Results,
    Loading,
    Prediction,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitControl {
    #[default]
    Ready,
    Working,
}

impl SubmitControl {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ready => "Predict LFPR",
            Self::Working => "Predicting...",
        }
    }

    pub fn is_enabled(self) -> bool {
        self == Self::Ready
    }
}

pub trait FormView {
    fn read_form(&self) -> FormState;

    fn field_value(&self, name: &str) -> Option<String> {
        self.read_form().get(name).map(str::to_string)
    }

    fn write_field(&mut self, name: &str, value: &str);

    /// Restores every input to `defaults`.
    fn reset_fields(&mut self, defaults: &FormState);

    fn set_visible(&mut self, region: Region, visible: bool);

    fn set_submit_control(&mut self, control: SubmitControl);

    fn show_prediction(&mut self, value_text: &str, interpretation: &str);

    fn show_error(&mut self, message: &str);

    /// `Valid` clears both styling and message; `Invalid` sets both.
    fn mark_field(&mut self, name: &str, status: &FieldStatus);

    /// Drops invalid styling while the user edits, leaving any message text.
    fn clear_invalid_style(&mut self, name: &str);

    /// Fade/scale-in of the freshly rendered prediction value.
    fn reveal_prediction(&mut self) {}

    fn scroll_into_view(&mut self, _region: Region) {}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMark {
    pub invalid_style: bool,
    pub message: Option<String>,
}

/// Headless view holding the state a rendered page would show.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    pub values: FormState,
    pub visible: BTreeMap<Region, bool>,
    pub submit: SubmitControl,
    pub prediction_text: String,
    pub interpretation_text: String,
    pub error_text: String,
    pub marks: BTreeMap<String, FieldMark>,
    pub reveals: usize,
    pub scrolls: Vec<Region>,
}

impl MemoryView {
    pub fn new(values: FormState) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn is_visible(&self, region: Region) -> bool {
        self.visible.get(&region).copied().unwrap_or(false)
    }

    pub fn mark(&self, name: &str) -> FieldMark {
        self.marks.get(name).cloned().unwrap_or_default()
    }
}

impl FormView for MemoryView {
    fn read_form(&self) -> FormState {
        self.values.clone()
    }

    fn write_field(&mut self, name: &str, value: &str) {
        self.values.set(name, value);
    }

    fn reset_fields(&mut self, defaults: &FormState) {
        self.values = defaults.clone();
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        self.visible.insert(region, visible);
    }

    fn set_submit_control(&mut self, control: SubmitControl) {
        self.submit = control;
    }

    fn show_prediction(&mut self, value_text: &str, interpretation: &str) {
        self.prediction_text = value_text.to_string();
        self.interpretation_text = interpretation.to_string();
    }

    fn show_error(&mut self, message: &str) {
        self.error_text = message.to_string();
    }

    fn mark_field(&mut self, name: &str, status: &FieldStatus) {
        let mark = match status {
            FieldStatus::Valid => FieldMark::default(),
            FieldStatus::Invalid(message) => FieldMark {
                invalid_style: true,
                message: Some(message.clone()),
            },
        };
        self.marks.insert(name.to_string(), mark);
    }

    fn clear_invalid_style(&mut self, name: &str) {
        if let Some(mark) = self.marks.get_mut(name) {
            mark.invalid_style = false;
        }
    }

    fn reveal_prediction(&mut self) {
        self.reveals += 1;
    }

    fn scroll_into_view(&mut self, region: Region) {
        self.scrolls.push(region);
    }
}
