//! Line-oriented rendering of the prediction form.

use std::{fmt, io::Write};

use client_core::{FormView, MemoryView, Region, SubmitControl};
use shared::domain::{education_label, FieldStatus, FormSchema, FormState, EDUCATION_FIELD};
use tracing::warn;

/// Keeps the form state in a [`MemoryView`] and prints the visible changes.
pub struct TerminalView<W> {
    state: MemoryView,
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(values: FormState, out: W) -> Self {
        Self {
            state: MemoryView::new(values),
            out,
        }
    }

    pub fn state(&self) -> &MemoryView {
        &self.state
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn print_summary(&mut self, schema: &FormSchema) {
        for field in schema.fields() {
            let value = self.state.values.get(&field.name).unwrap_or_default();
            let mut line = format!("{:>10}: {value}", field.name);
            if field.name == EDUCATION_FIELD {
                if let Some(label) = education_label(value) {
                    line.push_str(&format!(" ({label})"));
                }
            }
            let mark = self.state.mark(&field.name);
            if let (true, Some(message)) = (mark.invalid_style, mark.message) {
                line.push_str(&format!("  <- {message}"));
            }
            self.emit(format_args!("{line}"));
        }

        let submit = self.state.submit;
        self.emit(format_args!("[{}]", submit.label()));
        if self.state.is_visible(Region::Results) {
            if self.state.is_visible(Region::Loading) {
                self.emit(format_args!("Predicting..."));
            }
            if self.state.is_visible(Region::Prediction) {
                let prediction = self.state.prediction_text.clone();
                self.emit(format_args!("Predicted LFPR: {prediction}"));
            }
            if self.state.is_visible(Region::Error) {
                let error = self.state.error_text.clone();
                self.emit(format_args!("Error: {error}"));
            }
        }
    }

    pub fn print_line(&mut self, message: &str) {
        self.emit(format_args!("{message}"));
    }

    fn emit(&mut self, line: fmt::Arguments<'_>) {
        if let Err(error) = writeln!(self.out, "{line}") {
            warn!(%error, "failed to write to terminal");
        }
    }
}

impl<W: Write> FormView for TerminalView<W> {
    fn read_form(&self) -> FormState {
        self.state.read_form()
    }

    fn write_field(&mut self, name: &str, value: &str) {
        self.state.write_field(name, value);
    }

    fn reset_fields(&mut self, defaults: &FormState) {
        self.state.reset_fields(defaults);
        self.emit(format_args!("Form reset."));
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        let was_visible = self.state.is_visible(region);
        self.state.set_visible(region, visible);
        if region == Region::Results && was_visible && !visible {
            self.emit(format_args!("(results hidden)"));
        }
    }

    fn set_submit_control(&mut self, control: SubmitControl) {
        self.state.set_submit_control(control);
        if control == SubmitControl::Working {
            self.emit(format_args!("{}", control.label()));
        }
    }

    fn show_prediction(&mut self, value_text: &str, interpretation: &str) {
        self.state.show_prediction(value_text, interpretation);
    }

    fn show_error(&mut self, message: &str) {
        self.state.show_error(message);
        self.emit(format_args!("Error: {message}"));
    }

    fn mark_field(&mut self, name: &str, status: &FieldStatus) {
        self.state.mark_field(name, status);
        if let FieldStatus::Invalid(message) = status {
            self.emit(format_args!("  {name}: {message}"));
        }
    }

    fn clear_invalid_style(&mut self, name: &str) {
        self.state.clear_invalid_style(name);
    }

    fn reveal_prediction(&mut self) {
        self.state.reveal_prediction();
        let prediction = self.state.prediction_text.clone();
        let interpretation = self.state.interpretation_text.clone();
        self.emit(format_args!("Predicted LFPR: {prediction}"));
        self.emit(format_args!("{interpretation}"));
    }

    fn scroll_into_view(&mut self, region: Region) {
        self.state.scroll_into_view(region);
    }
}
