//! Form controller: validation on blur, submission lifecycle, result rendering.

pub mod events;
pub mod orchestration;

use std::sync::Arc;

use shared::{
    domain::{education_label, sample_values, FieldStatus, FormSchema, EDUCATION_FIELD},
    protocol::{PredictionPayload, PredictionResult},
};
use tracing::{debug, info, warn};

use crate::{
    service::PredictionService,
    validation::{build_payload, validate_field, validate_form, ValidationRules},
    view::{FormView, Region, SubmitControl},
};

use events::{Dispatch, FormEvent, Key, KeyEvent, SubmitBlocked, SubmitOutcome};
use orchestration::{run_request, RequestOutcome};

pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerConfig {
    pub rules: ValidationRules,
    /// Refuse to submit while any field fails validation. Off by default:
    /// blur validation is advisory and the service is always called.
    pub gate_submit_on_validation: bool,
}

pub struct FormController<V, S: ?Sized> {
    view: V,
    service: Arc<S>,
    schema: FormSchema,
    config: ControllerConfig,
    in_flight: bool,
}

impl<V, S> FormController<V, S>
where
    V: FormView,
    S: PredictionService + ?Sized,
{
    pub fn new(view: V, service: Arc<S>, schema: FormSchema, config: ControllerConfig) -> Self {
        Self {
            view,
            service,
            schema,
            config,
            in_flight: false,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn service(&self) -> Arc<S> {
        Arc::clone(&self.service)
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Reduces one UI event. A [`Dispatch::Request`] leaves the form in its
    /// in-progress state until the outcome is passed to [`Self::finish_submit`].
    pub fn dispatch(&mut self, event: FormEvent) -> Dispatch {
        debug!(?event, "dispatching form event");
        match event {
            FormEvent::Submit => self.request_submit(),
            FormEvent::Input { field, value } => {
                self.view.write_field(&field, &value);
                self.on_input(&field);
                Dispatch::Handled
            }
            FormEvent::Blur { field } => match self.on_blur(&field) {
                Some(status) => Dispatch::Validated(status),
                None => Dispatch::Handled,
            },
            FormEvent::Key(key) => self.on_key(key),
            FormEvent::Reset => {
                self.reset_form();
                Dispatch::Handled
            }
            FormEvent::LoadSample => {
                self.load_sample_data();
                Dispatch::Handled
            }
        }
    }

    /// Puts the form into its in-progress state and returns the payload to send.
    pub fn begin_submit(&mut self) -> Result<PredictionPayload, SubmitBlocked> {
        if self.in_flight {
            debug!("submit ignored; a prediction request is already pending");
            return Err(SubmitBlocked::InFlight);
        }

        if self.config.gate_submit_on_validation {
            let state = self.view.read_form();
            let mut invalid = Vec::new();
            for (field, status) in validate_form(&self.schema, &state, &self.config.rules) {
                self.view.mark_field(&field, &status);
                if !status.is_valid() {
                    invalid.push(field);
                }
            }
            if !invalid.is_empty() {
                info!(fields = ?invalid, "submit refused; form has invalid fields");
                return Err(SubmitBlocked::Invalid(invalid));
            }
        }

        self.view.set_visible(Region::Results, true);
        self.view.set_visible(Region::Loading, true);
        self.view.set_visible(Region::Prediction, false);
        self.view.set_visible(Region::Error, false);
        self.view.set_submit_control(SubmitControl::Working);
        self.in_flight = true;

        let payload = build_payload(&self.view.read_form());
        info!(year = ?payload.year, education = ?payload.education, "submitting prediction form");
        Ok(payload)
    }

    /// Renders the outcome of the request started by [`Self::begin_submit`]
    /// and restores the submit control whatever happened.
    pub fn finish_submit(&mut self, outcome: RequestOutcome) -> SubmitOutcome {
        let rendered = match outcome {
            Ok(PredictionResult::Success {
                prediction,
                interpretation,
            }) => {
                let value_text = format_prediction(prediction);
                self.view.show_prediction(&value_text, &interpretation);
                self.view.set_visible(Region::Prediction, true);
                self.view.reveal_prediction();
                self.view.scroll_into_view(Region::Results);
                info!(%value_text, "prediction rendered");
                SubmitOutcome::Predicted {
                    value_text,
                    interpretation,
                }
            }
            Ok(PredictionResult::Failure { error }) => {
                info!(%error, "prediction service rejected the request");
                self.show_error(&error);
                SubmitOutcome::Rejected { error }
            }
            Err(error) => {
                warn!(%error, "prediction request failed");
                self.show_error(NETWORK_ERROR_MESSAGE);
                SubmitOutcome::NetworkError
            }
        };

        self.view.set_visible(Region::Loading, false);
        self.view.set_submit_control(SubmitControl::Ready);
        self.in_flight = false;
        rendered
    }

    /// Full submission: begin, await the service, render. `None` when the
    /// submission was blocked.
    pub async fn submit(&mut self) -> Option<SubmitOutcome> {
        let payload = self.begin_submit().ok()?;
        let outcome = run_request(self.service.as_ref(), &payload).await;
        Some(self.finish_submit(outcome))
    }

    /// Blur handler. Returns `None` for fields outside the schema.
    pub fn on_blur(&mut self, field: &str) -> Option<FieldStatus> {
        let spec = self.schema.field(field)?;
        let value = self.view.field_value(field).unwrap_or_default();
        let status = validate_field(spec, &value, &self.config.rules);
        self.view.mark_field(field, &status);
        Some(status)
    }

    /// Input handler: immediate feedback that the field is being corrected.
    pub fn on_input(&mut self, field: &str) {
        self.view.clear_invalid_style(field);
        if field == EDUCATION_FIELD {
            let code = self.view.field_value(field).unwrap_or_default();
            debug!(%code, label = ?education_label(&code), "education level selected");
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Dispatch {
        match key.key {
            Key::Enter if key.has_accelerator() => self.request_submit(),
            Key::Escape => {
                self.hide_results();
                Dispatch::Handled
            }
            _ => Dispatch::Handled,
        }
    }

    pub fn hide_results(&mut self) {
        self.view.set_visible(Region::Results, false);
    }

    pub fn reset_form(&mut self) {
        self.view.reset_fields(&self.schema.defaults());
        self.view.set_visible(Region::Results, false);
        for field in self.schema.fields() {
            self.view.mark_field(&field.name, &FieldStatus::Valid);
        }
    }

    pub fn load_sample_data(&mut self) {
        for (field, value) in sample_values() {
            if self.schema.field(field).is_some() {
                self.view.write_field(field, value);
            }
        }
    }

    fn request_submit(&mut self) -> Dispatch {
        match self.begin_submit() {
            Ok(payload) => Dispatch::Request(payload),
            Err(blocked) => Dispatch::Blocked(blocked),
        }
    }

    fn show_error(&mut self, message: &str) {
        self.view.show_error(message);
        self.view.set_visible(Region::Error, true);
        self.view.scroll_into_view(Region::Results);
    }
}

/// `-0` renders as `0%`.
fn format_prediction(prediction: f64) -> String {
    let prediction = if prediction == 0.0 { 0.0 } else { prediction };
    format!("{prediction}%")
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
