//! UI events reduced by the form controller and the outcomes it reports back.

use shared::{domain::FieldStatus, protocol::PredictionPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub ctrl: bool,
    /// Command key on macOS.
    pub meta: bool,
}

impl KeyEvent {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            ctrl: true,
            meta: false,
        }
    }

    pub fn has_accelerator(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Submit,
    /// The user changed `field` to `value`.
    Input {
        field: String,
        value: String,
    },
    Blur {
        field: String,
    },
    Key(KeyEvent),
    Reset,
    LoadSample,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// The submit control is disabled while a request is pending.
    InFlight,
    /// Submission gating is enabled and these fields failed validation.
    Invalid(Vec<String>),
}

/// Result of reducing one [`FormEvent`].
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Handled,
    Validated(FieldStatus),
    /// The UI now shows the in-progress state; the caller must issue this
    /// request and hand its outcome to `finish_submit`.
    Request(PredictionPayload),
    Blocked(SubmitBlocked),
}

/// What a completed submission rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Predicted {
        value_text: String,
        interpretation: String,
    },
    Rejected {
        error: String,
    },
    NetworkError,
}
