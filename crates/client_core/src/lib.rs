pub mod controller;
pub mod service;
pub mod validation;
pub mod view;

pub use controller::{
    events::{Dispatch, FormEvent, Key, KeyEvent, SubmitBlocked, SubmitOutcome},
    orchestration::{spawn_request, RequestOutcome},
    ControllerConfig, FormController, NETWORK_ERROR_MESSAGE,
};
pub use service::{HttpPredictionService, PredictionService, ServiceConfig, ServiceError};
pub use validation::ValidationRules;
pub use view::{FormView, MemoryView, Region, SubmitControl};

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod validation_tests;

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod service_tests;
