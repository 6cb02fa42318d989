//! Running prediction requests on behalf of the controller.

use std::sync::Arc;

use shared::protocol::{PredictionPayload, PredictionResult};
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};
use tracing::debug;

use crate::service::{PredictionService, ServiceError};

pub type RequestOutcome = Result<PredictionResult, ServiceError>;

pub async fn run_request<S>(service: &S, payload: &PredictionPayload) -> RequestOutcome
where
    S: PredictionService + ?Sized,
{
    service.predict(payload).await
}

/// Issues the request on the tokio runtime and posts the outcome to `outcome_tx`,
/// so an event loop can keep reducing UI events meanwhile.
pub fn spawn_request<S>(
    service: Arc<S>,
    payload: PredictionPayload,
    outcome_tx: UnboundedSender<RequestOutcome>,
) -> JoinHandle<()>
where
    S: PredictionService + ?Sized + 'static,
{
    tokio::spawn(async move {
        let outcome = run_request(service.as_ref(), &payload).await;
        if outcome_tx.send(outcome).is_err() {
            debug!("request outcome dropped; controller loop has exited");
        }
    })
}
