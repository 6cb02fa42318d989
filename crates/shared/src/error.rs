use thiserror::Error;

/// A response body that parsed as JSON but does not match either recognised shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseShapeError {
    #[error("response is missing required field `{0}`")]
    MissingField(&'static str),
}
