use thiserror::Error;

/// Errors produced by [`Request`](super::Request) mutators.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid request target: {target:?}")]
    InvalidRequestTarget { target: String },
}

impl RequestError {
    pub fn invalid_target<S: ToString>(target: S) -> Self {
        Self::InvalidRequestTarget { target: target.to_string() }
    }
}
