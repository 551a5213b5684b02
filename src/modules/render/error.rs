use super::model::{JobState, TransitionError};
use crate::common::response::ApiError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum RenderJobError {
    /// `field` is the request field's wire name.
    #[error("{reason}")]
    Validation { field: &'static str, reason: String },
    #[error("not found")]
    NotFound,
    #[error("cannot move job from {from} to {to}")]
    InvalidTransition { from: JobState, to: JobState },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl RenderJobError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

impl From<TransitionError> for RenderJobError {
    fn from(err: TransitionError) -> Self {
        Self::InvalidTransition {
            from: err.from,
            to: err.to,
        }
    }
}

impl From<RenderJobError> for ApiError {
    fn from(err: RenderJobError) -> Self {
        match err {
            RenderJobError::Validation { field, reason } => ApiError::bad_request(reason).with_field(field),
            RenderJobError::NotFound => ApiError::not_found("not found"),
            err @ (RenderJobError::InvalidTransition { .. } | RenderJobError::Internal(_)) => {
                error!(error = ?err, "render job operation failed");
                ApiError::internal()
            }
        }
    }
}
