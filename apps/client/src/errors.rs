use thiserror::Error;

use crate::ai_client::AiError;

/// Application-level error type.
///
/// Every user-visible failure renders through `user_message()` as a one-shot
/// notification. Nothing here is persisted error state, and nothing retries;
/// recovery is always a fresh explicit user action.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("AI service error: {0}")]
    Ai(#[from] AiError),

    #[error("Plan response was malformed: {0}")]
    PlanFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Short notification text. The detailed cause goes to the log, not to
    /// the user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Ai(e) => {
                tracing::error!("AI service error: {e}");
                "An AI processing error occurred. Please try again.".to_string()
            }
            AppError::PlanFormat(msg) => {
                tracing::error!("Plan parse error: {msg}");
                "Failed to generate plan. Please try again.".to_string()
            }
            AppError::Export(msg) => {
                tracing::error!("Export error: {msg}");
                "Could not export the plan. Please try again.".to_string()
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {e}");
                "A file system error occurred.".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal error occurred.".to_string()
            }
        }
    }
}
