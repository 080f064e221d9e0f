//! Persisted disclaimer state and consent errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the user last answered on the disclaimer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisclaimerState {
    pub agreed: bool,
    #[serde(default)]
    pub dont_show_again: bool,
}

impl DisclaimerState {
    pub const fn agreed(dont_show_again: bool) -> Self {
        Self {
            agreed: true,
            dont_show_again,
        }
    }

    pub const fn declined() -> Self {
        Self {
            agreed: false,
            dont_show_again: false,
        }
    }
}

/// Errors from reading or writing consent state.
#[derive(Debug, Error)]
pub enum ConsentError {
    #[error("consent state I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("consent state is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
