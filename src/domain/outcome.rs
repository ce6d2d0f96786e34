//! Per-operation outcome reporting.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::error::ClientError;

/// How one operation of one tick settled.
///
/// Produced exactly once per operation per tick and consumed only for
/// logging; never persisted.
#[derive(Debug)]
pub enum OperationOutcome {
    Succeeded { elapsed: Duration },
    Skipped { reason: &'static str },
    Failed { error: ClientError },
}

impl OperationOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, OperationOutcome::Succeeded { .. })
    }

    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, OperationOutcome::Skipped { .. })
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, OperationOutcome::Failed { .. })
    }

    /// Emit the structured log line for this outcome.
    pub fn log(&self, operation: &'static str) {
        match self {
            OperationOutcome::Succeeded { elapsed } => {
                info!(
                    operation,
                    elapsed_secs = elapsed.as_secs_f64(),
                    "operation succeeded"
                );
            }
            OperationOutcome::Skipped { reason } => {
                warn!(operation, reason, "operation skipped");
            }
            OperationOutcome::Failed { error } => {
                error!(operation, error = %error, "operation failed");
            }
        }
    }
}
