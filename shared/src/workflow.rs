//! Two-state contract for work that completes later
//!
//! Camera acquisition and import/export runs report through an
//! [`Operation`]: it starts pending and settles exactly once.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Lifecycle of a simulated asynchronous workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Operation<T> {
    Pending {
        /// Reported progress, 0..=100
        progress: u8,
    },
    Succeeded {
        output: T,
    },
    Failed {
        reason: String,
    },
}

impl<T> Default for Operation<T> {
    fn default() -> Self {
        Operation::Pending { progress: 0 }
    }
}

impl<T> Operation<T> {
    pub fn pending() -> Self {
        Self::default()
    }

    fn state_name(&self) -> &'static str {
        match self {
            Operation::Pending { .. } => "pending",
            Operation::Succeeded { .. } => "succeeded",
            Operation::Failed { .. } => "failed",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Operation::Pending { .. })
    }

    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    /// Record progress; values above 100 are capped and progress never goes backwards
    pub fn advance(&mut self, percent: u8) -> CoreResult<()> {
        match self {
            Operation::Pending { progress } => {
                *progress = (*progress).max(percent.min(100));
                Ok(())
            }
            settled => Err(CoreError::InvalidStateTransition {
                action: "advance",
                state: settled.state_name(),
            }),
        }
    }

    pub fn succeed(&mut self, output: T) -> CoreResult<()> {
        self.settle("complete")?;
        *self = Operation::Succeeded { output };
        Ok(())
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> CoreResult<()> {
        self.settle("fail")?;
        *self = Operation::Failed { reason: reason.into() };
        Ok(())
    }

    fn settle(&self, action: &'static str) -> CoreResult<()> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(CoreError::InvalidStateTransition {
                action,
                state: self.state_name(),
            })
        }
    }

    pub fn progress(&self) -> u8 {
        match self {
            Operation::Pending { progress } => *progress,
            _ => 100,
        }
    }

    pub fn output(&self) -> Option<&T> {
        match self {
            Operation::Succeeded { output } => Some(output),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Operation::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    /// Settle from a fallible result
    pub fn settle_with<E: std::fmt::Display>(&mut self, result: Result<T, E>) -> CoreResult<()> {
        match result {
            Ok(output) => self.succeed(output),
            Err(e) => self.fail(e.to_string()),
        }
    }
}
