//! Render generation status values and transition rules.
//!
//! Generations are executed by an external worker; the API only records the
//! status it reports and rejects transitions that would move a finished job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Status of a single render generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// All statuses in lifecycle order.
pub const ALL_STATUSES: &[GenerationStatus] = &[
    GenerationStatus::Pending,
    GenerationStatus::Processing,
    GenerationStatus::Completed,
    GenerationStatus::Failed,
];

impl GenerationStatus {
    /// Database / wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// `true` once the job can no longer change.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns the statuses this one may move to.
    ///
    /// - `pending`    -> `processing`, `failed`
    /// - `processing` -> `completed`, `failed`
    /// - terminal states accept nothing
    pub fn valid_transitions(self) -> &'static [GenerationStatus] {
        match self {
            Self::Pending => &[Self::Processing, Self::Failed],
            Self::Processing => &[Self::Completed, Self::Failed],
            Self::Completed | Self::Failed => &[],
        }
    }

    /// Re-reporting the current non-terminal status is accepted as a no-op.
    pub fn can_transition_to(self, next: GenerationStatus) -> bool {
        (self == next && !self.is_terminal()) || self.valid_transitions().contains(&next)
    }
}

/// Validate that a generation may move from `current` to `next`.
pub fn validate_transition(
    current: GenerationStatus,
    next: GenerationStatus,
) -> Result<(), CoreError> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot transition generation from '{current}' to '{next}'. Allowed transitions: {:?}",
            current
                .valid_transitions()
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
        )))
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_STATUSES
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid generation status '{s}'. Must be one of: pending, processing, completed, failed"
                ))
            })
    }
}
