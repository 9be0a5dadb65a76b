use std::str::FromStr;

use super::domain::BookingStatus;

/// How status updates are vetted against the booking's current status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionPolicy {
    /// Any status may replace any other.
    #[default]
    Permissive,
    /// Only the transitions listed by [`BookingStatus::successors`] are accepted.
    Strict,
}

impl TransitionPolicy {
    pub fn check(self, from: BookingStatus, to: BookingStatus) -> Result<(), InvalidTransition> {
        match self {
            TransitionPolicy::Permissive => Ok(()),
            TransitionPolicy::Strict if from.successors().contains(&to) => Ok(()),
            TransitionPolicy::Strict => Err(InvalidTransition { from, to }),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TransitionPolicy::Permissive => "permissive",
            TransitionPolicy::Strict => "strict",
        }
    }
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "permissive" | "legacy" => Ok(TransitionPolicy::Permissive),
            "strict" => Ok(TransitionPolicy::Strict),
            other => Err(other.to_string()),
        }
    }
}

impl BookingStatus {
    /// Statuses reachable in one step under the strict policy.
    pub const fn successors(self) -> &'static [BookingStatus] {
        match self {
            BookingStatus::Pending => &[BookingStatus::Approved, BookingStatus::Rejected],
            BookingStatus::Approved => &[BookingStatus::Confirmed, BookingStatus::Cancelled],
            BookingStatus::Rejected | BookingStatus::Confirmed | BookingStatus::Cancelled => &[],
        }
    }

    pub const fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("booking cannot move from {from} to {to}")]
pub struct InvalidTransition {
    pub from: BookingStatus,
    pub to: BookingStatus,
}
