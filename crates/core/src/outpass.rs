//! Outpass lifecycle state machine.
//!
//! Every status write in the system -- the admin PATCH endpoint, the scan
//! confirmation workflow, and the reconciliation sweep -- goes through
//! [`transition`], so the lifecycle rules live in exactly one place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of an outpass.
///
/// `Rejected` and `Expired` are terminal: no event moves an outpass out of
/// either state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutpassStatus {
    /// Created by a student, awaiting an admin/authority decision.
    Pending,
    /// Cleared to leave; the QR code is live from this point.
    Approved,
    /// Refused by an admin/authority. Terminal.
    Rejected,
    /// The student has physically left (EXIT scan recorded).
    Exited,
    /// The student has returned (ENTRY scan recorded).
    Entered,
    /// Invalidated by an explicit override. Terminal.
    Expired,
}

impl OutpassStatus {
    /// Database/wire representation (lowercase, matches the `status` column
    /// check constraint).
    pub fn as_str(self) -> &'static str {
        match self {
            OutpassStatus::Pending => "pending",
            OutpassStatus::Approved => "approved",
            OutpassStatus::Rejected => "rejected",
            OutpassStatus::Exited => "exited",
            OutpassStatus::Entered => "entered",
            OutpassStatus::Expired => "expired",
        }
    }

    /// Whether no further event may be applied.
    pub fn is_terminal(self) -> bool {
        matches!(self, OutpassStatus::Rejected | OutpassStatus::Expired)
    }
}

impl fmt::Display for OutpassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutpassStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OutpassStatus::Pending),
            "approved" => Ok(OutpassStatus::Approved),
            "rejected" => Ok(OutpassStatus::Rejected),
            "exited" => Ok(OutpassStatus::Exited),
            "entered" => Ok(OutpassStatus::Entered),
            "expired" => Ok(OutpassStatus::Expired),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A status string that is not part of the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown outpass status '{0}'")]
pub struct UnknownStatus(pub String);

/// Events that drive the outpass lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutpassEvent {
    /// Admin/authority approves a pending request.
    Approve,
    /// Admin/authority rejects a pending request.
    Reject,
    /// Send-off security records a physical exit (EXIT scan confirmed).
    ExitScan,
    /// Send-off security records a physical return (ENTRY scan confirmed).
    EntryScan,
    /// Admin/security invalidates the pass.
    ForceExpire,
}

/// The event is not legal from the given status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cannot apply {event:?} to an outpass in status '{from}'")]
pub struct InvalidTransition {
    pub from: OutpassStatus,
    pub event: OutpassEvent,
}

/// Apply `event` to an outpass in status `current`, returning the next
/// status or [`InvalidTransition`].
///
/// The full table:
///
/// | From                      | Event       | To       |
/// |---------------------------|-------------|----------|
/// | pending                   | Approve     | approved |
/// | pending                   | Reject      | rejected |
/// | approved                  | ExitScan    | exited   |
/// | exited                    | EntryScan   | entered  |
/// | approved/exited/entered   | ForceExpire | expired  |
///
/// Everything else is refused, including any event on the terminal states
/// `rejected` and `expired`.
pub fn transition(
    current: OutpassStatus,
    event: OutpassEvent,
) -> Result<OutpassStatus, InvalidTransition> {
    use OutpassEvent::*;
    use OutpassStatus::*;

    match (current, event) {
        (Pending, Approve) => Ok(Approved),
        (Pending, Reject) => Ok(Rejected),
        (Approved, ExitScan) => Ok(Exited),
        (Exited, EntryScan) => Ok(Entered),
        (Approved | Exited | Entered, ForceExpire) => Ok(Expired),
        (from, event) => Err(InvalidTransition { from, event }),
    }
}
