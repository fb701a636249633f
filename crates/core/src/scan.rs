//! Scan verdict rules.
//!
//! A scan verdict is computed from the operator-selected mode and the
//! authoritative status fetched from the store -- never from the status
//! string embedded in the QR payload. Verdicts are domain outcomes, not
//! errors: a denial is a successful response the UI renders distinctly.

use serde::{Deserialize, Serialize};

use crate::outpass::{OutpassEvent, OutpassStatus};

/// Operator-selected scan context. Determines which transition a granted
/// scan will attempt on confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanMode {
    #[serde(rename = "EXIT")]
    Exit,
    #[serde(rename = "ENTRY")]
    Entry,
}

impl ScanMode {
    /// The lifecycle event a confirmed scan in this mode applies.
    pub fn event(self) -> OutpassEvent {
        match self {
            ScanMode::Exit => OutpassEvent::ExitScan,
            ScanMode::Entry => OutpassEvent::EntryScan,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScanMode::Exit => "EXIT",
            ScanMode::Entry => "ENTRY",
        }
    }
}

/// Why a scan was denied. The serialized form is the operator-facing
/// reason string shown on the scanner screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenialReason {
    /// Payload text was not valid QR JSON. No store lookup is performed.
    #[serde(rename = "Invalid QR Code Format")]
    MalformedPayload,
    /// The pass has been force-expired.
    #[serde(rename = "EXPIRED")]
    Expired,
    /// EXIT scan against a pass that has already left.
    #[serde(rename = "ALREADY EXITED")]
    AlreadyExited,
    /// ENTRY scan against a pass that has already returned.
    #[serde(rename = "ALREADY ENTERED")]
    AlreadyEntered,
    /// The pass was never approved (still pending, or rejected).
    #[serde(rename = "NOT APPROVED")]
    NotApproved,
    /// ENTRY scan against a pass with no recorded exit.
    #[serde(rename = "NOT EXITED")]
    NotExited,
}

impl DenialReason {
    /// The operator-facing reason string (same as the serialized form).
    pub fn as_str(self) -> &'static str {
        match self {
            DenialReason::MalformedPayload => "Invalid QR Code Format",
            DenialReason::Expired => "EXPIRED",
            DenialReason::AlreadyExited => "ALREADY EXITED",
            DenialReason::AlreadyEntered => "ALREADY ENTERED",
            DenialReason::NotApproved => "NOT APPROVED",
            DenialReason::NotExited => "NOT EXITED",
        }
    }
}

/// Outcome of evaluating a scan against the authoritative status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "lowercase")]
pub enum ScanVerdict {
    /// Access granted; confirmation may proceed to the ledger push and
    /// status transition.
    Granted,
    /// Access denied with an operator-facing reason. Nothing is persisted.
    Denied { reason: DenialReason },
}

impl ScanVerdict {
    pub fn is_granted(self) -> bool {
        matches!(self, ScanVerdict::Granted)
    }
}

/// Evaluate a scan in `mode` against the authoritative `status`.
///
/// Denial checks run in precedence order: expiry first, then duplicate-scan
/// guards, then the never-approved and never-exited gaps. A granted verdict
/// means (and only means) that the corresponding lifecycle event is legal
/// from `status`.
pub fn evaluate_scan(mode: ScanMode, status: OutpassStatus) -> ScanVerdict {
    use OutpassStatus::*;

    let reason = match (mode, status) {
        (_, Expired) => Some(DenialReason::Expired),
        (ScanMode::Exit, Exited | Entered) => Some(DenialReason::AlreadyExited),
        (ScanMode::Entry, Entered) => Some(DenialReason::AlreadyEntered),
        (_, Pending | Rejected) => Some(DenialReason::NotApproved),
        (ScanMode::Entry, Approved) => Some(DenialReason::NotExited),
        (ScanMode::Exit, Approved) | (ScanMode::Entry, Exited) => None,
    };

    match reason {
        Some(reason) => ScanVerdict::Denied { reason },
        None => ScanVerdict::Granted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outpass::transition;
    use OutpassStatus::*;

    #[test]
    fn test_exit_granted_only_from_approved() {
        assert_eq!(evaluate_scan(ScanMode::Exit, Approved), ScanVerdict::Granted);
        for &s in &[Pending, Rejected, Exited, Entered, Expired] {
            assert!(!evaluate_scan(ScanMode::Exit, s).is_granted());
        }
    }

    #[test]
    fn test_entry_granted_only_from_exited() {
        assert_eq!(evaluate_scan(ScanMode::Entry, Exited), ScanVerdict::Granted);
        for &s in &[Pending, Approved, Rejected, Entered, Expired] {
            assert!(!evaluate_scan(ScanMode::Entry, s).is_granted());
        }
    }

    #[test]
    fn test_duplicate_exit_denied_as_already_exited() {
        assert_eq!(
            evaluate_scan(ScanMode::Exit, Exited),
            ScanVerdict::Denied { reason: DenialReason::AlreadyExited }
        );
        assert_eq!(
            evaluate_scan(ScanMode::Exit, Entered),
            ScanVerdict::Denied { reason: DenialReason::AlreadyExited }
        );
    }

    #[test]
    fn test_duplicate_entry_denied_as_already_entered() {
        assert_eq!(
            evaluate_scan(ScanMode::Entry, Entered),
            ScanVerdict::Denied { reason: DenialReason::AlreadyEntered }
        );
    }

    #[test]
    fn test_expired_wins_over_everything() {
        assert_eq!(
            evaluate_scan(ScanMode::Exit, Expired),
            ScanVerdict::Denied { reason: DenialReason::Expired }
        );
        assert_eq!(
            evaluate_scan(ScanMode::Entry, Expired),
            ScanVerdict::Denied { reason: DenialReason::Expired }
        );
    }

    #[test]
    fn test_scan_on_never_approved_pass_denied() {
        for mode in [ScanMode::Exit, ScanMode::Entry] {
            assert_eq!(
                evaluate_scan(mode, Pending),
                ScanVerdict::Denied { reason: DenialReason::NotApproved }
            );
            assert_eq!(
                evaluate_scan(mode, Rejected),
                ScanVerdict::Denied { reason: DenialReason::NotApproved }
            );
        }
    }

    #[test]
    fn test_entry_before_exit_denied() {
        assert_eq!(
            evaluate_scan(ScanMode::Entry, Approved),
            ScanVerdict::Denied { reason: DenialReason::NotExited }
        );
    }

    #[test]
    fn test_granted_iff_transition_is_legal() {
        // A granted verdict and a legal transition must agree for every
        // (mode, status) pair, so verify and confirm can never disagree.
        for mode in [ScanMode::Exit, ScanMode::Entry] {
            for &status in &[Pending, Approved, Rejected, Exited, Entered, Expired] {
                let granted = evaluate_scan(mode, status).is_granted();
                let legal = transition(status, mode.event()).is_ok();
                assert_eq!(granted, legal, "disagreement at {mode:?}/{status:?}");
            }
        }
    }

    #[test]
    fn test_denial_reason_wire_strings() {
        let json = serde_json::to_value(DenialReason::AlreadyExited).unwrap();
        assert_eq!(json, "ALREADY EXITED");
        let json = serde_json::to_value(DenialReason::MalformedPayload).unwrap();
        assert_eq!(json, "Invalid QR Code Format");

        // as_str and the serialized form must never drift apart.
        for reason in [
            DenialReason::MalformedPayload,
            DenialReason::Expired,
            DenialReason::AlreadyExited,
            DenialReason::AlreadyEntered,
            DenialReason::NotApproved,
            DenialReason::NotExited,
        ] {
            assert_eq!(serde_json::to_value(reason).unwrap(), reason.as_str());
        }
    }
}
