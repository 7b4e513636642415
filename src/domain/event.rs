use super::region::{Currency, Region};
use crate::error::ErrorKind;
use serde::Serialize;

/// Progress of a single `pay` call.
///
/// Stages only move forward: `Created → Resolved → Routed → Completed | Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStage {
    Created,
    Resolved,
    Routed,
    Completed,
    Failed,
}

impl PaymentStage {
    /// Returns the next stage on the success path. Terminal stages stay put.
    pub fn advance(self) -> Self {
        match self {
            PaymentStage::Created => PaymentStage::Resolved,
            PaymentStage::Resolved => PaymentStage::Routed,
            PaymentStage::Routed => PaymentStage::Completed,
            PaymentStage::Completed => PaymentStage::Completed,
            PaymentStage::Failed => PaymentStage::Failed,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PaymentStage::Completed | PaymentStage::Failed)
    }
}

/// Emitted to the [`EventReporter`](super::ports::EventReporter) whenever a
/// payment fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureEvent {
    pub region: Region,
    pub currency: Currency,
    pub kind: ErrorKind,
    /// Last stage reached before failing.
    pub stage: PaymentStage,
    pub reference: String,
}
