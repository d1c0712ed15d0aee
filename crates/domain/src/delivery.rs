use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Chat,
}

/// Outcome of one send attempt for one (recipient, channel) pair. Never
/// persisted, only aggregated into a `DispatchSummary`.
#[derive(Debug, Clone)]
pub struct DeliveryResult {
    pub recipient_id: ID,
    pub channel: Channel,
    pub success: bool,
    pub provider_message_id: Option<String>,
    pub error: Option<String>,
}

/// Aggregate outcome of a dispatch cycle. Counts are per recipient: a
/// recipient succeeded iff every channel attempted for it succeeded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}
