//! Wire codec for the connection-status notification.
//!
//! The phone app parses the characteristic value as JSON:
//!
//! ```text
//! {"State":1,"Reason":0}
//! ```
//!
//! Keys are case-sensitive and always appear in this order.  Values are
//! the raw numeric codes, so the output is plain ASCII.

use serde::{Deserialize, Serialize};

use crate::app::events::{ConnectionStateEvent, DeviceState, StateReason};

/// The serialised shape of one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayload {
    #[serde(rename = "State")]
    pub state: u32,
    #[serde(rename = "Reason")]
    pub reason: u32,
}

impl From<&ConnectionStateEvent> for StatusPayload {
    fn from(ev: &ConnectionStateEvent) -> Self {
        Self {
            state: ev.state.code(),
            reason: ev.reason.code(),
        }
    }
}

impl StatusPayload {
    /// Back to a typed event; `None` when the state code is unknown.
    pub fn to_event(self) -> Option<ConnectionStateEvent> {
        let state = DeviceState::from_code(self.state)?;
        Some(ConnectionStateEvent::new(state, StateReason(self.reason)))
    }
}

/// Serialise `ev` into the notification bytes.
pub fn encode(ev: &ConnectionStateEvent) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&StatusPayload::from(ev))
}

/// Parse notification bytes.
pub fn decode(bytes: &[u8]) -> Result<StatusPayload, serde_json::Error> {
    serde_json::from_slice(bytes)
}
