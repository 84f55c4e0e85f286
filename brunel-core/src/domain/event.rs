//! Event bus wire messages
//!
//! The server exposes a multiplexed WebSocket channel at `/api/event`.
//! Clients send subscribe/unsubscribe messages keyed by event type and
//! receive envelopes tagged with that type. The progress client only ever
//! uses a matching event as a trigger to re-fetch, so the payload stays
//! opaque.

use serde::{Deserialize, Serialize};

/// Event type announcing a freshly created job.
pub const EVENT_JOB_CREATED: &str = "JobCreated";

/// Subscription request for one event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscribe {
    pub subscribe: String,
}

/// Unsubscription request for one event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unsubscribe {
    pub unsubscribe: String,
}

/// An event received from the bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "Type")]
    pub event_type: String,
    /// Event payload; never interpreted by the progress client.
    #[serde(flatten)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_wire_shape() {
        let json = serde_json::to_string(&Subscribe {
            subscribe: EVENT_JOB_CREATED.to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"subscribe":"JobCreated"}"#);
    }

    #[test]
    fn test_envelope_keeps_payload_opaque() {
        let envelope: EventEnvelope =
            serde_json::from_str(r#"{"Type": "JobCreated", "JobID": "j1"}"#).unwrap();
        assert_eq!(envelope.event_type, "JobCreated");
        assert_eq!(envelope.data["JobID"], "j1");
    }
}
