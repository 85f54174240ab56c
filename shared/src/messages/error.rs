use thiserror::Error;

/// Errors that can occur while decoding or encoding transport payloads
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Event name not understood by this crate
    #[error("Unknown event name '{name}'. The message is ignored")]
    UnknownEvent {
        name: String,
    },

    /// Event known to this crate, but only ever sent, never received
    #[error("Event '{event}' is outbound only and cannot be received")]
    NotInbound {
        event: &'static str,
    },

    /// Payload does not match the schema of its event
    #[error("Malformed '{event}' payload: {reason}")]
    Malformed {
        event: &'static str,
        reason: String,
    },

    /// Payload carries NaN or infinite numbers where world coordinates are expected
    #[error("Non-finite value in field '{field}' of '{event}' payload")]
    NonFinite {
        event: &'static str,
        field: &'static str,
    },

    /// Sender timestamp outside the range the clock-offset estimate can represent
    #[error("Timestamp {timestamp_ms}ms of '{event}' payload is out of range")]
    TimestampOutOfRange {
        event: &'static str,
        timestamp_ms: u64,
    },

    /// Per-entity payload without an `id` string field
    #[error("'{event}' payload is missing the entity id")]
    MissingId {
        event: &'static str,
    },

    /// Outbound record could not be converted into a payload
    #[error("Failed to encode '{event}' payload: {reason}")]
    Encode {
        event: &'static str,
        reason: String,
    },
}
