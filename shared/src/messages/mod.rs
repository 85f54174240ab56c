pub mod error;
pub mod event_name;
pub mod inbound;
pub mod member;
pub mod notice;
pub mod pose_update;
pub mod roster;
pub mod session;

/// Structured record carried by every transport message. Encoding it for the
/// wire is the transport's responsibility.
pub type Payload = serde_json::Value;

use serde::{Deserialize, Serialize};

use crate::messages::{error::MessageError, event_name::EventName};

/// Implemented by every message this crate publishes
pub trait OutboundMessage: Serialize {
    const EVENT: EventName;

    fn encode(&self) -> Result<Payload, MessageError> {
        serde_json::to_value(self).map_err(|error| MessageError::Encode {
            event: Self::EVENT.as_str(),
            reason: error.to_string(),
        })
    }
}

pub(crate) fn decode_record<'de, T: Deserialize<'de>>(
    event: EventName,
    payload: &'de Payload,
) -> Result<T, MessageError> {
    T::deserialize(payload).map_err(|error| MessageError::Malformed {
        event: event.as_str(),
        reason: error.to_string(),
    })
}
