use crate::{
    messages::{error::MessageError, event_name::EventName, Payload},
    types::NetworkId,
};

/// A gameplay notice addressed to one entity. Only the `id` field is read;
/// the rest of the payload is opaque to this crate.
#[derive(Clone, Debug, PartialEq)]
pub struct GameplayNotice {
    pub event: EventName,
    pub id: NetworkId,
    pub payload: Payload,
}

impl GameplayNotice {
    pub fn decode(event: EventName, payload: &Payload) -> Result<Self, MessageError> {
        let id = payload
            .get("id")
            .and_then(|id| id.as_str())
            .filter(|id| !id.is_empty())
            .ok_or(MessageError::MissingId {
                event: event.as_str(),
            })?;

        Ok(Self {
            event,
            id: NetworkId::new(id),
            payload: payload.clone(),
        })
    }
}
