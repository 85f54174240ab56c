use cohort_shared::{OutboundMessage, MessageError, Payload};

/// The message transport a session talks through. Delivery is reliable and
/// ordered per event name; ordering across event names is not guaranteed.
///
/// Handlers may be invoked from any thread.
pub trait TransportChannel {
    /// Registers `handler` for `event_name`, replacing any handler previously
    /// registered for the same name.
    fn subscribe(&mut self, event_name: &str, handler: Box<dyn FnMut(Payload) + Send>);

    /// Fire-and-forget send.
    fn emit(&mut self, event_name: &str, payload: Payload);
}

pub(crate) fn emit_message<T: TransportChannel + ?Sized, M: OutboundMessage>(
    transport: &mut T,
    message: &M,
) -> Result<(), MessageError> {
    let payload = message.encode()?;
    transport.emit(M::EVENT.as_str(), payload);
    Ok(())
}
