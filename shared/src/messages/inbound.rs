use crate::messages::{
    decode_record,
    error::MessageError,
    event_name::EventName,
    member::{AnimationChanged, MemberJoined, MemberLeft},
    notice::GameplayNotice,
    pose_update::PoseUpdate,
    roster::RosterSnapshot,
    session::{CountdownTick, GameStart, LobbyCreated},
    Payload,
};

/// A validated inbound transport message
#[derive(Clone, Debug, PartialEq)]
pub enum InboundMessage {
    MemberJoined(MemberJoined),
    MemberLeft(MemberLeft),
    PoseUpdate(PoseUpdate),
    AnimationChanged(AnimationChanged),
    LobbyCreated(LobbyCreated),
    CountdownTick(CountdownTick),
    GameStart(GameStart),
    RosterSnapshot(RosterSnapshot),
    Notice(GameplayNotice),
}

impl InboundMessage {
    /// Parses and validates one payload. A failure only concerns this
    /// message; callers log it and move on to the next one.
    pub fn decode(event_name: &str, payload: &Payload) -> Result<Self, MessageError> {
        let event: EventName = event_name.parse()?;
        if !event.is_inbound() {
            return Err(MessageError::NotInbound {
                event: event.as_str(),
            });
        }

        let message = match event {
            EventName::MemberJoined => {
                let joined: MemberJoined = decode_record(event, payload)?;
                require_id(event, joined.id.is_empty())?;
                if let Some(pose) = &joined.pose {
                    pose.validate(event)?;
                }
                InboundMessage::MemberJoined(joined)
            }
            EventName::MemberLeft => {
                let left: MemberLeft = decode_record(event, payload)?;
                require_id(event, left.id.is_empty())?;
                InboundMessage::MemberLeft(left)
            }
            EventName::PoseUpdate => {
                let update: PoseUpdate = decode_record(event, payload)?;
                require_id(event, update.id.is_empty())?;
                update.validate()?;
                InboundMessage::PoseUpdate(update)
            }
            EventName::AnimationChanged => {
                let changed: AnimationChanged = decode_record(event, payload)?;
                require_id(event, changed.id.is_empty())?;
                InboundMessage::AnimationChanged(changed)
            }
            EventName::LobbyCreated => InboundMessage::LobbyCreated(decode_record(event, payload)?),
            EventName::CountdownTick => {
                InboundMessage::CountdownTick(decode_record(event, payload)?)
            }
            EventName::GameStart => {
                // an empty or null payload is a bare start signal
                let start: GameStart = if payload.is_null() {
                    GameStart::default()
                } else {
                    decode_record(event, payload)?
                };
                for entry in &start.roster {
                    if let Some(pose) = &entry.pose {
                        pose.validate(event)?;
                    }
                }
                InboundMessage::GameStart(start)
            }
            EventName::RosterSnapshot => {
                let roster: RosterSnapshot = decode_record(event, payload)?;
                for entry in &roster.players {
                    if let Some(pose) = &entry.pose {
                        pose.validate(event)?;
                    }
                }
                InboundMessage::RosterSnapshot(roster)
            }
            EventName::RosterRequest => {
                return Err(MessageError::NotInbound {
                    event: event.as_str(),
                })
            }
            _ => InboundMessage::Notice(GameplayNotice::decode(event, payload)?),
        };

        Ok(message)
    }

    pub fn event_name(&self) -> EventName {
        match self {
            InboundMessage::MemberJoined(_) => EventName::MemberJoined,
            InboundMessage::MemberLeft(_) => EventName::MemberLeft,
            InboundMessage::PoseUpdate(_) => EventName::PoseUpdate,
            InboundMessage::AnimationChanged(_) => EventName::AnimationChanged,
            InboundMessage::LobbyCreated(_) => EventName::LobbyCreated,
            InboundMessage::CountdownTick(_) => EventName::CountdownTick,
            InboundMessage::GameStart(_) => EventName::GameStart,
            InboundMessage::RosterSnapshot(_) => EventName::RosterSnapshot,
            InboundMessage::Notice(notice) => notice.event,
        }
    }
}

fn require_id(event: EventName, missing: bool) -> Result<(), MessageError> {
    if missing {
        return Err(MessageError::MissingId {
            event: event.as_str(),
        });
    }
    Ok(())
}
