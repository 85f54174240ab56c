use std::{fmt, str::FromStr};

use crate::messages::error::MessageError;

/// Every event name exchanged with the transport
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventName {
    MemberJoined,
    MemberLeft,
    PoseUpdate,
    AnimationChanged,
    LobbyCreated,
    CountdownTick,
    GameStart,
    RosterSnapshot,
    RosterRequest,
    HealthChanged,
    Died,
    Respawned,
    AttackPerformed,
    SkillUsed,
    ProjectileSpawned,
    VisualEffectSpawned,
    TransformApplied,
    TransformEnded,
}

/// Groups of gameplay notices that are routed to active entities without
/// being interpreted by the synchronization core
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoticeCategory {
    Vitals,
    Combat,
    Skills,
    Transformation,
}

impl EventName {
    /// Events a session subscribes to
    pub const INBOUND: [EventName; 17] = [
        EventName::MemberJoined,
        EventName::MemberLeft,
        EventName::PoseUpdate,
        EventName::AnimationChanged,
        EventName::LobbyCreated,
        EventName::CountdownTick,
        EventName::GameStart,
        EventName::RosterSnapshot,
        EventName::HealthChanged,
        EventName::Died,
        EventName::Respawned,
        EventName::AttackPerformed,
        EventName::SkillUsed,
        EventName::ProjectileSpawned,
        EventName::VisualEffectSpawned,
        EventName::TransformApplied,
        EventName::TransformEnded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::MemberJoined => "member-joined",
            EventName::MemberLeft => "member-left",
            EventName::PoseUpdate => "pose-update",
            EventName::AnimationChanged => "animation-changed",
            EventName::LobbyCreated => "lobby-created",
            EventName::CountdownTick => "countdown-tick",
            EventName::GameStart => "game-start",
            EventName::RosterSnapshot => "roster-snapshot",
            EventName::RosterRequest => "roster-request",
            EventName::HealthChanged => "health-changed",
            EventName::Died => "died",
            EventName::Respawned => "respawned",
            EventName::AttackPerformed => "attack-performed",
            EventName::SkillUsed => "skill-used",
            EventName::ProjectileSpawned => "projectile-spawned",
            EventName::VisualEffectSpawned => "visual-effect-spawned",
            EventName::TransformApplied => "transform-applied",
            EventName::TransformEnded => "transform-ended",
        }
    }

    pub fn is_inbound(&self) -> bool {
        *self != EventName::RosterRequest
    }

    /// `Some` for pass-through gameplay notices, `None` for events the
    /// synchronization core handles itself
    pub fn notice_category(&self) -> Option<NoticeCategory> {
        match self {
            EventName::HealthChanged | EventName::Died | EventName::Respawned => {
                Some(NoticeCategory::Vitals)
            }
            EventName::AttackPerformed | EventName::ProjectileSpawned => {
                Some(NoticeCategory::Combat)
            }
            EventName::SkillUsed | EventName::VisualEffectSpawned => Some(NoticeCategory::Skills),
            EventName::TransformApplied | EventName::TransformEnded => {
                Some(NoticeCategory::Transformation)
            }
            _ => None,
        }
    }
}

impl FromStr for EventName {
    type Err = MessageError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let event = match name {
            "member-joined" => EventName::MemberJoined,
            "member-left" => EventName::MemberLeft,
            "pose-update" => EventName::PoseUpdate,
            "animation-changed" => EventName::AnimationChanged,
            "lobby-created" => EventName::LobbyCreated,
            "countdown-tick" => EventName::CountdownTick,
            "game-start" => EventName::GameStart,
            "roster-snapshot" => EventName::RosterSnapshot,
            "roster-request" => EventName::RosterRequest,
            "health-changed" => EventName::HealthChanged,
            "died" => EventName::Died,
            "respawned" => EventName::Respawned,
            "attack-performed" => EventName::AttackPerformed,
            "skill-used" => EventName::SkillUsed,
            "projectile-spawned" => EventName::ProjectileSpawned,
            "visual-effect-spawned" => EventName::VisualEffectSpawned,
            "transform-applied" => EventName::TransformApplied,
            "transform-ended" => EventName::TransformEnded,
            _ => {
                return Err(MessageError::UnknownEvent {
                    name: name.to_string(),
                })
            }
        };
        Ok(event)
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
