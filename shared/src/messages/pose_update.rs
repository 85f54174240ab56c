use serde::{Deserialize, Serialize};

use crate::{
    math::{orientation_from_euler_degrees, orientation_to_euler_degrees, Vec3Record},
    messages::{error::MessageError, event_name::EventName, OutboundMessage},
    pose::{Pose, Snapshot},
    types::NetworkId,
};

/// `pose-update`: one pose and velocity sample of a participant.
/// Orientation travels as Euler angles in degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseUpdate {
    pub id: NetworkId,
    pub position: Vec3Record,
    pub orientation: Vec3Record,
    pub velocity: Vec3Record,
    pub timestamp_ms: u64,
}

impl PoseUpdate {
    pub fn from_snapshot(id: NetworkId, snapshot: &Snapshot) -> Self {
        Self {
            id,
            position: snapshot.position().into(),
            orientation: orientation_to_euler_degrees(snapshot.orientation()).into(),
            velocity: snapshot.velocity().into(),
            timestamp_ms: snapshot.timestamp_ms(),
        }
    }

    pub fn to_snapshot(&self, arrival_ms: u64) -> Snapshot {
        let pose = Pose::new(
            self.position.into(),
            orientation_from_euler_degrees(self.orientation.into()),
            self.timestamp_ms,
        );
        Snapshot::new(pose, self.velocity.into(), arrival_ms)
    }

    pub(crate) fn validate(&self) -> Result<(), MessageError> {
        validate_timestamp(EventName::PoseUpdate, Some(self.timestamp_ms))?;
        validate_vectors(
            EventName::PoseUpdate,
            &[
                ("position", &self.position),
                ("orientation", &self.orientation),
                ("velocity", &self.velocity),
            ],
        )
    }
}

impl OutboundMessage for PoseUpdate {
    const EVENT: EventName = EventName::PoseUpdate;
}

/// Pose attached to roster entries and join notices. Velocity and timestamp
/// are optional there; a missing timestamp means "as of arrival".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseRecord {
    pub position: Vec3Record,
    #[serde(default)]
    pub orientation: Vec3Record,
    #[serde(default)]
    pub velocity: Vec3Record,
    #[serde(default)]
    pub timestamp_ms: Option<u64>,
}

impl PoseRecord {
    pub fn to_snapshot(&self, arrival_ms: u64) -> Snapshot {
        let pose = Pose::new(
            self.position.into(),
            orientation_from_euler_degrees(self.orientation.into()),
            self.timestamp_ms.unwrap_or(arrival_ms),
        );
        Snapshot::new(pose, self.velocity.into(), arrival_ms)
    }

    pub(crate) fn validate(&self, event: EventName) -> Result<(), MessageError> {
        validate_timestamp(event, self.timestamp_ms)?;
        validate_vectors(
            event,
            &[
                ("position", &self.position),
                ("orientation", &self.orientation),
                ("velocity", &self.velocity),
            ],
        )
    }
}

// Sender timestamps are compared as signed milliseconds downstream.
const MAX_TIMESTAMP_MS: u64 = i64::MAX as u64;

fn validate_timestamp(event: EventName, timestamp_ms: Option<u64>) -> Result<(), MessageError> {
    match timestamp_ms {
        Some(timestamp_ms) if timestamp_ms > MAX_TIMESTAMP_MS => {
            Err(MessageError::TimestampOutOfRange {
                event: event.as_str(),
                timestamp_ms,
            })
        }
        _ => Ok(()),
    }
}

fn validate_vectors(
    event: EventName,
    fields: &[(&'static str, &Vec3Record)],
) -> Result<(), MessageError> {
    for &(field, value) in fields {
        if !value.is_finite() {
            return Err(MessageError::NonFinite {
                event: event.as_str(),
                field,
            });
        }
    }
    Ok(())
}
