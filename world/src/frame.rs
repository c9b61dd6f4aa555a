//! Extraction of breach events from action frames.

use lane_defence_core::{Breach, Owner, Position};
use serde_json::Value;
use thiserror::Error;

use crate::GameStateMessage;

/// Owner code the engine uses for the receiving player in raw frame data.
const SELF_OWNER: i64 = 1;
/// Owner code the engine uses for the opponent in raw frame data.
const OPPONENT_OWNER: i64 = 2;

/// Errors raised while reading the event section of an action frame.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The frame carries no `events` object.
    #[error("action frame has no events section")]
    MissingEvents,
    /// The `events` object carries no `breach` list.
    #[error("action frame has no breach list")]
    MissingBreachList,
    /// A breach record lacks a field or holds a value of the wrong type.
    #[error("breach record {index} has a malformed {field}")]
    MalformedBreach {
        /// Position of the record within the breach list.
        index: usize,
        /// Name of the offending field.
        field: &'static str,
    },
    /// A breach record names an owner the engine never uses.
    #[error("breach record {index} has unknown owner code {code}")]
    UnknownOwner {
        /// Position of the record within the breach list.
        index: usize,
        /// Raw owner code.
        code: i64,
    },
}

impl GameStateMessage {
    /// Breach records reported in this action frame.
    ///
    /// Each record is `[[x, y], damage, unit_type, unit_id, owner]` with owner
    /// `1` for this player and `2` for the opponent.
    pub fn breaches(&self) -> Result<Vec<Breach>, FrameError> {
        let events = self.events.as_ref().ok_or(FrameError::MissingEvents)?;
        let records = events
            .get("breach")
            .and_then(Value::as_array)
            .ok_or(FrameError::MissingBreachList)?;
        records
            .iter()
            .enumerate()
            .map(|(index, record)| breach(index, record))
            .collect()
    }
}

fn breach(index: usize, record: &Value) -> Result<Breach, FrameError> {
    let malformed = |field| FrameError::MalformedBreach { index, field };
    let fields = record.as_array().ok_or(malformed("record"))?;

    let position = fields
        .first()
        .and_then(position)
        .ok_or(malformed("position"))?;
    let damage = fields
        .get(1)
        .and_then(Value::as_f64)
        .ok_or(malformed("damage"))? as f32;
    let unit_type = fields
        .get(2)
        .and_then(Value::as_u64)
        .and_then(|raw| u32::try_from(raw).ok())
        .ok_or(malformed("unit type"))?;
    let unit_id = fields
        .get(3)
        .and_then(|value| match value {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        })
        .ok_or(malformed("unit id"))?;
    let code = fields
        .get(4)
        .and_then(Value::as_i64)
        .ok_or(malformed("owner"))?;
    let owner = match code {
        SELF_OWNER => Owner::Player,
        OPPONENT_OWNER => Owner::Opponent,
        code => return Err(FrameError::UnknownOwner { index, code }),
    };

    Ok(Breach {
        position,
        damage,
        unit_type,
        unit_id,
        owner,
    })
}

fn position(value: &Value) -> Option<Position> {
    let pair = value.as_array()?;
    let x = i32::try_from(pair.first()?.as_i64()?).ok()?;
    let y = i32::try_from(pair.get(1)?.as_i64()?).ok()?;
    Some(Position::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(events: &str) -> GameStateMessage {
        GameStateMessage::from_json(&format!(
            r#"{{"turnInfo": [1, 4, 30, 0], "events": {events}}}"#
        ))
        .expect("valid frame")
    }

    #[test]
    fn reads_breaches_for_both_owners() {
        let message = frame(r#"{"breach": [[[5, 13], 1, 3, "41", 2], [[10, 0], 1, 3, "7", 1]]}"#);
        let breaches = message.breaches().expect("breaches");

        assert_eq!(breaches.len(), 2);
        assert_eq!(breaches[0].position, Position::new(5, 13));
        assert_eq!(breaches[0].owner, Owner::Opponent);
        assert_eq!(breaches[0].unit_id, "41");
        assert_eq!(breaches[1].owner, Owner::Player);
    }

    #[test]
    fn empty_breach_list_yields_nothing() {
        let message = frame(r#"{"breach": [], "death": []}"#);
        assert!(message.breaches().expect("breaches").is_empty());
    }

    #[test]
    fn missing_owner_is_fatal() {
        let message = frame(r#"{"breach": [[[5, 13], 1, 3, "41"]]}"#);
        assert!(matches!(
            message.breaches(),
            Err(FrameError::MalformedBreach {
                index: 0,
                field: "owner"
            })
        ));
    }

    #[test]
    fn unknown_owner_code_is_fatal() {
        let message = frame(r#"{"breach": [[[5, 13], 1, 3, "41", 0]]}"#);
        assert!(matches!(
            message.breaches(),
            Err(FrameError::UnknownOwner { index: 0, code: 0 })
        ));
    }

    #[test]
    fn frame_without_events_is_fatal() {
        let message =
            GameStateMessage::from_json(r#"{"turnInfo": [1, 4, 30, 0]}"#).expect("valid frame");
        assert!(matches!(message.breaches(), Err(FrameError::MissingEvents)));
    }
}
