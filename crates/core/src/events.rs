//! Event contract with the external grammar engine.
//!
//! The grammar engine owns the deck text; this crate only sees its reduced
//! form: group boundaries and typed keyword assignments. The events carry
//! serde derives so a captured stream round-trips as JSON (the `optdeck`
//! binary consumes exactly that representation).

use crate::records::RecordKind;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// One event from the grammar engine, in deck order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DeckEvent {
    BeginGroup {
        kind: RecordKind,
    },
    SetField {
        kind: RecordKind,
        keyword: String,
        value: Value,
    },
    EndGroup {
        kind: RecordKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_stream_round_trips_as_json() {
        let events = vec![
            DeckEvent::BeginGroup {
                kind: RecordKind::Variables,
            },
            DeckEvent::SetField {
                kind: RecordKind::Variables,
                keyword: "normal_means".to_string(),
                value: Value::RealList(vec![1.0, 2.0]),
            },
            DeckEvent::EndGroup {
                kind: RecordKind::Variables,
            },
        ];
        let json = serde_json::to_string(&events).unwrap();
        let back: Vec<DeckEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, events);
    }

    #[test]
    fn tagged_representation_is_stable() {
        let ev = DeckEvent::SetField {
            kind: RecordKind::Method,
            keyword: "seed".to_string(),
            value: Value::Int(42),
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["event"], "set_field");
        assert_eq!(json["kind"], "method");
        assert_eq!(json["value"]["int"], 42);
    }
}
