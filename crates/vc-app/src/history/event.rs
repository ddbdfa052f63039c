use serde::Serialize;
use vc_core::RecordId;

/// Change notification published by the [`HistoryStore`](super::HistoryStore).
///
/// Carries ids, counts and error kinds only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryEvent {
    Added { id: RecordId },
    Evicted { id: RecordId },
    Cleared { removed: usize },
    CaptureDropped { kind: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_as_tagged_objects() {
        let value = serde_json::to_value(HistoryEvent::CaptureDropped {
            kind: "key_store_error",
        })
        .expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({ "type": "capture_dropped", "kind": "key_store_error" })
        );

        let value = serde_json::to_value(HistoryEvent::Cleared { removed: 3 }).expect("serialize");
        assert_eq!(value, serde_json::json!({ "type": "cleared", "removed": 3 }));
    }
}
