//! Memory backend data types.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::index::Record;

/// A stored memory as returned to callers.
///
/// `distance` is the raw cosine distance of the record to the query that
/// produced it (lower = more similar), exposed untransformed so callers can
/// apply their own thresholds. Listings carry no query, so no distance.
#[derive(Debug, Clone, Serialize)]
pub struct RecordView {
    /// Unique identifier, generated at store time.
    pub id: String,
    /// Text the memory was stored under (the similarity target).
    pub key: String,
    /// Payload attached at store time.
    pub value: String,
    /// Full stored metadata map, `key`/`value` entries included.
    pub metadata: Map<String, Value>,
    /// Cosine distance from the query (lower = more similar).
    pub distance: Option<f64>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl From<Record> for RecordView {
    fn from(record: Record) -> Self {
        let value = match record.metadata.get("value") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        Self {
            id: record.id,
            key: record.key,
            value,
            metadata: record.metadata,
            distance: record.distance,
            created_at: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_metadata(metadata: Map<String, Value>) -> Record {
        Record {
            id: "id-1".to_string(),
            key: "alpha".to_string(),
            metadata,
            distance: Some(0.25),
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_view_extracts_string_value() {
        let mut meta = Map::new();
        meta.insert("value".to_string(), Value::String("payload".to_string()));

        let view = RecordView::from(record_with_metadata(meta));
        assert_eq!(view.value, "payload");
        assert_eq!(view.distance, Some(0.25));
    }

    #[test]
    fn test_view_missing_value_is_empty() {
        let view = RecordView::from(record_with_metadata(Map::new()));
        assert_eq!(view.value, "");
    }

    #[test]
    fn test_view_scalar_value_is_rendered() {
        let mut meta = Map::new();
        meta.insert("value".to_string(), Value::from(7));

        let view = RecordView::from(record_with_metadata(meta));
        assert_eq!(view.value, "7");
    }
}
