//! JSON response types and formatting for CLI output.

use serde::Serialize;

use crate::memory_types::RecordView;

/// Response for a stored memory.
#[derive(Serialize)]
pub struct StoreResponse {
    pub id: String,
}

/// Response for recall results, closest first.
#[derive(Serialize)]
pub struct RecallResponse {
    pub results: Vec<RecordView>,
}

/// Response for a forget operation.
#[derive(Serialize)]
pub struct ForgetResponse {
    pub deleted_ids: Vec<String>,
}

/// Response for listing memories.
#[derive(Serialize)]
pub struct ListResponse {
    pub memories: Vec<RecordView>,
}

/// Response for errors.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Print a value as formatted JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn sample_view() -> RecordView {
        RecordView {
            id: "test-id".to_string(),
            key: "alpha".to_string(),
            value: "value-alpha".to_string(),
            metadata: Map::new(),
            distance: Some(0.12),
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_serialize_store_response() {
        let response = StoreResponse {
            id: "test-id".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"id":"test-id"}"#);
    }

    #[test]
    fn test_serialize_recall_response() {
        let response = RecallResponse {
            results: vec![sample_view()],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"results\""));
        assert!(json.contains("\"key\":\"alpha\""));
        assert!(json.contains("\"distance\":0.12"));
    }

    #[test]
    fn test_serialize_forget_response() {
        let response = ForgetResponse {
            deleted_ids: vec!["a".to_string(), "b".to_string()],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"deleted_ids":["a","b"]}"#);
    }

    #[test]
    fn test_serialize_error_response() {
        let response = ErrorResponse {
            error: "boom".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"error":"boom"}"#);
    }
}
