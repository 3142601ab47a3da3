use serde::{Deserialize, Serialize};

/// Response body of the identity query endpoint.
///
/// Serialized untagged so the wire shape is exactly
/// `{"data": ..., "updated": N}` or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Data {
        data: serde_json::Value,
        updated: u64,
    },
    Error {
        error: String,
    },
}

impl QueryResponse {
    pub fn data(data: serde_json::Value, updated: u64) -> Self {
        Self::Data { data, updated }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_response_wire_shape() {
        let resp = QueryResponse::data(serde_json::json!({"items": []}), 5);
        assert_eq!(
            serde_json::to_string(&resp).unwrap(),
            r#"{"data":{"items":[]},"updated":5}"#
        );
    }

    #[test]
    fn error_response_wire_shape() {
        let resp = QueryResponse::error("upstream unavailable");
        assert_eq!(
            serde_json::to_string(&resp).unwrap(),
            r#"{"error":"upstream unavailable"}"#
        );
    }

    #[test]
    fn deserialize_picks_data_variant() {
        let resp: QueryResponse =
            serde_json::from_str(r#"{"data": {"items": []}, "updated": 0}"#).unwrap();
        assert!(matches!(resp, QueryResponse::Data { updated: 0, .. }));
    }

    #[test]
    fn deserialize_picks_error_variant() {
        let resp: QueryResponse = serde_json::from_str(r#"{"error": "nope"}"#).unwrap();
        assert_eq!(resp, QueryResponse::error("nope"));
    }
}
