use chrono::{DateTime, Utc};
use serde::Serialize;

/// Downloadable record of one operation: what was asked, when, and what came back.
#[derive(Debug, Clone, Serialize)]
pub struct ExportPayload<T> {
    pub operation: String,
    pub inputs: serde_json::Value,
    pub timestamp: DateTime<Utc>,
    pub results: T,
}

impl<T: Serialize> ExportPayload<T> {
    pub fn new(operation: &str, inputs: serde_json::Value, results: T) -> Self {
        Self::at(operation, inputs, results, Utc::now())
    }

    pub fn at(operation: &str, inputs: serde_json::Value, results: T, timestamp: DateTime<Utc>) -> Self {
        ExportPayload {
            operation: operation.to_string(),
            inputs,
            timestamp,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn serializes_operation_inputs_timestamp_and_results() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
        let payload = ExportPayload::at(
            "find_similar_transactions",
            json!({ "query": "From Liam Johnson", "threshold": 0.5 }),
            vec!["t1"],
            ts,
        );

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["operation"], "find_similar_transactions");
        assert_eq!(value["inputs"]["query"], "From Liam Johnson");
        assert_eq!(value["timestamp"], "2024-03-15T09:30:00Z");
        assert_eq!(value["results"], json!(["t1"]));
    }

    #[test]
    fn new_stamps_current_time() {
        let before = Utc::now();
        let payload = ExportPayload::new("add_user", json!({ "name": "Aria Cox" }), ());
        assert!(payload.timestamp >= before);
    }
}
