//! Queue records: the raw batch input
use serde::{Deserialize, Serialize};

/// One queued message as handed over by the queue platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueRecord {
    /// Queue-assigned identifier, echoed back in the batch report
    #[serde(alias = "messageId")]
    pub id: String,
    /// Raw body: a serialized envelope or arbitrary text
    #[serde(default)]
    pub body: String,
}

impl QueueRecord {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }
}

/// A batch submission as posted by the queue platform
#[derive(Debug, Clone, Deserialize)]
pub struct QueueBatch {
    #[serde(alias = "Records", default)]
    pub records: Vec<QueueRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accepts_platform_field_name() {
        let record: QueueRecord =
            serde_json::from_str(r#"{"messageId": "m-1", "body": "hello"}"#).unwrap();
        assert_eq!(record.id, "m-1");
        assert_eq!(record.body, "hello");
    }

    #[test]
    fn test_batch_accepts_platform_list_name() {
        let batch: QueueBatch = serde_json::from_str(
            r#"{"Records": [{"messageId": "m-1", "body": "a"}, {"id": "m-2", "body": "b"}]}"#,
        )
        .unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[0].id, "m-1");
        assert_eq!(batch.records[1].id, "m-2");
    }

    #[test]
    fn test_missing_records_is_an_empty_batch() {
        let batch: QueueBatch = serde_json::from_str("{}").unwrap();
        assert!(batch.records.is_empty());
    }
}
