use serde::{Deserialize, Serialize};

pub const SOURCE_SCHEME: &str = "s3://";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageNotification {
    #[serde(rename = "Records")]
    pub records: Vec<StorageRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageRecord {
    pub s3: StorageEntity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageEntity {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectRef {
    pub key: String,
}

/// A single object-creation notification with its key already decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub bucket: String,
    pub key: String,
}

impl StorageEvent {
    pub fn source_locator(&self) -> String {
        source_locator(&self.bucket, &self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventError {
    message: String,
}

impl EventError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EventError {}

/// Decodes an object key as delivered in storage notifications: `+` stands
/// for a space and everything else is percent-encoded UTF-8.
pub fn decode_object_key(raw: &str) -> Result<String, EventError> {
    if let Some(position) = malformed_escape_position(raw) {
        return Err(EventError::new(format!(
            "object key '{raw}' has a malformed percent escape at byte {position}"
        )));
    }

    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|error| EventError::new(format!("object key '{raw}' is not valid UTF-8: {error}")))
}

/// Byte offset of the first `%` not followed by two hex digits.
fn malformed_escape_position(raw: &str) -> Option<usize> {
    let bytes = raw.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|(_, byte)| **byte == b'%')
        .map(|(position, _)| position)
        .find(|position| {
            !matches!(
                bytes.get(position + 1..position + 3),
                Some([high, low]) if high.is_ascii_hexdigit() && low.is_ascii_hexdigit()
            )
        })
}

pub fn source_locator(bucket: &str, key: &str) -> String {
    format!("{SOURCE_SCHEME}{bucket}/{key}")
}

/// Picks the first record of a notification and decodes its object key.
pub fn first_storage_event(notification: &StorageNotification) -> Result<StorageEvent, EventError> {
    let record = notification
        .records
        .first()
        .ok_or_else(|| EventError::new("storage notification must include at least one record"))?;

    Ok(StorageEvent {
        bucket: record.s3.bucket.name.clone(),
        key: decode_object_key(&record.s3.object.key)?,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_plus_as_space() {
        assert_eq!(decode_object_key("a+b.mp4").expect("key should decode"), "a b.mp4");
    }

    #[test]
    fn decodes_percent_sequences_after_plus_mapping() {
        assert_eq!(
            decode_object_key("inputs/caf%C3%A9+%2B+bar%2B.mov").expect("key should decode"),
            "inputs/café + bar+.mov"
        );
    }

    #[test]
    fn rejects_invalid_utf8_sequences() {
        let error = decode_object_key("bad%FF.mp4").expect_err("key should fail");
        assert!(error.message().contains("bad%FF.mp4"));
    }

    #[test]
    fn rejects_malformed_percent_escapes() {
        for raw in ["bad%ZZ.mp4", "100%", "clip%4.mp4"] {
            let error = decode_object_key(raw).expect_err("key should fail");
            assert!(error.message().contains("malformed percent escape"), "{raw}");
        }
    }

    #[test]
    fn accepts_escaped_percent_sign() {
        assert_eq!(
            decode_object_key("100%25+done.mp4").expect("key should decode"),
            "100% done.mp4"
        );
    }

    #[test]
    fn builds_source_locator_from_first_record() {
        let notification: StorageNotification = serde_json::from_value(json!({
            "Records": [
                {
                    "eventVersion": "2.1",
                    "eventSource": "aws:s3",
                    "eventName": "ObjectCreated:Put",
                    "s3": {
                        "bucket": {"name": "src", "arn": "arn:aws:s3:::src"},
                        "object": {"key": "a+b.mp4", "size": 1024}
                    }
                },
                {
                    "s3": {
                        "bucket": {"name": "other"},
                        "object": {"key": "ignored.mp4"}
                    }
                }
            ]
        }))
        .expect("notification should parse");

        let event = first_storage_event(&notification).expect("event should decode");
        assert_eq!(event.bucket, "src");
        assert_eq!(event.key, "a b.mp4");
        assert_eq!(event.source_locator(), "s3://src/a b.mp4");
    }

    #[test]
    fn rejects_notification_without_records() {
        let notification = StorageNotification {
            records: Vec::new(),
        };
        let error = first_storage_event(&notification).expect_err("empty event should fail");
        assert_eq!(
            error.message(),
            "storage notification must include at least one record"
        );
    }
}
