//! Decoding of feed pages
//!
//! A page is either the `{ "feed": [...], "cursor": "..." }` object returned
//! by the feed endpoints or a bare array of feed items. A malformed optional
//! member (`reply`, `reason`, `post.embed`) is dropped and the item kept.
//! Items that still do not decode are skipped individually so one broken
//! item never drops the page.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::FeedError;
use crate::types::{Embed, FeedItem, Reason, ReplyRef};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    /// Opaque pagination cursor, passed through untouched
    pub cursor: Option<String>,
    /// Number of items dropped because they failed to decode
    pub skipped: usize,
}

impl FeedPage {
    pub fn from_json(input: &str) -> Result<Self, FeedError> {
        let value: Value =
            serde_json::from_str(input).map_err(|e| FeedError::Decode(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, FeedError> {
        let (entries, cursor) = match value {
            Value::Array(entries) => (entries, None),
            Value::Object(mut fields) => {
                let cursor = fields
                    .get("cursor")
                    .and_then(Value::as_str)
                    .map(str::to_owned);
                match fields.remove("feed") {
                    Some(Value::Array(entries)) => (entries, cursor),
                    _ => {
                        return Err(FeedError::Decode(
                            "expected a \"feed\" array".to_string(),
                        ))
                    }
                }
            }
            other => {
                return Err(FeedError::Decode(format!(
                    "expected an object or array, found {}",
                    kind(&other)
                )))
            }
        };

        let mut page = FeedPage {
            items: Vec::with_capacity(entries.len()),
            cursor,
            skipped: 0,
        };

        for (index, entry) in entries.into_iter().enumerate() {
            match decode_item(entry) {
                Ok(item) => page.items.push(item),
                Err(e) => {
                    tracing::warn!("Skipping feed item {}: {}", index, e);
                    page.skipped += 1;
                }
            }
        }

        Ok(page)
    }
}

/// Decode one feed item, degrading malformed optional members to absent
fn decode_item(entry: Value) -> Result<FeedItem, serde_json::Error> {
    let err = match serde_json::from_value(entry.clone()) {
        Ok(item) => return Ok(item),
        Err(e) => e,
    };

    let Value::Object(mut fields) = entry else {
        return Err(err);
    };
    drop_malformed::<ReplyRef>(&mut fields, "reply");
    drop_malformed::<Reason>(&mut fields, "reason");
    if let Some(Value::Object(post)) = fields.get_mut("post") {
        drop_malformed::<Embed>(post, "embed");
    }

    serde_json::from_value(Value::Object(fields)).map_err(|_| err)
}

fn drop_malformed<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) {
    let malformed = fields.get(key).is_some_and(|value| {
        !value.is_null() && serde_json::from_value::<T>(value.clone()).is_err()
    });
    if malformed {
        tracing::debug!("Dropping malformed {:?} from feed item", key);
        fields.remove(key);
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
