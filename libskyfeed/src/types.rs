//! Upstream data contract for feed items
//!
//! Feed items are the `app.bsky.feed.defs#feedViewPost` view from the
//! AppView, decoded with the `atrium-api` lexicon types. Open unions
//! (`reason`, `embed`, the composite's `media`, the reply parent) arrive as
//! `Union<..Refs>`: a known `$type` lands in `Union::Refs`, anything else in
//! `Union::Unknown`, so a new upstream variant never fails the item.

use atrium_api::types::Unknown;

pub use atrium_api::app::bsky::actor::defs::ProfileViewBasic as Actor;
pub use atrium_api::app::bsky::embed::record_with_media::ViewMediaRefs;
pub use atrium_api::app::bsky::feed::defs::{
    FeedViewPost as FeedItem, FeedViewPostReasonRefs, PostView, PostViewEmbedRefs, ReplyRef,
    ReplyRefParentRefs,
};
pub use atrium_api::types::Union;

/// Why an item appears in the feed, when it is not simply authored there
pub type Reason = Union<FeedViewPostReasonRefs>;

/// Embed attached to a post
pub type Embed = Union<PostViewEmbedRefs>;

/// Text body of the post record, if the record carries one
pub fn post_text(post: &PostView) -> Option<String> {
    let Unknown::Object(record) = &post.data.record else {
        return None;
    };

    record
        .get("text")
        .and_then(|text| serde_json::to_value(text).ok())
        .and_then(|text| text.as_str().map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn post_json() -> Value {
        json!({
            "uri": "at://did:plc:alice/app.bsky.feed.post/3k2a",
            "cid": "bafyreifbc3e62rwweb3tjjbtc7jq7wepkkwimngdpwiexp2oihmgl6ieou",
            "author": { "did": "did:plc:alice", "handle": "alice.bsky.social" },
            "record": { "$type": "app.bsky.feed.post", "text": "hello" },
            "indexedAt": "2024-01-15T10:30:00.000Z"
        })
    }

    fn decode(value: Value) -> FeedItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_decode_minimal_item() {
        let item = decode(json!({ "post": post_json() }));

        assert_eq!(item.data.post.data.author.data.handle.as_str(), "alice.bsky.social");
        assert_eq!(post_text(&item.data.post).as_deref(), Some("hello"));
        assert!(item.data.reason.is_none());
        assert!(item.data.reply.is_none());
        assert!(item.data.post.data.embed.is_none());
    }

    #[test]
    fn test_text_absent_when_record_has_none() {
        let mut post = post_json();
        post["record"] = json!({ "$type": "app.bsky.feed.post" });
        let item = decode(json!({ "post": post }));
        assert_eq!(post_text(&item.data.post), None);

        let mut post = post_json();
        post["record"] = json!({ "text": 42 });
        let item = decode(json!({ "post": post }));
        assert_eq!(post_text(&item.data.post), None);
    }

    #[test]
    fn test_known_reason_lands_in_refs() {
        let item = decode(json!({
            "post": post_json(),
            "reason": {
                "$type": "app.bsky.feed.defs#reasonRepost",
                "by": { "did": "did:plc:bob", "handle": "bob.test" },
                "indexedAt": "2024-01-15T11:00:00Z"
            }
        }));
        assert!(matches!(
            item.data.reason,
            Some(Union::Refs(FeedViewPostReasonRefs::ReasonRepost(_)))
        ));
    }

    #[test]
    fn test_future_reason_lands_in_unknown() {
        let item = decode(json!({
            "post": post_json(),
            "reason": { "$type": "app.bsky.feed.defs#reasonBoost" }
        }));
        assert!(matches!(item.data.reason, Some(Union::Unknown(_))));
    }

    #[test]
    fn test_future_embed_keeps_item() {
        let mut post = post_json();
        post["embed"] = json!({ "$type": "app.bsky.embed.gallery#view", "items": [] });
        let item = decode(json!({ "post": post }));
        assert!(matches!(item.data.post.data.embed, Some(Union::Unknown(_))));
    }

    #[test]
    fn test_null_optionals() {
        let item = decode(json!({
            "post": post_json(),
            "reply": null,
            "reason": null
        }));
        assert!(item.data.reply.is_none());
        assert!(item.data.reason.is_none());
    }

    #[test]
    fn test_missing_handle_does_not_decode() {
        let mut post = post_json();
        post["author"] = json!({ "did": "did:plc:alice" });
        assert!(serde_json::from_value::<FeedItem>(json!({ "post": post })).is_err());
    }
}
