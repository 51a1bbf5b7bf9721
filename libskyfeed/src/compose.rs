//! View composition: feed items to flat, render-ready rows
//!
//! Composition is a pure function of its input. Each call derives fresh
//! records; nothing is cached or diffed between calls.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classify::classify;
use crate::embed::{resolve_embed, EmbedVariant};
use crate::navigation::{navigation_id, repository_path};
use crate::timestamp::parse_indexed_at;
use crate::types::{post_text, FeedItem};

/// Render-ready view of one feed item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub primary_author_handle: String,
    pub reposted_by_handle: Option<String>,
    pub reply_to_handle: Option<String>,
    pub body_text: Option<String>,
    pub embed: EmbedVariant,
    pub timestamp: Option<DateTime<Utc>>,
    /// Post uri with the `at://` prefix stripped (raw uri if it was missing)
    pub navigation_id: String,
    /// Canonical post uri, as the report action expects it
    pub report_id: String,
}

impl DisplayRecord {
    pub fn author_path(&self) -> String {
        repository_path(&self.primary_author_handle)
    }

    pub fn reposted_by_path(&self) -> Option<String> {
        self.reposted_by_handle.as_deref().map(repository_path)
    }

    pub fn reply_to_path(&self) -> Option<String> {
        self.reply_to_handle.as_deref().map(repository_path)
    }

    /// Path of the post's detail view
    pub fn view_path(&self) -> String {
        repository_path(&self.navigation_id)
    }
}

/// Compose every item, one record per item, in input order
pub fn compose(items: &[FeedItem]) -> Vec<DisplayRecord> {
    items.iter().map(compose_item).collect()
}

/// Compose a single feed item
pub fn compose_item(item: &FeedItem) -> DisplayRecord {
    let classification = classify(item);
    let post = &item.data.post;

    let navigation_id = match navigation_id(&post.data.uri) {
        Ok(id) => id.to_string(),
        Err(e) => {
            tracing::warn!("{}; using raw uri for navigation", e);
            post.data.uri.clone()
        }
    };

    DisplayRecord {
        primary_author_handle: post.data.author.data.handle.to_string(),
        reposted_by_handle: classification
            .reposted_by
            .map(|actor| actor.data.handle.to_string()),
        reply_to_handle: classification
            .reply_to
            .map(|actor| actor.data.handle.to_string()),
        body_text: post_text(post),
        embed: resolve_embed(post.data.embed.as_ref()),
        timestamp: parse_indexed_at(post.data.indexed_at.as_str()),
        navigation_id,
        report_id: post.data.uri.clone(),
    }
}
