//! Skyfeed - Bluesky feed items as table rows
//!
//! Classifies feed items (repost, reply), resolves their embeds to a small
//! set of rendering variants, and composes flat display records with the
//! navigation and report identifiers a table surface needs.
//!
//! ```
//! use libskyfeed::{compose, FeedPage};
//!
//! let page = FeedPage::from_json(r#"{"feed": [{"post": {
//!     "uri": "at://did:plc:a/app.bsky.feed.post/1",
//!     "cid": "bafyreifbc3e62rwweb3tjjbtc7jq7wepkkwimngdpwiexp2oihmgl6ieou",
//!     "author": {"did": "did:plc:a", "handle": "a.test"},
//!     "record": {"text": "hi"},
//!     "indexedAt": "2024-01-15T10:30:00Z"
//! }}]}"#).unwrap();
//!
//! let rows = compose(&page.items);
//! assert_eq!(rows[0].view_path(), "/repositories/did:plc:a/app.bsky.feed.post/1");
//! ```

pub mod actions;
pub mod classify;
pub mod compose;
pub mod config;
pub mod embed;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod page;
pub mod timestamp;
pub mod types;

// Re-export commonly used types
pub use actions::{Callbacks, FeedActions, PostsTable};
pub use classify::{classify, Classification};
pub use compose::{compose, compose_item, DisplayRecord};
pub use config::Config;
pub use embed::{resolve_embed, EmbedVariant, ExternalLink, ImageLink};
pub use error::{FeedError, Result, SkyfeedError};
pub use page::FeedPage;
pub use timestamp::{DisplayZone, TimestampStyle};
pub use types::{Actor, Embed, FeedItem, Reason};
