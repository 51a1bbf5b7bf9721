//! Embed resolution
//!
//! Reduces a post's embed to one of three rendering variants. A
//! record-with-media composite is first normalized to its media half; the
//! quoted record is never rendered, and neither is a bare quote post.

use atrium_api::app::bsky::embed::{external, images};
use serde::Serialize;

use crate::types::{Embed, PostViewEmbedRefs, Union, ViewMediaRefs};

/// Rendering variant for a post's embed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EmbedVariant {
    Images { items: Vec<ImageLink> },
    External(ExternalLink),
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageLink {
    /// Shown inline
    pub thumbnail_url: String,
    /// Link target for the thumbnail
    pub fullsize_url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    pub title: String,
    pub description: String,
    pub uri: String,
    pub thumbnail_url: Option<String>,
}

/// An embed after composite normalization
enum Normalized<'a> {
    Images(&'a images::View),
    External(&'a external::View),
    Unrendered,
}

/// Normalize an embed to the media it should render as
///
/// Composites unwrap to their media half. The media union has no composite
/// arm, so this never recurses.
fn normalize(embed: &Embed) -> Normalized<'_> {
    let Union::Refs(embed) = embed else {
        return Normalized::Unrendered;
    };

    match embed {
        PostViewEmbedRefs::AppBskyEmbedImagesView(view) => Normalized::Images(view),
        PostViewEmbedRefs::AppBskyEmbedExternalView(view) => Normalized::External(view),
        PostViewEmbedRefs::AppBskyEmbedRecordWithMediaView(view) => match &view.data.media {
            Union::Refs(ViewMediaRefs::AppBskyEmbedImagesView(images)) => {
                Normalized::Images(images)
            }
            Union::Refs(ViewMediaRefs::AppBskyEmbedExternalView(external)) => {
                Normalized::External(external)
            }
            Union::Refs(ViewMediaRefs::AppBskyEmbedVideoView(_)) => Normalized::Unrendered,
            Union::Unknown(_) => Normalized::Unrendered,
        },
        // Quote posts are not rendered
        PostViewEmbedRefs::AppBskyEmbedRecordView(_) => Normalized::Unrendered,
        PostViewEmbedRefs::AppBskyEmbedVideoView(_) => Normalized::Unrendered,
    }
}

/// Resolve an optional embed to its rendering variant
pub fn resolve_embed(embed: Option<&Embed>) -> EmbedVariant {
    let Some(embed) = embed else {
        return EmbedVariant::None;
    };

    match normalize(embed) {
        Normalized::Images(view) => EmbedVariant::Images {
            items: view
                .data
                .images
                .iter()
                .map(|image| ImageLink {
                    thumbnail_url: image.thumb.clone(),
                    fullsize_url: image.fullsize.clone(),
                    alt: image.alt.clone(),
                })
                .collect(),
        },
        Normalized::External(view) => {
            let external = &view.data.external;
            EmbedVariant::External(ExternalLink {
                title: external.title.clone(),
                description: external.description.clone(),
                uri: external.uri.clone(),
                thumbnail_url: external.thumb.clone(),
            })
        }
        Normalized::Unrendered => EmbedVariant::None,
    }
}
