//! Item classification: repost and reply context of a feed item

use crate::types::{
    Actor, FeedItem, FeedViewPostReasonRefs, Reason, ReplyRef, ReplyRefParentRefs, Union,
};

/// Repost and reply context derived from one feed item
///
/// The two indicators are independent; a repost of a reply carries both.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Classification<'a> {
    pub reposted_by: Option<&'a Actor>,
    pub reply_to: Option<&'a Actor>,
}

/// Classify a feed item
///
/// Total over every input: unknown reasons are "not a repost" and a reply
/// whose parent has no usable author is "not a reply".
pub fn classify(item: &FeedItem) -> Classification<'_> {
    Classification {
        reposted_by: reposted_by(item.data.reason.as_ref()),
        reply_to: item.data.reply.as_ref().and_then(reply_to),
    }
}

fn reposted_by(reason: Option<&Reason>) -> Option<&Actor> {
    match reason? {
        Union::Refs(FeedViewPostReasonRefs::ReasonRepost(repost)) => Some(&repost.data.by),
        Union::Refs(FeedViewPostReasonRefs::ReasonPin(_)) => None,
        Union::Unknown(_) => None,
    }
}

/// Author of a visible parent post
///
/// Blocked and missing parents carry no handle to show.
fn reply_to(reply: &ReplyRef) -> Option<&Actor> {
    match &reply.data.parent {
        Union::Refs(ReplyRefParentRefs::PostView(parent)) => Some(&parent.data.author),
        Union::Refs(ReplyRefParentRefs::NotFoundPost(_)) => None,
        Union::Refs(ReplyRefParentRefs::BlockedPost(_)) => None,
        Union::Unknown(_) => None,
    }
}
