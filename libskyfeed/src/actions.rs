//! Row actions and the table surface
//!
//! The table forwards report and load-more requests to caller-supplied
//! actions, synchronously and exactly once per call. It holds no rows, cursor,
//! loading flag or request history: the caller owns the item list and passes
//! all of it on every call.

use crate::compose::{compose, compose_item, DisplayRecord};
use crate::error::FeedError;
use crate::types::FeedItem;

/// Actions a caller attaches to a posts table
pub trait FeedActions {
    /// Report the post with this canonical uri
    fn on_report(&self, uri: &str);

    /// More items are wanted
    fn on_load_more(&self);
}

/// Adapts a pair of closures to `FeedActions`
pub struct Callbacks<R, L> {
    on_report: R,
    on_load_more: L,
}

impl<R, L> Callbacks<R, L>
where
    R: Fn(&str),
    L: Fn(),
{
    pub fn new(on_report: R, on_load_more: L) -> Self {
        Self {
            on_report,
            on_load_more,
        }
    }
}

impl<R, L> FeedActions for Callbacks<R, L>
where
    R: Fn(&str),
    L: Fn(),
{
    fn on_report(&self, uri: &str) {
        (self.on_report)(uri)
    }

    fn on_load_more(&self) {
        (self.on_load_more)()
    }
}

/// Table surface over a caller-owned item list
pub struct PostsTable<A: FeedActions> {
    actions: A,
}

impl<A: FeedActions> PostsTable<A> {
    pub fn new(actions: A) -> Self {
        Self { actions }
    }

    /// Rows for the full item list, recomposed on every call
    pub fn render(&self, items: &[FeedItem]) -> Vec<DisplayRecord> {
        let rows = compose(items);
        tracing::debug!("Rendered {} rows", rows.len());
        rows
    }

    /// Invoke the report action for one row of `items`
    pub fn report(&self, items: &[FeedItem], index: usize) -> Result<(), FeedError> {
        let item = items.get(index).ok_or(FeedError::RowOutOfRange {
            index,
            len: items.len(),
        })?;
        let row = compose_item(item);
        tracing::debug!("Report requested for {}", row.report_id);
        self.actions.on_report(&row.report_id);
        Ok(())
    }

    /// Signal that the caller's pagination surface wants more items
    pub fn load_more(&self) {
        tracing::debug!("Load more requested");
        self.actions.on_load_more();
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }
}
