//! Navigation paths for the rendering surface

use crate::error::FeedError;

/// Scheme prefix every post uri carries
pub const AT_URI_PREFIX: &str = "at://";

/// Base path for repository (account and record) pages
pub const REPOSITORIES_PATH: &str = "/repositories";

/// Strip the `at://` prefix from a post uri
///
/// The remainder is used verbatim as a navigation path segment.
pub fn navigation_id(uri: &str) -> Result<&str, FeedError> {
    uri.strip_prefix(AT_URI_PREFIX)
        .ok_or_else(|| FeedError::MalformedIdentifier(uri.to_string()))
}

/// Build `/repositories/<segment>` with no further encoding
pub fn repository_path(segment: &str) -> String {
    format!("{}/{}", REPOSITORIES_PATH, segment)
}
