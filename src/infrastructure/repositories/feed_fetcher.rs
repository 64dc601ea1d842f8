use crate::domain::feed::FeedDocument;
use async_trait::async_trait;

/// Reasons a feed could not be turned into a document. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Connection failure, timeout or non-success status
    #[error("failed to fetch URL: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// Malformed XML or a document that is not `<rss><channel>...`
    #[error("failed to parse RSS XML: {0}")]
    Parse(#[from] rss::Error),
}

/// Retrieves and parses a syndication feed.
/// Abstracts the network so ingestion can run against any source.
///
/// Implementations must tolerate being called concurrently for different feeds.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch `url` once and parse it, preserving item order
    async fn fetch(&self, url: &str) -> Result<FeedDocument, FetchError>;
}
