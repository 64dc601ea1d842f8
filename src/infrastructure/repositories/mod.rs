pub mod error;
pub mod feed_fetcher;
pub mod feed_repository;
pub mod http_feed_fetcher;
pub mod pg_feed_repository;
pub mod pg_post_repository;
pub mod post_repository;

pub use error::{RepositoryError, RepositoryResult};
pub use feed_fetcher::{FeedFetcher, FetchError};
pub use feed_repository::FeedRepository;
pub use http_feed_fetcher::HttpFeedFetcher;
pub use pg_feed_repository::PgFeedRepository;
pub use pg_post_repository::PgPostRepository;
pub use post_repository::PostRepository;
