pub mod feed;
pub mod ingestion;
pub mod post;
