pub mod model;
pub mod normalizer;
pub mod service;

pub use model::{NewPost, Post, PostResponse};
pub use normalizer::{normalize, parse_published_at, NormalizeError};
pub use service::PostService;
