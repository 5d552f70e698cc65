//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Builds SQL with positional parameters only
//! - Lists are paginated through the bridge
//! - New identifiers are UUID v4 strings minted here

pub mod articles;
pub mod authors;
pub mod comments;
pub mod likes;

pub use articles::ArticleRepo;
pub use authors::AuthorRepo;
pub use comments::CommentRepo;
pub use likes::LikeRepo;
