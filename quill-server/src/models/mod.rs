//! Request models with validation at construction
//!
//! Incoming bodies deserialize with every field optional so that missing
//! fields show up as validation failures rather than parse errors.

pub mod article;
pub mod author;
pub mod comment;
pub mod validation;

pub use article::{ArticleRequest, LikeRequest, NewArticle, NewLike};
pub use author::{AuthorRequest, NewAuthor};
pub use comment::{CommentRequest, NewComment};
pub use validation::{require_param, Checker, FieldError, Location, ValidationError, ValidationErrors};
