//! Route handlers organized by resource

pub mod articles;
pub mod authors;
pub mod comments;
pub mod health;

use axum::Json;

use crate::db::Listing;
use crate::http::error::ApiError;

/// 200 with the rows, or 404 `{"data": []}` when there are none.
pub(crate) fn found(listing: Listing) -> Result<Json<Listing>, ApiError> {
    if listing.is_empty() {
        Err(ApiError::NotFound)
    } else {
        Ok(Json(listing))
    }
}
