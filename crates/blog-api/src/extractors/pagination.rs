//! Pagination extractor
//!
//! Reads `page`, `limit` and `sort` from the query string. Unparseable or
//! out-of-range values fall back to the defaults instead of rejecting.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use blog_core::{PostQuery, PostSort};
use serde::Deserialize;

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

/// Clamped pagination for post listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination(pub PostQuery);

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        let number = |raw: Option<String>| raw.and_then(|s| s.trim().parse::<i64>().ok());
        let sort = match params.sort.as_deref() {
            Some("views") => PostSort::Views,
            _ => PostSort::Latest,
        };

        Pagination(PostQuery::new(number(params.page), number(params.limit), sort))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(Pagination::from(params))
    }
}
