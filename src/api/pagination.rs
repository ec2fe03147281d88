//! Pagination Engine
//!
//! Offset/limit pagination with 1-based offsets: `offset` is the position of
//! the first returned item, not a page index. Handlers slice their result
//! set through [`paginate`]; a response layer then attaches the
//! `Link: <...>; rel="next"` header whenever an explicit `limit` was given
//! and another page exists. Next-page URLs are normalized to https.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

use crate::api::AppState;
use crate::utils::error::AppError;

pub const DEFAULT_OFFSET: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Raw query parameters as they arrive; bounds are not yet enforced.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawPageParams {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

/// Validated pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    /// 1-based position of the first item of the page.
    pub offset: i64,
    pub limit: i64,
}

impl RawPageParams {
    /// Enforce `offset >= 1` and `limit` within `[1, 100]`, filling in the
    /// defaults for absent parameters. Out-of-range values are a 422.
    pub fn validated(&self) -> Result<PageParams, AppError> {
        let offset = self.offset.unwrap_or(DEFAULT_OFFSET);
        if offset < 1 {
            return Err(AppError::Validation(
                "offset must be greater than or equal to 1".to_string(),
            ));
        }

        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }

        Ok(PageParams { offset, limit })
    }
}

/// Slice `items[offset-1 .. offset-1+limit]`. An offset beyond the end
/// yields an empty page, never an error.
pub fn paginate<T>(items: Vec<T>, page: &PageParams) -> Vec<T> {
    let start = (page.offset - 1) as usize;
    items
        .into_iter()
        .skip(start)
        .take(page.limit as usize)
        .collect()
}

/// Build the next-page URL: same path and query with `offset` replaced and
/// the scheme pinned to https.
fn next_page_url(host: &str, path: &str, query: &str, next_offset: i64) -> String {
    let mut pairs: Vec<(String, String)> =
        serde_urlencoded::from_str(query).unwrap_or_default();

    let mut replaced = false;
    for pair in pairs.iter_mut() {
        if pair.0 == "offset" {
            pair.1 = next_offset.to_string();
            replaced = true;
        }
    }
    if !replaced {
        pairs.push(("offset".to_string(), next_offset.to_string()));
    }

    let query = serde_urlencoded::to_string(&pairs).unwrap_or_default();
    format!("https://{}{}?{}", host, path, query)
}

/// Response layer adding the `Link` header to successful responses when a
/// further page exists: present iff `limit` was supplied and
/// `offset + limit < total`.
pub async fn pagination_link_layer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let uri = request.uri().clone();
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost")
        .to_string();

    let mut response = next.run(request).await;

    if response.status() != StatusCode::OK {
        return response;
    }

    let Some(query) = uri.query() else {
        return response;
    };
    let params: RawPageParams = serde_urlencoded::from_str(query).unwrap_or_default();

    // Pagination is inactive without an explicit limit.
    let Some(limit) = params.limit else {
        return response;
    };
    let offset = params.offset.unwrap_or(DEFAULT_OFFSET);
    let next_offset = offset + limit;

    let total = match state.footprint_service.count().await {
        Ok(total) => total,
        Err(e) => {
            log::error!("footprint count for Link header failed: {}", e);
            return response;
        }
    };

    if next_offset < total {
        let url = next_page_url(&host, uri.path(), query, next_offset);
        let header_value = format!("<{}>; rel=\"next\"", url);
        if let Ok(value) = HeaderValue::from_str(&header_value) {
            response.headers_mut().insert(header::LINK, value);
        }
    }

    response
}
