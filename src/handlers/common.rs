use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::services::Page;

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Standard no content response
pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// List query. Either `skip`/`limit` or `page`/`per_page`; `page` wins when
/// both are given.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Rows to skip
    pub skip: Option<u64>,
    /// Maximum rows to return
    pub limit: Option<u64>,
    /// One-based page number
    pub page: Option<u64>,
    /// Rows per page
    pub per_page: Option<u64>,
}

/// Largest offset or page size the database driver accepts; both bind as `i64`.
const MAX_WINDOW_VALUE: u64 = i64::MAX as u64;

/// Resolved window of a list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

impl ListParams {
    /// Resolves the window. The size falls back to `default_size` and is
    /// clamped to `1..=max_size`; the offset is capped at `i64::MAX`.
    pub fn window(&self, default_size: u64, max_size: u64) -> Window {
        let max_size = max_size.clamp(1, MAX_WINDOW_VALUE);
        match self.page {
            Some(page) => {
                let limit = self
                    .per_page
                    .or(self.limit)
                    .unwrap_or(default_size)
                    .clamp(1, max_size);
                Window {
                    offset: page
                        .saturating_sub(1)
                        .saturating_mul(limit)
                        .min(MAX_WINDOW_VALUE),
                    limit,
                }
            }
            None => Window {
                offset: self.skip.unwrap_or(0).min(MAX_WINDOW_VALUE),
                limit: self
                    .limit
                    .or(self.per_page)
                    .unwrap_or(default_size)
                    .clamp(1, max_size),
            },
        }
    }
}

/// Standard pagination response metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub offset: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(window: Window, total: u64) -> Self {
        let per_page = window.limit.max(1);
        Self {
            page: (window.offset / per_page).saturating_add(1),
            per_page,
            offset: window.offset,
            total,
            total_pages: total.div_ceil(per_page),
        }
    }
}

/// Standard paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(page: Page<T>, window: Window) -> Self {
        Self {
            pagination: PaginationMeta::new(window, page.total),
            data: page.items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ListParams::default(), Window { offset: 0, limit: 100 })]
    #[case(ListParams { skip: Some(20), limit: Some(10), ..Default::default() }, Window { offset: 20, limit: 10 })]
    #[case(ListParams { page: Some(3), per_page: Some(25), ..Default::default() }, Window { offset: 50, limit: 25 })]
    #[case(ListParams { page: Some(0), per_page: Some(25), ..Default::default() }, Window { offset: 0, limit: 25 })]
    #[case(ListParams { skip: Some(5), page: Some(2), per_page: Some(10), ..Default::default() }, Window { offset: 10, limit: 10 })]
    #[case(ListParams { limit: Some(5000), ..Default::default() }, Window { offset: 0, limit: 1000 })]
    #[case(ListParams { limit: Some(0), ..Default::default() }, Window { offset: 0, limit: 1 })]
    #[case(ListParams { skip: Some(u64::MAX), limit: Some(1), ..Default::default() }, Window { offset: i64::MAX as u64, limit: 1 })]
    #[case(ListParams { page: Some(u64::MAX), per_page: Some(1), ..Default::default() }, Window { offset: i64::MAX as u64, limit: 1 })]
    fn resolves_window(#[case] params: ListParams, #[case] expected: Window) {
        assert_eq!(params.window(100, 1000), expected);
    }

    #[test]
    fn meta_for_empty_listing() {
        let meta = PaginationMeta::new(Window { offset: 0, limit: 100 }, 0);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.total, 0);
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn meta_survives_the_largest_offset() {
        let meta = PaginationMeta::new(Window { offset: u64::MAX, limit: 1 }, 3);
        assert_eq!(meta.page, u64::MAX);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn meta_rounds_pages_up() {
        let meta = PaginationMeta::new(Window { offset: 20, limit: 10 }, 21);
        assert_eq!(meta.page, 3);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn paginated_response_keeps_items_and_total() {
        let response = PaginatedResponse::new(Page::new(vec!["a", "b"], 7), Window { offset: 0, limit: 2 });
        assert_eq!(response.data, vec!["a", "b"]);
        assert_eq!(response.pagination.total, 7);
        assert_eq!(response.pagination.total_pages, 4);
    }
}
