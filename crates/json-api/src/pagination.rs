//! Pagination query parsing and response envelope.

use salvo::{oapi::ToSchema, prelude::Request};
use serde::{Deserialize, Serialize};

use storefront_app::pagination::{PageRequest, Pagination, SearchLimit};

/// Read `page` and `pageSize` from the query string; missing or unparsable values fall back
/// to the defaults and oversized pages are clamped.
pub(crate) fn page_request(req: &Request) -> PageRequest {
    PageRequest::new(req.query::<i64>("page"), req.query::<i64>("pageSize"))
}

/// Read the typeahead `limit` from the query string.
pub(crate) fn limit(req: &Request) -> SearchLimit {
    SearchLimit::new(req.query::<i64>("limit"))
}

/// Navigation data for a paginated listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaginationResponse {
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
    /// Page numbers to link to around the current one.
    pub pages: Vec<u64>,
}

impl PaginationResponse {
    pub(crate) fn new(request: PageRequest, total: u64) -> Self {
        Pagination::calculate(request, total).into()
    }
}

impl From<Pagination> for PaginationResponse {
    fn from(pagination: Pagination) -> Self {
        Self {
            page: pagination.page,
            page_size: pagination.page_size,
            total_pages: pagination.total_pages,
            has_previous: pagination.has_previous,
            has_next: pagination.has_next,
            pages: pagination.pages.into_vec(),
        }
    }
}
