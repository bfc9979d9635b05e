//! Characteristic Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    characteristics::{errors::into_status_error, get::CharacteristicResponse},
    extensions::*,
    pagination::{PaginationResponse, page_request},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CharacteristicsResponse {
    /// The requested page of characteristics
    pub items: Vec<CharacteristicResponse>,

    /// Number of characteristics across all pages
    pub total: u64,

    pub pagination: PaginationResponse,
}

/// Characteristic Index Handler
///
/// Returns one page of characteristics; `page` and `pageSize` select the page.
#[endpoint(tags("characteristics"), summary = "List Characteristics")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CharacteristicsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = page_request(req);

    let characteristics = state
        .app
        .characteristics
        .list_characteristics(page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CharacteristicsResponse {
        pagination: PaginationResponse::new(page, characteristics.total),
        total: characteristics.total,
        items: characteristics.items.into_iter().map(Into::into).collect(),
    }))
}
