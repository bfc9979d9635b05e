//! Search Characteristics Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    characteristics::{errors::into_status_error, get::CharacteristicResponse},
    extensions::*,
    pagination::limit,
    state::State,
};

/// Search Characteristics Handler
///
/// Case-insensitive substring match on the name, for pickers and typeahead.
#[endpoint(tags("characteristics"), summary = "Search Characteristics")]
pub(crate) async fn handler(
    name: QueryParam<String, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<CharacteristicResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let characteristics = state
        .app
        .characteristics
        .search_characteristics(name.into_inner().unwrap_or_default(), limit(req))
        .await
        .map_err(into_status_error)?;

    Ok(Json(characteristics.into_iter().map(Into::into).collect()))
}
