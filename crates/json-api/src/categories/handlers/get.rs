//! Get Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::categories::models::{Category, CategoryId};

use crate::{categories::errors::into_status_error, extensions::*, state::State};

/// Category Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    /// The category identifier
    pub id: i64,

    /// Display name
    pub name: String,

    /// Optional free text description
    pub description: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.get(),
            name: category.name,
            description: category.description,
        }
    }
}

/// Get Category Handler
///
/// Returns a category.
#[endpoint(tags("categories"), summary = "Get Category")]
pub(crate) async fn handler(
    category: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .get_category(CategoryId::new(category.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}
