//! Checkout Review Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::checkout::models::CheckoutReview;

use crate::{
    cart::{checkout::errors::into_status_error, show::CartLineResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutReviewResponse {
    pub cart_id: Uuid,
    pub lines: Vec<CartLineResponse>,
    pub units: u64,
    pub total: String,
}

impl From<CheckoutReview> for CheckoutReviewResponse {
    fn from(review: CheckoutReview) -> Self {
        Self {
            cart_id: review.cart_id.get(),
            units: review.units,
            total: review.total.to_string(),
            lines: review.lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Checkout Review Handler
///
/// Lines asking for more than the remaining stock are lowered to what is left (but never
/// below one) before the total is computed.
#[endpoint(tags("cart"), summary = "Review Checkout")]
#[tracing::instrument(name = "cart.checkout.review", skip_all, err)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<CheckoutReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cart = depot.cart_id_or_500()?;

    let review = state
        .app
        .checkout
        .review(cart)
        .await
        .map_err(into_status_error)?;

    Ok(Json(review.into()))
}
