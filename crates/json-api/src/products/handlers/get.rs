//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::models::{Product, ProductId};

use crate::{
    categories::get::CategoryResponse, extensions::*, products::errors::into_status_error,
    state::State,
};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The product identifier
    pub id: i64,

    /// The product's category, absent when uncategorised
    pub category: Option<CategoryResponse>,

    pub model: String,

    pub manufacturer: String,

    /// Unit price as a decimal string, e.g. "12.50"
    pub price: String,

    /// Units in stock
    pub quantity: u32,

    pub image_url: Option<String>,

    pub warranty_days: u32,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.get(),
            category: product.category.map(Into::into),
            model: product.model,
            manufacturer: product.manufacturer,
            price: product.price.to_string(),
            quantity: product.quantity,
            image_url: product.image_url,
            warranty_days: product.warranty_days,
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(tags("products"), summary = "Get Product")]
pub(crate) async fn handler(
    product: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(ProductId::new(product.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::products::ProductsServiceError;

    use crate::test_helpers::{TestServices, make_product};

    use super::*;

    fn make_service(services: TestServices) -> Service {
        services.service(Router::with_path("products/{product}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_price_as_decimal_string() -> TestResult {
        let mut services = TestServices::default();

        services
            .products
            .expect_get_product()
            .once()
            .withf(|id| *id == ProductId::new(4))
            .return_once(|_| Ok(make_product(4)));

        let mut res = TestClient::get("http://example.com/products/4")
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(body.price, "12.50");
        assert_eq!(body.category.map(|category| category.id), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn test_uncategorised_product_has_no_category() -> TestResult {
        let mut services = TestServices::default();

        services
            .products
            .expect_get_product()
            .once()
            .return_once(|_| {
                Ok(Product {
                    category: None,
                    ..make_product(4)
                })
            });

        let mut res = TestClient::get("http://example.com/products/4")
            .send(&make_service(services))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert!(body.category.is_none(), "expected no category");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() -> TestResult {
        let mut services = TestServices::default();

        services
            .products
            .expect_get_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::get("http://example.com/products/4")
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
