//! Products Repository

use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{contains_pattern, count_to_i32, non_empty, prefix_pattern, try_get_count},
    domain::{
        categories::models::{Category, CategoryId},
        products::models::{CatalogFilter, Product, ProductDraft, ProductId},
    },
    pagination::{PageRequest, SearchLimit},
};

const LIST_PRODUCTS_SQL: &str = include_str!("../sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("../sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("../sql/get_product.sql");
const SEARCH_PRODUCTS_SQL: &str = include_str!("../sql/search_products.sql");
const SEARCH_CATALOG_SQL: &str = include_str!("../sql/search_catalog.sql");
const COUNT_CATALOG_SQL: &str = include_str!("../sql/count_catalog.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("../sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("../sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("../sql/delete_product.sql");
const SUBTRACT_PRODUCT_QUANTITY_SQL: &str = include_str!("../sql/subtract_product_quantity.sql");
const ADD_PRODUCT_QUANTITY_SQL: &str = include_str!("../sql/add_product_quantity.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_PRODUCTS_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.get())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn search_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        model: &str,
        limit: SearchLimit,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(SEARCH_PRODUCTS_SQL)
            .bind(contains_pattern(model))
            .bind(limit.limit())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn search_catalog(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
        filter: &CatalogFilter,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(SEARCH_CATALOG_SQL)
            .bind(prefix_pattern(&filter.query))
            .bind(filter.category_id.map(CategoryId::get))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_catalog(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &CatalogFilter,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_CATALOG_SQL)
            .bind(prefix_pattern(&filter.query))
            .bind(filter.category_id.map(CategoryId::get))
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(name = "products.repository.create_product", skip(self, tx), err)]
    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &ProductDraft,
    ) -> Result<ProductId, sqlx::Error> {
        let id: i64 = query_scalar(CREATE_PRODUCT_SQL)
            .bind(product.category_id.map(CategoryId::get))
            .bind(product.model.trim())
            .bind(product.manufacturer.trim())
            .bind(product.price)
            .bind(count_to_i32(product.quantity, "quantity")?)
            .bind(non_empty(product.image_url.as_deref()))
            .bind(count_to_i32(product.warranty_days, "warranty_days")?)
            .fetch_one(&mut **tx)
            .await?;

        Ok(ProductId::new(id))
    }

    #[tracing::instrument(name = "products.repository.update_product", skip(self, tx), err)]
    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: ProductId,
        product: &ProductDraft,
    ) -> Result<ProductId, sqlx::Error> {
        let id: i64 = query_scalar(UPDATE_PRODUCT_SQL)
            .bind(id.get())
            .bind(product.category_id.map(CategoryId::get))
            .bind(product.model.trim())
            .bind(product.manufacturer.trim())
            .bind(product.price)
            .bind(count_to_i32(product.quantity, "quantity")?)
            .bind(non_empty(product.image_url.as_deref()))
            .bind(count_to_i32(product.warranty_days, "warranty_days")?)
            .fetch_one(&mut **tx)
            .await?;

        Ok(ProductId::new(id))
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.get())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Take `quantity` units out of stock.
    ///
    /// The decrement only applies while enough stock remains, so concurrent checkouts cannot
    /// oversell; `Ok(false)` means the product is missing or short.
    #[tracing::instrument(name = "products.repository.subtract_quantity", skip(self, tx), err)]
    pub(crate) async fn subtract_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        quantity: u32,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(SUBTRACT_PRODUCT_QUANTITY_SQL)
            .bind(product.get())
            .bind(count_to_i32(quantity, "quantity")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }

    /// Put `quantity` units back into stock.
    #[tracing::instrument(name = "products.repository.add_quantity", skip(self, tx), err)]
    pub(crate) async fn add_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(ADD_PRODUCT_QUANTITY_SQL)
            .bind(product.get())
            .bind(count_to_i32(quantity, "quantity")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        try_get_product(row, "")
    }
}

/// Decode a product (and its optional category) from columns named `{prefix}id`,
/// `{prefix}model`, `{prefix}category_id`, ...
pub(crate) fn try_get_product(row: &PgRow, prefix: &str) -> sqlx::Result<Product> {
    let col = |name: &str| format!("{prefix}{name}");

    let category = row
        .try_get::<Option<i64>, _>(col("category_id").as_str())?
        .map(|id| -> sqlx::Result<Category> {
            Ok(Category {
                id: CategoryId::new(id),
                name: row.try_get(col("category_name").as_str())?,
                description: row.try_get(col("category_description").as_str())?,
            })
        })
        .transpose()?;

    Ok(Product {
        id: ProductId::new(row.try_get(col("id").as_str())?),
        category,
        model: row.try_get(col("model").as_str())?,
        manufacturer: row.try_get(col("manufacturer").as_str())?,
        price: row.try_get::<Decimal, _>(col("price").as_str())?,
        quantity: try_get_count(row, &col("quantity"))?,
        image_url: row.try_get(col("image_url").as_str())?,
        warranty_days: try_get_count(row, &col("warranty_days"))?,
    })
}
