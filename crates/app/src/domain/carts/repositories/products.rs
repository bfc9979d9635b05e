//! Cart Products Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{count_to_i32, try_get_count},
    domain::{
        carts::models::{CartId, CartProduct, CartProductId},
        products::{models::ProductId, try_get_product},
    },
};

const LIST_CART_PRODUCTS_SQL: &str = include_str!("../sql/list_cart_products.sql");
const GET_CART_PRODUCT_SQL: &str = include_str!("../sql/get_cart_product.sql");
const FIND_CART_PRODUCT_BY_PRODUCT_SQL: &str =
    include_str!("../sql/find_cart_product_by_product.sql");
const COUNT_CART_UNITS_SQL: &str = include_str!("../sql/count_cart_units.sql");
const CREATE_CART_PRODUCT_SQL: &str = include_str!("../sql/create_cart_product.sql");
const UPDATE_CART_PRODUCT_QUANTITY_SQL: &str =
    include_str!("../sql/update_cart_product_quantity.sql");
const DELETE_CART_PRODUCT_SQL: &str = include_str!("../sql/delete_cart_product.sql");
const DELETE_CART_PRODUCTS_SQL: &str = include_str!("../sql/delete_cart_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartProductsRepository;

impl PgCartProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_cart_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<Vec<CartProduct>, sqlx::Error> {
        query_as::<Postgres, CartProduct>(LIST_CART_PRODUCTS_SQL)
            .bind(cart.get())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        item: CartProductId,
    ) -> Result<CartProduct, sqlx::Error> {
        query_as::<Postgres, CartProduct>(GET_CART_PRODUCT_SQL)
            .bind(item.get())
            .bind(cart.get())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_cart_product_by_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        product: ProductId,
    ) -> Result<Option<CartProduct>, sqlx::Error> {
        query_as::<Postgres, CartProduct>(FIND_CART_PRODUCT_BY_PRODUCT_SQL)
            .bind(product.get())
            .bind(cart.get())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Total units across every line of the cart.
    pub(crate) async fn count_cart_units(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_CART_UNITS_SQL)
            .bind(cart.get())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        product: ProductId,
        quantity: u32,
    ) -> Result<CartProductId, sqlx::Error> {
        let id: i64 = query_scalar(CREATE_CART_PRODUCT_SQL)
            .bind(cart.get())
            .bind(product.get())
            .bind(count_to_i32(quantity, "quantity")?)
            .fetch_one(&mut **tx)
            .await?;

        Ok(CartProductId::new(id))
    }

    pub(crate) async fn update_cart_product_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        item: CartProductId,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_CART_PRODUCT_QUANTITY_SQL)
            .bind(item.get())
            .bind(cart.get())
            .bind(count_to_i32(quantity, "quantity")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        item: CartProductId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_PRODUCT_SQL)
            .bind(item.get())
            .bind(cart.get())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_PRODUCTS_SQL)
            .bind(cart.get())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartProduct {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CartProductId::new(row.try_get("id")?),
            cart_id: CartId::new(row.try_get("cart_id")?),
            product: try_get_product(row, "product_")?,
            quantity: try_get_count(row, "quantity")?,
        })
    }
}
