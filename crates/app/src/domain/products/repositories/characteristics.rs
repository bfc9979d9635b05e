//! Product Characteristics Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    characteristics::models::{Characteristic, CharacteristicId},
    products::models::{
        ProductCharacteristic, ProductCharacteristicDraft, ProductCharacteristicId, ProductId,
    },
};

const LIST_PRODUCT_CHARACTERISTICS_SQL: &str =
    include_str!("../sql/list_product_characteristics.sql");
const GET_PRODUCT_CHARACTERISTIC_SQL: &str = include_str!("../sql/get_product_characteristic.sql");
const CREATE_PRODUCT_CHARACTERISTIC_SQL: &str =
    include_str!("../sql/create_product_characteristic.sql");
const UPDATE_PRODUCT_CHARACTERISTIC_SQL: &str =
    include_str!("../sql/update_product_characteristic.sql");
const DELETE_PRODUCT_CHARACTERISTIC_SQL: &str =
    include_str!("../sql/delete_product_characteristic.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductCharacteristicsRepository;

impl PgProductCharacteristicsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_product_characteristics(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Vec<ProductCharacteristic>, sqlx::Error> {
        query_as::<Postgres, ProductCharacteristic>(LIST_PRODUCT_CHARACTERISTICS_SQL)
            .bind(product.get())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product_characteristic(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        item: ProductCharacteristicId,
    ) -> Result<ProductCharacteristic, sqlx::Error> {
        query_as::<Postgres, ProductCharacteristic>(GET_PRODUCT_CHARACTERISTIC_SQL)
            .bind(item.get())
            .bind(product.get())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product_characteristic(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        item: &ProductCharacteristicDraft,
    ) -> Result<ProductCharacteristicId, sqlx::Error> {
        let id: i64 = query_scalar(CREATE_PRODUCT_CHARACTERISTIC_SQL)
            .bind(product.get())
            .bind(item.characteristic_id.get())
            .bind(item.value.trim())
            .fetch_one(&mut **tx)
            .await?;

        Ok(ProductCharacteristicId::new(id))
    }

    pub(crate) async fn update_product_characteristic(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        id: ProductCharacteristicId,
        item: &ProductCharacteristicDraft,
    ) -> Result<ProductCharacteristicId, sqlx::Error> {
        let id: i64 = query_scalar(UPDATE_PRODUCT_CHARACTERISTIC_SQL)
            .bind(id.get())
            .bind(product.get())
            .bind(item.characteristic_id.get())
            .bind(item.value.trim())
            .fetch_one(&mut **tx)
            .await?;

        Ok(ProductCharacteristicId::new(id))
    }

    pub(crate) async fn delete_product_characteristic(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        item: ProductCharacteristicId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_CHARACTERISTIC_SQL)
            .bind(item.get())
            .bind(product.get())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductCharacteristic {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ProductCharacteristicId::new(row.try_get("id")?),
            product_id: ProductId::new(row.try_get("product_id")?),
            characteristic: Characteristic {
                id: CharacteristicId::new(row.try_get("characteristic_id")?),
                name: row.try_get("characteristic_name")?,
                measurement_unit: row.try_get("characteristic_measurement_unit")?,
            },
            value: row.try_get("value")?,
        })
    }
}
