//! Characteristics Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{contains_pattern, non_empty},
    domain::characteristics::models::{Characteristic, CharacteristicDraft, CharacteristicId},
    pagination::{PageRequest, SearchLimit},
};

const LIST_CHARACTERISTICS_SQL: &str = include_str!("sql/list_characteristics.sql");
const COUNT_CHARACTERISTICS_SQL: &str = include_str!("sql/count_characteristics.sql");
const GET_CHARACTERISTIC_SQL: &str = include_str!("sql/get_characteristic.sql");
const SEARCH_CHARACTERISTICS_SQL: &str = include_str!("sql/search_characteristics.sql");
const CREATE_CHARACTERISTIC_SQL: &str = include_str!("sql/create_characteristic.sql");
const UPDATE_CHARACTERISTIC_SQL: &str = include_str!("sql/update_characteristic.sql");
const DELETE_CHARACTERISTIC_SQL: &str = include_str!("sql/delete_characteristic.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCharacteristicsRepository;

impl PgCharacteristicsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_characteristics(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
    ) -> Result<Vec<Characteristic>, sqlx::Error> {
        query_as::<Postgres, Characteristic>(LIST_CHARACTERISTICS_SQL)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_characteristics(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_CHARACTERISTICS_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_characteristic(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        characteristic: CharacteristicId,
    ) -> Result<Characteristic, sqlx::Error> {
        query_as::<Postgres, Characteristic>(GET_CHARACTERISTIC_SQL)
            .bind(characteristic.get())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn search_characteristics(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        limit: SearchLimit,
    ) -> Result<Vec<Characteristic>, sqlx::Error> {
        query_as::<Postgres, Characteristic>(SEARCH_CHARACTERISTICS_SQL)
            .bind(contains_pattern(name))
            .bind(limit.limit())
            .fetch_all(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "characteristics.repository.create_characteristic",
        skip(self, tx),
        err
    )]
    pub(crate) async fn create_characteristic(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        characteristic: &CharacteristicDraft,
    ) -> Result<Characteristic, sqlx::Error> {
        query_as::<Postgres, Characteristic>(CREATE_CHARACTERISTIC_SQL)
            .bind(characteristic.name.trim())
            .bind(non_empty(characteristic.measurement_unit.as_deref()))
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "characteristics.repository.update_characteristic",
        skip(self, tx),
        err
    )]
    pub(crate) async fn update_characteristic(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: CharacteristicId,
        characteristic: &CharacteristicDraft,
    ) -> Result<Characteristic, sqlx::Error> {
        query_as::<Postgres, Characteristic>(UPDATE_CHARACTERISTIC_SQL)
            .bind(id.get())
            .bind(characteristic.name.trim())
            .bind(non_empty(characteristic.measurement_unit.as_deref()))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_characteristic(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        characteristic: CharacteristicId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CHARACTERISTIC_SQL)
            .bind(characteristic.get())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Characteristic {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CharacteristicId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            measurement_unit: row.try_get("measurement_unit")?,
        })
    }
}
