//! Categories Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{contains_pattern, non_empty},
    domain::categories::models::{Category, CategoryDraft, CategoryId},
    pagination::{PageRequest, SearchLimit},
};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const COUNT_CATEGORIES_SQL: &str = include_str!("sql/count_categories.sql");
const GET_CATEGORY_SQL: &str = include_str!("sql/get_category.sql");
const SEARCH_CATEGORIES_SQL: &str = include_str!("sql/search_categories.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const UPDATE_CATEGORY_SQL: &str = include_str!("sql/update_category.sql");
const DELETE_CATEGORY_SQL: &str = include_str!("sql/delete_category.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCategoriesRepository;

impl PgCategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
    ) -> Result<Vec<Category>, sqlx::Error> {
        query_as::<Postgres, Category>(LIST_CATEGORIES_SQL)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_CATEGORIES_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryId,
    ) -> Result<Category, sqlx::Error> {
        query_as::<Postgres, Category>(GET_CATEGORY_SQL)
            .bind(category.get())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn search_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        limit: SearchLimit,
    ) -> Result<Vec<Category>, sqlx::Error> {
        query_as::<Postgres, Category>(SEARCH_CATEGORIES_SQL)
            .bind(contains_pattern(name))
            .bind(limit.limit())
            .fetch_all(&mut **tx)
            .await
    }

    #[tracing::instrument(name = "categories.repository.create_category", skip(self, tx), err)]
    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: &CategoryDraft,
    ) -> Result<Category, sqlx::Error> {
        query_as::<Postgres, Category>(CREATE_CATEGORY_SQL)
            .bind(category.name.trim())
            .bind(non_empty(category.description.as_deref()))
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(name = "categories.repository.update_category", skip(self, tx), err)]
    pub(crate) async fn update_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: CategoryId,
        category: &CategoryDraft,
    ) -> Result<Category, sqlx::Error> {
        query_as::<Postgres, Category>(UPDATE_CATEGORY_SQL)
            .bind(id.get())
            .bind(category.name.trim())
            .bind(non_empty(category.description.as_deref()))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CATEGORY_SQL)
            .bind(category.get())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Category {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CategoryId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
        })
    }
}
