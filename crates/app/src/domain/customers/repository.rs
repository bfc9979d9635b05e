//! Customers Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::contains_pattern,
    domain::customers::models::{Customer, CustomerDraft, CustomerId},
    pagination::{PageRequest, SearchLimit},
};

const LIST_CUSTOMERS_SQL: &str = include_str!("sql/list_customers.sql");
const COUNT_CUSTOMERS_SQL: &str = include_str!("sql/count_customers.sql");
const GET_CUSTOMER_SQL: &str = include_str!("sql/get_customer.sql");
const GET_CUSTOMER_BY_EMAIL_SQL: &str = include_str!("sql/get_customer_by_email.sql");
const SEARCH_CUSTOMERS_SQL: &str = include_str!("sql/search_customers.sql");
const UPSERT_CUSTOMER_BY_EMAIL_SQL: &str = include_str!("sql/upsert_customer_by_email.sql");
const UPDATE_CUSTOMER_SQL: &str = include_str!("sql/update_customer.sql");
const DELETE_CUSTOMER_SQL: &str = include_str!("sql/delete_customer.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCustomersRepository;

impl PgCustomersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_customers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        query_as::<Postgres, Customer>(LIST_CUSTOMERS_SQL)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_customers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_CUSTOMERS_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerId,
    ) -> Result<Customer, sqlx::Error> {
        query_as::<Postgres, Customer>(GET_CUSTOMER_SQL)
            .bind(customer.get())
            .fetch_one(&mut **tx)
            .await
    }

    /// Case-insensitive exact match; a miss is `Ok(None)`.
    pub(crate) async fn find_customer_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<Customer>, sqlx::Error> {
        query_as::<Postgres, Customer>(GET_CUSTOMER_BY_EMAIL_SQL)
            .bind(email.trim())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn search_customers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        limit: SearchLimit,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        query_as::<Postgres, Customer>(SEARCH_CUSTOMERS_SQL)
            .bind(contains_pattern(email))
            .bind(limit.limit())
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert or update a customer, resolving a missing id through the email address.
    ///
    /// Without an id this is a single `INSERT .. ON CONFLICT` on the lower-cased email, so
    /// saving an address twice updates the name fields of the one existing row, whatever the
    /// letter case and even from concurrent transactions.
    #[tracing::instrument(name = "customers.repository.upsert_customer", skip(self, tx), err)]
    pub(crate) async fn upsert_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: &CustomerDraft,
    ) -> Result<Customer, sqlx::Error> {
        match customer.id {
            Some(id) => self.update_customer(tx, id, customer).await,
            None => self.upsert_customer_by_email(tx, customer).await,
        }
    }

    async fn upsert_customer_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: &CustomerDraft,
    ) -> Result<Customer, sqlx::Error> {
        query_as::<Postgres, Customer>(UPSERT_CUSTOMER_BY_EMAIL_SQL)
            .bind(customer.first_name.trim())
            .bind(customer.last_name.trim())
            .bind(customer.email.trim())
            .fetch_one(&mut **tx)
            .await
    }

    async fn update_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: CustomerId,
        customer: &CustomerDraft,
    ) -> Result<Customer, sqlx::Error> {
        query_as::<Postgres, Customer>(UPDATE_CUSTOMER_SQL)
            .bind(id.get())
            .bind(customer.first_name.trim())
            .bind(customer.last_name.trim())
            .bind(customer.email.trim())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CUSTOMER_SQL)
            .bind(customer.get())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Customer {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CustomerId::new(row.try_get("id")?),
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
        })
    }
}
