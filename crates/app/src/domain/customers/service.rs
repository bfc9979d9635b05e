//! Customers service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::customers::{
        errors::CustomersServiceError,
        models::{Customer, CustomerDraft, CustomerId},
        repository::PgCustomersRepository,
    },
    pagination::{Page, PageRequest, SearchLimit},
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn list_customers(
        &self,
        page: PageRequest,
    ) -> Result<Page<Customer>, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let customers = self.repository.list_customers(&mut tx, page).await?;
        let total = self.repository.count_customers(&mut tx).await?;

        tx.commit().await?;

        Ok(Page::new(customers, total))
    }

    async fn get_customer(&self, customer: CustomerId) -> Result<Customer, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let customer = self.repository.get_customer(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(customer)
    }

    async fn get_customer_by_email(&self, email: String) -> Result<Customer, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let customer = self
            .repository
            .find_customer_by_email(&mut tx, &email)
            .await?
            .ok_or(CustomersServiceError::NotFound)?;

        tx.commit().await?;

        Ok(customer)
    }

    async fn search_customers(
        &self,
        email: String,
        limit: SearchLimit,
    ) -> Result<Vec<Customer>, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let customers = self
            .repository
            .search_customers(&mut tx, &email, limit)
            .await?;

        tx.commit().await?;

        Ok(customers)
    }

    async fn save_customer(
        &self,
        customer: CustomerDraft,
    ) -> Result<Customer, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let saved = self.repository.upsert_customer(&mut tx, &customer).await?;

        tx.commit().await?;

        Ok(saved)
    }

    async fn delete_customer(&self, customer: CustomerId) -> Result<(), CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_customer(&mut tx, customer).await?;

        if rows_affected == 0 {
            return Err(CustomersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Retrieve one page of customers ordered by id.
    async fn list_customers(
        &self,
        page: PageRequest,
    ) -> Result<Page<Customer>, CustomersServiceError>;

    /// Retrieve a single customer.
    async fn get_customer(&self, customer: CustomerId) -> Result<Customer, CustomersServiceError>;

    /// Look a customer up by email, ignoring case.
    async fn get_customer_by_email(&self, email: String) -> Result<Customer, CustomersServiceError>;

    /// Case-insensitive substring search on the email address.
    async fn search_customers(
        &self,
        email: String,
        limit: SearchLimit,
    ) -> Result<Vec<Customer>, CustomersServiceError>;

    /// Upsert: an id updates that row, no id updates the row owning the email or inserts.
    async fn save_customer(
        &self,
        customer: CustomerDraft,
    ) -> Result<Customer, CustomersServiceError>;

    /// Deletes a customer; their orders are kept without a customer.
    async fn delete_customer(&self, customer: CustomerId) -> Result<(), CustomersServiceError>;
}
