//! Categories service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::categories::{
        errors::CategoriesServiceError,
        models::{Category, CategoryDraft, CategoryId},
        repository::PgCategoriesRepository,
    },
    pagination::{Page, PageRequest, SearchLimit},
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(
        &self,
        page: PageRequest,
    ) -> Result<Page<Category>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx, page).await?;
        let total = self.repository.count_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(Page::new(categories, total))
    }

    async fn get_category(&self, category: CategoryId) -> Result<Category, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let category = self.repository.get_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(category)
    }

    async fn search_categories(
        &self,
        name: String,
        limit: SearchLimit,
    ) -> Result<Vec<Category>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self
            .repository
            .search_categories(&mut tx, &name, limit)
            .await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn save_category(
        &self,
        category: CategoryDraft,
    ) -> Result<Category, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let saved = match category.id {
            Some(id) => {
                self.repository
                    .update_category(&mut tx, id, &category)
                    .await?
            }
            None => self.repository.create_category(&mut tx, &category).await?,
        };

        tx.commit().await?;

        Ok(saved)
    }

    async fn delete_category(&self, category: CategoryId) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_category(&mut tx, category).await?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Retrieve one page of categories ordered by id.
    async fn list_categories(
        &self,
        page: PageRequest,
    ) -> Result<Page<Category>, CategoriesServiceError>;

    /// Retrieve a single category.
    async fn get_category(&self, category: CategoryId) -> Result<Category, CategoriesServiceError>;

    /// Case-insensitive substring search on the category name.
    async fn search_categories(
        &self,
        name: String,
        limit: SearchLimit,
    ) -> Result<Vec<Category>, CategoriesServiceError>;

    /// Inserts when the draft has no id, updates otherwise.
    async fn save_category(
        &self,
        category: CategoryDraft,
    ) -> Result<Category, CategoriesServiceError>;

    /// Deletes a category; products referencing it lose their category.
    async fn delete_category(&self, category: CategoryId) -> Result<(), CategoriesServiceError>;
}
