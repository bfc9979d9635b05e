//! Characteristics service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::characteristics::{
        errors::CharacteristicsServiceError,
        models::{Characteristic, CharacteristicDraft, CharacteristicId},
        repository::PgCharacteristicsRepository,
    },
    pagination::{Page, PageRequest, SearchLimit},
};

#[derive(Debug, Clone)]
pub struct PgCharacteristicsService {
    db: Db,
    repository: PgCharacteristicsRepository,
}

impl PgCharacteristicsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCharacteristicsRepository::new(),
        }
    }
}

#[async_trait]
impl CharacteristicsService for PgCharacteristicsService {
    async fn list_characteristics(
        &self,
        page: PageRequest,
    ) -> Result<Page<Characteristic>, CharacteristicsServiceError> {
        let mut tx = self.db.begin().await?;

        let characteristics = self.repository.list_characteristics(&mut tx, page).await?;
        let total = self.repository.count_characteristics(&mut tx).await?;

        tx.commit().await?;

        Ok(Page::new(characteristics, total))
    }

    async fn get_characteristic(
        &self,
        characteristic: CharacteristicId,
    ) -> Result<Characteristic, CharacteristicsServiceError> {
        let mut tx = self.db.begin().await?;

        let characteristic = self
            .repository
            .get_characteristic(&mut tx, characteristic)
            .await?;

        tx.commit().await?;

        Ok(characteristic)
    }

    async fn search_characteristics(
        &self,
        name: String,
        limit: SearchLimit,
    ) -> Result<Vec<Characteristic>, CharacteristicsServiceError> {
        let mut tx = self.db.begin().await?;

        let characteristics = self
            .repository
            .search_characteristics(&mut tx, &name, limit)
            .await?;

        tx.commit().await?;

        Ok(characteristics)
    }

    async fn save_characteristic(
        &self,
        characteristic: CharacteristicDraft,
    ) -> Result<Characteristic, CharacteristicsServiceError> {
        let mut tx = self.db.begin().await?;

        let saved = if let Some(id) = characteristic.id {
            self.repository
                .update_characteristic(&mut tx, id, &characteristic)
                .await?
        } else {
            self.repository
                .create_characteristic(&mut tx, &characteristic)
                .await?
        };

        tx.commit().await?;

        Ok(saved)
    }

    async fn delete_characteristic(
        &self,
        characteristic: CharacteristicId,
    ) -> Result<(), CharacteristicsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_characteristic(&mut tx, characteristic)
            .await?;

        if rows_affected == 0 {
            return Err(CharacteristicsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CharacteristicsService: Send + Sync {
    /// Retrieve one page of characteristics ordered by id.
    async fn list_characteristics(
        &self,
        page: PageRequest,
    ) -> Result<Page<Characteristic>, CharacteristicsServiceError>;

    /// Retrieve a single characteristic.
    async fn get_characteristic(
        &self,
        characteristic: CharacteristicId,
    ) -> Result<Characteristic, CharacteristicsServiceError>;

    /// Case-insensitive substring search on the characteristic name.
    async fn search_characteristics(
        &self,
        name: String,
        limit: SearchLimit,
    ) -> Result<Vec<Characteristic>, CharacteristicsServiceError>;

    /// Inserts when the draft has no id, updates otherwise.
    async fn save_characteristic(
        &self,
        characteristic: CharacteristicDraft,
    ) -> Result<Characteristic, CharacteristicsServiceError>;

    /// Deletes a characteristic together with every product value using it.
    async fn delete_characteristic(
        &self,
        characteristic: CharacteristicId,
    ) -> Result<(), CharacteristicsServiceError>;
}
