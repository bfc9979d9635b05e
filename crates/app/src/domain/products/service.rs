//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        errors::ProductsServiceError,
        models::{
            CatalogFilter, Product, ProductCharacteristic, ProductCharacteristicDraft,
            ProductCharacteristicId, ProductDraft, ProductId,
        },
        repositories::{PgProductCharacteristicsRepository, PgProductsRepository},
    },
    pagination::{Page, PageRequest, SearchLimit},
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    products: PgProductsRepository,
    characteristics: PgProductCharacteristicsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            products: PgProductsRepository::new(),
            characteristics: PgProductCharacteristicsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self, page: PageRequest) -> Result<Page<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.products.list_products(&mut tx, page).await?;
        let total = self.products.count_products(&mut tx).await?;

        tx.commit().await?;

        Ok(Page::new(products, total))
    }

    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.products.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn search_products(
        &self,
        model: String,
        limit: SearchLimit,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.products.search_products(&mut tx, &model, limit).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn search_catalog(
        &self,
        page: PageRequest,
        filter: CatalogFilter,
    ) -> Result<Page<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.products.search_catalog(&mut tx, page, &filter).await?;
        let total = self.products.count_catalog(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(Page::new(products, total))
    }

    #[tracing::instrument(name = "products.service.save_product", skip(self), err)]
    async fn save_product(&self, product: ProductDraft) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let id = match product.id {
            Some(id) => self.products.update_product(&mut tx, id, &product).await?,
            None => self.products.create_product(&mut tx, &product).await?,
        };

        let saved = self.products.get_product(&mut tx, id).await?;

        tx.commit().await?;

        Ok(saved)
    }

    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.products.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_product_characteristics(
        &self,
        product: ProductId,
    ) -> Result<Vec<ProductCharacteristic>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        // Distinguish "unknown product" from "no characteristics yet".
        self.products.get_product(&mut tx, product).await?;

        let items = self
            .characteristics
            .list_product_characteristics(&mut tx, product)
            .await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn get_product_characteristic(
        &self,
        product: ProductId,
        item: ProductCharacteristicId,
    ) -> Result<ProductCharacteristic, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let item = self
            .characteristics
            .get_product_characteristic(&mut tx, product, item)
            .await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn save_product_characteristic(
        &self,
        product: ProductId,
        item: ProductCharacteristicDraft,
    ) -> Result<ProductCharacteristic, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let id = if let Some(id) = item.id {
            self.characteristics
                .update_product_characteristic(&mut tx, product, id, &item)
                .await?
        } else {
            self.characteristics
                .create_product_characteristic(&mut tx, product, &item)
                .await?
        };

        let saved = self
            .characteristics
            .get_product_characteristic(&mut tx, product, id)
            .await?;

        tx.commit().await?;

        Ok(saved)
    }

    async fn delete_product_characteristic(
        &self,
        product: ProductId,
        item: ProductCharacteristicId,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .characteristics
            .delete_product_characteristic(&mut tx, product, item)
            .await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve one page of products ordered by id, with their categories.
    async fn list_products(&self, page: PageRequest) -> Result<Page<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError>;

    /// Case-insensitive substring search on the model.
    async fn search_products(
        &self,
        model: String,
        limit: SearchLimit,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Storefront catalog: case-insensitive model prefix, optionally restricted to a category.
    async fn search_catalog(
        &self,
        page: PageRequest,
        filter: CatalogFilter,
    ) -> Result<Page<Product>, ProductsServiceError>;

    /// Inserts when the draft has no id, updates otherwise.
    async fn save_product(&self, product: ProductDraft) -> Result<Product, ProductsServiceError>;

    /// Deletes a product. Fails with `InvalidReference` while order items still point at it.
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError>;

    async fn list_product_characteristics(
        &self,
        product: ProductId,
    ) -> Result<Vec<ProductCharacteristic>, ProductsServiceError>;

    async fn get_product_characteristic(
        &self,
        product: ProductId,
        item: ProductCharacteristicId,
    ) -> Result<ProductCharacteristic, ProductsServiceError>;

    /// A product carries at most one value per characteristic; a duplicate is `AlreadyExists`.
    async fn save_product_characteristic(
        &self,
        product: ProductId,
        item: ProductCharacteristicDraft,
    ) -> Result<ProductCharacteristic, ProductsServiceError>;

    async fn delete_product_characteristic(
        &self,
        product: ProductId,
        item: ProductCharacteristicId,
    ) -> Result<(), ProductsServiceError>;
}
