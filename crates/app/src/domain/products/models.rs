//! Product Models

use rust_decimal::Decimal;

use crate::{
    domain::{
        categories::models::{Category, CategoryId},
        characteristics::models::{Characteristic, CharacteristicId},
    },
    ids::TypedId,
};

/// Product ID
pub type ProductId = TypedId<Product>;

/// Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    /// `None` when the product is uncategorised or its category was deleted.
    pub category: Option<Category>,
    pub model: String,
    pub manufacturer: String,
    pub price: Decimal,
    /// Units in stock.
    pub quantity: u32,
    pub image_url: Option<String>,
    pub warranty_days: u32,
}

/// Product insert/update payload; `id: None` inserts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductDraft {
    pub id: Option<ProductId>,
    pub category_id: Option<CategoryId>,
    pub model: String,
    pub manufacturer: String,
    pub price: Decimal,
    pub quantity: u32,
    pub image_url: Option<String>,
    pub warranty_days: u32,
}

/// Storefront catalog filter: prefix match on the model, optionally within one category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogFilter {
    pub category_id: Option<CategoryId>,
    pub query: String,
}

/// Product Characteristic ID
pub type ProductCharacteristicId = TypedId<ProductCharacteristic>;

/// A characteristic value attached to a product, e.g. "Weight: 1.2 kg".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCharacteristic {
    pub id: ProductCharacteristicId,
    pub product_id: ProductId,
    pub characteristic: Characteristic,
    pub value: String,
}

/// Product characteristic insert/update payload; `id: None` inserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCharacteristicDraft {
    pub id: Option<ProductCharacteristicId>,
    pub characteristic_id: CharacteristicId,
    pub value: String,
}
