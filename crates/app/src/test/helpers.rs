//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    domain::{
        categories::{
            CategoriesService, CategoriesServiceError,
            models::{Category, CategoryDraft, CategoryId},
        },
        characteristics::{
            CharacteristicsService, CharacteristicsServiceError,
            models::{Characteristic, CharacteristicDraft},
        },
        customers::{
            CustomersService, CustomersServiceError,
            models::{Customer, CustomerDraft},
        },
        orders::{
            OrdersService, OrdersServiceError,
            models::{Order, OrderDraft},
        },
        products::{
            ProductsService, ProductsServiceError,
            models::{Product, ProductDraft},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_category(
    ctx: &TestContext,
    name: &str,
) -> Result<Category, CategoriesServiceError> {
    ctx.categories
        .save_category(CategoryDraft {
            id: None,
            name: name.to_string(),
            description: None,
        })
        .await
}

pub(crate) async fn create_characteristic(
    ctx: &TestContext,
    name: &str,
    measurement_unit: Option<&str>,
) -> Result<Characteristic, CharacteristicsServiceError> {
    ctx.characteristics
        .save_characteristic(CharacteristicDraft {
            id: None,
            name: name.to_string(),
            measurement_unit: measurement_unit.map(str::to_string),
        })
        .await
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    model: &str,
    category_id: Option<CategoryId>,
    price: Decimal,
    quantity: u32,
) -> Result<Product, ProductsServiceError> {
    ctx.products
        .save_product(ProductDraft {
            id: None,
            category_id,
            model: model.to_string(),
            manufacturer: "Acme".to_string(),
            price,
            quantity,
            image_url: None,
            warranty_days: 365,
        })
        .await
}

/// Overwrite a product's stock, keeping every other field.
pub(crate) async fn set_stock(
    ctx: &TestContext,
    product: &Product,
    quantity: u32,
) -> Result<Product, ProductsServiceError> {
    ctx.products
        .save_product(ProductDraft {
            id: Some(product.id),
            category_id: product.category.as_ref().map(|category| category.id),
            model: product.model.clone(),
            manufacturer: product.manufacturer.clone(),
            price: product.price,
            quantity,
            image_url: product.image_url.clone(),
            warranty_days: product.warranty_days,
        })
        .await
}

pub(crate) async fn create_customer(
    ctx: &TestContext,
    email: &str,
) -> Result<Customer, CustomersServiceError> {
    ctx.customers
        .save_customer(CustomerDraft {
            id: None,
            first_name: "Test".to_string(),
            last_name: "Customer".to_string(),
            email: email.to_string(),
        })
        .await
}

/// A `created` order for a customer identified by `email`.
pub(crate) async fn create_order(
    ctx: &TestContext,
    email: &str,
) -> Result<Order, OrdersServiceError> {
    ctx.orders
        .save_order(OrderDraft {
            id: None,
            customer: Some(CustomerDraft {
                id: None,
                first_name: "Test".to_string(),
                last_name: "Customer".to_string(),
                email: email.to_string(),
            }),
            address: "1 Test Street".to_string(),
        })
        .await
}
