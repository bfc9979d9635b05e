//! Test helpers.

use std::{sync::Arc, time::Duration};

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    context::AppContext,
    domain::{
        analytics::MockAnalyticsService,
        carts::{
            MockCartsService,
            janitor::{CartJanitor, JanitorHandle},
            models::{Cart, CartId, CartProduct, CartProductId},
        },
        categories::{
            MockCategoriesService,
            models::{Category, CategoryId},
        },
        characteristics::{
            MockCharacteristicsService,
            models::{Characteristic, CharacteristicId},
        },
        checkout::MockCheckoutService,
        customers::{
            MockCustomersService,
            models::{Customer, CustomerId},
        },
        orders::{
            MockOrdersService,
            models::{Order, OrderId, OrderItem, OrderItemId, OrderStatus},
        },
        products::{
            MockProductsService,
            models::{Product, ProductId},
        },
    },
};

use crate::{cart::session::CART_COOKIE, state::State};

/// One mock per service. Mocks without expectations fail the test when called.
#[derive(Default)]
pub(crate) struct TestServices {
    pub categories: MockCategoriesService,
    pub characteristics: MockCharacteristicsService,
    pub products: MockProductsService,
    pub customers: MockCustomersService,
    pub orders: MockOrdersService,
    pub carts: MockCartsService,
    pub checkout: MockCheckoutService,
    pub analytics: MockAnalyticsService,
    pub janitor: Option<JanitorHandle>,
}

impl TestServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        let janitor = self.janitor.unwrap_or_else(stopped_janitor);

        let app = AppContext {
            categories: Arc::new(self.categories),
            characteristics: Arc::new(self.characteristics),
            products: Arc::new(self.products),
            customers: Arc::new(self.customers),
            orders: Arc::new(self.orders),
            carts: Arc::new(self.carts),
            checkout: Arc::new(self.checkout),
            analytics: Arc::new(self.analytics),
        };

        State::new(app, janitor)
    }

    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}

/// A handle whose janitor is already gone.
fn stopped_janitor() -> JanitorHandle {
    let (_janitor, handle) =
        CartJanitor::new(Arc::new(MockCartsService::new()), Duration::from_secs(3600));

    handle
}

pub(crate) fn cart_cookie(cart: CartId) -> String {
    format!("{CART_COOKIE}={cart}")
}

pub(crate) fn make_category(id: i64) -> Category {
    Category {
        id: CategoryId::new(id),
        name: format!("Category {id}"),
        description: None,
    }
}

pub(crate) fn make_characteristic(id: i64) -> Characteristic {
    Characteristic {
        id: CharacteristicId::new(id),
        name: format!("Characteristic {id}"),
        measurement_unit: Some("kg".to_string()),
    }
}

pub(crate) fn make_product(id: i64) -> Product {
    Product {
        id: ProductId::new(id),
        category: Some(make_category(1)),
        model: format!("Model {id}"),
        manufacturer: "Acme".to_string(),
        price: Decimal::new(1250, 2),
        quantity: 5,
        image_url: None,
        warranty_days: 365,
    }
}

pub(crate) fn make_customer(id: i64) -> Customer {
    Customer {
        id: CustomerId::new(id),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: format!("jane{id}@example.com"),
    }
}

pub(crate) fn make_order(id: i64, status: OrderStatus) -> Order {
    Order {
        id: OrderId::new(id),
        customer: Some(make_customer(1)),
        created_at: Timestamp::UNIX_EPOCH,
        address: "1 Main Street".to_string(),
        status,
        payment_id: None,
    }
}

/// An item priced at 10.00, below the product's current 12.50.
pub(crate) fn make_order_item(order: i64, id: i64, quantity: u32) -> OrderItem {
    OrderItem {
        id: OrderItemId::new(id),
        order_id: OrderId::new(order),
        product: make_product(id),
        quantity,
        price_per_item: Decimal::new(1_000, 2),
    }
}

pub(crate) fn make_cart(cart: CartId) -> Cart {
    Cart {
        id: cart,
        last_access_time: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_product(cart: CartId, id: i64, quantity: u32) -> CartProduct {
    CartProduct {
        id: CartProductId::new(id),
        cart_id: cart,
        product: make_product(id),
        quantity,
    }
}

pub(crate) fn new_cart_id() -> CartId {
    CartId::new(Uuid::new_v4())
}
