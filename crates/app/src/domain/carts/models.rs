//! Cart Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{domain::products::models::Product, ids::TypedId};

/// Cart ID, minted by the client session rather than the database.
pub type CartId = TypedId<Cart, Uuid>;

/// Cart Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub id: CartId,
    /// Refreshed on every interaction; idle carts are swept after a week.
    pub last_access_time: Timestamp,
}

/// Cart Product ID
pub type CartProductId = TypedId<CartProduct>;

/// A product line in a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartProduct {
    pub id: CartProductId,
    pub cart_id: CartId,
    pub product: Product,
    pub quantity: u32,
}

impl CartProduct {
    /// `quantity × price` at the product's current price.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// A touched cart with its lines.
#[derive(Debug, Clone, PartialEq)]
pub struct CartContents {
    pub cart: Cart,
    pub products: Vec<CartProduct>,
}

impl CartContents {
    #[must_use]
    pub fn units(&self) -> u64 {
        self.products.iter().map(|p| u64::from(p.quantity)).sum()
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.products.iter().map(CartProduct::subtotal).sum()
    }
}
