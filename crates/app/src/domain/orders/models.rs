//! Order Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    domain::{
        customers::models::{Customer, CustomerDraft},
        products::models::{Product, ProductId},
    },
    ids::TypedId,
};

/// Order ID
pub type OrderId = TypedId<Order>;

/// Order lifecycle: `created → payment → complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Items may still be added or removed; stock is already reserved per item.
    Created,
    /// Handed to the payment provider; items are frozen.
    Payment,
    /// The provider confirmed capture.
    Complete,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Payment => "payment",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "payment" => Ok(Self::Payment),
            "complete" => Ok(Self::Complete),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// Order Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    /// `None` for guest orders and after the customer was deleted.
    pub customer: Option<Customer>,
    pub created_at: Timestamp,
    pub address: String,
    pub status: OrderStatus,
    /// Provider order id, set when the order enters `payment`.
    pub payment_id: Option<String>,
}

/// Order insert/update payload.
///
/// Inserting upserts `customer` by email first. Updating only changes the address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderDraft {
    pub id: Option<OrderId>,
    pub customer: Option<CustomerDraft>,
    pub address: String,
}

/// Order Item ID
pub type OrderItemId = TypedId<OrderItem>;

/// A line of an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product: Product,
    pub quantity: u32,
    /// Product price when the line was added; later price changes do not affect it.
    pub price_per_item: Decimal,
}

impl OrderItem {
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price_per_item * Decimal::from(self.quantity)
    }
}

/// Request to add a product to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Result of polling the payment provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Captured; the order is now `complete`.
    Completed(Order),
    /// Not captured yet (or the provider could not be reached); poll again later.
    Pending,
}

/// Sum of `quantity × price_per_item` over the given lines.
#[must_use]
pub fn order_total(items: &[OrderItem]) -> Decimal {
    items.iter().map(OrderItem::subtotal).sum()
}
