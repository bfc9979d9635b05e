//! Checkout Models

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::carts::models::{CartId, CartProduct};

/// Cart lines clamped to available stock, as shown before the order is placed.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReview {
    pub cart_id: CartId,
    pub lines: Vec<CartProduct>,
    pub units: u64,
    pub total: Decimal,
}

impl CheckoutReview {
    #[must_use]
    pub fn new(cart_id: CartId, lines: Vec<CartProduct>) -> Self {
        let units = lines.iter().map(|line| u64::from(line.quantity)).sum();
        let total = lines.iter().map(CartProduct::subtotal).sum();

        Self {
            cart_id,
            lines,
            units,
            total,
        }
    }
}

/// Customer details submitted with an order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckoutForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
}

/// A rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn invalid(field: &'static str) -> Self {
        Self {
            field,
            message: format!("\"{field}\" is empty or invalid."),
        }
    }
}

impl CheckoutForm {
    /// Every field must be non-blank; the email also needs a local part and a domain.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if !is_email(&self.email) {
            errors.push(FieldError::invalid("email"));
        }

        for (field, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                errors.push(FieldError::invalid(field));
            }
        }

        errors
    }
}

fn is_email(value: &str) -> bool {
    value
        .trim()
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_form_reports_every_field_in_order() {
        let errors = CheckoutForm::default().validate();

        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();

        assert_eq!(fields, ["email", "first_name", "last_name", "address"]);
        assert_eq!(
            errors.first().map(|e| e.message.as_str()),
            Some("\"email\" is empty or invalid.")
        );
    }

    #[test]
    fn email_needs_both_sides_of_the_at_sign() {
        let form = |email: &str| CheckoutForm {
            email: email.to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            address: "2 Side Rd".to_string(),
        };

        assert!(form("ann@example.com").validate().is_empty());
        assert_eq!(form("ann@").validate().len(), 1);
        assert_eq!(form("@example.com").validate().len(), 1);
        assert_eq!(form("   ").validate().len(), 1);
    }
}
