//! Customer Models

use crate::ids::TypedId;

/// Customer ID
pub type CustomerId = TypedId<Customer>;

/// Customer Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    /// Natural key; unique across customers.
    pub email: String,
}

/// Customer insert/update payload.
///
/// With `id: None` the email decides: an existing customer with that address is updated,
/// otherwise a new one is inserted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomerDraft {
    pub id: Option<CustomerId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
