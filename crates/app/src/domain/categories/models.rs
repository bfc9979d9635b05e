//! Category Models

use crate::ids::TypedId;

/// Category ID
pub type CategoryId = TypedId<Category>;

/// Category Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
}

/// Category insert/update payload; `id: None` inserts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryDraft {
    pub id: Option<CategoryId>,
    pub name: String,
    pub description: Option<String>,
}
