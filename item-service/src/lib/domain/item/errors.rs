use thiserror::Error;

/// Error for ItemId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ItemIdError {
    #[error("Invalid item id: {0}")]
    InvalidFormat(String),
}

/// Error for item field validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ItemFieldsError {
    #[error("Item name must not be empty")]
    EmptyName,

    #[error("Item price must be a finite, non-negative number, got {0}")]
    InvalidPrice(f64),
}

/// Top-level error for all item-related operations
#[derive(Debug, Clone, Error)]
pub enum ItemError {
    #[error("Invalid item ID: {0}")]
    InvalidItemId(#[from] ItemIdError),

    #[error("Invalid item: {0}")]
    InvalidFields(#[from] ItemFieldsError),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
