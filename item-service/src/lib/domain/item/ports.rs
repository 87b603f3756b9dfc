use async_trait::async_trait;

use crate::domain::item::errors::ItemError;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemFields;
use crate::domain::item::models::ItemId;
use crate::domain::item::models::ItemSearch;
use crate::domain::user::models::UserId;

/// Port for item domain service operations.
///
/// Every operation is scoped to `owner`: items belonging to anyone else
/// behave exactly like items that do not exist.
#[async_trait]
pub trait ItemServicePort: Send + Sync + 'static {
    /// Create an item owned by `owner`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_item(&self, owner: UserId, fields: ItemFields) -> Result<Item, ItemError>;

    /// List all items owned by `owner`, ordered by id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_items(&self, owner: UserId) -> Result<Vec<Item>, ItemError>;

    /// Retrieve one of `owner`'s items.
    ///
    /// # Errors
    /// * `NotFound` - No such item for this owner
    /// * `DatabaseError` - Database operation failed
    async fn get_item(&self, owner: UserId, id: ItemId) -> Result<Item, ItemError>;

    /// Replace the fields of one of `owner`'s items.
    ///
    /// # Errors
    /// * `NotFound` - No such item for this owner
    /// * `DatabaseError` - Database operation failed
    async fn update_item(
        &self,
        owner: UserId,
        id: ItemId,
        fields: ItemFields,
    ) -> Result<Item, ItemError>;

    /// Delete one of `owner`'s items.
    ///
    /// # Errors
    /// * `NotFound` - No such item for this owner
    /// * `DatabaseError` - Database operation failed
    async fn delete_item(&self, owner: UserId, id: ItemId) -> Result<(), ItemError>;

    /// Search `owner`'s items by name substring and/or minimum price.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn search_items(&self, owner: UserId, search: ItemSearch)
        -> Result<Vec<Item>, ItemError>;
}

/// Persistence operations for items.
#[async_trait]
pub trait ItemRepository: Send + Sync + 'static {
    /// Persist a new item and return it with its assigned id.
    async fn create(&self, owner: UserId, fields: &ItemFields) -> Result<Item, ItemError>;

    /// All items of `owner`, ordered by id.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Item>, ItemError>;

    /// Item `id` if it belongs to `owner`.
    async fn find_for_owner(&self, id: ItemId, owner: UserId) -> Result<Option<Item>, ItemError>;

    /// Write back an item's fields.
    ///
    /// # Errors
    /// * `NotFound` - Item no longer exists for its owner
    async fn update(&self, item: &Item) -> Result<Item, ItemError>;

    /// Remove item `id` of `owner`.
    ///
    /// # Errors
    /// * `NotFound` - No such item for this owner
    async fn delete(&self, id: ItemId, owner: UserId) -> Result<(), ItemError>;

    /// Items of `owner` matching `search`, ordered by id.
    async fn search(&self, owner: UserId, search: &ItemSearch) -> Result<Vec<Item>, ItemError>;
}
