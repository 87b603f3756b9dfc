use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::item::errors::ItemError;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemFields;
use crate::domain::item::models::ItemId;
use crate::domain::item::models::ItemSearch;
use crate::domain::item::ports::ItemRepository;
use crate::domain::item::ports::ItemServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for item operations.
pub struct ItemService<IR>
where
    IR: ItemRepository,
{
    repository: Arc<IR>,
}

impl<IR> ItemService<IR>
where
    IR: ItemRepository,
{
    pub fn new(repository: Arc<IR>) -> Self {
        Self { repository }
    }

    async fn owned_item(&self, owner: UserId, id: ItemId) -> Result<Item, ItemError> {
        self.repository
            .find_for_owner(id, owner)
            .await?
            .ok_or(ItemError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<IR> ItemServicePort for ItemService<IR>
where
    IR: ItemRepository,
{
    async fn create_item(&self, owner: UserId, fields: ItemFields) -> Result<Item, ItemError> {
        let item = self.repository.create(owner, &fields).await?;
        tracing::debug!(item_id = %item.id, owner_id = %owner, "Item created");
        Ok(item)
    }

    async fn list_items(&self, owner: UserId) -> Result<Vec<Item>, ItemError> {
        self.repository.list_by_owner(owner).await
    }

    async fn get_item(&self, owner: UserId, id: ItemId) -> Result<Item, ItemError> {
        self.owned_item(owner, id).await
    }

    async fn update_item(
        &self,
        owner: UserId,
        id: ItemId,
        fields: ItemFields,
    ) -> Result<Item, ItemError> {
        let mut item = self.owned_item(owner, id).await?;
        item.apply(fields);

        self.repository.update(&item).await
    }

    async fn delete_item(&self, owner: UserId, id: ItemId) -> Result<(), ItemError> {
        self.repository.delete(id, owner).await?;
        tracing::debug!(item_id = %id, owner_id = %owner, "Item deleted");
        Ok(())
    }

    async fn search_items(
        &self,
        owner: UserId,
        search: ItemSearch,
    ) -> Result<Vec<Item>, ItemError> {
        self.repository.search(owner, &search).await
    }
}
