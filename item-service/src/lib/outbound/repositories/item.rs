use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::item::errors::ItemError;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemFields;
use crate::domain::item::models::ItemId;
use crate::domain::item::models::ItemName;
use crate::domain::item::models::ItemSearch;
use crate::domain::item::ports::ItemRepository;
use crate::domain::user::models::UserId;

pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ItemRow {
    id: i64,
    owner_id: i64,
    name: String,
    description: Option<String>,
    price: f64,
    in_stock: bool,
}

impl TryFrom<ItemRow> for Item {
    type Error = ItemError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(Item {
            id: ItemId(row.id),
            owner_id: UserId(row.owner_id),
            name: ItemName::new(row.name)?,
            description: row.description,
            price: row.price,
            in_stock: row.in_stock,
        })
    }
}

fn database_error(e: sqlx::Error) -> ItemError {
    ItemError::DatabaseError(e.to_string())
}

fn into_items(rows: Vec<ItemRow>) -> Result<Vec<Item>, ItemError> {
    rows.into_iter().map(Item::try_from).collect()
}

/// Escape LIKE wildcards so the search term matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn create(&self, owner: UserId, fields: &ItemFields) -> Result<Item, ItemError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            INSERT INTO items (name, description, price, in_stock, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, name, description, price, in_stock
            "#,
        )
        .bind(fields.name.as_str())
        .bind(fields.description.as_deref())
        .bind(fields.price)
        .bind(fields.in_stock)
        .bind(owner.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        row.try_into()
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Item>, ItemError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, owner_id, name, description, price, in_stock
            FROM items
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        into_items(rows)
    }

    async fn find_for_owner(&self, id: ItemId, owner: UserId) -> Result<Option<Item>, ItemError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, owner_id, name, description, price, in_stock
            FROM items
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Item::try_from).transpose()
    }

    async fn update(&self, item: &Item) -> Result<Item, ItemError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            UPDATE items
            SET name = $3, description = $4, price = $5, in_stock = $6
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, name, description, price, in_stock
            "#,
        )
        .bind(item.id.0)
        .bind(item.owner_id.0)
        .bind(item.name.as_str())
        .bind(item.description.as_deref())
        .bind(item.price)
        .bind(item.in_stock)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(row) => row.try_into(),
            None => Err(ItemError::NotFound(item.id.to_string())),
        }
    }

    async fn delete(&self, id: ItemId, owner: UserId) -> Result<(), ItemError> {
        let result = sqlx::query(
            r#"
            DELETE FROM items
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ItemError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn search(&self, owner: UserId, search: &ItemSearch) -> Result<Vec<Item>, ItemError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, owner_id, name, description, price, in_stock
            FROM items
            WHERE owner_id = $1
              AND ($2::TEXT IS NULL OR name ILIKE $2)
              AND ($3::DOUBLE PRECISION IS NULL OR price >= $3)
            ORDER BY id
            "#,
        )
        .bind(owner.0)
        .bind(search.name.as_deref().map(like_pattern))
        .bind(search.min_price)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        into_items(rows)
    }
}
