use std::fmt;

use crate::domain::item::errors::ItemFieldsError;
use crate::domain::item::errors::ItemIdError;
use crate::domain::user::models::UserId;

/// Item record owned by exactly one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub owner_id: UserId,
    pub name: ItemName,
    pub description: Option<String>,
    pub price: f64,
    pub in_stock: bool,
}

impl Item {
    /// Replace every user-editable field. Identity and ownership never change.
    pub fn apply(&mut self, fields: ItemFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.in_stock = fields.in_stock;
    }
}

/// Item unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub i64);

impl ItemId {
    /// Parse an item ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a base-10 integer
    pub fn from_string(s: &str) -> Result<Self, ItemIdError> {
        s.parse::<i64>()
            .map(ItemId)
            .map_err(|e| ItemIdError::InvalidFormat(format!("{}: {}", s, e)))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-empty item name, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    pub fn new(name: String) -> Result<Self, ItemFieldsError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ItemFieldsError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// User-editable item fields, validated.
///
/// Used both to create an item and to replace an existing item's fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    pub name: ItemName,
    pub description: Option<String>,
    pub price: f64,
    pub in_stock: bool,
}

impl ItemFields {
    /// # Errors
    /// * `EmptyName` - Name is blank
    /// * `InvalidPrice` - Price is negative, NaN or infinite
    pub fn new(
        name: String,
        description: Option<String>,
        price: f64,
        in_stock: bool,
    ) -> Result<Self, ItemFieldsError> {
        let name = ItemName::new(name)?;
        if !price.is_finite() || price < 0.0 {
            return Err(ItemFieldsError::InvalidPrice(price));
        }

        Ok(Self {
            name,
            description,
            price,
            in_stock,
        })
    }
}

/// Filters for searching a user's items. Absent filters match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemSearch {
    /// Case-insensitive substring of the item name
    pub name: Option<String>,
    /// Inclusive lower bound on price
    pub min_price: Option<f64>,
}

impl ItemSearch {
    /// Whether `item` satisfies every present filter.
    ///
    /// In-process form of the `WHERE` clause in
    /// [`PostgresItemRepository::search`](crate::outbound::repositories::PostgresItemRepository):
    /// `name ILIKE '%needle%'` with wildcards escaped, and `price >= min_price`.
    /// Storage backends without a query language filter with this, and the
    /// database tests check both agree on the same rows.
    pub fn matches(&self, item: &Item) -> bool {
        let name_matches = self.name.as_ref().map_or(true, |needle| {
            item.name
                .as_str()
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        let price_matches = self.min_price.map_or(true, |min| item.price >= min);

        name_matches && price_matches
    }
}
