use crate::{CoreResult, Money};
use serde::{Deserialize, Serialize};

/// What the menu store persists for one item. Ids are not persisted;
/// they are reassigned in record order on every load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuRecord {
    pub name: String,
    pub price: Money,
}

impl MenuRecord {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Repository trait for menu persistence
pub trait MenuRepository {
    /// Read every valid record in stored order.
    ///
    /// Fails with `FileOpen` when the store cannot be read and with
    /// `EmptyCatalog` when it holds no valid record.
    fn load(&self) -> CoreResult<Vec<MenuRecord>>;

    /// Replace the stored menu with `records`.
    fn save(&self, records: &[MenuRecord]) -> CoreResult<()>;

    /// Human-readable location, used in logs and messages.
    fn location(&self) -> String;
}
