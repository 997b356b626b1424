use foodstall_core::{MenuRecord, Money};
use serde::{Deserialize, Serialize};

/// A single orderable item on the menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: u32,
    pub name: String,
    pub price: Money,
}

impl MenuItem {
    pub fn new(id: u32, name: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    /// Line total for `quantity` units at the current price, for display
    pub fn line_total(&self, quantity: i64) -> Money {
        self.price.saturating_mul(quantity)
    }

    /// Persisted form of this item (the id is not stored)
    pub fn to_record(&self) -> MenuRecord {
        MenuRecord::new(self.name.clone(), self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total_and_record() {
        let item = MenuItem::new(1, "Veggie Burger", Money::from_cents(599));

        assert_eq!(item.line_total(2), Money::from_cents(1198));
        assert_eq!(item.to_record(), MenuRecord::new("Veggie Burger", Money::from_cents(599)));
    }
}
