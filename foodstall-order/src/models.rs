use chrono::{DateTime, Utc};
use foodstall_catalog::MenuCatalog;
use foodstall_core::{CoreError, CoreResult, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Result of removing quantity from an order line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoveOutcome {
    FullyRemoved,
    PartiallyRemoved,
    NotFound,
}

/// The customer's in-progress order.
///
/// `total` is maintained incrementally with the unit price passed to each
/// `add`/`remove` call. It is never recomputed from the catalog, so a price
/// change after an item was added does not alter what the order already owes,
/// and a later partial removal subtracts at the new price. Removing the last
/// line resets `total` to zero, so no drift carries over to an empty order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Order {
    items: BTreeMap<u32, i64>,
    total: Money,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of `item_id`. Non-positive quantities are ignored.
    ///
    /// Fails with `AmountOverflow`, leaving the order unchanged, when the
    /// quantity or total would leave the representable range.
    pub fn add(&mut self, item_id: u32, quantity: i64, unit_price: Money) -> CoreResult<()> {
        if quantity <= 0 {
            return Ok(());
        }

        let stored = self.quantity(item_id).unwrap_or(0);
        let new_quantity = stored.checked_add(quantity).ok_or(CoreError::AmountOverflow)?;
        let new_total = unit_price
            .checked_mul(quantity)
            .and_then(|line| self.total.checked_add(line))
            .ok_or(CoreError::AmountOverflow)?;

        self.items.insert(item_id, new_quantity);
        self.total = new_total;
        Ok(())
    }

    /// Remove up to `quantity` units of `item_id`.
    ///
    /// Asking for at least the stored quantity drops the line. A non-positive
    /// quantity is invalid and reported as `NotFound`, as is a removal whose
    /// amount is out of range; neither changes the order.
    pub fn remove(&mut self, item_id: u32, quantity: i64, unit_price: Money) -> RemoveOutcome {
        let Some(stored) = self.quantity(item_id) else {
            return RemoveOutcome::NotFound;
        };
        if quantity <= 0 {
            return RemoveOutcome::NotFound;
        }

        let removed = quantity.min(stored);
        let fully = removed == stored;
        let new_total = if fully && self.items.len() == 1 {
            Money::zero()
        } else {
            match unit_price
                .checked_mul(removed)
                .and_then(|line| self.total.checked_sub(line))
            {
                Some(total) => total,
                None => return RemoveOutcome::NotFound,
            }
        };

        self.total = new_total;
        if fully {
            self.items.remove(&item_id);
            RemoveOutcome::FullyRemoved
        } else {
            self.items.insert(item_id, stored - removed);
            RemoveOutcome::PartiallyRemoved
        }
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn has(&self, item_id: u32) -> bool {
        self.items.contains_key(&item_id)
    }

    pub fn quantity(&self, item_id: u32) -> Option<i64> {
        self.items.get(&item_id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// (item id, quantity) pairs in id order
    pub fn lines(&self) -> impl Iterator<Item = (u32, i64)> + '_ {
        self.items.iter().map(|(id, qty)| (*id, *qty))
    }

    /// Reset after payment
    pub fn clear(&mut self) {
        self.items.clear();
        self.total = Money::zero();
    }

    /// Display lines priced at the catalog's current prices.
    /// Ids no longer in the catalog are skipped.
    pub fn render(&self, catalog: &MenuCatalog) -> Vec<OrderLineView> {
        self.items
            .iter()
            .filter_map(|(id, qty)| {
                let item = catalog.lookup(*id)?;
                Some(OrderLineView {
                    id: *id,
                    quantity: *qty,
                    name: item.name.clone(),
                    line_total: item.line_total(*qty),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineView {
    pub id: u32,
    pub quantity: i64,
    pub name: String,
    pub line_total: Money,
}

/// Snapshot of the current order for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub lines: Vec<OrderLineView>,
    pub total: Money,
}

impl OrderSummary {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Record of a completed checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
    pub lines: Vec<OrderLineView>,
    pub total: Money,
    pub tendered: Money,
    pub change: Money,
    pub paid_at: DateTime<Utc>,
}

impl Receipt {
    /// `None` when the change is out of range
    pub fn new(lines: Vec<OrderLineView>, total: Money, tendered: Money) -> Option<Self> {
        Some(Self {
            id: Uuid::new_v4(),
            lines,
            total,
            tendered,
            change: tendered.checked_sub(total)?,
            paid_at: Utc::now(),
        })
    }
}
