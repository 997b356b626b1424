use crate::item::MenuItem;
use foodstall_core::{CoreError, CoreResult, MenuRecord, MenuRepository, Money};
use std::collections::BTreeMap;

/// Where a catalog came from at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(String),
    Defaults,
}

/// The orderable menu, keyed by item id.
///
/// Ids are handed out in strictly increasing order and never reused, so
/// ascending key order is also insertion (and file) order. The map is the
/// only copy of each item; there is no separate display list to keep in sync.
#[derive(Debug, Clone)]
pub struct MenuCatalog {
    items: BTreeMap<u32, MenuItem>,
    next_id: u32,
}

impl MenuCatalog {
    /// Build a catalog from persisted records, numbering ids from 1 in
    /// record order. Records with an empty name or a non-positive price
    /// are skipped.
    pub fn from_records(records: Vec<MenuRecord>) -> Self {
        let mut catalog = Self {
            items: BTreeMap::new(),
            next_id: 1,
        };

        for record in records {
            if record.name.is_empty() || !record.price.is_positive() {
                tracing::debug!(name = %record.name, price = %record.price, "Skipping invalid menu record");
                continue;
            }
            catalog.insert(record.name, record.price);
        }

        catalog
    }

    /// Fixed six-item menu used when no menu file is available
    pub fn default_catalog() -> Self {
        Self::from_records(vec![
            MenuRecord::new("Veggie Burger", Money::from_cents(599)),
            MenuRecord::new("Cheese Pizza Slice", Money::from_cents(350)),
            MenuRecord::new("French Fries (Large)", Money::from_cents(299)),
            MenuRecord::new("Soda (Coke/Pepsi)", Money::from_cents(150)),
            MenuRecord::new("Bottled Water", Money::from_cents(100)),
            MenuRecord::new("Iced Coffee", Money::from_cents(400)),
        ])
    }

    /// Load a fresh catalog from `repository`. Ids are renumbered from 1
    /// in stored order.
    pub fn load(repository: &dyn MenuRepository) -> CoreResult<Self> {
        let records = repository.load()?;
        let catalog = Self::from_records(records);

        if catalog.is_empty() {
            return Err(CoreError::EmptyCatalog(repository.location()));
        }

        tracing::info!(items = catalog.len(), location = %repository.location(), "Menu loaded");
        Ok(catalog)
    }

    /// Load from `repository`, falling back to the default catalog on any failure
    pub fn load_or_default(repository: &dyn MenuRepository) -> (Self, CatalogSource) {
        match Self::load(repository) {
            Ok(catalog) => (catalog, CatalogSource::File(repository.location())),
            Err(e) => {
                tracing::warn!("Could not load menu ({}). Using default menu.", e);
                (Self::default_catalog(), CatalogSource::Defaults)
            }
        }
    }

    /// Persist the catalog in display order
    pub fn save(&self, repository: &dyn MenuRepository) -> CoreResult<()> {
        let records: Vec<MenuRecord> = self.items.values().map(MenuItem::to_record).collect();
        repository.save(&records)?;

        tracing::info!(items = records.len(), location = %repository.location(), "Menu saved");
        Ok(())
    }

    /// Append a new item and return its id
    pub fn add_item(&mut self, name: &str, price: Money) -> CoreResult<u32> {
        if name.is_empty() {
            return Err(CoreError::InvalidName);
        }
        if !price.is_positive() {
            return Err(CoreError::InvalidPrice(price));
        }

        let id = self.insert(name.to_string(), price);
        tracing::info!(id, name, %price, "Menu item added");
        Ok(id)
    }

    /// Change the price of an existing item, returning the previous price.
    ///
    /// Orders already holding this item keep the total they accumulated at
    /// the old price.
    pub fn update_price(&mut self, id: u32, new_price: Money) -> CoreResult<Money> {
        if !new_price.is_positive() {
            return Err(CoreError::InvalidPrice(new_price));
        }

        let item = self.items.get_mut(&id).ok_or(CoreError::InvalidId(id))?;
        let old_price = std::mem::replace(&mut item.price, new_price);

        tracing::info!(id, name = %item.name, %old_price, %new_price, "Menu price updated");
        Ok(old_price)
    }

    pub fn lookup(&self, id: u32) -> Option<&MenuItem> {
        self.items.get(&id)
    }

    /// Items in catalog order
    pub fn list(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Id the next `add_item` will assign
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    fn insert(&mut self, name: String, price: Money) -> u32 {
        let id = self.next_id;
        self.items.insert(id, MenuItem::new(id, name, price));
        self.next_id += 1;
        id
    }
}

impl Default for MenuCatalog {
    fn default() -> Self {
        Self::default_catalog()
    }
}
