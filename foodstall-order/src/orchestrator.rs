use crate::models::{Order, OrderSummary, Receipt, RemoveOutcome};
use foodstall_catalog::{CatalogSource, MenuCatalog, MenuItem};
use foodstall_core::{CoreError, CoreResult, MenuRepository, Money};

/// Point-of-sale session: one catalog, one in-progress order.
///
/// Customer operations touch the order and only read the catalog. Admin
/// operations touch the catalog and never the order. Catalog changes stay
/// in memory until `admin_save` is called.
pub struct OrderingService {
    catalog: MenuCatalog,
    order: Order,
    repository: Box<dyn MenuRepository>,
}

impl OrderingService {
    pub fn new(catalog: MenuCatalog, repository: Box<dyn MenuRepository>) -> Self {
        Self {
            catalog,
            order: Order::new(),
            repository,
        }
    }

    /// Load the menu through `repository`, falling back to the built-in menu
    pub fn open(repository: Box<dyn MenuRepository>) -> (Self, CatalogSource) {
        let (catalog, source) = MenuCatalog::load_or_default(repository.as_ref());
        (Self::new(catalog, repository), source)
    }

    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn list_menu(&self) -> impl Iterator<Item = &MenuItem> {
        self.catalog.list()
    }

    /// Add `quantity` of item `id` at its current catalog price
    pub fn place_line(&mut self, id: u32, quantity: i64) -> CoreResult<&MenuItem> {
        let item = self.catalog.lookup(id).ok_or(CoreError::InvalidId(id))?;
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }

        self.order.add(id, quantity, item.price)?;
        tracing::debug!(id, quantity, total = %self.order.total(), "Line placed");
        Ok(item)
    }

    /// Remove `quantity` of item `id` from the order
    pub fn modify_line(&mut self, id: u32, quantity: i64) -> CoreResult<RemoveOutcome> {
        if self.order.is_empty() {
            return Err(CoreError::EmptyOrder);
        }
        let item = self.catalog.lookup(id).ok_or(CoreError::InvalidId(id))?;
        if !self.order.has(id) {
            return Err(CoreError::InvalidId(id));
        }

        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }

        match self.order.remove(id, quantity, item.price) {
            // Id present and quantity positive: only the amount can be out of range
            RemoveOutcome::NotFound => Err(CoreError::AmountOverflow),
            outcome => {
                tracing::debug!(id, quantity, ?outcome, total = %self.order.total(), "Line modified");
                Ok(outcome)
            }
        }
    }

    pub fn view_order(&self) -> OrderSummary {
        OrderSummary {
            lines: self.order.render(&self.catalog),
            total: self.order.total(),
        }
    }

    /// Take payment for the current order and clear it.
    ///
    /// On any error the order is left untouched so the caller can re-prompt.
    pub fn checkout(&mut self, tendered: Money) -> CoreResult<Receipt> {
        if self.order.is_empty() {
            return Err(CoreError::EmptyOrder);
        }

        let total = self.order.total();
        if tendered < total {
            return Err(CoreError::InsufficientPayment { tendered, total });
        }

        let receipt = Receipt::new(self.order.render(&self.catalog), total, tendered)
            .ok_or(CoreError::AmountOverflow)?;
        self.order.clear();

        tracing::info!(receipt = %receipt.id, %total, change = %receipt.change, "Checkout complete");
        Ok(receipt)
    }

    pub fn admin_add_item(&mut self, name: &str, price: Money) -> CoreResult<u32> {
        self.catalog.add_item(name, price)
    }

    /// Returns the previous price
    pub fn admin_update_price(&mut self, id: u32, price: Money) -> CoreResult<Money> {
        self.catalog.update_price(id, price)
    }

    /// Persist the catalog; the only way admin changes become durable
    pub fn admin_save(&self) -> CoreResult<()> {
        self.catalog.save(self.repository.as_ref())
    }

    pub fn menu_location(&self) -> String {
        self.repository.location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodstall_core::MenuRecord;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedRepository {
        records: Rc<RefCell<Vec<MenuRecord>>>,
    }

    impl MenuRepository for SharedRepository {
        fn load(&self) -> CoreResult<Vec<MenuRecord>> {
            let records = self.records.borrow();
            if records.is_empty() {
                return Err(CoreError::EmptyCatalog(self.location()));
            }
            Ok(records.clone())
        }

        fn save(&self, records: &[MenuRecord]) -> CoreResult<()> {
            *self.records.borrow_mut() = records.to_vec();
            Ok(())
        }

        fn location(&self) -> String {
            "shared".to_string()
        }
    }

    fn default_service() -> OrderingService {
        let (service, source) = OrderingService::open(Box::new(SharedRepository::default()));
        assert_eq!(source, CatalogSource::Defaults);
        service
    }

    #[test]
    fn test_end_to_end_session() {
        let mut service = default_service();
        assert_eq!(service.list_menu().count(), 6);

        service.place_line(1, 2).unwrap();
        service.place_line(4, 3).unwrap();
        assert_eq!(service.order().total(), Money::from_cents(1648));

        let outcome = service.modify_line(1, 1).unwrap();
        assert_eq!(outcome, RemoveOutcome::PartiallyRemoved);
        assert_eq!(service.order().total(), Money::from_cents(1049));

        let receipt = service.checkout(Money::from_cents(1049)).unwrap();
        assert_eq!(receipt.change, Money::zero());
        assert_eq!(receipt.lines.len(), 2);
        assert!(service.order().is_empty());
        assert_eq!(service.order().total(), Money::zero());
    }

    #[test]
    fn test_place_line_rejects_unknown_id_and_bad_quantity() {
        let mut service = default_service();

        assert!(matches!(service.place_line(99, 1), Err(CoreError::InvalidId(99))));
        assert!(matches!(service.place_line(1, 0), Err(CoreError::InvalidQuantity(0))));
        assert!(service.order().is_empty());
    }

    #[test]
    fn test_modify_line_errors() {
        let mut service = default_service();
        assert!(matches!(service.modify_line(1, 1), Err(CoreError::EmptyOrder)));

        service.place_line(1, 2).unwrap();
        assert!(matches!(service.modify_line(2, 1), Err(CoreError::InvalidId(2))));
        assert!(matches!(service.modify_line(77, 1), Err(CoreError::InvalidId(77))));
        assert!(matches!(service.modify_line(1, 0), Err(CoreError::InvalidQuantity(0))));
        assert_eq!(service.order().quantity(1), Some(2));

        assert_eq!(service.modify_line(1, 5).unwrap(), RemoveOutcome::FullyRemoved);
        assert!(service.order().is_empty());
    }

    #[test]
    fn test_checkout_amounts() {
        let mut service = default_service();
        let id = service.admin_add_item("Combo Meal", Money::from_cents(1250)).unwrap();

        service.place_line(id, 1).unwrap();
        let err = service.checkout(Money::from_cents(1000)).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientPayment { .. }));
        assert_eq!(service.order().total(), Money::from_cents(1250));
        assert_eq!(service.order().quantity(id), Some(1));

        let receipt = service.checkout(Money::from_cents(1250)).unwrap();
        assert_eq!(receipt.change, Money::zero());
        assert!(service.order().is_empty());

        service.place_line(id, 1).unwrap();
        let receipt = service.checkout(Money::from_cents(2000)).unwrap();
        assert_eq!(receipt.change, Money::from_cents(750));
        assert!(service.order().is_empty());
    }

    #[test]
    fn test_checkout_empty_order() {
        let mut service = default_service();

        assert!(matches!(
            service.checkout(Money::from_cents(500)),
            Err(CoreError::EmptyOrder)
        ));
    }

    #[test]
    fn test_price_change_is_not_retroactive() {
        let mut service = default_service();
        service.place_line(1, 1).unwrap();

        service.admin_update_price(1, Money::from_cents(649)).unwrap();

        // The order keeps what it owed at add time; display lines use the new price
        assert_eq!(service.order().total(), Money::from_cents(599));
        let summary = service.view_order();
        assert_eq!(summary.total, Money::from_cents(599));
        assert_eq!(summary.lines[0].line_total, Money::from_cents(649));

        // Removal is priced at the current catalog price while lines remain
        service.place_line(4, 1).unwrap();
        assert_eq!(service.order().total(), Money::from_cents(749));
        service.modify_line(1, 1).unwrap();
        assert_eq!(service.order().total(), Money::from_cents(100));

        // Emptying the order leaves no drift for the next customer
        service.modify_line(4, 1).unwrap();
        assert!(service.order().is_empty());
        assert_eq!(service.order().total(), Money::zero());

        service.place_line(4, 2).unwrap();
        let receipt = service.checkout(Money::from_cents(500)).unwrap();
        assert_eq!(receipt.change, Money::from_cents(200));
    }

    #[test]
    fn test_place_line_out_of_range_quantity() {
        let mut service = default_service();

        assert!(matches!(
            service.place_line(1, 20_000_000_000_000_000),
            Err(CoreError::AmountOverflow)
        ));
        assert!(service.order().is_empty());

        service.place_line(1, 2).unwrap();
        assert!(matches!(
            service.place_line(1, i64::MAX),
            Err(CoreError::AmountOverflow)
        ));
        assert_eq!(service.order().quantity(1), Some(2));
        assert_eq!(service.order().total(), Money::from_cents(1198));

        // A huge removal request is clamped to what is stored
        assert_eq!(service.modify_line(1, i64::MAX).unwrap(), RemoveOutcome::FullyRemoved);
        assert!(service.order().is_empty());
    }

    #[test]
    fn test_admin_changes_need_explicit_save() {
        let repository = SharedRepository::default();
        let (mut service, _) = OrderingService::open(Box::new(repository.clone()));

        service.admin_add_item("Hot Cocoa", Money::from_cents(275)).unwrap();
        service.admin_update_price(5, Money::from_cents(125)).unwrap();
        assert!(repository.records.borrow().is_empty());

        service.admin_save().unwrap();

        let (reopened, source) = OrderingService::open(Box::new(repository.clone()));
        assert_eq!(source, CatalogSource::File("shared".to_string()));
        assert_eq!(reopened.catalog().len(), 7);
        assert_eq!(reopened.catalog().lookup(5).unwrap().price, Money::from_cents(125));
        assert_eq!(reopened.catalog().lookup(7).unwrap().name, "Hot Cocoa");
    }

    #[test]
    fn test_admin_errors_leave_catalog_unchanged() {
        let mut service = default_service();

        assert!(matches!(
            service.admin_add_item("Air", Money::zero()),
            Err(CoreError::InvalidPrice(_))
        ));
        assert!(matches!(
            service.admin_update_price(42, Money::from_cents(100)),
            Err(CoreError::InvalidId(42))
        ));
        assert_eq!(service.catalog().len(), 6);
        assert_eq!(service.catalog().next_id(), 7);
    }
}
