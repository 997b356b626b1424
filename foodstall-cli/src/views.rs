//! Console tables for the menu, the order and receipts.

use foodstall_catalog::MenuItem;
use foodstall_order::{OrderSummary, Receipt};
use std::fmt::Display;

const RULE_HEAVY: &str = "============================================";
const RULE_LIGHT: &str = "--------------------------------------------";

pub fn main_menu() -> String {
    [
        "",
        "--- Food Ordering System ---",
        "1. View Menu",
        "2. Place New Order",
        "3. View Current Order",
        "4. Modify Current Order (Remove Item)",
        "5. Proceed to Payment",
        "6. Enter Admin Panel",
        "7. Exit System",
    ]
    .join("\n")
}

pub fn admin_menu() -> String {
    [
        "",
        "=== ADMIN PANEL ===",
        "1. Add New Item",
        "2. Update Item Price",
        "3. Save Menu Changes to File (REQUIRED to save permanently)",
        "4. Go Back to Main Menu",
    ]
    .join("\n")
}

fn row(first: impl Display, name: &str, amount: impl Display) -> String {
    format!("{:<5}{:<25}{:>10}", first.to_string(), name, amount.to_string())
}

pub fn menu_table<'a>(items: impl Iterator<Item = &'a MenuItem>) -> String {
    let mut lines = vec![
        String::new(),
        RULE_HEAVY.to_string(),
        "             TODAY'S MENU".to_string(),
        RULE_HEAVY.to_string(),
        row("ID", "ITEM", "PRICE"),
        RULE_LIGHT.to_string(),
    ];
    lines.extend(items.map(|item| row(item.id, &item.name, item.price)));
    lines.push(RULE_HEAVY.to_string());
    lines.join("\n")
}

pub fn order_table(summary: &OrderSummary) -> String {
    if summary.is_empty() {
        return "\n    --> Order is currently empty. <--".to_string();
    }

    let mut lines = vec![
        String::new(),
        RULE_HEAVY.to_string(),
        "               YOUR ORDER".to_string(),
        RULE_HEAVY.to_string(),
        row("QTY", "ITEM", "PRICE"),
        RULE_LIGHT.to_string(),
    ];
    lines.extend(
        summary
            .lines
            .iter()
            .map(|line| row(line.quantity, &line.name, line.line_total)),
    );
    lines.push(RULE_LIGHT.to_string());
    lines.push(format!("{:<30}{:>10}", "Total Amount Due:", summary.total));
    lines.push(RULE_HEAVY.to_string());
    lines.join("\n")
}

pub fn receipt(receipt: &Receipt, currency: &str) -> String {
    [
        String::new(),
        "--- Transaction Complete ---".to_string(),
        format!("Receipt: {}", receipt.id),
        format!("Paid: {}{}", currency, receipt.tendered),
        format!("Change Due: {}{}", currency, receipt.change),
        "Thank you for your order!".to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodstall_catalog::MenuCatalog;
    use foodstall_core::Money;
    use foodstall_order::OrderLineView;

    #[test]
    fn test_menu_table_columns() {
        let catalog = MenuCatalog::default_catalog();

        let table = menu_table(catalog.list());

        assert!(table.contains("ID   ITEM                          PRICE"));
        assert!(table.contains("1    Veggie Burger                  5.99"));
        assert!(table.contains("6    Iced Coffee                    4.00"));
    }

    #[test]
    fn test_order_table() {
        let summary = OrderSummary {
            lines: vec![OrderLineView {
                id: 4,
                quantity: 3,
                name: "Soda (Coke/Pepsi)".to_string(),
                line_total: Money::from_cents(450),
            }],
            total: Money::from_cents(450),
        };

        let table = order_table(&summary);

        assert!(table.contains("3    Soda (Coke/Pepsi)              4.50"));
        assert!(table.contains("Total Amount Due:                   4.50"));
    }

    #[test]
    fn test_table_framing() {
        let catalog = MenuCatalog::default_catalog();

        let table = menu_table(catalog.list());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], RULE_HEAVY);
        assert_eq!(lines[5], RULE_LIGHT);
        assert_eq!(lines.len(), 6 + catalog.len() + 1);
        assert!(table.ends_with(RULE_HEAVY));
    }

    #[test]
    fn test_receipt_lines() {
        let paid = Receipt::new(vec![], Money::from_cents(1250), Money::from_cents(2000)).unwrap();

        let text = receipt(&paid, "$");

        assert!(text.starts_with("\n--- Transaction Complete ---\n"));
        assert!(text.contains(&format!("Receipt: {}\n", paid.id)));
        assert!(text.contains("Paid: $20.00\nChange Due: $7.50\n"));
        assert!(text.ends_with("Thank you for your order!"));
    }

    #[test]
    fn test_empty_order_table() {
        let summary = OrderSummary {
            lines: vec![],
            total: Money::zero(),
        };

        assert!(order_table(&summary).contains("Order is currently empty"));
    }
}
