pub mod money;
pub mod repository;

pub use money::Money;
pub use repository::{MenuRecord, MenuRepository};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid item id: {0}")]
    InvalidId(u32),
    #[error("Invalid quantity: {0} (must be positive)")]
    InvalidQuantity(i64),
    #[error("Invalid price: {0} (must be greater than zero)")]
    InvalidPrice(Money),
    #[error("Item name must not be empty")]
    InvalidName,
    #[error("Could not open menu file {path}: {source}")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Menu file {0} contains no valid items")]
    EmptyCatalog(String),
    #[error("Insufficient payment: tendered {tendered}, total due {total}")]
    InsufficientPayment {
        tendered: Money,
        total: Money,
    },
    #[error("Order is empty")]
    EmptyOrder,
    #[error("Amount out of range")]
    AmountOverflow,
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_amounts() {
        let err = CoreError::InsufficientPayment {
            tendered: Money::from_cents(1000),
            total: Money::from_cents(1250),
        };
        assert_eq!(err.to_string(), "Insufficient payment: tendered 10.00, total due 12.50");

        let err = CoreError::InvalidPrice(Money::zero());
        assert_eq!(err.to_string(), "Invalid price: 0.00 (must be greater than zero)");
    }
}
