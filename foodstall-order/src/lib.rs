pub mod models;
pub mod orchestrator;

pub use models::{Order, OrderLineView, OrderSummary, Receipt, RemoveOutcome};
pub use orchestrator::OrderingService;
