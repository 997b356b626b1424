pub mod item;
pub mod menu;

pub use item::MenuItem;
pub use menu::{CatalogSource, MenuCatalog};
