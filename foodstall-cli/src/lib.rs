pub mod shell;
pub mod terminal;
pub mod views;

pub use shell::Shell;
pub use terminal::{Reply, Terminal};
