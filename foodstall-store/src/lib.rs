pub mod app_config;
pub mod menu_file;

pub use app_config::AppConfig;
pub use menu_file::FlatFileMenuRepository;
