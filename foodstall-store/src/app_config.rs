use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub menu: MenuConfig,
    pub display: DisplayConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MenuConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    pub currency_symbol: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .set_default("menu.path", "menu_data.txt")?
            .set_default("display.currency_symbol", "$")?
            .set_default("log.filter", "warn")?
            // Every file is optional; the defaults above are enough to run
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(&run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::from(dir.join("local")).required(false))
            // Eg.. `FOODSTALL_MENU__PATH=/srv/menu.txt` sets `menu.path`
            .add_source(config::Environment::with_prefix("FOODSTALL").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_files() {
        let dir = tempdir().unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();

        assert_eq!(config.menu.path, "menu_data.txt");
        assert_eq!(config.display.currency_symbol, "$");
        assert_eq!(config.log.filter, "warn");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[menu]\npath = \"data/menu.txt\"\n\n[display]\ncurrency_symbol = \"€\"\n",
        )
        .unwrap();
        fs::write(dir.path().join("local.toml"), "[log]\nfilter = \"foodstall=debug\"\n").unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();

        assert_eq!(config.menu.path, "data/menu.txt");
        assert_eq!(config.display.currency_symbol, "€");
        assert_eq!(config.log.filter, "foodstall=debug");
    }
}
