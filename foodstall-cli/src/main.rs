use anyhow::Context;
use foodstall_catalog::CatalogSource;
use foodstall_cli::{Shell, Terminal};
use foodstall_order::OrderingService;
use foodstall_store::{AppConfig, FlatFileMenuRepository};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load config")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let repository = FlatFileMenuRepository::new(&config.menu.path);
    let (service, source) = OrderingService::open(Box::new(repository));
    match source {
        CatalogSource::File(location) => println!("Menu loaded successfully from {}.", location),
        CatalogSource::Defaults => println!("Note: Could not load menu file. Using default menu."),
    }

    let terminal = Terminal::new(io::stdin().lock(), io::stdout().lock());
    let mut shell = Shell::new(service, terminal, config.display.currency_symbol.clone());
    shell.run().context("Terminal I/O failed")?;

    Ok(())
}
