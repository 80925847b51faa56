//! market-search: product search service
//!
//! This is the main entry point for the application.

use anyhow::{bail, Result};
use market_search::{
    config,
    network::HttpClient,
    providers::ProviderLoader,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = match parse_args(std::env::args().skip(1))? {
        Command::Run(path) => path,
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Version => {
            println!("market-search v{}", market_search::VERSION);
            return Ok(());
        }
    };

    let log_level = init_logging();
    let settings = config::load(config_path.as_deref())?;
    if settings.general.debug && std::env::var_os("RUST_LOG").is_none() {
        log_level.modify(|filter| *filter = EnvFilter::new("debug"))?;
    }

    info!("Starting market-search v{}", market_search::VERSION);
    info!(
        "Loaded configuration for instance: {}",
        settings.general.instance_name
    );

    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    let provider = ProviderLoader::load(&settings, client)?;

    let settings = config::init(settings)?;
    let state = AppState::new(settings.clone(), provider);
    info!("Application state initialized");

    let app = create_router(state);

    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Install the subscriber; the returned handle lets `general.debug`
/// raise the level once settings are known
fn init_logging() -> reload::Handle<EnvFilter, Registry> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    handle
}

enum Command {
    Run(Option<PathBuf>),
    Help,
    Version,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command> {
    let mut config_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-c" | "--config" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => bail!("{arg} requires a file path"),
            },
            other => bail!("unknown argument: {other} (see --help)"),
        }
    }

    Ok(Command::Run(config_path))
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
market-search v{}
Product search service with cached provider results

USAGE:
    market-search [OPTIONS]

OPTIONS:
    -c, --config <FILE>    Path to configuration file
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    MARKET_SEARCH_SETTINGS_PATH    Path to settings.yml
    MARKET_SEARCH_DEBUG            Enable debug logging (true/false)
    MARKET_SEARCH_PORT             Server port
    MARKET_SEARCH_BIND_ADDRESS     Bind address
    MARKET_SEARCH_PROVIDER         Provider engine (citilink, json, static)
    MARKET_SEARCH_PROVIDER_URL     Provider base URL
    MARKET_SEARCH_ENRICHMENT_SEED  Seed for reproducible ratings
    RUST_LOG                       Log filter, overrides the debug setting
"#,
        market_search::VERSION
    );
}
