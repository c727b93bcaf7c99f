use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;

use sitestack::{
    app::App,
    config::{ConfigLoader, ConfigValidator},
    server::shutdown_signal,
};

#[derive(Parser)]
#[command(name = "sitestack")]
#[command(about = "Server-rendered pages backed by a remote REST API, described in YAML", long_about = None)]
struct Cli {
    /// Path to the YAML configuration file (built-in site when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Validate config and exit (don't start the server)
    #[arg(long)]
    validate: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Address to listen on, overriding `server.listen`
    #[arg(long, value_name = "ADDR")]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    sitestack::setup_tracing(cli.verbose);

    // Load config
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config from: {:?}", path);
            ConfigLoader::load_from_file(path)
        }
        None => {
            info!("Loading built-in config");
            ConfigLoader::load_default()
        }
    }
    .map_err(|e| color_eyre::eyre::eyre!("Failed to load config: {:#}", e))?;

    ConfigValidator::validate(&config)
        .map_err(|e| color_eyre::eyre::eyre!("Config validation failed: {:#}", e))?;
    info!("Config is valid");

    if cli.validate {
        println!("✓ Configuration is valid!");
        return Ok(());
    }

    if cli.verbose {
        info!(app = %config.app.name, start = %config.start, pages = config.pages.len(), "config summary");
        for (page_id, page) in &config.pages {
            info!(page = %page_id, path = %page.path, layout = page.view.layout(), "page");
        }
    }

    if let Some(listen) = cli.listen {
        config.server.listen = listen;
    }
    let address = config.server.listen.clone();

    let app = App::new(config).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    info!("Binding to {}", address);
    let listener = TcpListener::bind(&address).await?;

    app.serve(listener, shutdown_signal())
        .await
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))
}
