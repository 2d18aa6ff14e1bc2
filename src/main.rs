mod app;
mod config;

use anyhow::Result;
use clap::Parser;
use multiswap::application::commands::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Cli::parse();

    // Priority: CLI args > Config file > Defaults
    let mut app_cfg = if let Some(config_path) = &args.config {
        let cfg = config::Config::from_file(config_path)?;
        let mut app_cfg = app::AppCfg::from_config(cfg);

        if let Some(indexer_url) = args.indexer_url {
            app_cfg.indexer_url = indexer_url;
        }
        if let Some(keypair) = args.keypair {
            app_cfg.keypair_path = keypair;
        }
        app_cfg
    } else {
        // Without a config file the indexer and keypair must come from the CLI
        let indexer_url = args
            .indexer_url
            .ok_or_else(|| anyhow::anyhow!("--indexer-url is required when not using --config"))?;
        let keypair = args.keypair.unwrap_or_default();
        app::AppCfg::from_cli_args(indexer_url, keypair)
    };

    if let Some(rpc_url) = args.rpc_url {
        app_cfg.rpc_url = rpc_url;
    }
    if let Some(api_url) = args.api_url {
        app_cfg.api_url = api_url;
    }
    if let Some(minimum_amount) = args.minimum_amount {
        app_cfg.minimum_amount = minimum_amount;
    }

    app::run(app_cfg, args.command).await
}
