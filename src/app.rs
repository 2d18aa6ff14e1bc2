// src/app.rs
use anyhow::Result;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

use multiswap::application::commands::{CommandExecutor, Commands};
use multiswap::application::session::SwapSession;
use multiswap::domain::catalog::TokenCatalog;
use multiswap::domain::selection::DEFAULT_MINIMUM_AMOUNT;
use multiswap::infrastructure::{DasClient, KeypairWallet, SwapApiClient};
use multiswap::shared::types::Token;

use crate::config::{Config, DEFAULT_API_URL, DEFAULT_PAGE_LIMIT, DEFAULT_RPC_URL};

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub rpc_url: String,
    pub indexer_url: String,
    pub page_limit: u32,
    pub api_url: String,
    pub keypair_path: String,
    pub minimum_amount: Decimal,
    /// Empty means the built-in catalog
    pub tokens: Vec<Token>,
}

impl AppCfg {
    pub fn from_config(cfg: Config) -> Self {
        Self {
            rpc_url: cfg.rpc.map(|r| r.url).unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            indexer_url: cfg.indexer.url,
            page_limit: cfg.indexer.page_limit,
            api_url: cfg.api.map(|a| a.base_url).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            keypair_path: cfg.wallet.keypair,
            minimum_amount: cfg.selection.map(|s| s.minimum_amount).unwrap_or(DEFAULT_MINIMUM_AMOUNT),
            tokens: cfg.tokens,
        }
    }

    pub fn from_cli_args(indexer_url: String, keypair: String) -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            indexer_url,
            page_limit: DEFAULT_PAGE_LIMIT,
            api_url: DEFAULT_API_URL.to_string(),
            keypair_path: keypair,
            minimum_amount: DEFAULT_MINIMUM_AMOUNT,
            tokens: Vec::new(),
        }
    }

    pub fn catalog(&self) -> TokenCatalog {
        if self.tokens.is_empty() {
            TokenCatalog::default()
        } else {
            TokenCatalog::new(self.tokens.clone())
        }
    }
}

pub async fn run(app_cfg: AppCfg, command: Commands) -> Result<()> {
    info!("Starting MultiSwap");
    info!("Indexer: {}, backend: {}, rpc: {}", redact(&app_cfg.indexer_url), app_cfg.api_url, app_cfg.rpc_url);

    let mut wallet = KeypairWallet::new(app_cfg.rpc_url.clone());
    if !matches!(command, Commands::Tokens) {
        if app_cfg.keypair_path.is_empty() {
            anyhow::bail!("--keypair is required when not using --config");
        }
        wallet.connect(&app_cfg.keypair_path)?;
    }

    let mut session = SwapSession::new(
        Arc::new(DasClient::new(app_cfg.indexer_url.clone(), app_cfg.page_limit)),
        Arc::new(SwapApiClient::new(app_cfg.api_url.clone())),
        Arc::new(wallet),
        app_cfg.catalog(),
        app_cfg.minimum_amount,
    );

    CommandExecutor::execute(command, &mut session).await?;
    Ok(())
}

/// Hide the query string, where indexer URLs carry their api key
fn redact(url: &str) -> String {
    match url.split_once('?') {
        Some((base, _)) => format!("{}?<redacted>", base),
        None => url.to_string(),
    }
}
