use anyhow::{Context, Result};
use multiswap::domain::selection::DEFAULT_MINIMUM_AMOUNT;
use multiswap::shared::types::Token;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::{fs, path::Path};

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_PAGE_LIMIT: u32 = 1000;

#[derive(Debug, Clone, Deserialize)]
pub struct RpcCfg {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexerCfg {
    pub url: String,
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCfg {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletCfg {
    pub keypair: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectionCfg {
    #[serde(default = "default_minimum_amount")]
    pub minimum_amount: Decimal,
}

fn default_page_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

fn default_minimum_amount() -> Decimal {
    DEFAULT_MINIMUM_AMOUNT
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub rpc: Option<RpcCfg>,
    pub indexer: IndexerCfg,
    pub api: Option<ApiCfg>,
    pub wallet: WalletCfg,
    pub selection: Option<SelectionCfg>,
    /// Replaces the built-in destination catalog when present
    #[serde(default)]
    pub tokens: Vec<Token>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("read {}", path.as_ref().display()))?;
        Self::from_toml(&s)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).context("parse Config.toml")?;
        Ok(cfg)
    }
}
