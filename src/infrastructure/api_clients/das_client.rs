use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::shared::errors::AppError;
use crate::shared::types::OwnedAsset;
use super::AssetSource;

/// Largest page the DAS API serves
pub const MAX_PAGE_LIMIT: u32 = 1000;

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct AssetPage {
    #[serde(default)]
    items: Vec<DasAsset>,
}

#[derive(Debug, Deserialize)]
struct DasAsset {
    id: String,
    interface: String,
    content: Option<DasContent>,
    token_info: Option<DasTokenInfo>,
}

#[derive(Debug, Deserialize)]
struct DasContent {
    metadata: Option<DasMetadata>,
    links: Option<DasLinks>,
}

#[derive(Debug, Deserialize)]
struct DasMetadata {
    symbol: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DasLinks {
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DasTokenInfo {
    symbol: Option<String>,
    #[serde(default)]
    balance: u64,
    #[serde(default)]
    decimals: i32,
    price_info: Option<DasPriceInfo>,
}

#[derive(Debug, Deserialize)]
struct DasPriceInfo {
    price_per_token: Decimal,
}

impl From<DasAsset> for OwnedAsset {
    fn from(asset: DasAsset) -> Self {
        let (symbol, name) = asset
            .content
            .as_ref()
            .and_then(|c| c.metadata.as_ref())
            .map(|m| (m.symbol.clone(), m.name.clone()))
            .unwrap_or((None, None));
        let image = asset
            .content
            .and_then(|c| c.links)
            .and_then(|l| l.image);

        let (balance, decimals, price_per_unit, token_symbol) = match asset.token_info {
            Some(info) => (
                info.balance,
                info.decimals,
                info.price_info.map(|p| p.price_per_token),
                info.symbol,
            ),
            None => (0, 0, None, None),
        };

        OwnedAsset {
            id: asset.id,
            interface: asset.interface,
            balance,
            decimals,
            price_per_unit,
            symbol: symbol.filter(|s| !s.is_empty()).or(token_symbol),
            name: name.filter(|s| !s.is_empty()),
            image,
        }
    }
}

fn into_assets(body: RpcResponse<AssetPage>) -> Result<Vec<OwnedAsset>, AppError> {
    if let Some(err) = body.error {
        return Err(AppError::FetchFailed(format!(
            "getAssetsByOwner error {}: {}",
            err.code, err.message
        )));
    }
    let page = body
        .result
        .ok_or_else(|| AppError::FetchFailed("getAssetsByOwner returned no result".to_string()))?;
    Ok(page.items.into_iter().map(OwnedAsset::from).collect())
}

/// Digital Asset Standard RPC client (Helius and compatible indexers)
pub struct DasClient {
    http_client: Client,
    url: String,
    page_limit: u32,
}

impl DasClient {
    pub fn new(url: String, page_limit: u32) -> Self {
        Self {
            http_client: Client::new(),
            url,
            page_limit: page_limit.clamp(1, MAX_PAGE_LIMIT),
        }
    }

    async fn fetch_page(&self, owner: &str, page: u32) -> Result<Vec<OwnedAsset>, AppError> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": "multiswap",
            "method": "getAssetsByOwner",
            "params": {
                "ownerAddress": owner,
                "page": page,
                "limit": self.page_limit,
                "displayOptions": {
                    "showFungible": true,
                    "showNativeBalance": true,
                },
            },
        });

        let response = self.http_client.post(&self.url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(AppError::FetchFailed(format!(
                "Indexer request failed with status: {}",
                response.status()
            )));
        }

        into_assets(response.json().await?)
    }
}

#[async_trait]
impl AssetSource for DasClient {
    async fn assets_by_owner(&self, owner: &str) -> Result<Vec<OwnedAsset>, AppError> {
        info!("🔍 Fetching assets owned by {}", owner);

        let mut assets = Vec::new();
        let mut page = 1;
        loop {
            let items = self.fetch_page(owner, page).await?;
            let full_page = items.len() as u32 == self.page_limit;
            debug!("Page {}: {} assets", page, items.len());
            assets.extend(items);
            if !full_page {
                break;
            }
            page += 1;
        }

        info!("✅ Indexer returned {} assets for {}", assets.len(), owner);
        Ok(assets)
    }
}
