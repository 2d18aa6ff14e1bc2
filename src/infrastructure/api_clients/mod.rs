pub mod das_client;
pub mod swap_api_client;

use async_trait::async_trait;
use crate::domain::quote::Quote;
use crate::shared::errors::AppError;
use crate::shared::types::{OwnedAsset, Token};

pub use das_client::DasClient;
pub use swap_api_client::{QuoteInput, SwapApiClient};

/// Source of the tokens a wallet holds
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Every asset owned by `owner`, fetched fresh on each call
    async fn assets_by_owner(&self, owner: &str) -> Result<Vec<OwnedAsset>, AppError>;
}

/// Quote and swap backend
#[async_trait]
pub trait SwapBackend: Send + Sync {
    /// Quotes for swapping every input into `output`
    async fn quotes(&self, inputs: &[QuoteInput], output: &Token) -> Result<Vec<Quote>, AppError>;

    /// Base64-encoded unsigned transactions executing `quotes` for `user`
    async fn swap(&self, quotes: &[Quote], user: &str) -> Result<Vec<String>, AppError>;
}
