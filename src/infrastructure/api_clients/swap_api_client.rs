use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::quote::Quote;
use crate::shared::errors::AppError;
use crate::shared::types::Token;
use super::SwapBackend;

/// Price data forwarded with each input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputPriceInfo {
    #[serde(with = "rust_decimal::serde::float")]
    pub price_per_token: Decimal,
}

/// Snapshot of the input token as the backend expects it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputTokenInfo {
    pub balance: u64,
    pub decimals: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_info: Option<InputPriceInfo>,
}

/// One source token of a quote request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteInput {
    pub mint: String,
    /// Amount in the token's smallest unit
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    #[serde(rename = "tokenInfo")]
    pub token_info: InputTokenInfo,
}

#[derive(Debug, Serialize)]
struct QuoteRequest<'a> {
    #[serde(rename = "inputMints")]
    input_mints: &'a [QuoteInput],
    #[serde(rename = "outputMint")]
    output_mint: &'a Token,
}

#[derive(Debug, Serialize)]
struct SwapRequest<'a> {
    quotes: &'a [Quote],
    #[serde(rename = "userPublicKey")]
    user_public_key: &'a str,
}

#[derive(Debug, Deserialize)]
struct DataResponse<T> {
    data: Option<T>,
    error: Option<serde_json::Value>,
}

impl<T> DataResponse<T> {
    fn into_data(self, what: &str) -> Result<T, AppError> {
        if let Some(err) = self.error {
            return Err(AppError::FetchFailed(format!("{} failed: {}", what, err)));
        }
        self.data
            .ok_or_else(|| AppError::FetchFailed(format!("{} returned no data", what)))
    }
}

/// MultiSwap backend client
pub struct SwapApiClient {
    http_client: Client,
    base_url: String,
}

impl SwapApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<DataResponse<T>, AppError>
    where
        B: Serialize + ?Sized,
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.http_client.post(&url).json(body).send().await?;

        if !response.status().is_success() {
            warn!("⚠️ Backend {} returned status: {}", url, response.status());
            return Err(AppError::FetchFailed(format!(
                "{} request failed with status: {}",
                path,
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl SwapBackend for SwapApiClient {
    async fn quotes(&self, inputs: &[QuoteInput], output: &Token) -> Result<Vec<Quote>, AppError> {
        info!("🔍 Requesting quotes for {} tokens into {}", inputs.len(), output.symbol);

        let request = QuoteRequest {
            input_mints: inputs,
            output_mint: output,
        };
        let quotes: Vec<Quote> = self.post("quotes", &request).await?.into_data("quotes")?;

        info!("✅ Received {} quotes", quotes.len());
        Ok(quotes)
    }

    async fn swap(&self, quotes: &[Quote], user: &str) -> Result<Vec<String>, AppError> {
        info!("🔄 Requesting swap transactions for {} quotes", quotes.len());

        let request = SwapRequest {
            quotes,
            user_public_key: user,
        };
        let transactions: Vec<String> = self.post("swap", &request).await?.into_data("swap")?;

        info!("✅ Received {} transactions to sign", transactions.len());
        Ok(transactions)
    }
}
