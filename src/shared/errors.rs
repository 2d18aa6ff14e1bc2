//! Error handling for the application

use thiserror::Error;

/// Valuation-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValuationError {
    #[error("Invalid decimals: {0}")]
    InvalidDecimals(i32),

    #[error("Arithmetic overflow while valuing balance")]
    Overflow,
}

/// Formatting-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Text too short to truncate: {len} chars, window needs {required}")]
    TooShort { len: usize, required: usize },
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Swap rejected: {0}")]
    SwapRejected(String),

    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("No destination token selected")]
    NoDestination,

    #[error("No tokens selected to swap")]
    EmptySelection,

    #[error("Selection has not been quoted")]
    NotQuoted,

    #[error("Asset not found in wallet: {0}")]
    UnknownAsset(String),

    #[error("Asset cannot be swapped (not a priced fungible token): {0}")]
    NotSwappable(String),

    #[error("Several assets match {0}, pass the mint address instead")]
    AmbiguousAsset(String),

    #[error("Token not in catalog: {0}")]
    UnknownToken(String),

    #[error(transparent)]
    Valuation(#[from] ValuationError),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchFailed(err.to_string())
    }
}
