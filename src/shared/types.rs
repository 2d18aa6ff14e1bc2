//! Common types used across the application

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Interface kind the indexer reports for fungible SPL tokens
pub const FUNGIBLE_TOKEN_INTERFACE: &str = "FungibleToken";

/// Static catalog entry a swap can target
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub address: String,
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
    #[serde(rename = "logoURI", alias = "logo_uri")]
    pub logo_uri: String,
}

/// A token held by the connected wallet, as reported by the indexer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedAsset {
    pub id: String,
    pub interface: String,
    /// Balance in the smallest unit
    pub balance: u64,
    /// Kept signed so malformed indexer data surfaces as a valuation error
    pub decimals: i32,
    pub price_per_unit: Option<Decimal>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
}

impl OwnedAsset {
    pub fn is_fungible(&self) -> bool {
        self.interface == FUNGIBLE_TOKEN_INTERFACE
    }

    pub fn has_price(&self) -> bool {
        self.price_per_unit.is_some()
    }

    /// Only priced fungible tokens can be swapped
    pub fn is_swappable(&self) -> bool {
        self.is_fungible() && self.has_price()
    }

    /// Symbol for display, `-` when the indexer has none
    pub fn display_symbol(&self) -> &str {
        self.symbol.as_deref().unwrap_or("-")
    }

    pub fn snapshot(&self) -> AssetSnapshot {
        AssetSnapshot {
            balance: self.balance,
            decimals: self.decimals,
            price_per_unit: self.price_per_unit,
        }
    }
}

/// Balance, decimals and price of an asset frozen at selection time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    pub balance: u64,
    pub decimals: i32,
    pub price_per_unit: Option<Decimal>,
}
