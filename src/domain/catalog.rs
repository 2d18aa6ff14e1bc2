//! Static catalog of tokens a swap can target

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::domain::valuation::scaled_amount;
use crate::shared::errors::AppError;
use crate::shared::types::Token;

// Known destination tokens: (mint, symbol, name, decimals, logo)
const DEFAULT_TOKENS: &[(&str, &str, &str, u8, &str)] = &[
    (
        "So11111111111111111111111111111111111111112",
        "SOL",
        "Solana",
        9,
        "https://raw.githubusercontent.com/solana-labs/token-list/main/assets/mainnet/So11111111111111111111111111111111111111112/logo.png",
    ),
    (
        "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
        "USDC",
        "USD Coin",
        6,
        "https://raw.githubusercontent.com/solana-labs/token-list/main/assets/mainnet/EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v/logo.png",
    ),
    (
        "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263",
        "Bonk",
        "Bonk",
        // Bonk's mint has 5 decimals; a 6 here would under-report quoted output tenfold
        5,
        "https://arweave.net/hQiPZOsRZXGXBJd_82PhVdlM_hACsT_q6wqwf5cSY7I",
    ),
];

impl Token {
    /// Scale a raw output amount reported by the backend
    pub fn format_output(&self, out_amount: &str) -> Result<Decimal, AppError> {
        let raw = Decimal::from_str(out_amount.trim())
            .map_err(|e| AppError::FetchFailed(format!("Invalid output amount {:?}: {}", out_amount, e)))?;
        Ok(scaled_amount(raw, self.decimals as i32)?)
    }
}

/// Ordered, immutable list of swap destinations
#[derive(Debug, Clone)]
pub struct TokenCatalog {
    tokens: Vec<Token>,
}

impl TokenCatalog {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn find(&self, address: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.address == address)
    }

    /// Look a token up by mint address or by symbol (case-insensitive)
    pub fn resolve(&self, address_or_symbol: &str) -> Option<&Token> {
        self.find(address_or_symbol).or_else(|| {
            self.tokens
                .iter()
                .find(|t| t.symbol.eq_ignore_ascii_case(address_or_symbol))
        })
    }
}

impl Default for TokenCatalog {
    fn default() -> Self {
        Self::new(
            DEFAULT_TOKENS
                .iter()
                .map(|(address, symbol, name, decimals, logo)| Token {
                    address: address.to_string(),
                    decimals: *decimals,
                    symbol: symbol.to_string(),
                    name: name.to_string(),
                    logo_uri: logo.to_string(),
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_catalog_order() {
        let catalog = TokenCatalog::default();
        let symbols: Vec<&str> = catalog.tokens().iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["SOL", "USDC", "Bonk"]);
    }

    #[test]
    fn test_resolve_by_address_or_symbol() {
        let catalog = TokenCatalog::default();
        assert_eq!(catalog.resolve("usdc").unwrap().decimals, 6);
        assert_eq!(
            catalog.resolve("So11111111111111111111111111111111111111112").unwrap().symbol,
            "SOL"
        );
        assert!(catalog.resolve("DOGE").is_none());
    }

    #[test]
    fn test_format_output() {
        let catalog = TokenCatalog::default();
        let sol = catalog.resolve("SOL").unwrap();
        assert_eq!(sol.format_output("2500000000").unwrap(), dec!(2.5));
        assert!(matches!(sol.format_output("lots"), Err(AppError::FetchFailed(_))));

        let bonk = catalog.resolve("bonk").unwrap();
        assert_eq!(bonk.decimals, 5);
        assert_eq!(bonk.format_output("123400000").unwrap(), dec!(1234));
    }
}
