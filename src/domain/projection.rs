//! Turns the wallet's raw asset list into the swappable, value-sorted view.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::domain::valuation::{fiat_value, scaled_balance, to_fixed};
use crate::shared::types::OwnedAsset;
use crate::shared::utils::short_address;

/// Display-ready asset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetView {
    pub asset: OwnedAsset,
    pub short_address: String,
    pub fiat_value: Decimal,
    pub fiat_value_formatted: String,
    pub balance_formatted: String,
}

fn matches_query(asset: &OwnedAsset, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    [asset.symbol.as_deref(), asset.name.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn to_view(asset: &OwnedAsset) -> Option<AssetView> {
    let valued = fiat_value(asset.balance, asset.decimals, asset.price_per_unit)
        .and_then(|fiat| Ok((fiat, scaled_balance(asset.balance, asset.decimals)?)));

    match valued {
        Ok((fiat, balance)) => Some(AssetView {
            asset: asset.clone(),
            short_address: short_address(&asset.id),
            fiat_value: fiat,
            fiat_value_formatted: to_fixed(fiat, 2),
            balance_formatted: to_fixed(balance, 2),
        }),
        Err(e) => {
            warn!("Skipping asset {}: {}", asset.id, e);
            None
        }
    }
}

/// Priced fungible assets matching `query`, most valuable first.
///
/// Assets without a price are left out rather than shown at zero. Equal
/// values are ordered by asset id.
pub fn project(assets: &[OwnedAsset], query: &str) -> Vec<AssetView> {
    let mut views: Vec<AssetView> = assets
        .iter()
        .filter(|a| a.is_swappable())
        .filter(|a| matches_query(a, query))
        .filter_map(to_view)
        .collect();

    views.sort_by(|a, b| {
        b.fiat_value
            .cmp(&a.fiat_value)
            .then_with(|| a.asset.id.cmp(&b.asset.id))
    });
    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::FUNGIBLE_TOKEN_INTERFACE;
    use rust_decimal_macros::dec;

    fn asset(id: &str, symbol: &str, name: &str, balance: u64, decimals: i32, price: Option<Decimal>) -> OwnedAsset {
        OwnedAsset {
            id: id.to_string(),
            interface: FUNGIBLE_TOKEN_INTERFACE.to_string(),
            balance,
            decimals,
            price_per_unit: price,
            symbol: Some(symbol.to_string()),
            name: Some(name.to_string()),
            image: None,
        }
    }

    fn wallet() -> Vec<OwnedAsset> {
        vec![
            asset("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", "USDC", "USD Coin", 12_500_000, 6, Some(dec!(1))),
            asset("DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263", "Bonk", "Bonk", 100_000_000, 5, None),
            asset("So11111111111111111111111111111111111111112", "SOL", "Wrapped SOL", 1_500_000_000, 9, Some(dec!(150))),
        ]
    }

    #[test]
    fn test_project_drops_unpriced_and_sorts() {
        let views = project(&wallet(), "");
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].asset.display_symbol(), "SOL");
        assert_eq!(views[0].fiat_value_formatted, "225.00");
        assert_eq!(views[0].balance_formatted, "1.50");
        assert_eq!(views[0].short_address, "So11...1112");
        assert_eq!(views[1].asset.display_symbol(), "USDC");
        assert_eq!(views[1].fiat_value_formatted, "12.50");
    }

    #[test]
    fn test_project_drops_non_fungible() {
        let mut assets = wallet();
        assets[0].interface = "V1_NFT".to_string();
        let views = project(&assets, "");
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].asset.display_symbol(), "SOL");
    }

    #[test]
    fn test_project_query_is_case_insensitive_subset() {
        let all = project(&wallet(), "");

        let by_symbol = project(&wallet(), "usd");
        assert_eq!(by_symbol.len(), 1);
        assert_eq!(by_symbol[0].asset.display_symbol(), "USDC");

        let by_name = project(&wallet(), "WRAPPED");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].asset.display_symbol(), "SOL");

        for view in by_symbol.iter().chain(by_name.iter()) {
            assert!(all.contains(view));
        }
        assert!(project(&wallet(), "doge").is_empty());
    }

    #[test]
    fn test_project_tie_break_by_id() {
        let assets = vec![
            asset("zzzzzzzzzz", "Z", "Zed", 100, 0, Some(dec!(1))),
            asset("aaaaaaaaaa", "A", "Ay", 100, 0, Some(dec!(1))),
            asset("mmmmmmmmmm", "M", "Em", 50, 0, Some(dec!(4))),
        ];
        let ids: Vec<String> = project(&assets, "").into_iter().map(|v| v.asset.id).collect();
        assert_eq!(ids, vec!["mmmmmmmmmm", "aaaaaaaaaa", "zzzzzzzzzz"]);
    }

    #[test]
    fn test_project_skips_invalid_decimals() {
        let mut assets = wallet();
        assets[2].decimals = -9;
        let views = project(&assets, "");
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].asset.display_symbol(), "USDC");
    }
}
