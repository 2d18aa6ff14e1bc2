//! One user's swap session: wallet assets, the chosen sources and amounts,
//! the destination token and the latest quote.

use futures::future::join_all;
use rust_decimal::Decimal;
use solana_sdk::signature::Signature;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::catalog::TokenCatalog;
use crate::domain::projection::{project, AssetView};
use crate::domain::quote::{total_output, Quote};
use crate::domain::selection::Selection;
use crate::infrastructure::api_clients::swap_api_client::{InputPriceInfo, InputTokenInfo};
use crate::infrastructure::api_clients::{AssetSource, QuoteInput, SwapBackend};
use crate::infrastructure::wallet::WalletProvider;
use crate::shared::errors::AppError;
use crate::shared::types::{OwnedAsset, Token};

/// What a quote was computed for: every (asset, amount) plus the destination
type QuoteKey = (Vec<(String, Decimal)>, String);

#[derive(Debug, Clone)]
struct CachedQuote {
    key: QuoteKey,
    quotes: Vec<Quote>,
}

pub struct SwapSession {
    asset_source: Arc<dyn AssetSource>,
    backend: Arc<dyn SwapBackend>,
    wallet: Arc<dyn WalletProvider>,
    catalog: TokenCatalog,
    assets: Vec<OwnedAsset>,
    query: String,
    selected_keys: HashSet<String>,
    selection: Selection,
    destination: Option<Token>,
    quote: Option<CachedQuote>,
}

impl SwapSession {
    pub fn new(
        asset_source: Arc<dyn AssetSource>,
        backend: Arc<dyn SwapBackend>,
        wallet: Arc<dyn WalletProvider>,
        catalog: TokenCatalog,
        minimum_amount: Decimal,
    ) -> Self {
        Self {
            asset_source,
            backend,
            wallet,
            catalog,
            assets: Vec::new(),
            query: String::new(),
            selected_keys: HashSet::new(),
            selection: Selection::new(minimum_amount),
            destination: None,
            quote: None,
        }
    }

    pub fn catalog(&self) -> &TokenCatalog {
        &self.catalog
    }

    pub fn assets(&self) -> &[OwnedAsset] {
        &self.assets
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_keys(&self) -> &HashSet<String> {
        &self.selected_keys
    }

    pub fn destination(&self) -> Option<&Token> {
        self.destination.as_ref()
    }

    pub fn wallet_address(&self) -> Option<String> {
        self.wallet.public_key().map(|k| k.to_string())
    }

    /// Replace the asset list with a fresh fetch for the connected wallet
    pub async fn refresh_assets(&mut self) -> Result<Vec<AssetView>, AppError> {
        let owner = self.wallet_address().ok_or(AppError::WalletNotConnected)?;
        self.assets = self.asset_source.assets_by_owner(&owner).await?;
        Ok(self.visible_assets())
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn visible_assets(&self) -> Vec<AssetView> {
        project(&self.assets, &self.query)
    }

    pub fn choose_destination(&mut self, address_or_symbol: &str) -> Result<&Token, AppError> {
        let token = self
            .catalog
            .resolve(address_or_symbol)
            .cloned()
            .ok_or_else(|| AppError::UnknownToken(address_or_symbol.to_string()))?;
        info!("🎯 Destination token: {} ({})", token.symbol, token.address);
        Ok(&*self.destination.insert(token))
    }

    /// Swappable asset with mint `token`, or the only one whose symbol is `token`.
    ///
    /// Wallets often hold lookalike tokens reusing a known symbol, so a symbol
    /// shared by several swappable assets is refused.
    pub fn find_source(&self, token: &str) -> Result<&OwnedAsset, AppError> {
        if let Some(asset) = self.assets.iter().find(|a| a.id == token) {
            return if asset.is_swappable() {
                Ok(asset)
            } else {
                Err(AppError::NotSwappable(token.to_string()))
            };
        }

        let mut matches = self.assets.iter().filter(|a| {
            a.is_swappable() && a.symbol.as_deref().is_some_and(|s| s.eq_ignore_ascii_case(token))
        });
        match (matches.next(), matches.next()) {
            (Some(asset), None) => Ok(asset),
            (Some(_), Some(_)) => Err(AppError::AmbiguousAsset(token.to_string())),
            (None, _) => Err(AppError::UnknownAsset(token.to_string())),
        }
    }

    /// Apply the multi-select list; deselected assets leave the selection.
    pub fn select_keys(&mut self, keys: HashSet<String>) {
        let keys: HashSet<String> = keys.into_iter().filter(|k| !k.is_empty()).collect();
        self.selection = std::mem::take(&mut self.selection).retain_keys(&keys);
        self.selected_keys = keys;
    }

    /// Set how much of `asset_id` to swap, in its smallest unit.
    ///
    /// The amount is clamped to `[minimum, balance]`; landing on the minimum
    /// deselects the asset.
    pub fn set_amount(&mut self, asset_id: &str, amount: Decimal) -> Result<Decimal, AppError> {
        let asset = self
            .assets
            .iter()
            .find(|a| a.id == asset_id)
            .ok_or_else(|| AppError::UnknownAsset(asset_id.to_string()))?;
        if !asset.is_swappable() {
            return Err(AppError::NotSwappable(asset_id.to_string()));
        }

        let minimum = self.selection.minimum();
        let balance = Decimal::from(asset.balance);
        let amount = if amount <= minimum || balance <= minimum {
            minimum
        } else {
            amount.min(balance)
        };

        let snapshot = asset.snapshot();
        self.selection = std::mem::take(&mut self.selection).set_amount(asset_id, amount, snapshot);
        if amount == minimum {
            self.selected_keys.remove(asset_id);
        } else {
            self.selected_keys.insert(asset_id.to_string());
        }
        Ok(amount)
    }

    pub fn total_fiat_value(&self) -> Result<Decimal, AppError> {
        Ok(self.selection.total_fiat_value()?)
    }

    pub fn can_swap(&self) -> bool {
        !self.selection.is_empty() && self.destination.is_some()
    }

    pub fn quote_inputs(&self) -> Vec<QuoteInput> {
        self.selection
            .entries()
            .map(|(id, entry)| QuoteInput {
                mint: id.clone(),
                value: entry.amount,
                token_info: InputTokenInfo {
                    balance: entry.snapshot.balance,
                    decimals: entry.snapshot.decimals,
                    price_info: entry
                        .snapshot
                        .price_per_unit
                        .map(|price_per_token| InputPriceInfo { price_per_token }),
                },
            })
            .collect()
    }

    fn quote_key(&self) -> Result<QuoteKey, AppError> {
        let destination = self.destination.as_ref().ok_or(AppError::NoDestination)?;
        if self.selection.is_empty() {
            return Err(AppError::EmptySelection);
        }
        let entries = self
            .selection
            .entries()
            .map(|(id, entry)| (id.clone(), entry.amount))
            .collect();
        Ok((entries, destination.address.clone()))
    }

    /// Quotes for the current selection; unchanged inputs reuse the last result
    pub async fn quote(&mut self) -> Result<&[Quote], AppError> {
        let key = self.quote_key()?;
        let cached = matches!(&self.quote, Some(q) if q.key == key);

        if !cached {
            let destination = self.destination.as_ref().ok_or(AppError::NoDestination)?;
            let quotes = self.backend.quotes(&self.quote_inputs(), destination).await?;
            self.quote = Some(CachedQuote { key, quotes });
        }

        Ok(self.quote.as_ref().map(|q| q.quotes.as_slice()).unwrap_or(&[]))
    }

    /// Quotes of the last `quote` call, if they still match the selection
    pub fn current_quotes(&self) -> Option<&[Quote]> {
        match (&self.quote, self.quote_key()) {
            (Some(q), Ok(key)) if q.key == key => Some(q.quotes.as_slice()),
            _ => None,
        }
    }

    /// Scaled destination output of the current quote, if it is still valid
    pub fn expected_output(&self) -> Result<Option<Decimal>, AppError> {
        self.current_quotes()
            .map(|quotes| total_output(quotes, &self.catalog))
            .transpose()
    }

    /// Execute the quoted swap.
    ///
    /// Every returned transaction is signed and sent concurrently. The
    /// selection is cleared only when all of them confirm; on any failure it
    /// is left untouched so the user can retry.
    pub async fn swap(&mut self) -> Result<Vec<Signature>, AppError> {
        let user = self.wallet_address().ok_or(AppError::WalletNotConnected)?;
        let key = self.quote_key()?;
        let quotes = match &self.quote {
            Some(q) if q.key == key => q.quotes.clone(),
            _ => return Err(AppError::NotQuoted),
        };

        let transactions = self.backend.swap(&quotes, &user).await?;
        if transactions.is_empty() {
            return Err(AppError::SwapRejected("Backend returned no transactions".to_string()));
        }
        info!("🔄 Swapping {} tokens with {} transactions", self.selection.count(), transactions.len());

        let wallet = self.wallet.clone();
        let results = join_all(transactions.iter().map(|tx| wallet.sign_and_send(tx))).await;

        let mut confirmed = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(signature) => confirmed.push(signature),
                Err(e) => failures.push(e.to_string()),
            }
        }

        if !failures.is_empty() {
            error!("❌ {} of {} transactions failed", failures.len(), transactions.len());
            if !confirmed.is_empty() {
                warn!("⚠️ Confirmed before failure: {:?}", confirmed);
            }
            let confirmed: Vec<String> = confirmed.iter().map(|s| s.to_string()).collect();
            return Err(AppError::SwapRejected(format!(
                "{} of {} transactions failed ({}); confirmed: [{}]",
                failures.len(),
                transactions.len(),
                failures.join("; "),
                confirmed.join(", ")
            )));
        }

        info!("✅ All tokens successfully swapped");
        self.selection = std::mem::take(&mut self.selection).clear();
        self.selected_keys.clear();
        self.quote = None;
        Ok(confirmed)
    }
}
