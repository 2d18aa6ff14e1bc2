// src/report.rs
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::session::SwapSession;
use crate::domain::quote::output_for_input;
use crate::domain::valuation::{scaled_amount, to_fixed};
use crate::shared::errors::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct SwapReport {
    pub wallet: Option<String>,
    pub destination: DestinationDetails,
    pub sources: Vec<SourceDetails>,

    // Totals
    pub total_fiat_value: Decimal,
    pub expected_output: Option<Decimal>,
    pub transaction_signatures: Vec<String>,

    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DestinationDetails {
    pub mint: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SourceDetails {
    pub mint: String,
    pub symbol: String,
    pub amount_raw: Decimal,
    pub amount_ui: Decimal, // Amount in UI format (considering decimals)
    pub fiat_value: Decimal,
    /// Destination amount quoted for this source
    pub expected_output: Option<Decimal>,
}

impl SwapReport {
    /// Snapshot of what the session is about to swap
    pub fn from_session(session: &SwapSession) -> Result<Self, AppError> {
        let destination = session.destination().ok_or(AppError::NoDestination)?;
        let quotes = session.current_quotes().unwrap_or_default();

        let sources = session
            .selection()
            .entries()
            .map(|(mint, entry)| -> Result<SourceDetails, AppError> {
                let symbol = session
                    .assets()
                    .iter()
                    .find(|a| &a.id == mint)
                    .map(|a| a.display_symbol().to_string())
                    .unwrap_or_else(|| "-".to_string());
                Ok(SourceDetails {
                    mint: mint.clone(),
                    symbol,
                    amount_raw: entry.amount,
                    amount_ui: scaled_amount(entry.amount, entry.snapshot.decimals)?,
                    fiat_value: entry.fiat_value()?,
                    expected_output: output_for_input(quotes, session.catalog(), mint)?,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self {
            wallet: session.wallet_address(),
            destination: DestinationDetails {
                mint: destination.address.clone(),
                symbol: destination.symbol.clone(),
                decimals: destination.decimals,
            },
            sources,
            total_fiat_value: session.total_fiat_value()?,
            expected_output: session.expected_output()?,
            transaction_signatures: Vec::new(),
            timestamp: Utc::now(),
        })
    }

    pub fn with_transaction_signatures(mut self, signatures: Vec<String>) -> Self {
        self.transaction_signatures = signatures;
        self
    }

    /// `Swap 2 tokens for 1.2345 USDC ($10.01)`
    pub fn headline(&self) -> String {
        let output = self
            .expected_output
            .map(|o| to_fixed(o, 4))
            .unwrap_or_else(|| "?".to_string());
        format!(
            "Swap {} tokens for {} {} (${})",
            self.sources.len(),
            output,
            self.destination.symbol,
            to_fixed(self.total_fiat_value, 2)
        )
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
