//! Backend quotes, read only as far as the output amount per destination mint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::catalog::TokenCatalog;
use crate::shared::errors::AppError;

/// One route quote. Fields other than the output are kept untouched and
/// handed back to the backend on swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "outAmount")]
    pub out_amount: String,
    #[serde(rename = "outputMint")]
    pub output_mint: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Quote {
    pub fn input_mint(&self) -> Option<&str> {
        self.extra.get("inputMint").and_then(Value::as_str)
    }
}

/// Sum of the scaled outputs of all quotes targeting a catalog token.
///
/// Quotes for mints outside the catalog are not counted.
pub fn total_output(quotes: &[Quote], catalog: &TokenCatalog) -> Result<Decimal, AppError> {
    quotes.iter().try_fold(Decimal::ZERO, |acc, quote| {
        match catalog.find(&quote.output_mint) {
            Some(token) => Ok(acc + token.format_output(&quote.out_amount)?),
            None => Ok(acc),
        }
    })
}

/// Scaled output of the quotes selling `input_mint`, `None` when none does.
pub fn output_for_input(
    quotes: &[Quote],
    catalog: &TokenCatalog,
    input_mint: &str,
) -> Result<Option<Decimal>, AppError> {
    let routed: Vec<Quote> = quotes
        .iter()
        .filter(|q| q.input_mint() == Some(input_mint))
        .cloned()
        .collect();
    if routed.is_empty() {
        return Ok(None);
    }
    total_output(&routed, catalog).map(Some)
}
