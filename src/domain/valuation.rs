//! Balance scaling and fiat valuation.
//!
//! Balances come from chain in the token's smallest unit and can exceed what
//! an `f64` represents exactly, so everything here works on `Decimal`.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::shared::errors::ValuationError;

/// Largest scale `Decimal` can carry
pub const MAX_DECIMALS: u32 = 28;

fn check_decimals(decimals: i32) -> Result<u32, ValuationError> {
    match u32::try_from(decimals) {
        Ok(d) if d <= MAX_DECIMALS => Ok(d),
        _ => Err(ValuationError::InvalidDecimals(decimals)),
    }
}

/// `raw_balance / 10^decimals`, exact
pub fn scaled_balance(raw_balance: u64, decimals: i32) -> Result<Decimal, ValuationError> {
    scaled_amount(Decimal::from(raw_balance), decimals)
}

/// Same as [`scaled_balance`] for a fractional raw amount
pub fn scaled_amount(amount: Decimal, decimals: i32) -> Result<Decimal, ValuationError> {
    let decimals = check_decimals(decimals)?;
    let amount = amount.normalize();

    // Shifting the scale is exact as long as it stays within MAX_DECIMALS;
    // digits past that are below Decimal's resolution anyway.
    let room = MAX_DECIMALS - decimals;
    let mut scaled = if amount.scale() > room {
        amount.round_dp(room)
    } else {
        amount
    };
    scaled
        .set_scale(scaled.scale() + decimals)
        .map_err(|_| ValuationError::Overflow)?;

    Ok(scaled.normalize())
}

/// Fiat value of a raw balance, zero when the token has no market price
pub fn fiat_value(
    raw_balance: u64,
    decimals: i32,
    price_per_unit: Option<Decimal>,
) -> Result<Decimal, ValuationError> {
    fiat_value_of_amount(Decimal::from(raw_balance), decimals, price_per_unit)
}

pub fn fiat_value_of_amount(
    amount: Decimal,
    decimals: i32,
    price_per_unit: Option<Decimal>,
) -> Result<Decimal, ValuationError> {
    let Some(price) = price_per_unit else {
        return Ok(Decimal::ZERO);
    };

    scaled_amount(amount, decimals)?
        .checked_mul(price)
        .ok_or(ValuationError::Overflow)
}

/// Human-readable amount back to the smallest unit: `ui_amount * 10^decimals`
pub fn raw_amount(ui_amount: Decimal, decimals: i32) -> Result<Decimal, ValuationError> {
    let decimals = check_decimals(decimals)?;
    let mut factor = Decimal::ONE;
    for _ in 0..decimals {
        factor = factor.checked_mul(Decimal::TEN).ok_or(ValuationError::Overflow)?;
    }
    ui_amount
        .checked_mul(factor)
        .map(|v| v.normalize())
        .ok_or(ValuationError::Overflow)
}

/// Fixed-point string with `dp` places, rounding half away from zero
pub fn to_fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}
