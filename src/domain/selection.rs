//! Which wallet tokens the user wants to swap, and how much of each.
//!
//! Every entry keeps a snapshot of the asset's balance, decimals and price
//! taken when it was selected. Totals are computed from that snapshot, so a
//! later balance refetch never moves the value of a selection already made.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, HashSet};

use crate::domain::valuation::fiat_value_of_amount;
use crate::shared::errors::ValuationError;
use crate::shared::types::AssetSnapshot;

/// Lowest amount control position; an amount equal to it means "not selected"
pub const DEFAULT_MINIMUM_AMOUNT: Decimal = dec!(0.1);

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionEntry {
    /// Amount in the asset's smallest unit
    pub amount: Decimal,
    pub snapshot: AssetSnapshot,
}

impl SelectionEntry {
    pub fn fiat_value(&self) -> Result<Decimal, ValuationError> {
        fiat_value_of_amount(self.amount, self.snapshot.decimals, self.snapshot.price_per_unit)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    minimum: Decimal,
    entries: BTreeMap<String, SelectionEntry>,
}

impl Selection {
    pub fn new(minimum: Decimal) -> Self {
        Self {
            minimum,
            entries: BTreeMap::new(),
        }
    }

    pub fn minimum(&self) -> Decimal {
        self.minimum
    }

    /// Record `amount` for `asset_id`, or drop the entry when `amount` is the minimum.
    ///
    /// Bounds are the caller's job: `amount` must already be clamped to
    /// `[minimum, balance]`.
    pub fn set_amount(mut self, asset_id: &str, amount: Decimal, snapshot: AssetSnapshot) -> Self {
        if amount == self.minimum {
            self.entries.remove(asset_id);
        } else {
            self.entries
                .insert(asset_id.to_string(), SelectionEntry { amount, snapshot });
        }
        self
    }

    pub fn clear(mut self) -> Self {
        self.entries.clear();
        self
    }

    /// Drop every entry whose id is not in `keys`
    pub fn retain_keys(mut self, keys: &HashSet<String>) -> Self {
        self.entries.retain(|id, _| keys.contains(id));
        self
    }

    /// Union of two selections; `other` wins on shared ids
    pub fn merge(mut self, other: Selection) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, asset_id: &str) -> Option<&SelectionEntry> {
        self.entries.get(asset_id)
    }

    pub fn contains(&self, asset_id: &str) -> bool {
        self.entries.contains_key(asset_id)
    }

    /// Entries ordered by asset id
    pub fn entries(&self) -> impl Iterator<Item = (&String, &SelectionEntry)> {
        self.entries.iter()
    }

    pub fn total_fiat_value(&self) -> Result<Decimal, ValuationError> {
        self.entries.values().try_fold(Decimal::ZERO, |acc, entry| {
            acc.checked_add(entry.fiat_value()?).ok_or(ValuationError::Overflow)
        })
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMUM_AMOUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(balance: u64, decimals: i32, price: Option<Decimal>) -> AssetSnapshot {
        AssetSnapshot {
            balance,
            decimals,
            price_per_unit: price,
        }
    }

    #[test]
    fn test_total_fiat_value_and_count() {
        // 10.00 + 0.005
        let selection = Selection::default()
            .set_amount("usdc", dec!(10000000), snapshot(20_000_000, 6, Some(dec!(1))))
            .set_amount("bonk", dec!(500), snapshot(1_000_000, 5, Some(dec!(1))));

        assert_eq!(selection.count(), 2);
        assert_eq!(selection.total_fiat_value().unwrap(), dec!(10.005));
    }

    #[test]
    fn test_set_amount_to_minimum_removes_entry() {
        let selection = Selection::default()
            .set_amount("a", dec!(100), snapshot(1000, 0, Some(dec!(1))))
            .set_amount("b", dec!(200), snapshot(1000, 0, Some(dec!(1))));
        assert_eq!(selection.count(), 2);

        let selection = selection.set_amount("a", DEFAULT_MINIMUM_AMOUNT, snapshot(1000, 0, Some(dec!(1))));
        assert_eq!(selection.count(), 1);
        assert!(!selection.contains("a"));

        // removing an absent id is a no-op
        let selection = selection.set_amount("zzz", dec!(0.10), snapshot(1000, 0, None));
        assert_eq!(selection.count(), 1);
        assert!(!selection.contains("zzz"));
    }

    #[test]
    fn test_set_amount_overwrites() {
        let selection = Selection::default()
            .set_amount("a", dec!(100), snapshot(1000, 0, Some(dec!(1))))
            .set_amount("a", dec!(300), snapshot(1000, 0, Some(dec!(1))));
        assert_eq!(selection.count(), 1);
        assert_eq!(selection.get("a").unwrap().amount, dec!(300));
    }

    #[test]
    fn test_total_uses_snapshot_price() {
        let selection = Selection::default()
            .set_amount("sol", dec!(1000000000), snapshot(2_000_000_000, 9, Some(dec!(150))));
        let before = selection.total_fiat_value().unwrap();

        // a later price refresh produces a new asset, not a new snapshot
        let refreshed = snapshot(2_000_000_000, 9, Some(dec!(175)));
        assert_ne!(refreshed, selection.get("sol").unwrap().snapshot);
        assert_eq!(selection.total_fiat_value().unwrap(), before);
        assert_eq!(before, dec!(150));
    }

    #[test]
    fn test_total_is_additive_over_disjoint_merge() {
        let s1 = Selection::default()
            .set_amount("a", dec!(12345.67), snapshot(100_000, 3, Some(dec!(0.37))))
            .set_amount("b", dec!(9), snapshot(10, 0, Some(dec!(1.1))));
        let s2 = Selection::default()
            .set_amount("c", dec!(777), snapshot(1000, 2, Some(dec!(19.99))))
            .set_amount("d", dec!(5), snapshot(5, 0, None));

        let sum = s1.total_fiat_value().unwrap() + s2.total_fiat_value().unwrap();
        let merged = s1.merge(s2);
        assert_eq!(merged.count(), 4);
        assert_eq!(merged.total_fiat_value().unwrap(), sum);
    }

    #[test]
    fn test_retain_keys_and_clear() {
        let selection = Selection::default()
            .set_amount("a", dec!(1), snapshot(10, 0, None))
            .set_amount("b", dec!(2), snapshot(10, 0, None));

        let keys: HashSet<String> = ["b".to_string()].into_iter().collect();
        let selection = selection.retain_keys(&keys);
        assert_eq!(selection.entries().map(|(id, _)| id.as_str()).collect::<Vec<_>>(), vec!["b"]);

        let selection = selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.total_fiat_value().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_total_reports_invalid_snapshot() {
        let selection = Selection::default().set_amount("bad", dec!(5), snapshot(10, -1, Some(dec!(1))));
        assert_eq!(
            selection.total_fiat_value(),
            Err(ValuationError::InvalidDecimals(-1))
        );
    }
}
