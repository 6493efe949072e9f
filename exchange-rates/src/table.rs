//! Upstream rate table and the pair resolution algorithm.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{CurrencyCode, ExchangeError};

/// One row of the upstream rate table.
///
/// The row quotes `currency_code_a` against `currency_code_b`: `rate_buy`
/// converts A into B, `rate_sell` is the rate used to convert B back into A,
/// and `rate_cross` is a single bidirectional rate for pairs without a
/// buy/sell spread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateEntry {
    pub currency_code_a: u16,
    pub currency_code_b: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_buy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_sell: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_cross: Option<f64>,
    /// Unix timestamp of the quote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
}

/// A zero, negative or non-finite quantity is treated as missing.
fn usable(rate: Option<f64>) -> Option<f64> {
    rate.filter(|r| r.is_finite() && *r > 0.0)
}

impl RateEntry {
    pub fn buy(&self) -> Option<f64> {
        usable(self.rate_buy)
    }

    /// The rate applied when converting B back into A: `sell` when quoted,
    /// `cross` otherwise.
    pub fn sell_or_cross(&self) -> Option<f64> {
        usable(self.rate_sell).or_else(|| usable(self.rate_cross))
    }

    /// Rows without a sell or cross rate cannot take part in a conversion.
    pub fn is_cacheable(&self) -> bool {
        self.sell_or_cross().is_some()
    }
}

/// Which side of the table a conversion was resolved from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppliedRate {
    /// The table quotes `target -> source`; the amount is divided.
    Reverse(f64),
    /// The table quotes `source -> target`; the amount is multiplied.
    Direct(f64),
}

impl AppliedRate {
    pub fn apply(self, amount: f64) -> f64 {
        match self {
            AppliedRate::Reverse(rate) => amount / rate,
            AppliedRate::Direct(rate) => amount * rate,
        }
    }

    pub fn rate(self) -> f64 {
        match self {
            AppliedRate::Reverse(rate) | AppliedRate::Direct(rate) => rate,
        }
    }
}

/// The rate rows of one fetch cycle, in upstream order.
///
/// Rows that are not cacheable are dropped on construction, including when
/// a table is deserialized. Clones share the row buffer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<RateEntry>", into = "Vec<RateEntry>")]
pub struct RateTable {
    entries: Arc<[RateEntry]>,
}

impl RateTable {
    pub fn from_rows(rows: Vec<RateEntry>) -> Self {
        let entries: Vec<RateEntry> = rows.into_iter().filter(RateEntry::is_cacheable).collect();
        Self {
            entries: entries.into(),
        }
    }

    pub fn entries(&self) -> &[RateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the rate for converting `source` into `target`.
    ///
    /// A reverse row `(target, source)` with a sell or cross rate always wins
    /// over a direct row `(source, target)` with a buy rate. Within each scan
    /// the first matching row in table order is used.
    pub fn resolve(&self, source: u16, target: u16) -> Option<AppliedRate> {
        let reverse = self.entries.iter().find_map(|e| {
            if e.currency_code_a == target && e.currency_code_b == source {
                e.sell_or_cross()
            } else {
                None
            }
        });
        if let Some(rate) = reverse {
            return Some(AppliedRate::Reverse(rate));
        }

        self.entries
            .iter()
            .find_map(|e| {
                if e.currency_code_a == source && e.currency_code_b == target {
                    e.buy()
                } else {
                    None
                }
            })
            .map(AppliedRate::Direct)
    }

    /// Converts `amount` from `source` into `target`.
    pub fn convert(
        &self,
        source: CurrencyCode,
        target: CurrencyCode,
        amount: f64,
    ) -> Result<f64, ExchangeError> {
        self.resolve(source.numeric(), target.numeric())
            .map(|rate| rate.apply(amount))
            .ok_or(ExchangeError::RateNotFound(source, target))
    }
}

impl From<Vec<RateEntry>> for RateTable {
    fn from(rows: Vec<RateEntry>) -> Self {
        Self::from_rows(rows)
    }
}

impl From<RateTable> for Vec<RateEntry> {
    fn from(table: RateTable) -> Self {
        table.entries.to_vec()
    }
}
