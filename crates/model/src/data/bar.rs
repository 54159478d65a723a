// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Bar aggregate structures for trade data.

use std::fmt::Display;

use chrono::{DateTime, TimeDelta, Utc};
use marlin_core::correctness::{FAILED, check_predicate_true};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::identifiers::Symbol;

/// The OHLC price set of one side (or the whole) of a bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarData {
    /// The open price.
    #[serde(alias = "Open")]
    pub open: Decimal,
    /// The high price.
    #[serde(alias = "High")]
    pub high: Decimal,
    /// The low price.
    #[serde(alias = "Low")]
    pub low: Decimal,
    /// The close price.
    #[serde(alias = "Close")]
    pub close: Decimal,
}

impl BarData {
    /// Creates a new [`BarData`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if the high is below the low, or the open/close fall
    /// outside the high-low range.
    pub fn new_checked(
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> anyhow::Result<Self> {
        check_predicate_true(high >= low, "bar high was below low")?;
        check_predicate_true(
            open >= low && open <= high,
            "bar open outside the high-low range",
        )?;
        check_predicate_true(
            close >= low && close <= high,
            "bar close outside the high-low range",
        )?;
        Ok(Self {
            open,
            high,
            low,
            close,
        })
    }

    /// Creates a new [`BarData`] instance.
    ///
    /// # Panics
    ///
    /// Panics if the OHLC values are inconsistent.
    #[must_use]
    pub fn new(open: Decimal, high: Decimal, low: Decimal, close: Decimal) -> Self {
        Self::new_checked(open, high, low, close).expect(FAILED)
    }
}

/// Represents a bar aggregated from trades over a fixed period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeBar {
    /// The symbol the bar belongs to.
    #[serde(alias = "Symbol")]
    pub symbol: Symbol,
    /// The time the bar period started.
    #[serde(alias = "Start", alias = "Time")]
    pub start: DateTime<Utc>,
    /// The length of the bar period.
    #[serde(alias = "Period", with = "marlin_core::serialization::timedelta_secs")]
    pub period: TimeDelta,
    /// The open price.
    #[serde(alias = "Open")]
    pub open: Decimal,
    /// The high price.
    #[serde(alias = "High")]
    pub high: Decimal,
    /// The low price.
    #[serde(alias = "Low")]
    pub low: Decimal,
    /// The close price.
    #[serde(alias = "Close")]
    pub close: Decimal,
    /// The traded volume over the period.
    #[serde(alias = "Volume")]
    pub volume: Decimal,
    /// Whether the bar was fabricated to fill a gap in the series.
    #[serde(alias = "IsFillForward", default)]
    pub is_fill_forward: bool,
}

impl TradeBar {
    /// Creates a new [`TradeBar`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if the OHLC values are inconsistent or the period is
    /// not positive.
    #[allow(clippy::too_many_arguments)]
    pub fn new_checked(
        symbol: Symbol,
        start: DateTime<Utc>,
        period: TimeDelta,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> anyhow::Result<Self> {
        check_predicate_true(period > TimeDelta::zero(), "bar period was not positive")?;
        BarData::new_checked(open, high, low, close)?;
        Ok(Self {
            symbol,
            start,
            period,
            open,
            high,
            low,
            close,
            volume,
            is_fill_forward: false,
        })
    }

    /// Creates a new [`TradeBar`] instance.
    ///
    /// # Panics
    ///
    /// Panics if the OHLC values are inconsistent or the period is not positive.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        symbol: Symbol,
        start: DateTime<Utc>,
        period: TimeDelta,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self::new_checked(symbol, start, period, open, high, low, close, volume).expect(FAILED)
    }

    /// Marks the bar as fabricated to fill a gap in the series.
    #[must_use]
    pub const fn fill_forward(mut self) -> Self {
        self.is_fill_forward = true;
        self
    }

    /// Returns the time the bar period ended.
    #[must_use]
    pub fn end_time(&self) -> DateTime<Utc> {
        self.start + self.period
    }

    /// Returns the OHLC prices as a [`BarData`].
    #[must_use]
    pub const fn bar_data(&self) -> BarData {
        BarData {
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
        }
    }
}

impl Display for TradeBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{}",
            self.symbol, self.start, self.open, self.high, self.low, self.close, self.volume,
        )
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::data::stubs::{spy, trade_bar_spy};

    #[rstest]
    fn test_trade_bar_end_time(trade_bar_spy: TradeBar) {
        assert_eq!(
            trade_bar_spy.end_time(),
            trade_bar_spy.start + TimeDelta::minutes(1)
        );
    }

    #[rstest]
    fn test_trade_bar_rejects_inverted_range(spy: Symbol) {
        let result = TradeBar::new_checked(
            spy,
            DateTime::UNIX_EPOCH,
            TimeDelta::minutes(1),
            dec!(102),
            dec!(101),
            dec!(103),
            dec!(102.3),
            dec!(1000),
        );
        assert!(result.is_err());
    }

    #[rstest]
    fn test_trade_bar_fill_forward_flag(trade_bar_spy: TradeBar) {
        assert!(!trade_bar_spy.is_fill_forward);
        assert!(trade_bar_spy.fill_forward().is_fill_forward);
    }

    #[rstest]
    fn test_trade_bar_serde_round_trip(trade_bar_spy: TradeBar) {
        let json = serde_json::to_string(&trade_bar_spy).unwrap();
        let parsed: TradeBar = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, trade_bar_spy);
    }
}
