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

//! Bar aggregate structures for top-of-book quote data.

use std::fmt::Display;

use chrono::{DateTime, TimeDelta, Utc};
use marlin_core::correctness::{FAILED, check_predicate_true};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{data::bar::BarData, identifiers::Symbol};

/// Represents a bar aggregated from top-of-book quotes over a fixed period.
///
/// Either side may be absent when the feed observed no quotes on that side
/// during the period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBar {
    /// The symbol the bar belongs to.
    #[serde(alias = "Symbol")]
    pub symbol: Symbol,
    /// The time the bar period started.
    #[serde(alias = "Start", alias = "Time")]
    pub start: DateTime<Utc>,
    /// The length of the bar period.
    #[serde(alias = "Period", with = "marlin_core::serialization::timedelta_secs")]
    pub period: TimeDelta,
    /// The bid side OHLC, if any bids were observed.
    #[serde(alias = "Bid", default, skip_serializing_if = "Option::is_none")]
    pub bid: Option<BarData>,
    /// The ask side OHLC, if any asks were observed.
    #[serde(alias = "Ask", default, skip_serializing_if = "Option::is_none")]
    pub ask: Option<BarData>,
    /// The size available at the last bid.
    #[serde(alias = "BidSize", default)]
    pub bid_size: Decimal,
    /// The size available at the last ask.
    #[serde(alias = "AskSize", default)]
    pub ask_size: Decimal,
    /// Whether the bar was fabricated to fill a gap in the series.
    #[serde(alias = "IsFillForward", default)]
    pub is_fill_forward: bool,
}

impl QuoteBar {
    /// Creates a new [`QuoteBar`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if the period is not positive or both sides are absent.
    pub fn new_checked(
        symbol: Symbol,
        start: DateTime<Utc>,
        period: TimeDelta,
        bid: Option<BarData>,
        ask: Option<BarData>,
        bid_size: Decimal,
        ask_size: Decimal,
    ) -> anyhow::Result<Self> {
        check_predicate_true(period > TimeDelta::zero(), "bar period was not positive")?;
        check_predicate_true(
            bid.is_some() || ask.is_some(),
            "quote bar had neither a bid nor an ask side",
        )?;
        Ok(Self {
            symbol,
            start,
            period,
            bid,
            ask,
            bid_size,
            ask_size,
            is_fill_forward: false,
        })
    }

    /// Creates a new [`QuoteBar`] instance.
    ///
    /// # Panics
    ///
    /// Panics if the period is not positive or both sides are absent.
    #[must_use]
    pub fn new(
        symbol: Symbol,
        start: DateTime<Utc>,
        period: TimeDelta,
        bid: Option<BarData>,
        ask: Option<BarData>,
        bid_size: Decimal,
        ask_size: Decimal,
    ) -> Self {
        Self::new_checked(symbol, start, period, bid, ask, bid_size, ask_size).expect(FAILED)
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

    /// Returns the closing bid price, if the bid side is present.
    #[must_use]
    pub fn bid_close(&self) -> Option<Decimal> {
        self.bid.map(|side| side.close)
    }

    /// Returns the closing ask price, if the ask side is present.
    #[must_use]
    pub fn ask_close(&self) -> Option<Decimal> {
        self.ask.map(|side| side.close)
    }

    /// Returns the midpoint of the closing bid and ask, or the close of the
    /// only present side.
    #[must_use]
    pub fn mid_close(&self) -> Option<Decimal> {
        match (self.bid_close(), self.ask_close()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
            (Some(bid), None) => Some(bid),
            (None, Some(ask)) => Some(ask),
            (None, None) => None,
        }
    }
}

impl Display for QuoteBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},bid_close={:?},ask_close={:?}",
            self.symbol,
            self.start,
            self.bid_close(),
            self.ask_close(),
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
    use crate::data::stubs::{quote_bar_spy, spy};

    #[rstest]
    fn test_quote_bar_requires_a_side(spy: Symbol) {
        let result = QuoteBar::new_checked(
            spy,
            DateTime::UNIX_EPOCH,
            TimeDelta::minutes(1),
            None,
            None,
            Decimal::ZERO,
            Decimal::ZERO,
        );
        assert!(result.is_err());
    }

    #[rstest]
    fn test_quote_bar_mid_close(quote_bar_spy: QuoteBar) {
        let bid = quote_bar_spy.bid_close().unwrap();
        let ask = quote_bar_spy.ask_close().unwrap();
        assert_eq!(quote_bar_spy.mid_close().unwrap(), (bid + ask) / dec!(2));
    }

    #[rstest]
    fn test_quote_bar_serde_round_trip(quote_bar_spy: QuoteBar) {
        let json = serde_json::to_string(&quote_bar_spy).unwrap();
        let parsed: QuoteBar = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, quote_bar_spy);
    }
}
