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

//! A `Tick` data type representing a single market observation.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{enums::TickType, identifiers::Symbol};

/// Represents a single trade, quote, or open interest observation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tick {
    /// The symbol the tick belongs to.
    #[serde(alias = "Symbol")]
    pub symbol: Symbol,
    /// The time the observation occurred.
    #[serde(alias = "Time")]
    pub time: DateTime<Utc>,
    /// The type of the observation.
    #[serde(alias = "TickType")]
    pub tick_type: TickType,
    /// The trade price, last value, or open interest level.
    #[serde(alias = "Value")]
    pub value: Decimal,
    /// The top-of-book bid price, for quote ticks.
    #[serde(alias = "BidPrice", default, skip_serializing_if = "Option::is_none")]
    pub bid_price: Option<Decimal>,
    /// The top-of-book ask price, for quote ticks.
    #[serde(alias = "AskPrice", default, skip_serializing_if = "Option::is_none")]
    pub ask_price: Option<Decimal>,
    /// The size available at the bid, for quote ticks.
    #[serde(alias = "BidSize", default, skip_serializing_if = "Option::is_none")]
    pub bid_size: Option<Decimal>,
    /// The size available at the ask, for quote ticks.
    #[serde(alias = "AskSize", default, skip_serializing_if = "Option::is_none")]
    pub ask_size: Option<Decimal>,
    /// Whether the tick was fabricated to fill a gap in the series.
    #[serde(alias = "IsFillForward", default)]
    pub is_fill_forward: bool,
}

impl Tick {
    /// Creates a new trade [`Tick`] instance.
    #[must_use]
    pub fn trade(symbol: Symbol, time: DateTime<Utc>, price: Decimal) -> Self {
        Self {
            symbol,
            time,
            tick_type: TickType::Trade,
            value: price,
            bid_price: None,
            ask_price: None,
            bid_size: None,
            ask_size: None,
            is_fill_forward: false,
        }
    }

    /// Creates a new quote [`Tick`] instance, with `value` set to the midpoint
    /// of the provided sides.
    #[must_use]
    pub fn quote(
        symbol: Symbol,
        time: DateTime<Utc>,
        bid_price: Option<Decimal>,
        ask_price: Option<Decimal>,
    ) -> Self {
        let value = match (bid_price, ask_price) {
            (Some(bid), Some(ask)) => (bid + ask) / Decimal::TWO,
            (Some(bid), None) => bid,
            (None, Some(ask)) => ask,
            (None, None) => Decimal::ZERO,
        };
        Self {
            symbol,
            time,
            tick_type: TickType::Quote,
            value,
            bid_price,
            ask_price,
            bid_size: None,
            ask_size: None,
            is_fill_forward: false,
        }
    }

    /// Creates a new open interest [`Tick`] instance.
    #[must_use]
    pub fn open_interest(symbol: Symbol, time: DateTime<Utc>, level: Decimal) -> Self {
        Self {
            symbol,
            time,
            tick_type: TickType::OpenInterest,
            value: level,
            bid_price: None,
            ask_price: None,
            bid_size: None,
            ask_size: None,
            is_fill_forward: false,
        }
    }

    /// Marks the tick as fabricated to fill a gap in the series.
    #[must_use]
    pub const fn fill_forward(mut self) -> Self {
        self.is_fill_forward = true;
        self
    }

    /// Returns whether the tick is a quote carrying both a bid and an ask.
    #[must_use]
    pub const fn has_bid_ask(&self) -> bool {
        matches!(self.tick_type, TickType::Quote)
            && self.bid_price.is_some()
            && self.ask_price.is_some()
    }

    /// Returns the midpoint of the bid and ask, if both are present.
    #[must_use]
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.bid_price, self.ask_price) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
            _ => None,
        }
    }
}

impl Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.symbol, self.time, self.tick_type, self.value,
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
    use crate::data::stubs::{quote_tick_spy, spy, trade_tick_spy};

    #[rstest]
    fn test_trade_tick_has_no_bid_ask(trade_tick_spy: Tick) {
        assert!(!trade_tick_spy.has_bid_ask());
        assert_eq!(trade_tick_spy.mid_price(), None);
    }

    #[rstest]
    fn test_quote_tick_mid_price(quote_tick_spy: Tick) {
        let bid = quote_tick_spy.bid_price.unwrap();
        let ask = quote_tick_spy.ask_price.unwrap();
        assert_eq!(quote_tick_spy.mid_price().unwrap(), (bid + ask) / dec!(2));
        assert_eq!(quote_tick_spy.value, (bid + ask) / dec!(2));
    }

    #[rstest]
    fn test_one_sided_quote_tick(spy: Symbol) {
        let tick = Tick::quote(spy, DateTime::UNIX_EPOCH, Some(dec!(290.51)), None);
        assert!(!tick.has_bid_ask());
        assert_eq!(tick.value, dec!(290.51));
    }

    #[rstest]
    fn test_tick_serde_round_trip(quote_tick_spy: Tick) {
        let json = serde_json::to_string(&quote_tick_spy).unwrap();
        let parsed: Tick = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, quote_tick_spy);
    }
}
