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

//! A tradable security holding its market data cache and session hours.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::{
    data::MarketData,
    enums::SecurityType,
    identifiers::Symbol,
    securities::{cache::SecurityCache, hours::ExchangeHours},
};

/// Represents a tradable security and the state the fill engine reads from it.
///
/// The security exclusively owns its data cache; the engine reads it and the
/// data feed writes it, serially per security.
#[derive(Clone, Debug)]
pub struct Security {
    /// The canonical symbol of the security.
    pub symbol: Symbol,
    /// The session hours of the exchange the security trades on.
    pub exchange_hours: ExchangeHours,
    cache: SecurityCache,
    time_utc: DateTime<Utc>,
}

impl Security {
    /// Creates a new [`Security`] instance with an empty data cache.
    #[must_use]
    pub fn new(symbol: Symbol, exchange_hours: ExchangeHours) -> Self {
        Self {
            symbol,
            exchange_hours,
            cache: SecurityCache::new(),
            time_utc: DateTime::UNIX_EPOCH,
        }
    }

    /// Returns the security type carried on the symbol.
    #[must_use]
    pub fn security_type(&self) -> SecurityType {
        self.symbol.security_type
    }

    /// Returns the data cache.
    #[must_use]
    pub const fn cache(&self) -> &SecurityCache {
        &self.cache
    }

    /// Stores `data` in the cache and advances the security clock to the data
    /// end time when it is ahead.
    pub fn update_data(&mut self, data: MarketData) {
        let end = data.end_time();
        if end > self.time_utc {
            self.time_utc = end;
        }
        self.cache.update(data);
    }

    /// Advances the security clock to the given UTC instant.
    ///
    /// The clock never runs backwards; an earlier instant is ignored.
    pub fn update_time(&mut self, utc: DateTime<Utc>) {
        if utc > self.time_utc {
            self.time_utc = utc;
        }
    }

    /// Returns the security's current time in UTC.
    #[must_use]
    pub const fn utc_time(&self) -> DateTime<Utc> {
        self.time_utc
    }

    /// Returns the security's current time in the exchange time zone.
    #[must_use]
    pub fn local_time(&self) -> DateTime<Tz> {
        self.exchange_hours.to_local(self.time_utc)
    }

    /// Returns the most recent traded (or last) price, if any data is cached.
    #[must_use]
    pub fn price(&self) -> Option<Decimal> {
        if let Some(tick) = self.cache.trade_tick() {
            return Some(tick.value);
        }
        if let Some(bar) = self.cache.trade_bar() {
            return Some(bar.close);
        }
        if let Some(bar) = self.cache.quote_bar() {
            return bar.mid_close();
        }
        self.cache.quote_tick().map(|tick| tick.value)
    }

    /// Returns the open of the most recent trade bar, if any.
    #[must_use]
    pub fn open(&self) -> Option<Decimal> {
        self.cache.trade_bar().map(|bar| bar.open)
    }

    /// Returns the high of the most recent trade bar, if any.
    #[must_use]
    pub fn high(&self) -> Option<Decimal> {
        self.cache.trade_bar().map(|bar| bar.high)
    }

    /// Returns the low of the most recent trade bar, if any.
    #[must_use]
    pub fn low(&self) -> Option<Decimal> {
        self.cache.trade_bar().map(|bar| bar.low)
    }

    /// Returns the close of the most recent trade bar, if any.
    #[must_use]
    pub fn close(&self) -> Option<Decimal> {
        self.cache.trade_bar().map(|bar| bar.close)
    }

    /// Returns the best known bid price from the freshest quote datum.
    #[must_use]
    pub fn bid_price(&self) -> Option<Decimal> {
        match (self.cache.quote_tick(), self.cache.quote_bar()) {
            (Some(tick), Some(bar)) if bar.end_time() > tick.time => bar.bid_close(),
            (Some(tick), _) => tick.bid_price,
            (None, Some(bar)) => bar.bid_close(),
            (None, None) => None,
        }
    }

    /// Returns the best known ask price from the freshest quote datum.
    #[must_use]
    pub fn ask_price(&self) -> Option<Decimal> {
        match (self.cache.quote_tick(), self.cache.quote_bar()) {
            (Some(tick), Some(bar)) if bar.end_time() > tick.time => bar.ask_close(),
            (Some(tick), _) => tick.ask_price,
            (None, Some(bar)) => bar.ask_close(),
            (None, None) => None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::data::{
        TradeBar,
        stubs::{quote_tick_spy, spy, trade_bar_spy},
    };

    #[rstest]
    fn test_security_clock_follows_data(spy: Symbol, trade_bar_spy: TradeBar) {
        let mut security = Security::new(spy, ExchangeHours::equity_usa());
        let end = trade_bar_spy.end_time();
        security.update_data(MarketData::TradeBar(trade_bar_spy));
        assert_eq!(security.utc_time(), end);

        // The clock never runs backwards
        security.update_time(end - TimeDelta::minutes(10));
        assert_eq!(security.utc_time(), end);
    }

    #[rstest]
    fn test_security_price_prefers_trades(
        spy: Symbol,
        trade_bar_spy: TradeBar,
        quote_tick_spy: crate::data::Tick,
    ) {
        let mut security = Security::new(spy, ExchangeHours::equity_usa());
        security.update_data(MarketData::Tick(quote_tick_spy));
        security.update_data(MarketData::TradeBar(trade_bar_spy));
        assert_eq!(security.price(), Some(dec!(102.3)));
        assert_eq!(security.bid_price(), Some(dec!(102.10)));
        assert_eq!(security.ask_price(), Some(dec!(102.20)));
    }

    #[rstest]
    fn test_security_ohlc_accessors(spy: Symbol, trade_bar_spy: TradeBar) {
        let mut security = Security::new(spy, ExchangeHours::equity_usa());
        assert_eq!(security.open(), None);
        security.update_data(MarketData::TradeBar(trade_bar_spy));
        assert_eq!(security.open(), Some(dec!(102)));
        assert_eq!(security.high(), Some(dec!(103)));
        assert_eq!(security.low(), Some(dec!(101)));
        assert_eq!(security.close(), Some(dec!(102.3)));
    }
}
