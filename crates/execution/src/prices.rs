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

//! The price snapshot extractor.
//!
//! Builds the `{open, high, low, close, current, end_time}` tuple the fill
//! evaluators consume, sourced from the most appropriate cached datum with
//! direction dependent side selection for quotes.

use chrono::{DateTime, Utc};
use marlin_model::{
    data::BarData,
    enums::OrderDirection,
    securities::{Security, SubscriptionDataConfig, subscriptions},
};
use rust_decimal::Decimal;

use crate::config::PriceMode;

/// The price snapshot one evaluation runs against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prices {
    /// The open of the sourced data slice.
    pub open: Decimal,
    /// The high of the sourced data slice.
    pub high: Decimal,
    /// The low of the sourced data slice.
    pub low: Decimal,
    /// The close of the sourced data slice.
    pub close: Decimal,
    /// The current (actionable) price for the requested direction.
    pub current: Decimal,
    /// The time the sourced data slice ended.
    pub end_time: DateTime<Utc>,
}

impl Prices {
    /// Creates a snapshot from a one-sided bar, with `current` at its close.
    #[must_use]
    pub const fn from_bar_data(bar: &BarData, end_time: DateTime<Utc>) -> Self {
        Self {
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            current: bar.close,
            end_time,
        }
    }

    /// Creates a flat snapshot where every field carries `price`.
    #[must_use]
    pub const fn flat(price: Decimal, end_time: DateTime<Utc>) -> Self {
        Self {
            open: price,
            high: price,
            low: price,
            close: price,
            current: price,
            end_time,
        }
    }

    /// Creates an all-zero snapshot, returned when nothing is cached.
    #[must_use]
    pub const fn zero() -> Self {
        Self::flat(Decimal::ZERO, DateTime::UNIX_EPOCH)
    }
}

/// Extracts the price snapshot for `direction` from the security's cache.
///
/// Standard selection order (first hit wins):
///
/// 1. A quote tick with both sides, when a tick subscription exists.
/// 2. A quote bar, unless an even newer trade bar is cached.
/// 3. A trade bar.
/// 4. A trade tick.
/// 5. All zeros.
///
/// [`PriceMode::LatestPrice`] instead compares the freshest trade datum with
/// the freshest quote datum and takes the strictly newer; ties favor trades.
#[must_use]
pub fn get_prices(
    security: &Security,
    configs: &[SubscriptionDataConfig],
    direction: OrderDirection,
    mode: PriceMode,
) -> Prices {
    match mode {
        PriceMode::Standard => get_prices_standard(security, configs, direction),
        PriceMode::LatestPrice => get_prices_latest(security, direction),
    }
}

fn get_prices_standard(
    security: &Security,
    configs: &[SubscriptionDataConfig],
    direction: OrderDirection,
) -> Prices {
    let cache = security.cache();

    if subscriptions::has_tick_subscription(configs)
        && let Some(tick) = cache.quote_tick()
        && tick.has_bid_ask()
    {
        let current = match direction {
            OrderDirection::Buy => tick.ask_price.unwrap_or(tick.value),
            OrderDirection::Sell => tick.bid_price.unwrap_or(tick.value),
            OrderDirection::Hold => cache
                .trade_tick()
                .map_or_else(|| tick.mid_price().unwrap_or(tick.value), |trade| trade.value),
        };
        return Prices::flat(current, tick.time);
    }

    if let Some(quote_bar) = cache.quote_bar() {
        let trade_bar = cache.trade_bar();
        let quote_is_current =
            trade_bar.is_none_or(|trade| quote_bar.end_time() >= trade.end_time());
        if quote_is_current {
            let side = match direction {
                OrderDirection::Buy => quote_bar.ask,
                OrderDirection::Sell => quote_bar.bid,
                OrderDirection::Hold => None,
            };
            if let Some(side) = side {
                return Prices::from_bar_data(&side, quote_bar.end_time());
            }
            if direction == OrderDirection::Hold
                && let Some(trade) = trade_bar
            {
                return Prices::from_bar_data(&trade.bar_data(), trade.end_time());
            }
        }
    }

    if let Some(bar) = cache.trade_bar() {
        return Prices::from_bar_data(&bar.bar_data(), bar.end_time());
    }

    if let Some(tick) = cache.trade_tick() {
        return Prices::flat(tick.value, tick.time);
    }

    Prices::zero()
}

fn get_prices_latest(security: &Security, direction: OrderDirection) -> Prices {
    let cache = security.cache();

    // Freshest trade datum
    let trade: Option<Prices> = match (cache.trade_tick(), cache.trade_bar()) {
        (Some(tick), Some(bar)) if bar.end_time() > tick.time => {
            Some(Prices::from_bar_data(&bar.bar_data(), bar.end_time()))
        }
        (Some(tick), _) => Some(Prices::flat(tick.value, tick.time)),
        (None, Some(bar)) => Some(Prices::from_bar_data(&bar.bar_data(), bar.end_time())),
        (None, None) => None,
    };

    // Freshest quote datum, sided for the direction
    let quote: Option<Prices> = {
        let from_tick = cache.quote_tick().filter(|tick| tick.has_bid_ask()).map(|tick| {
            let current = match direction {
                OrderDirection::Buy => tick.ask_price.unwrap_or(tick.value),
                OrderDirection::Sell => tick.bid_price.unwrap_or(tick.value),
                OrderDirection::Hold => tick.value,
            };
            Prices::flat(current, tick.time)
        });
        let from_bar = cache.quote_bar().and_then(|bar| {
            let side = match direction {
                OrderDirection::Buy => bar.ask,
                OrderDirection::Sell => bar.bid,
                OrderDirection::Hold => bar.ask.or(bar.bid),
            };
            side.map(|side| Prices::from_bar_data(&side, bar.end_time()))
        });
        match (from_tick, from_bar) {
            (Some(tick), Some(bar)) if bar.end_time > tick.end_time => Some(bar),
            (Some(tick), _) => Some(tick),
            (None, bar) => bar,
        }
    };

    match (trade, quote) {
        // Ties favor trade data
        (Some(trade), Some(quote)) if quote.end_time > trade.end_time => quote,
        (Some(trade), _) => trade,
        (None, Some(quote)) => quote,
        (None, None) => Prices::zero(),
    }
}

/// Extracts a snapshot from trade data only, used by the evaluators which
/// must never price from quotes.
///
/// Returns `None` when only quote data is cached.
#[must_use]
pub fn get_trade_prices(security: &Security) -> Option<Prices> {
    let cache = security.cache();

    match (cache.trade_bar(), cache.trade_tick()) {
        (Some(bar), Some(tick)) if tick.time > bar.end_time() => {
            Some(Prices::flat(tick.value, tick.time))
        }
        (Some(bar), _) => Some(Prices::from_bar_data(&bar.bar_data(), bar.end_time())),
        (None, Some(tick)) => Some(Prices::flat(tick.value, tick.time)),
        (None, None) => None,
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use marlin_model::{
        data::{
            MarketData, QuoteBar, Tick, TradeBar,
            stubs::{quote_bar_spy, quote_tick_spy, spy, trade_bar_spy, trade_tick_spy},
        },
        enums::{MarketDataType, Resolution},
        identifiers::Symbol,
        securities::ExchangeHours,
    };
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    fn security_with(symbol: Symbol, data: Vec<MarketData>) -> Security {
        let mut security = Security::new(symbol, ExchangeHours::equity_usa());
        for item in data {
            security.update_data(item);
        }
        security
    }

    fn tick_configs(symbol: &Symbol) -> Vec<SubscriptionDataConfig> {
        vec![SubscriptionDataConfig::new(
            symbol.clone(),
            MarketDataType::QuoteTick,
            Resolution::Tick,
        )]
    }

    fn bar_configs(symbol: &Symbol) -> Vec<SubscriptionDataConfig> {
        vec![
            SubscriptionDataConfig::new(symbol.clone(), MarketDataType::TradeBar, Resolution::Minute),
            SubscriptionDataConfig::new(symbol.clone(), MarketDataType::QuoteBar, Resolution::Minute),
        ]
    }

    #[rstest]
    fn test_quote_tick_selected_with_tick_subscription(spy: Symbol, quote_tick_spy: Tick) {
        let security = security_with(spy.clone(), vec![MarketData::Tick(quote_tick_spy)]);
        let configs = tick_configs(&spy);

        let buy = get_prices(&security, &configs, OrderDirection::Buy, PriceMode::Standard);
        assert_eq!(buy.current, dec!(102.20));
        assert_eq!(buy.open, buy.current);

        let sell = get_prices(&security, &configs, OrderDirection::Sell, PriceMode::Standard);
        assert_eq!(sell.current, dec!(102.10));
    }

    #[rstest]
    fn test_hold_prefers_last_trade_then_mid(
        spy: Symbol,
        quote_tick_spy: Tick,
        trade_tick_spy: Tick,
    ) {
        let configs = tick_configs(&spy);

        let mut last_trade = trade_tick_spy;
        last_trade.value = dec!(102.00);
        let with_trade = security_with(
            spy.clone(),
            vec![
                MarketData::Tick(quote_tick_spy.clone()),
                MarketData::Tick(last_trade),
            ],
        );
        let hold = get_prices(&with_trade, &configs, OrderDirection::Hold, PriceMode::Standard);
        assert_eq!(hold.current, dec!(102.00));

        let quote_only = security_with(spy, vec![MarketData::Tick(quote_tick_spy)]);
        let hold = get_prices(&quote_only, &configs, OrderDirection::Hold, PriceMode::Standard);
        assert_eq!(hold.current, dec!(102.15)); // mid of 102.10/102.20
    }

    #[rstest]
    fn test_quote_bar_sides_selected_by_direction(
        spy: Symbol,
        quote_bar_spy: QuoteBar,
        trade_bar_spy: TradeBar,
    ) {
        let security = security_with(
            spy.clone(),
            vec![
                MarketData::TradeBar(trade_bar_spy),
                MarketData::QuoteBar(quote_bar_spy.clone()),
            ],
        );
        let configs = bar_configs(&spy);

        let buy = get_prices(&security, &configs, OrderDirection::Buy, PriceMode::Standard);
        let ask = quote_bar_spy.ask.unwrap();
        assert_eq!(
            (buy.open, buy.high, buy.low, buy.close),
            (ask.open, ask.high, ask.low, ask.close)
        );

        let sell = get_prices(&security, &configs, OrderDirection::Sell, PriceMode::Standard);
        assert_eq!(sell.close, quote_bar_spy.bid.unwrap().close);
    }

    #[rstest]
    fn test_newer_trade_bar_wins_over_quote_bar(
        spy: Symbol,
        quote_bar_spy: QuoteBar,
        trade_bar_spy: TradeBar,
    ) {
        let mut newer_trade = trade_bar_spy;
        newer_trade.start += TimeDelta::minutes(2);
        let security = security_with(
            spy.clone(),
            vec![
                MarketData::QuoteBar(quote_bar_spy),
                MarketData::TradeBar(newer_trade.clone()),
            ],
        );
        let configs = bar_configs(&spy);

        let buy = get_prices(&security, &configs, OrderDirection::Buy, PriceMode::Standard);
        assert_eq!(buy.close, newer_trade.close);
        assert_eq!(buy.current, newer_trade.close);
    }

    #[rstest]
    fn test_trade_tick_fallback(spy: Symbol, trade_tick_spy: Tick) {
        let security = security_with(spy.clone(), vec![MarketData::Tick(trade_tick_spy)]);
        let prices = get_prices(
            &security,
            &bar_configs(&spy),
            OrderDirection::Buy,
            PriceMode::Standard,
        );
        assert_eq!(prices.current, dec!(102.15));
        assert_eq!(prices.low, dec!(102.15));
    }

    #[rstest]
    fn test_empty_cache_returns_zeros(spy: Symbol) {
        let security = Security::new(spy.clone(), ExchangeHours::equity_usa());
        let prices = get_prices(
            &security,
            &bar_configs(&spy),
            OrderDirection::Buy,
            PriceMode::Standard,
        );
        assert_eq!(prices, Prices::zero());
    }

    #[rstest]
    fn test_latest_price_mode_prefers_strictly_newer_quote(
        spy: Symbol,
        trade_bar_spy: TradeBar,
        quote_bar_spy: QuoteBar,
    ) {
        let mut newer_quote = quote_bar_spy;
        newer_quote.start += TimeDelta::minutes(3);
        let security = security_with(
            spy,
            vec![
                MarketData::TradeBar(trade_bar_spy.clone()),
                MarketData::QuoteBar(newer_quote.clone()),
            ],
        );

        let buy = get_prices(&security, &[], OrderDirection::Buy, PriceMode::LatestPrice);
        assert_eq!(buy.close, newer_quote.ask.unwrap().close);

        // Equal end times favor the trade side
        let mut tied_quote = newer_quote;
        tied_quote.start = trade_bar_spy.start;
        let security = security_with(
            tied_quote.symbol.clone(),
            vec![
                MarketData::TradeBar(trade_bar_spy.clone()),
                MarketData::QuoteBar(tied_quote),
            ],
        );
        let buy = get_prices(&security, &[], OrderDirection::Buy, PriceMode::LatestPrice);
        assert_eq!(buy.close, trade_bar_spy.close);
    }

    #[rstest]
    fn test_trade_prices_ignore_quotes(spy: Symbol, quote_bar_spy: QuoteBar, quote_tick_spy: Tick) {
        let quote_only = security_with(
            spy,
            vec![
                MarketData::QuoteBar(quote_bar_spy),
                MarketData::Tick(quote_tick_spy),
            ],
        );
        assert!(get_trade_prices(&quote_only).is_none());
    }

    #[rstest]
    fn test_trade_prices_prefer_newer_tick(spy: Symbol, trade_bar_spy: TradeBar) {
        let late_tick = Tick::trade(
            spy.clone(),
            trade_bar_spy.end_time() + TimeDelta::seconds(30),
            dec!(104),
        );
        let security = security_with(
            spy,
            vec![
                MarketData::TradeBar(trade_bar_spy),
                MarketData::Tick(late_tick),
            ],
        );
        let prices = get_trade_prices(&security).unwrap();
        assert_eq!(prices.current, dec!(104));
        assert_eq!(prices.high, dec!(104));
    }
}
