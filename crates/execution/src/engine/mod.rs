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

//! The fill dispatcher and the per-variant fill evaluators.
//!
//! One evaluator per order variant, selected by matching on the order tag.
//! Worst-case price discipline applies throughout: a filled order never does
//! better than its bar open allows and never better than its limit; stops
//! honor unfavorable gaps by filling at the open.


use chrono::TimeDelta;
use marlin_model::{
    enums::{OrderDirection, OrderStatus, OrderType},
    events::OrderEvent,
    orders::{
        GroupOrderManager, LimitIfTouchedOrder, LimitOrder, MarketOnOpenOrder, MarketOrder,
        OrderAny, StopLimitOrder, StopMarketOrder, TrailingStopOrder, TrailingStopLimitOrder,
    },
    securities::{Security, SubscriptionDataConfig, SubscriptionProvider},
};
use rust_decimal::Decimal;

use crate::{
    config::FillEngineConfig,
    error::FillError,
    freshness::security_data_is_fresh,
    prices::{get_prices, get_trade_prices},
    trailing::{update_trailing_stop, update_trailing_stop_limit},
};

/// The outcome of one fill evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct FillResult {
    /// The order event describing the transition, if any.
    pub event: OrderEvent,
}

/// One leg of a combo group presented for evaluation.
#[derive(Debug)]
pub struct ComboLeg<'a> {
    /// The security the leg trades.
    pub security: &'a Security,
    /// The leg order.
    pub order: &'a mut OrderAny,
}

/// The outcome a variant evaluator reports back to the dispatcher.
enum Eval {
    NoFill,
    Fill { price: Decimal },
    Invalid { message: String },
}

/// The fill model engine for simulated order execution.
///
/// The dispatcher is called serially per security by the surrounding engine;
/// evaluators contain no suspension points.
#[derive(Clone, Debug, Default)]
pub struct FillEngine {
    /// The engine configuration.
    pub config: FillEngineConfig,
}

impl FillEngine {
    /// Creates a new [`FillEngine`] instance.
    #[must_use]
    pub const fn new(config: FillEngineConfig) -> Self {
        Self { config }
    }

    /// Evaluates `order` against the security's cached data, returning the
    /// order event describing the transition and updating any trailing state
    /// on the order in place.
    ///
    /// Orders already in a terminal status are skipped with a `None` event.
    /// Stale or pre-submission data never fills; when it would have filled,
    /// the `None` event carries a stale price diagnostic.
    ///
    /// # Errors
    ///
    /// Returns an error if the order cannot be priced by any subscription,
    /// the order type is unsupported for the asset class, or a combo leg is
    /// presented individually.
    pub fn fill(
        &self,
        security: &Security,
        order: &mut OrderAny,
        provider: &dyn SubscriptionProvider,
        stale_threshold: TimeDelta,
    ) -> Result<FillResult, FillError> {
        let now = security.utc_time();

        // Canceled (or otherwise closed) orders are skipped; the cancel wins
        if order.is_closed() {
            return Ok(FillResult {
                event: OrderEvent::none(order, now),
            });
        }

        match order.order_type() {
            OrderType::OptionExercise => return self.exercise_option(security, order),
            OrderType::ComboMarket | OrderType::ComboLimit | OrderType::ComboLegLimit => {
                return Err(FillError::InvalidOrder {
                    order_id: order.id(),
                    symbol: order.symbol().clone(),
                    reason: "combo legs are evaluated through fill_combo".to_string(),
                });
            }
            _ => {}
        }

        let configs = provider.configs_for(order.symbol());
        if configs.is_empty() {
            return Err(FillError::MissingSubscription {
                symbol: order.symbol().clone(),
                order_type: order.order_type(),
            });
        }

        // Market-on-open submission is rejected inside the blackout window
        if order.order_type() == OrderType::MarketOnOpen
            && self.in_moo_blackout(security, order)
        {
            let message = format!(
                "MarketOnOpen order for {} submitted inside the {}-{} blackout window",
                order.symbol(),
                self.config.moo_blackout_start,
                self.config.moo_blackout_end,
            );
            if order.status() == OrderStatus::New {
                order
                    .transition_status(OrderStatus::Invalid)
                    .map_err(|e| FillError::InvalidOrder {
                        order_id: order.id(),
                        symbol: order.symbol().clone(),
                        reason: e.to_string(),
                    })?;
            }
            return Ok(FillResult {
                event: OrderEvent::invalid(order, now, message),
            });
        }

        // Simulated broker acknowledgement
        if order.status() == OrderStatus::New {
            order
                .transition_status(OrderStatus::Submitted)
                .map_err(|e| FillError::InvalidOrder {
                    order_id: order.id(),
                    symbol: order.symbol().clone(),
                    reason: e.to_string(),
                })?;
        }

        let submit_floor = match order.order_type() {
            // The gate relaxes to the scheduled session open the order targets
            OrderType::MarketOnOpen => security
                .exchange_hours
                .next_market_open(order.created_time_utc()),
            _ => order.created_time_utc(),
        };

        if !security_data_is_fresh(security, submit_floor, stale_threshold) {
            // Probe a clone so latches and trailing state never mutate on
            // stale data
            let mut probe = order.clone();
            let would_fill = matches!(
                self.evaluate(security, &mut probe, &configs),
                Eval::Fill { .. }
            );
            let mut event = OrderEvent::none(order, now);
            if would_fill {
                let message = format!(
                    "Warning: fill at stale price occurred for {} ({})",
                    order.symbol(),
                    order.order_type(),
                );
                log::warn!("{message}");
                event = event.with_message(message);
            }
            return Ok(FillResult { event });
        }

        // Trailing state updates exactly once per non-stale evaluation
        self.update_trailing_state(security, order, &configs);

        let outcome = self.evaluate(security, order, &configs);
        let event = match outcome {
            Eval::NoFill => OrderEvent::none(order, now),
            Eval::Invalid { message } => {
                log::debug!("{message}");
                OrderEvent::invalid(order, now, message)
            }
            Eval::Fill { price } => {
                // Re-check under the per-order view before committing: a
                // cancel observed before the commit wins
                if order.is_closed() {
                    return Ok(FillResult {
                        event: OrderEvent::none(order, now),
                    });
                }
                order
                    .transition_status(OrderStatus::Filled)
                    .map_err(|e| FillError::InvalidOrder {
                        order_id: order.id(),
                        symbol: order.symbol().clone(),
                        reason: e.to_string(),
                    })?;
                log::debug!(
                    "Filled {} order {} for {} at {}",
                    order.order_type(),
                    order.id(),
                    order.symbol(),
                    price,
                );
                OrderEvent::filled(order, now, price)
            }
        };

        Ok(FillResult { event })
    }

    /// Evaluates the legs of a combo group atomically: either every leg
    /// fills in the same data slice, or none does.
    ///
    /// # Errors
    ///
    /// Returns an error if a leg does not reference `group`, legs are of
    /// mixed combo variants, or a combo limit group lacks its limit price.
    pub fn fill_combo(
        &self,
        group: &GroupOrderManager,
        legs: &mut [ComboLeg<'_>],
        provider: &dyn SubscriptionProvider,
        stale_threshold: TimeDelta,
    ) -> Result<Vec<FillResult>, FillError> {
        for leg in legs.iter() {
            if leg.order.group_id() != Some(group.group_id) {
                return Err(FillError::InvalidOrder {
                    order_id: leg.order.id(),
                    symbol: leg.order.symbol().clone(),
                    reason: format!("order does not reference combo group {}", group.group_id),
                });
            }
        }

        let none_events = |legs: &mut [ComboLeg<'_>]| {
            legs.iter()
                .map(|leg| FillResult {
                    event: OrderEvent::none(&*leg.order, leg.security.utc_time()),
                })
                .collect::<Vec<_>>()
        };

        // Wait until the group has gathered every leg
        if !group.is_complete() || legs.len() != group.leg_count {
            return Ok(none_events(legs));
        }

        // Legs share lifecycle: one closed leg suspends the whole group
        if legs.iter().any(|leg| leg.order.is_closed()) {
            return Ok(none_events(legs));
        }

        // Every leg must be priced from fresh data in the same slice
        let all_fresh = legs.iter().all(|leg| {
            security_data_is_fresh(
                leg.security,
                leg.order.created_time_utc(),
                stale_threshold,
            )
        });
        if !all_fresh {
            return Ok(none_events(legs));
        }

        let fill_prices = match self.combo_fill_prices(group, legs, provider)? {
            Some(prices) => prices,
            None => return Ok(none_events(legs)),
        };

        // Commit: all legs transition together
        let group_time = legs
            .iter()
            .map(|leg| leg.security.utc_time())
            .max()
            .unwrap_or(chrono::DateTime::UNIX_EPOCH);
        let mut results = Vec::with_capacity(legs.len());
        for (leg, price) in legs.iter_mut().zip(fill_prices) {
            if leg.order.status() == OrderStatus::New {
                leg.order
                    .transition_status(OrderStatus::Submitted)
                    .map_err(|e| FillError::InvalidOrder {
                        order_id: leg.order.id(),
                        symbol: leg.order.symbol().clone(),
                        reason: e.to_string(),
                    })?;
            }
            leg.order
                .transition_status(OrderStatus::Filled)
                .map_err(|e| FillError::InvalidOrder {
                    order_id: leg.order.id(),
                    symbol: leg.order.symbol().clone(),
                    reason: e.to_string(),
                })?;
            results.push(FillResult {
                event: OrderEvent::filled(leg.order, group_time, price),
            });
        }
        Ok(results)
    }

    /// Computes the per-leg fill prices when the group fills in the current
    /// slice, or `None` when it does not.
    fn combo_fill_prices(
        &self,
        group: &GroupOrderManager,
        legs: &[ComboLeg<'_>],
        provider: &dyn SubscriptionProvider,
    ) -> Result<Option<Vec<Decimal>>, FillError> {
        // The caller has verified the group is complete, so legs is non-empty
        let first_type = legs[0].order.order_type();

        if legs.iter().any(|leg| leg.order.order_type() != first_type) {
            let leg = &legs[0];
            return Err(FillError::InvalidOrder {
                order_id: leg.order.id(),
                symbol: leg.order.symbol().clone(),
                reason: "combo group mixes leg variants".to_string(),
            });
        }

        match first_type {
            OrderType::ComboMarket => Ok(self.combo_market_prices(legs, provider)),
            OrderType::ComboLimit => {
                let group_limit =
                    group
                        .group_limit_price
                        .ok_or_else(|| FillError::InvalidOrder {
                            order_id: legs[0].order.id(),
                            symbol: legs[0].order.symbol().clone(),
                            reason: "combo limit group missing its limit price".to_string(),
                        })?;
                Ok(self.combo_limit_prices(group, group_limit, legs, provider))
            }
            OrderType::ComboLegLimit => Ok(Self::combo_leg_limit_prices(legs)),
            other => Err(FillError::InvalidOrder {
                order_id: legs[0].order.id(),
                symbol: legs[0].order.symbol().clone(),
                reason: format!("{other} is not a combo variant"),
            }),
        }
    }

    /// All legs fill at their prevailing market prices simultaneously.
    fn combo_market_prices(
        &self,
        legs: &[ComboLeg<'_>],
        provider: &dyn SubscriptionProvider,
    ) -> Option<Vec<Decimal>> {
        legs.iter()
            .map(|leg| {
                let configs = provider.configs_for(leg.order.symbol());
                let current = get_prices(
                    leg.security,
                    &configs,
                    leg.order.direction(),
                    self.config.price_mode,
                )
                .current;
                (!current.is_zero()).then_some(current)
            })
            .collect()
    }

    /// The group fills when the ratio weighted combination of leg prices
    /// crosses the group limit.
    fn combo_limit_prices(
        &self,
        group: &GroupOrderManager,
        group_limit: Decimal,
        legs: &[ComboLeg<'_>],
        provider: &dyn SubscriptionProvider,
    ) -> Option<Vec<Decimal>> {
        let mut aggregate = Decimal::ZERO;
        let mut leg_prices = Vec::with_capacity(legs.len());
        for leg in legs {
            let configs = provider.configs_for(leg.order.symbol());
            let prices = get_prices(
                leg.security,
                &configs,
                leg.order.direction(),
                self.config.price_mode,
            );
            if prices.current.is_zero() {
                return None;
            }
            let ratio = leg.order.quantity() / group.total_quantity;
            aggregate += ratio * prices.current;
            leg_prices.push(prices.current);
        }

        let crossed = match group.direction {
            OrderDirection::Buy => aggregate <= group_limit,
            _ => aggregate >= group_limit,
        };
        crossed.then_some(leg_prices)
    }

    /// Every leg must independently satisfy its own limit in the same slice.
    fn combo_leg_limit_prices(legs: &[ComboLeg<'_>]) -> Option<Vec<Decimal>> {
        legs.iter()
            .map(|leg| {
                let limit = leg.order.limit_price()?;
                let prices = get_trade_prices(leg.security)?;
                match leg.order.direction() {
                    OrderDirection::Buy if prices.low <= limit => {
                        Some(prices.open.min(limit))
                    }
                    OrderDirection::Sell if prices.high >= limit => {
                        Some(prices.open.max(limit))
                    }
                    _ => None,
                }
            })
            .collect()
    }

    // -- VARIANT EVALUATORS ----------------------------------------------------------------------

    /// Dispatches to the evaluator for the order variant.
    fn evaluate(
        &self,
        security: &Security,
        order: &mut OrderAny,
        configs: &[SubscriptionDataConfig],
    ) -> Eval {
        match order {
            OrderAny::Market(order) => self.market_fill(security, configs, order),
            OrderAny::Limit(order) => Self::limit_fill(security, order),
            OrderAny::StopMarket(order) => Self::stop_market_fill(security, order),
            OrderAny::StopLimit(order) => Self::stop_limit_fill(security, order),
            OrderAny::LimitIfTouched(order) => Self::limit_if_touched_fill(security, order),
            OrderAny::TrailingStop(order) => Self::trailing_stop_fill(security, order),
            OrderAny::TrailingStopLimit(order) => Self::trailing_stop_limit_fill(security, order),
            OrderAny::MarketOnOpen(order) => Self::market_on_open_fill(security, order),
            OrderAny::MarketOnClose(_) => Self::market_on_close_fill(security),
            OrderAny::OptionExercise(_)
            | OrderAny::ComboMarket(_)
            | OrderAny::ComboLimit(_)
            | OrderAny::ComboLegLimit(_) => Eval::NoFill,
        }
    }

    /// Applies the pre-evaluation trailing update for trailing variants.
    fn update_trailing_state(
        &self,
        security: &Security,
        order: &mut OrderAny,
        configs: &[SubscriptionDataConfig],
    ) {
        let market_price = get_prices(
            security,
            configs,
            OrderDirection::Hold,
            self.config.price_mode,
        )
        .current;
        if market_price.is_zero() {
            return;
        }

        match order {
            OrderAny::TrailingStop(order) => {
                if let Some(new_stop) = update_trailing_stop(order, market_price) {
                    log::debug!(
                        "Trailing stop for order {} moved to {new_stop}",
                        order.core.id,
                    );
                }
            }
            OrderAny::TrailingStopLimit(order) => {
                if let Some((new_stop, new_limit)) =
                    update_trailing_stop_limit(order, market_price)
                {
                    log::debug!(
                        "Trailing stop limit for order {} moved to stop {new_stop}, limit {new_limit}",
                        order.core.id,
                    );
                }
            }
            _ => {}
        }
    }

    /// Fills at the snapshot's current price for the direction: the ask for
    /// buys, the bid for sells, the last trade when no quote is available.
    fn market_fill(
        &self,
        security: &Security,
        configs: &[SubscriptionDataConfig],
        order: &MarketOrder,
    ) -> Eval {
        let prices = get_prices(
            security,
            configs,
            order.core.direction(),
            self.config.price_mode,
        );
        if prices.current.is_zero() {
            return Eval::Invalid {
                message: format!(
                    "CannotGetPrice: no quote or trade price available to fill market order for {}",
                    order.core.symbol,
                ),
            };
        }
        Eval::Fill {
            price: prices.current,
        }
    }

    /// Buys fill when the low trades through the limit, paying the limit
    /// unless the bar gapped favorably below it; symmetric for sells.
    fn limit_fill(security: &Security, order: &LimitOrder) -> Eval {
        let Some(prices) = get_trade_prices(security) else {
            return Eval::NoFill;
        };
        let limit = order.limit_price;
        match order.core.direction() {
            OrderDirection::Buy if prices.low <= limit => Eval::Fill {
                price: prices.open.min(limit),
            },
            OrderDirection::Sell if prices.high >= limit => Eval::Fill {
                price: prices.open.max(limit),
            },
            _ => Eval::NoFill,
        }
    }

    /// Buys trigger when the high trades through the stop, filling at the
    /// stop unless the bar gapped unfavorably above it; symmetric for sells.
    fn stop_market_fill(security: &Security, order: &StopMarketOrder) -> Eval {
        let Some(prices) = get_trade_prices(security) else {
            return Eval::NoFill;
        };
        Self::stop_rule(&prices, order.core.direction(), order.stop_price)
    }

    fn stop_rule(prices: &crate::prices::Prices, direction: OrderDirection, stop: Decimal) -> Eval {
        match direction {
            OrderDirection::Buy if prices.high >= stop => Eval::Fill {
                price: prices.open.max(stop),
            },
            OrderDirection::Sell if prices.low <= stop => Eval::Fill {
                price: prices.open.min(stop),
            },
            _ => Eval::NoFill,
        }
    }

    /// Two-phase stop limit: the trigger latches on one trade slice, the
    /// limit rule applies to strictly newer trade slices.
    fn stop_limit_fill(security: &Security, order: &mut StopLimitOrder) -> Eval {
        let Some(prices) = get_trade_prices(security) else {
            return Eval::NoFill;
        };

        if !order.stop_triggered {
            let triggered = match order.core.direction() {
                OrderDirection::Buy => prices.high >= order.stop_price,
                _ => prices.low <= order.stop_price,
            };
            if triggered {
                order.set_stop_triggered(prices.end_time);
                log::debug!("Stop triggered for order {}", order.core.id);
            }
            return Eval::NoFill;
        }

        // The triggering slice has been consumed
        if order
            .triggered_time_utc
            .is_some_and(|triggered_at| prices.end_time <= triggered_at)
        {
            return Eval::NoFill;
        }

        let limit = order.limit_price;
        match order.core.direction() {
            OrderDirection::Buy if prices.low <= limit => Eval::Fill {
                price: prices.open.min(limit),
            },
            OrderDirection::Sell if prices.high >= limit => Eval::Fill {
                price: prices.open.max(limit),
            },
            _ => Eval::NoFill,
        }
    }

    /// The touch is observed on trades; the working limit fills against the
    /// quote book only, on quotes observed after the touch.
    fn limit_if_touched_fill(security: &Security, order: &mut LimitIfTouchedOrder) -> Eval {
        if !order.trigger_touched {
            if let Some(prices) = get_trade_prices(security) {
                let touched = match order.core.direction() {
                    OrderDirection::Buy => prices.low <= order.trigger_price,
                    _ => prices.high >= order.trigger_price,
                };
                if touched {
                    order.set_trigger_touched(prices.end_time);
                    log::debug!("Trigger touched for order {}", order.core.id);
                }
            }
            return Eval::NoFill;
        }

        let Some((quote, quote_time)) = Self::freshest_quote(security, order.core.direction())
        else {
            return Eval::NoFill;
        };
        if order
            .touched_time_utc
            .is_some_and(|touched_at| quote_time < touched_at)
        {
            return Eval::NoFill;
        }
        let marketable = match order.core.direction() {
            OrderDirection::Buy => quote <= order.limit_price,
            _ => quote >= order.limit_price,
        };
        if marketable {
            Eval::Fill {
                price: order.limit_price,
            }
        } else {
            Eval::NoFill
        }
    }

    /// Returns the freshest quote price for the direction along with the
    /// time it was observed.
    fn freshest_quote(
        security: &Security,
        direction: OrderDirection,
    ) -> Option<(Decimal, chrono::DateTime<chrono::Utc>)> {
        let cache = security.cache();
        let from_tick = cache
            .quote_tick()
            .filter(|tick| tick.has_bid_ask())
            .and_then(|tick| {
                let side = match direction {
                    OrderDirection::Buy => tick.ask_price,
                    _ => tick.bid_price,
                };
                side.map(|price| (price, tick.time))
            });
        let from_bar = cache.quote_bar().and_then(|bar| {
            let side = match direction {
                OrderDirection::Buy => bar.ask_close(),
                _ => bar.bid_close(),
            };
            side.map(|price| (price, bar.end_time()))
        });
        match (from_tick, from_bar) {
            (Some(tick), Some(bar)) if bar.1 > tick.1 => Some(bar),
            (Some(tick), _) => Some(tick),
            (None, bar) => bar,
        }
    }

    /// Applies the stop market rule against the (already trailed) stop.
    fn trailing_stop_fill(security: &Security, order: &mut TrailingStopOrder) -> Eval {
        let Some(prices) = get_trade_prices(security) else {
            return Eval::NoFill;
        };
        let outcome = Self::stop_rule(&prices, order.core.direction(), order.stop_price);
        if matches!(outcome, Eval::Fill { .. }) {
            order.set_stop_triggered();
        }
        outcome
    }

    /// Applies the stop limit rule against the (already trailed) prices.
    fn trailing_stop_limit_fill(security: &Security, order: &mut TrailingStopLimitOrder) -> Eval {
        let Some(prices) = get_trade_prices(security) else {
            return Eval::NoFill;
        };

        if !order.stop_triggered {
            let triggered = match order.core.direction() {
                OrderDirection::Buy => prices.high >= order.stop_price,
                _ => prices.low <= order.stop_price,
            };
            if triggered {
                order.set_stop_triggered(prices.end_time);
                log::debug!("Stop triggered for order {}", order.core.id);
            }
            return Eval::NoFill;
        }

        // The triggering slice has been consumed
        if order
            .triggered_time_utc
            .is_some_and(|triggered_at| prices.end_time <= triggered_at)
        {
            return Eval::NoFill;
        }

        let limit = order.limit_price;
        match order.core.direction() {
            OrderDirection::Buy if prices.low <= limit => Eval::Fill {
                price: prices.open.min(limit),
            },
            OrderDirection::Sell if prices.high >= limit => Eval::Fill {
                price: prices.open.max(limit),
            },
            _ => Eval::NoFill,
        }
    }

    /// Fills on the first trade bar opening at or after the scheduled
    /// regular session open following submission, at that bar's open.
    fn market_on_open_fill(security: &Security, order: &MarketOnOpenOrder) -> Eval {
        let Some(bar) = security.cache().trade_bar() else {
            return Eval::NoFill;
        };
        let session_open = security
            .exchange_hours
            .next_market_open(order.core.created_time_utc);
        if bar.start >= session_open {
            Eval::Fill { price: bar.open }
        } else {
            Eval::NoFill
        }
    }

    /// Fills on the first trade bar covering the official close, at that
    /// bar's close.
    fn market_on_close_fill(security: &Security) -> Eval {
        let Some(bar) = security.cache().trade_bar() else {
            return Eval::NoFill;
        };
        let local_date = security.exchange_hours.to_local(bar.start).date_naive();
        let Some(close_utc) = security.exchange_hours.market_close_on(local_date) else {
            return Eval::NoFill;
        };
        if bar.start < close_utc && bar.end_time() >= close_utc {
            Eval::Fill { price: bar.close }
        } else {
            Eval::NoFill
        }
    }

    /// Option exercise is not data driven: fills at the strike immediately,
    /// preserving the quantity sign; negative quantity records an assignment.
    fn exercise_option(
        &self,
        security: &Security,
        order: &mut OrderAny,
    ) -> Result<FillResult, FillError> {
        let now = security.utc_time();

        if !order.symbol().security_type.is_option() {
            return Err(FillError::UnsupportedOrderType {
                symbol: order.symbol().clone(),
                order_type: OrderType::OptionExercise,
                security_type: order.symbol().security_type,
            });
        }

        let OrderAny::OptionExercise(exercise) = &*order else {
            return Err(FillError::InvalidOrder {
                order_id: order.id(),
                symbol: order.symbol().clone(),
                reason: "exercise_option called with a non-exercise order".to_string(),
            });
        };
        let strike = exercise.strike_price;
        let is_assignment = exercise.is_assignment();

        if order.status() == OrderStatus::New {
            order
                .transition_status(OrderStatus::Submitted)
                .map_err(|e| FillError::InvalidOrder {
                    order_id: order.id(),
                    symbol: order.symbol().clone(),
                    reason: e.to_string(),
                })?;
        }
        order
            .transition_status(OrderStatus::Filled)
            .map_err(|e| FillError::InvalidOrder {
                order_id: order.id(),
                symbol: order.symbol().clone(),
                reason: e.to_string(),
            })?;

        let mut event = OrderEvent::filled(order, now, strike);
        if is_assignment {
            event = event.as_assignment();
        }
        Ok(FillResult { event })
    }

    /// Returns whether the market-on-open order was submitted inside the
    /// configured blackout window, exchange-local.
    fn in_moo_blackout(&self, security: &Security, order: &OrderAny) -> bool {
        if security.exchange_hours.is_always_open {
            return false;
        }
        let local = security
            .exchange_hours
            .to_local(order.created_time_utc())
            .time();
        local >= self.config.moo_blackout_start && local < self.config.moo_blackout_end
    }
}
