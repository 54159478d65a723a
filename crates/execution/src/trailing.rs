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

//! Trailing stop price updates applied before evaluation.
//!
//! The candidate stop is a pure function of the observed market price, so
//! replaying the same price sequence yields the same stop sequence.

use marlin_model::{
    enums::OrderDirection,
    orders::{TrailingStopLimitOrder, TrailingStopOrder},
};
use rust_decimal::Decimal;

/// Computes the stop price implied by `market_price` at the trailing
/// distance.
///
/// A buy stop sits above the market, a sell stop below.
#[must_use]
pub fn trailing_candidate(
    direction: OrderDirection,
    market_price: Decimal,
    trailing_amount: Decimal,
    trailing_as_percentage: bool,
) -> Decimal {
    match direction {
        OrderDirection::Buy => {
            if trailing_as_percentage {
                market_price * (Decimal::ONE + trailing_amount)
            } else {
                market_price + trailing_amount
            }
        }
        _ => {
            if trailing_as_percentage {
                market_price * (Decimal::ONE - trailing_amount)
            } else {
                market_price - trailing_amount
            }
        }
    }
}

/// Updates a trailing stop order against the current market price, returning
/// the new stop when it moved.
///
/// The stop only ever improves: down for buys, up for sells.
pub fn update_trailing_stop(order: &mut TrailingStopOrder, market_price: Decimal) -> Option<Decimal> {
    let candidate = trailing_candidate(
        order.core.direction(),
        market_price,
        order.trailing_amount,
        order.trailing_as_percentage,
    );
    order.try_update_stop(candidate).then_some(order.stop_price)
}

/// Updates a trailing stop limit order against the current market price,
/// returning the new `(stop, limit)` when the stop moved.
///
/// No update is attempted once the stop has triggered; the limit follows the
/// stop at the configured offset.
pub fn update_trailing_stop_limit(
    order: &mut TrailingStopLimitOrder,
    market_price: Decimal,
) -> Option<(Decimal, Decimal)> {
    if order.stop_triggered {
        return None;
    }
    let candidate = trailing_candidate(
        order.core.direction(),
        market_price,
        order.trailing_amount,
        order.trailing_as_percentage,
    );
    order.try_update_stop(candidate)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use marlin_model::orders::stubs::{order_core, trailing_stop_sell};
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    #[rstest]
    // Sell stop trails the market down by the absolute amount
    #[case(OrderDirection::Sell, dec!(100), dec!(5), false, dec!(95))]
    // Buy stop sits above the market
    #[case(OrderDirection::Buy, dec!(100), dec!(5), false, dec!(105))]
    // Percentage trailing scales with the market price
    #[case(OrderDirection::Sell, dec!(200), dec!(0.05), true, dec!(190))]
    #[case(OrderDirection::Buy, dec!(200), dec!(0.05), true, dec!(210))]
    fn test_trailing_candidate(
        #[case] direction: OrderDirection,
        #[case] market_price: Decimal,
        #[case] amount: Decimal,
        #[case] as_percentage: bool,
        #[case] expected: Decimal,
    ) {
        assert_eq!(
            trailing_candidate(direction, market_price, amount, as_percentage),
            expected,
        );
    }

    #[rstest]
    fn test_sell_stop_sequence_is_monotonic() {
        // Price sequence from a trailing sell with a 5 point distance
        let mut order = trailing_stop_sell(dec!(95), dec!(5));
        let observed = [dec!(100), dec!(102.5), dec!(101), dec!(99), dec!(110)];
        let expected = [dec!(95), dec!(97.5), dec!(97.5), dec!(97.5), dec!(105)];

        for (price, want) in observed.iter().zip(expected) {
            update_trailing_stop(&mut order, *price);
            assert_eq!(order.stop_price, want);
        }
    }

    #[rstest]
    fn test_stop_limit_freezes_after_trigger() {
        let mut order = marlin_model::orders::TrailingStopLimitOrder::new(
            order_core(6, dec!(-100)),
            dec!(95),
            dec!(94.5),
            dec!(5),
            false,
            dec!(0.5),
        );
        assert_eq!(
            update_trailing_stop_limit(&mut order, dec!(102.5)),
            Some((dec!(97.5), dec!(97))),
        );
        order.set_stop_triggered(chrono::DateTime::UNIX_EPOCH);
        assert_eq!(update_trailing_stop_limit(&mut order, dec!(110)), None);
    }
}
