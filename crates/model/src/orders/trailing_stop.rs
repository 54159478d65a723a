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

use std::ops::{Deref, DerefMut};

use marlin_core::correctness::{FAILED, check_positive_decimal};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{enums::OrderDirection, orders::base::OrderCore};

/// A stop market order whose stop price trails the market by a fixed amount
/// or percentage.
///
/// The stop is monotonic against the market move: a buy-side stop never
/// rises, a sell-side stop never falls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrailingStopOrder {
    /// The shared order header.
    #[serde(flatten)]
    pub core: OrderCore,
    /// The current stop price; updated as the market moves favorably.
    #[serde(alias = "StopPrice")]
    pub stop_price: Decimal,
    /// The trailing distance, absolute or proportional.
    #[serde(alias = "TrailingAmount")]
    pub trailing_amount: Decimal,
    /// Whether `trailing_amount` is a proportion of the market price.
    #[serde(alias = "TrailingAsPercentage", default)]
    pub trailing_as_percentage: bool,
    /// Whether the stop has triggered; latches true.
    #[serde(alias = "StopTriggered", default)]
    pub stop_triggered: bool,
}

impl TrailingStopOrder {
    /// Creates a new [`TrailingStopOrder`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `stop_price` or `trailing_amount` is not positive.
    pub fn new_checked(
        core: OrderCore,
        stop_price: Decimal,
        trailing_amount: Decimal,
        trailing_as_percentage: bool,
    ) -> anyhow::Result<Self> {
        check_positive_decimal(stop_price, stringify!(stop_price))?;
        check_positive_decimal(trailing_amount, stringify!(trailing_amount))?;
        Ok(Self {
            core,
            stop_price,
            trailing_amount,
            trailing_as_percentage,
            stop_triggered: false,
        })
    }

    /// Creates a new [`TrailingStopOrder`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `stop_price` or `trailing_amount` is not positive.
    #[must_use]
    pub fn new(
        core: OrderCore,
        stop_price: Decimal,
        trailing_amount: Decimal,
        trailing_as_percentage: bool,
    ) -> Self {
        Self::new_checked(core, stop_price, trailing_amount, trailing_as_percentage).expect(FAILED)
    }

    /// Moves the stop to `candidate` when it strictly improves for the order
    /// direction, returning whether the stop moved.
    ///
    /// A buy-side stop only ever moves down; a sell-side stop only ever moves
    /// up, keeping the stop sequence monotonic.
    pub fn try_update_stop(&mut self, candidate: Decimal) -> bool {
        let improved = match self.core.direction() {
            OrderDirection::Buy => candidate < self.stop_price,
            _ => candidate > self.stop_price,
        };
        if improved {
            self.stop_price = candidate;
        }
        improved
    }

    /// Latches the stop trigger; the flag never resets.
    pub const fn set_stop_triggered(&mut self) {
        self.stop_triggered = true;
    }
}

impl Deref for TrailingStopOrder {
    type Target = OrderCore;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

impl DerefMut for TrailingStopOrder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.core
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{data::stubs::spy, identifiers::{OrderId, Symbol}};

    #[rstest]
    fn test_sell_stop_only_moves_up(spy: Symbol) {
        let core = OrderCore::new(OrderId(1), spy, dec!(-100), DateTime::UNIX_EPOCH);
        let mut order = TrailingStopOrder::new(core, dec!(95), dec!(5), false);

        assert!(order.try_update_stop(dec!(97.5)));
        assert_eq!(order.stop_price, dec!(97.5));

        // A worse candidate leaves the stop untouched
        assert!(!order.try_update_stop(dec!(96)));
        assert_eq!(order.stop_price, dec!(97.5));
    }

    #[rstest]
    fn test_buy_stop_only_moves_down(spy: Symbol) {
        let core = OrderCore::new(OrderId(1), spy, dec!(100), DateTime::UNIX_EPOCH);
        let mut order = TrailingStopOrder::new(core, dec!(105), dec!(5), false);

        assert!(order.try_update_stop(dec!(103)));
        assert!(!order.try_update_stop(dec!(104)));
        assert_eq!(order.stop_price, dec!(103));
    }
}
