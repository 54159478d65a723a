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

use chrono::{DateTime, Utc};
use marlin_core::correctness::{FAILED, check_positive_decimal};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{enums::OrderDirection, orders::base::OrderCore};

/// A stop limit order whose stop and limit prices trail the market.
///
/// While the stop is untriggered, every stop improvement repositions the
/// limit at the fixed offset from the new stop. Once triggered, both prices
/// freeze and the order works as a plain stop limit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrailingStopLimitOrder {
    /// The shared order header.
    #[serde(flatten)]
    pub core: OrderCore,
    /// The current stop price; updated as the market moves favorably.
    #[serde(alias = "StopPrice")]
    pub stop_price: Decimal,
    /// The current limit price; repositioned with the stop.
    #[serde(alias = "LimitPrice")]
    pub limit_price: Decimal,
    /// The trailing distance, absolute or proportional.
    #[serde(alias = "TrailingAmount")]
    pub trailing_amount: Decimal,
    /// Whether `trailing_amount` is a proportion of the market price.
    #[serde(alias = "TrailingAsPercentage", default)]
    pub trailing_as_percentage: bool,
    /// The distance between the stop and the repositioned limit.
    #[serde(alias = "LimitOffset")]
    pub limit_offset: Decimal,
    /// Whether the stop has triggered; latches true.
    #[serde(alias = "StopTriggered", default)]
    pub stop_triggered: bool,
    /// The end time of the data slice that triggered the stop.
    #[serde(
        alias = "TriggeredTimeUtc",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub triggered_time_utc: Option<DateTime<Utc>>,
}

impl TrailingStopLimitOrder {
    /// Creates a new [`TrailingStopLimitOrder`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `stop_price`, `limit_price`, or `trailing_amount`
    /// is not positive, or `limit_offset` is negative.
    pub fn new_checked(
        core: OrderCore,
        stop_price: Decimal,
        limit_price: Decimal,
        trailing_amount: Decimal,
        trailing_as_percentage: bool,
        limit_offset: Decimal,
    ) -> anyhow::Result<Self> {
        check_positive_decimal(stop_price, stringify!(stop_price))?;
        check_positive_decimal(limit_price, stringify!(limit_price))?;
        check_positive_decimal(trailing_amount, stringify!(trailing_amount))?;
        marlin_core::correctness::check_non_negative_decimal(
            limit_offset,
            stringify!(limit_offset),
        )?;
        Ok(Self {
            core,
            stop_price,
            limit_price,
            trailing_amount,
            trailing_as_percentage,
            limit_offset,
            stop_triggered: false,
            triggered_time_utc: None,
        })
    }

    /// Creates a new [`TrailingStopLimitOrder`] instance.
    ///
    /// # Panics
    ///
    /// Panics if any price parameter is invalid.
    #[must_use]
    pub fn new(
        core: OrderCore,
        stop_price: Decimal,
        limit_price: Decimal,
        trailing_amount: Decimal,
        trailing_as_percentage: bool,
        limit_offset: Decimal,
    ) -> Self {
        Self::new_checked(
            core,
            stop_price,
            limit_price,
            trailing_amount,
            trailing_as_percentage,
            limit_offset,
        )
        .expect(FAILED)
    }

    /// Moves the stop to `candidate` when it strictly improves for the order
    /// direction, repositioning the limit at the configured offset from the
    /// new stop. Returns the new stop and limit when the stop moved.
    ///
    /// Has no effect once the stop has triggered.
    pub fn try_update_stop(&mut self, candidate: Decimal) -> Option<(Decimal, Decimal)> {
        if self.stop_triggered {
            return None;
        }
        let improved = match self.core.direction() {
            OrderDirection::Buy => candidate < self.stop_price,
            _ => candidate > self.stop_price,
        };
        if !improved {
            return None;
        }
        self.stop_price = candidate;
        self.limit_price = match self.core.direction() {
            OrderDirection::Buy => candidate + self.limit_offset,
            _ => candidate - self.limit_offset,
        };
        Some((self.stop_price, self.limit_price))
    }

    /// Latches the stop trigger, recording the end time of the slice that
    /// tripped it; the flag never resets.
    pub fn set_stop_triggered(&mut self, at: DateTime<Utc>) {
        if !self.stop_triggered {
            self.stop_triggered = true;
            self.triggered_time_utc = Some(at);
        }
    }
}

impl Deref for TrailingStopLimitOrder {
    type Target = OrderCore;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

impl DerefMut for TrailingStopLimitOrder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.core
    }
}
