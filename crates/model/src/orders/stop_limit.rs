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

use crate::orders::base::OrderCore;

/// An order which becomes a limit order once the stop price trades through.
///
/// The stop trigger is a one-way latch observed on trade data; the limit
/// condition is evaluated on trade data from the trigger onwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StopLimitOrder {
    /// The shared order header.
    #[serde(flatten)]
    pub core: OrderCore,
    /// The price at which the stop activates.
    #[serde(alias = "StopPrice")]
    pub stop_price: Decimal,
    /// The worst acceptable fill price once triggered.
    #[serde(alias = "LimitPrice")]
    pub limit_price: Decimal,
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

impl StopLimitOrder {
    /// Creates a new [`StopLimitOrder`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `stop_price` or `limit_price` is not positive.
    pub fn new_checked(
        core: OrderCore,
        stop_price: Decimal,
        limit_price: Decimal,
    ) -> anyhow::Result<Self> {
        check_positive_decimal(stop_price, stringify!(stop_price))?;
        check_positive_decimal(limit_price, stringify!(limit_price))?;
        Ok(Self {
            core,
            stop_price,
            limit_price,
            stop_triggered: false,
            triggered_time_utc: None,
        })
    }

    /// Creates a new [`StopLimitOrder`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `stop_price` or `limit_price` is not positive.
    #[must_use]
    pub fn new(core: OrderCore, stop_price: Decimal, limit_price: Decimal) -> Self {
        Self::new_checked(core, stop_price, limit_price).expect(FAILED)
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

impl Deref for StopLimitOrder {
    type Target = OrderCore;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

impl DerefMut for StopLimitOrder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.core
    }
}
