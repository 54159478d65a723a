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

/// An order which becomes a quote-book limit order once the trigger price
/// touches on trades.
///
/// The touch event is observed on trade data; the working limit is evaluated
/// against quotes only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LimitIfTouchedOrder {
    /// The shared order header.
    #[serde(flatten)]
    pub core: OrderCore,
    /// The trade price at which the order activates.
    #[serde(alias = "TriggerPrice")]
    pub trigger_price: Decimal,
    /// The worst acceptable fill price once touched.
    #[serde(alias = "LimitPrice")]
    pub limit_price: Decimal,
    /// Whether the trigger has touched; latches true.
    #[serde(alias = "TriggerTouched", default)]
    pub trigger_touched: bool,
    /// The end time of the trade slice that touched the trigger.
    #[serde(
        alias = "TouchedTimeUtc",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub touched_time_utc: Option<DateTime<Utc>>,
}

impl LimitIfTouchedOrder {
    /// Creates a new [`LimitIfTouchedOrder`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `trigger_price` or `limit_price` is not positive.
    pub fn new_checked(
        core: OrderCore,
        trigger_price: Decimal,
        limit_price: Decimal,
    ) -> anyhow::Result<Self> {
        check_positive_decimal(trigger_price, stringify!(trigger_price))?;
        check_positive_decimal(limit_price, stringify!(limit_price))?;
        Ok(Self {
            core,
            trigger_price,
            limit_price,
            trigger_touched: false,
            touched_time_utc: None,
        })
    }

    /// Creates a new [`LimitIfTouchedOrder`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `trigger_price` or `limit_price` is not positive.
    #[must_use]
    pub fn new(core: OrderCore, trigger_price: Decimal, limit_price: Decimal) -> Self {
        Self::new_checked(core, trigger_price, limit_price).expect(FAILED)
    }

    /// Latches the touch trigger, recording the end time of the slice that
    /// touched it; the flag never resets.
    pub fn set_trigger_touched(&mut self, at: DateTime<Utc>) {
        if !self.trigger_touched {
            self.trigger_touched = true;
            self.touched_time_utc = Some(at);
        }
    }
}

impl Deref for LimitIfTouchedOrder {
    type Target = OrderCore;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

impl DerefMut for LimitIfTouchedOrder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.core
    }
}
