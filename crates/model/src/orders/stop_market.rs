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

use crate::orders::base::OrderCore;

/// An order which becomes a market order once the stop price trades through.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StopMarketOrder {
    /// The shared order header.
    #[serde(flatten)]
    pub core: OrderCore,
    /// The price at which the stop activates.
    #[serde(alias = "StopPrice")]
    pub stop_price: Decimal,
}

impl StopMarketOrder {
    /// Creates a new [`StopMarketOrder`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `stop_price` is not positive.
    pub fn new_checked(core: OrderCore, stop_price: Decimal) -> anyhow::Result<Self> {
        check_positive_decimal(stop_price, stringify!(stop_price))?;
        Ok(Self { core, stop_price })
    }

    /// Creates a new [`StopMarketOrder`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `stop_price` is not positive.
    #[must_use]
    pub fn new(core: OrderCore, stop_price: Decimal) -> Self {
        Self::new_checked(core, stop_price).expect(FAILED)
    }
}

impl Deref for StopMarketOrder {
    type Target = OrderCore;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

impl DerefMut for StopMarketOrder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.core
    }
}
