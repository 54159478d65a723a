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

/// An order to trade at the limit price or better, priced from trade data only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LimitOrder {
    /// The shared order header.
    #[serde(flatten)]
    pub core: OrderCore,
    /// The worst acceptable fill price.
    #[serde(alias = "LimitPrice")]
    pub limit_price: Decimal,
}

impl LimitOrder {
    /// Creates a new [`LimitOrder`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `limit_price` is not positive.
    pub fn new_checked(core: OrderCore, limit_price: Decimal) -> anyhow::Result<Self> {
        check_positive_decimal(limit_price, stringify!(limit_price))?;
        Ok(Self { core, limit_price })
    }

    /// Creates a new [`LimitOrder`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `limit_price` is not positive.
    #[must_use]
    pub fn new(core: OrderCore, limit_price: Decimal) -> Self {
        Self::new_checked(core, limit_price).expect(FAILED)
    }
}

impl Deref for LimitOrder {
    type Target = OrderCore;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

impl DerefMut for LimitOrder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.core
    }
}
