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

//! Combo order legs, filled or canceled together as a group.
//!
//! Each leg is an order in its own right; the shared lifecycle and the group
//! level fill terms live on the [`GroupOrderManager`](crate::orders::group::GroupOrderManager)
//! the legs reference by ID.

use std::ops::{Deref, DerefMut};

use marlin_core::correctness::{FAILED, check_positive_decimal, check_predicate_true};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::orders::base::OrderCore;

/// A combo leg which fills at its prevailing market price when the whole
/// group fills.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComboMarketOrder {
    /// The shared order header.
    #[serde(flatten)]
    pub core: OrderCore,
}

impl ComboMarketOrder {
    /// Creates a new [`ComboMarketOrder`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if the header carries no group reference.
    pub fn new_checked(core: OrderCore) -> anyhow::Result<Self> {
        check_predicate_true(
            core.group_id.is_some(),
            &format!("combo leg {} missing a group reference", core.symbol),
        )?;
        Ok(Self { core })
    }

    /// Creates a new [`ComboMarketOrder`] instance.
    ///
    /// # Panics
    ///
    /// Panics if the header carries no group reference.
    #[must_use]
    pub fn new(core: OrderCore) -> Self {
        Self::new_checked(core).expect(FAILED)
    }
}

impl Deref for ComboMarketOrder {
    type Target = OrderCore;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

impl DerefMut for ComboMarketOrder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.core
    }
}

/// A combo leg whose group fills when the weighted combination of leg prices
/// crosses the group limit price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComboLimitOrder {
    /// The shared order header.
    #[serde(flatten)]
    pub core: OrderCore,
}

impl ComboLimitOrder {
    /// Creates a new [`ComboLimitOrder`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if the header carries no group reference.
    pub fn new_checked(core: OrderCore) -> anyhow::Result<Self> {
        check_predicate_true(
            core.group_id.is_some(),
            &format!("combo leg {} missing a group reference", core.symbol),
        )?;
        Ok(Self { core })
    }

    /// Creates a new [`ComboLimitOrder`] instance.
    ///
    /// # Panics
    ///
    /// Panics if the header carries no group reference.
    #[must_use]
    pub fn new(core: OrderCore) -> Self {
        Self::new_checked(core).expect(FAILED)
    }
}

impl Deref for ComboLimitOrder {
    type Target = OrderCore;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

impl DerefMut for ComboLimitOrder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.core
    }
}

/// A combo leg carrying its own limit; every leg must independently satisfy
/// its limit in the same data slice for the group to fill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComboLegLimitOrder {
    /// The shared order header.
    #[serde(flatten)]
    pub core: OrderCore,
    /// The worst acceptable fill price for this leg.
    #[serde(alias = "LimitPrice")]
    pub limit_price: Decimal,
}

impl ComboLegLimitOrder {
    /// Creates a new [`ComboLegLimitOrder`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if the header carries no group reference or
    /// `limit_price` is not positive.
    pub fn new_checked(core: OrderCore, limit_price: Decimal) -> anyhow::Result<Self> {
        check_positive_decimal(limit_price, stringify!(limit_price))?;
        check_predicate_true(
            core.group_id.is_some(),
            &format!("combo leg {} missing a group reference", core.symbol),
        )?;
        Ok(Self { core, limit_price })
    }

    /// Creates a new [`ComboLegLimitOrder`] instance.
    ///
    /// # Panics
    ///
    /// Panics if the header carries no group reference or `limit_price` is
    /// not positive.
    #[must_use]
    pub fn new(core: OrderCore, limit_price: Decimal) -> Self {
        Self::new_checked(core, limit_price).expect(FAILED)
    }
}

impl Deref for ComboLegLimitOrder {
    type Target = OrderCore;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

impl DerefMut for ComboLegLimitOrder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.core
    }
}
