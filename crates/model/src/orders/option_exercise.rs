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

/// An instruction to exercise an option contract at its strike.
///
/// Not data driven; invoked directly by the strategy. A negative quantity
/// records an assignment rather than a voluntary exercise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionExerciseOrder {
    /// The shared order header.
    #[serde(flatten)]
    pub core: OrderCore,
    /// The strike price of the exercised contract.
    #[serde(alias = "StrikePrice")]
    pub strike_price: Decimal,
}

impl OptionExerciseOrder {
    /// Creates a new [`OptionExerciseOrder`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol is not an option or `strike_price` is
    /// not positive.
    pub fn new_checked(core: OrderCore, strike_price: Decimal) -> anyhow::Result<Self> {
        check_positive_decimal(strike_price, stringify!(strike_price))?;
        marlin_core::correctness::check_predicate_true(
            core.symbol.security_type.is_option(),
            &format!("option exercise on non-option symbol {}", core.symbol),
        )?;
        Ok(Self { core, strike_price })
    }

    /// Creates a new [`OptionExerciseOrder`] instance.
    ///
    /// # Panics
    ///
    /// Panics if the symbol is not an option or `strike_price` is not positive.
    #[must_use]
    pub fn new(core: OrderCore, strike_price: Decimal) -> Self {
        Self::new_checked(core, strike_price).expect(FAILED)
    }

    /// Returns whether the exercise records an assignment.
    #[must_use]
    pub fn is_assignment(&self) -> bool {
        self.core.quantity.is_sign_negative()
    }
}

impl Deref for OptionExerciseOrder {
    type Target = OrderCore;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

impl DerefMut for OptionExerciseOrder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.core
    }
}
