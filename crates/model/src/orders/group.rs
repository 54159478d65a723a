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

//! Tracks the legs and fill terms of a combo order group.

use marlin_core::correctness::{FAILED, check_nonzero_decimal, check_predicate_true};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    enums::OrderDirection,
    identifiers::{GroupOrderId, OrderId},
};

/// Tracks the legs of a combo order and the group level fill terms.
///
/// Legs reference the group by [`GroupOrderId`]; the manager itself lives in
/// an arena owned by the engine, so no strong cycles form between orders and
/// groups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupOrderManager {
    /// The group identifier legs reference.
    #[serde(alias = "GroupId")]
    pub group_id: GroupOrderId,
    /// The signed strategy-level quantity multiplying each leg ratio.
    #[serde(alias = "TotalQuantity", with = "marlin_core::serialization::decimal_lenient")]
    pub total_quantity: Decimal,
    /// The number of legs the group must gather before evaluation.
    #[serde(alias = "LegCount")]
    pub leg_count: usize,
    /// The limit on the weighted combination price, for combo limit groups.
    #[serde(
        alias = "GroupLimitPrice",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub group_limit_price: Option<Decimal>,
    /// The order IDs of the gathered legs.
    #[serde(alias = "OrderIds", default)]
    pub order_ids: Vec<OrderId>,
    /// The direction of the group as a whole.
    #[serde(alias = "Direction")]
    pub direction: OrderDirection,
}

impl GroupOrderManager {
    /// Creates a new [`GroupOrderManager`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `total_quantity` is zero or `leg_count` is zero.
    pub fn new_checked(
        group_id: GroupOrderId,
        total_quantity: Decimal,
        leg_count: usize,
    ) -> anyhow::Result<Self> {
        check_nonzero_decimal(total_quantity, stringify!(total_quantity))?;
        check_predicate_true(leg_count > 0, "combo group had no legs")?;
        Ok(Self {
            group_id,
            total_quantity,
            leg_count,
            group_limit_price: None,
            order_ids: Vec::new(),
            direction: OrderDirection::from_quantity(total_quantity),
        })
    }

    /// Creates a new [`GroupOrderManager`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `total_quantity` is zero or `leg_count` is zero.
    #[must_use]
    pub fn new(group_id: GroupOrderId, total_quantity: Decimal, leg_count: usize) -> Self {
        Self::new_checked(group_id, total_quantity, leg_count).expect(FAILED)
    }

    /// Sets the group level limit price.
    #[must_use]
    pub const fn with_limit_price(mut self, group_limit_price: Decimal) -> Self {
        self.group_limit_price = Some(group_limit_price);
        self
    }

    /// Registers a leg order with the group.
    pub fn add_order(&mut self, order_id: OrderId) {
        if !self.order_ids.contains(&order_id) {
            self.order_ids.push(order_id);
        }
    }

    /// Returns whether every leg has been gathered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.order_ids.len() == self.leg_count
    }
}
