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

//! The shared order header embedded by every order variant.

use chrono::{DateTime, Utc};
use marlin_core::correctness::{FAILED, check_nonzero_decimal};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    enums::{OrderDirection, OrderStatus, PriceAdjustmentMode, TimeInForce},
    identifiers::{GroupOrderId, OrderId, Symbol},
    orders::OrderError,
};

/// The shared header record carried by every order variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCore {
    /// The order identifier assigned by the order store.
    #[serde(alias = "Id")]
    pub id: OrderId,
    /// The symbol the order is attached to.
    #[serde(alias = "Symbol")]
    pub symbol: Symbol,
    /// The signed order quantity; positive buys, negative sells.
    #[serde(alias = "Quantity", with = "marlin_core::serialization::decimal_lenient")]
    pub quantity: Decimal,
    /// The UTC time the order was created.
    #[serde(alias = "CreatedTimeUtc", alias = "Time")]
    pub created_time_utc: DateTime<Utc>,
    /// The lifecycle status of the order.
    #[serde(alias = "Status", default = "OrderCore::default_status")]
    pub status: OrderStatus,
    /// A free-form tag set by the strategy.
    #[serde(alias = "Tag", default)]
    pub tag: String,
    /// How long the order remains working.
    #[serde(
        alias = "TimeInForce",
        alias = "Duration",
        default = "OrderCore::default_time_in_force"
    )]
    pub time_in_force: TimeInForce,
    /// The expiry instant for good-til-date orders.
    #[serde(
        alias = "ExpireTimeUtc",
        alias = "DurationValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expire_time_utc: Option<DateTime<Utc>>,
    /// Identifiers assigned by the broker, in acknowledgement order.
    #[serde(alias = "BrokerIds", alias = "BrokerId", default)]
    pub broker_ids: Vec<String>,
    /// How historical prices feeding the order were adjusted.
    #[serde(
        alias = "PriceAdjustmentMode",
        default = "OrderCore::default_price_adjustment_mode"
    )]
    pub price_adjustment_mode: PriceAdjustmentMode,
    /// The combo group this order belongs to, if any.
    #[serde(
        alias = "GroupOrderManager",
        alias = "GroupId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub group_id: Option<GroupOrderId>,
}

impl OrderCore {
    /// Creates a new [`OrderCore`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `quantity` is zero.
    pub fn new_checked(
        id: OrderId,
        symbol: Symbol,
        quantity: Decimal,
        created_time_utc: DateTime<Utc>,
    ) -> anyhow::Result<Self> {
        check_nonzero_decimal(quantity, stringify!(quantity))?;
        Ok(Self {
            id,
            symbol,
            quantity,
            created_time_utc,
            status: OrderStatus::New,
            tag: String::new(),
            time_in_force: TimeInForce::GoodTilCanceled,
            expire_time_utc: None,
            broker_ids: Vec::new(),
            price_adjustment_mode: PriceAdjustmentMode::Adjusted,
            group_id: None,
        })
    }

    /// Creates a new [`OrderCore`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `quantity` is zero.
    #[must_use]
    pub fn new(
        id: OrderId,
        symbol: Symbol,
        quantity: Decimal,
        created_time_utc: DateTime<Utc>,
    ) -> Self {
        Self::new_checked(id, symbol, quantity, created_time_utc).expect(FAILED)
    }

    const fn default_status() -> OrderStatus {
        OrderStatus::New
    }

    const fn default_time_in_force() -> TimeInForce {
        TimeInForce::GoodTilCanceled
    }

    const fn default_price_adjustment_mode() -> PriceAdjustmentMode {
        PriceAdjustmentMode::Adjusted
    }

    /// Returns the direction implied by the order quantity sign.
    #[must_use]
    pub fn direction(&self) -> OrderDirection {
        OrderDirection::from_quantity(self.quantity)
    }

    /// Returns whether the order buys.
    #[must_use]
    pub fn is_buy(&self) -> bool {
        self.direction() == OrderDirection::Buy
    }

    /// Returns whether the order has reached a terminal status.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.status.is_closed()
    }

    /// Applies a lifecycle status transition, enforcing the status DAG.
    ///
    /// `PartiallyFilled` may re-enter itself; any non-terminal status may
    /// transition to `Canceled`; `Invalid` is reachable from `New` only.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not in the DAG.
    pub fn transition_status(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        use OrderStatus::{Canceled, Filled, Invalid, New, None, PartiallyFilled, Submitted};

        let allowed = match (self.status, next) {
            (None, New | Submitted | Canceled) => true,
            (New, Submitted | Canceled | Invalid) => true,
            (Submitted, PartiallyFilled | Filled | Canceled) => true,
            (PartiallyFilled, PartiallyFilled | Filled | Canceled) => true,
            _ => false,
        };

        if !allowed {
            return Err(OrderError::InvalidStateTransition {
                from: self.status,
                to: next,
            });
        }

        self.status = next;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::data::stubs::spy;

    fn core(spy: Symbol) -> OrderCore {
        OrderCore::new(OrderId(1), spy, dec!(100), DateTime::UNIX_EPOCH)
    }

    #[rstest]
    fn test_zero_quantity_rejected(spy: Symbol) {
        let result = OrderCore::new_checked(OrderId(1), spy, dec!(0), DateTime::UNIX_EPOCH);
        assert!(result.is_err());
    }

    #[rstest]
    fn test_direction_from_sign(spy: Symbol) {
        let mut order = core(spy);
        assert_eq!(order.direction(), OrderDirection::Buy);
        order.quantity = dec!(-100);
        assert_eq!(order.direction(), OrderDirection::Sell);
    }

    #[rstest]
    fn test_status_happy_path(spy: Symbol) {
        let mut order = core(spy);
        order.transition_status(OrderStatus::Submitted).unwrap();
        order
            .transition_status(OrderStatus::PartiallyFilled)
            .unwrap();
        order
            .transition_status(OrderStatus::PartiallyFilled)
            .unwrap();
        order.transition_status(OrderStatus::Filled).unwrap();
        assert!(order.is_closed());
    }

    #[rstest]
    fn test_terminal_status_is_final(spy: Symbol) {
        let mut order = core(spy);
        order.transition_status(OrderStatus::Submitted).unwrap();
        order.transition_status(OrderStatus::Filled).unwrap();
        let result = order.transition_status(OrderStatus::Canceled);
        assert_eq!(
            result,
            Err(OrderError::InvalidStateTransition {
                from: OrderStatus::Filled,
                to: OrderStatus::Canceled,
            })
        );
    }

    #[rstest]
    fn test_invalid_only_from_new(spy: Symbol) {
        let mut order = core(spy);
        order.transition_status(OrderStatus::Submitted).unwrap();
        assert!(order.transition_status(OrderStatus::Invalid).is_err());
    }

    #[rstest]
    fn test_cancel_from_any_non_terminal(spy: Symbol) {
        let mut order = core(spy);
        order.transition_status(OrderStatus::Submitted).unwrap();
        order
            .transition_status(OrderStatus::PartiallyFilled)
            .unwrap();
        order.transition_status(OrderStatus::Canceled).unwrap();
        assert!(order.is_closed());
    }

    #[rstest]
    fn test_legacy_duration_fields_deserialize(spy: Symbol) {
        let json = format!(
            r#"{{
                "Id": 7,
                "Symbol": {},
                "Quantity": "250",
                "Time": "2024-06-03T14:30:00Z",
                "Duration": 2,
                "DurationValue": "2024-06-28T20:00:00Z"
            }}"#,
            serde_json::to_string(&spy).unwrap()
        );
        let order: OrderCore = serde_json::from_str(&json).unwrap();
        assert_eq!(order.time_in_force, TimeInForce::GoodTilDate);
        assert_eq!(
            order.expire_time_utc.unwrap().to_rfc3339(),
            "2024-06-28T20:00:00+00:00"
        );
        assert_eq!(order.quantity, dec!(250));
        assert_eq!(order.status, OrderStatus::New);
    }
}
