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

//! The order event describing one evaluation outcome.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    enums::{OrderDirection, OrderStatus},
    identifiers::{OrderId, Symbol},
    orders::OrderAny,
};

/// Describes the outcome of one order evaluation or lifecycle transition.
///
/// Events are append-only; each carries a unique `(order_id, id)` pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEvent {
    /// The unique identifier of this event.
    #[serde(alias = "Id")]
    pub id: Uuid,
    /// The identifier of the order the event belongs to.
    #[serde(alias = "OrderId")]
    pub order_id: OrderId,
    /// The symbol of the order.
    #[serde(alias = "Symbol")]
    pub symbol: Symbol,
    /// The UTC time the event occurred.
    #[serde(alias = "UtcTime", alias = "Time")]
    pub utc_time: DateTime<Utc>,
    /// The status the evaluation produced; `None` when nothing changed.
    #[serde(alias = "Status")]
    pub status: OrderStatus,
    /// The direction of the order.
    #[serde(alias = "Direction")]
    pub direction: OrderDirection,
    /// The fill price; zero when nothing filled.
    #[serde(alias = "FillPrice")]
    pub fill_price: Decimal,
    /// The currency of the fill price.
    #[serde(alias = "FillPriceCurrency", default)]
    pub fill_price_currency: String,
    /// The signed filled quantity; zero when nothing filled.
    #[serde(
        alias = "FillQuantity",
        with = "marlin_core::serialization::decimal_lenient"
    )]
    pub fill_quantity: Decimal,
    /// The total signed order quantity.
    #[serde(alias = "Quantity", with = "marlin_core::serialization::decimal_lenient")]
    pub quantity: Decimal,
    /// The fee charged for the fill.
    #[serde(alias = "OrderFee", default)]
    pub order_fee: Decimal,
    /// A human readable diagnostic, when the evaluation produced one.
    #[serde(alias = "Message", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Whether the event records an option assignment.
    #[serde(alias = "IsAssignment", default)]
    pub is_assignment: bool,
    /// The working limit price at event time, if the variant carries one.
    #[serde(alias = "LimitPrice", default, skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<Decimal>,
    /// The working stop price at event time, if the variant carries one.
    #[serde(alias = "StopPrice", default, skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
    /// The touch trigger price, if the variant carries one.
    #[serde(
        alias = "TriggerPrice",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub trigger_price: Option<Decimal>,
}

impl OrderEvent {
    /// Creates a new event for `order` with the given status and no fill.
    #[must_use]
    pub fn new(order: &OrderAny, utc_time: DateTime<Utc>, status: OrderStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id: order.id(),
            symbol: order.symbol().clone(),
            utc_time,
            status,
            direction: order.direction(),
            fill_price: Decimal::ZERO,
            fill_price_currency: "USD".to_string(),
            fill_quantity: Decimal::ZERO,
            quantity: order.quantity(),
            order_fee: Decimal::ZERO,
            message: None,
            is_assignment: false,
            limit_price: order.limit_price(),
            stop_price: order.stop_price(),
            trigger_price: order.trigger_price(),
        }
    }

    /// Creates a no-change event for `order`.
    #[must_use]
    pub fn none(order: &OrderAny, utc_time: DateTime<Utc>) -> Self {
        Self::new(order, utc_time, OrderStatus::None)
    }

    /// Creates a filled event for the full order quantity at `fill_price`.
    #[must_use]
    pub fn filled(order: &OrderAny, utc_time: DateTime<Utc>, fill_price: Decimal) -> Self {
        let mut event = Self::new(order, utc_time, OrderStatus::Filled);
        event.fill_price = fill_price;
        event.fill_quantity = order.quantity();
        event
    }

    /// Creates an invalid event carrying a diagnostic message.
    #[must_use]
    pub fn invalid(order: &OrderAny, utc_time: DateTime<Utc>, message: impl Into<String>) -> Self {
        let mut event = Self::new(order, utc_time, OrderStatus::Invalid);
        event.message = Some(message.into());
        event
    }

    /// Attaches a diagnostic message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches an order fee.
    #[must_use]
    pub const fn with_fee(mut self, order_fee: Decimal) -> Self {
        self.order_fee = order_fee;
        self
    }

    /// Marks the event as an option assignment.
    #[must_use]
    pub const fn as_assignment(mut self) -> Self {
        self.is_assignment = true;
        self
    }
}

impl Display for OrderEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "OrderEvent(order_id={}, symbol={}, status={}, fill_quantity={}, fill_price={})",
            self.order_id, self.symbol, self.status, self.fill_quantity, self.fill_price,
        )
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::orders::{LimitOrder, stubs::order_core};

    fn limit_buy() -> OrderAny {
        OrderAny::Limit(LimitOrder::new(order_core(2, dec!(100)), dec!(101.5)))
    }

    #[rstest]
    fn test_none_event_has_zero_fill() {
        let order = limit_buy();
        let event = OrderEvent::none(&order, order.created_time_utc());
        assert_eq!(event.status, OrderStatus::None);
        assert_eq!(event.fill_quantity, Decimal::ZERO);
        assert_eq!(event.fill_price, Decimal::ZERO);
        assert_eq!(event.limit_price, Some(dec!(101.5)));
    }

    #[rstest]
    fn test_filled_event_preserves_quantity_sign() {
        let order = OrderAny::Limit(LimitOrder::new(order_core(2, dec!(-100)), dec!(101.5)));
        let event = OrderEvent::filled(&order, order.created_time_utc(), dec!(101.5));
        assert_eq!(event.fill_quantity, dec!(-100));
        assert_eq!(event.direction, OrderDirection::Sell);
    }

    #[rstest]
    fn test_event_serde_round_trip() {
        let order = limit_buy();
        let event = OrderEvent::filled(&order, order.created_time_utc(), dec!(101.5))
            .with_message("filled at limit");
        let json = serde_json::to_string(&event).unwrap();
        let parsed: OrderEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[rstest]
    fn test_event_deserialize_pascal_case() {
        let json = r#"{
            "Id": "2d89666b-1a1e-4a75-b193-4eb3b454c757",
            "OrderId": 7,
            "Symbol": {"value":"SPY","securityType":"EQUITY","market":"usa"},
            "Time": "2024-06-03T14:31:00Z",
            "Status": "FILLED",
            "Direction": "BUY",
            "FillPrice": 101.5,
            "FillQuantity": "100",
            "Quantity": 100
        }"#;
        let event: OrderEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.order_id, OrderId(7));
        assert_eq!(event.status, OrderStatus::Filled);
        assert_eq!(event.fill_quantity, dec!(100));
        assert_eq!(event.is_assignment, false);
    }
}
