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

//! The closed tagged union over all order variants.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    enums::{OrderDirection, OrderStatus, OrderType},
    identifiers::{GroupOrderId, OrderId, Symbol},
    orders::{
        ComboLegLimitOrder, ComboLimitOrder, ComboMarketOrder, LimitIfTouchedOrder, LimitOrder,
        MarketOnCloseOrder, MarketOnOpenOrder, MarketOrder, OptionExerciseOrder, OrderCore,
        OrderError, StopLimitOrder, StopMarketOrder, TrailingStopOrder, TrailingStopLimitOrder,
    },
};

/// The closed tagged union over all order variants.
///
/// The fill engine matches on this tag directly; no virtual dispatch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OrderAny {
    /// A market order.
    #[serde(rename = "MARKET", alias = "Market")]
    Market(MarketOrder),
    /// A limit order.
    #[serde(rename = "LIMIT", alias = "Limit")]
    Limit(LimitOrder),
    /// A stop market order.
    #[serde(rename = "STOP_MARKET", alias = "StopMarket")]
    StopMarket(StopMarketOrder),
    /// A stop limit order.
    #[serde(rename = "STOP_LIMIT", alias = "StopLimit")]
    StopLimit(StopLimitOrder),
    /// A limit if touched order.
    #[serde(rename = "LIMIT_IF_TOUCHED", alias = "LimitIfTouched")]
    LimitIfTouched(LimitIfTouchedOrder),
    /// A trailing stop order.
    #[serde(rename = "TRAILING_STOP", alias = "TrailingStop")]
    TrailingStop(TrailingStopOrder),
    /// A trailing stop limit order.
    #[serde(rename = "TRAILING_STOP_LIMIT", alias = "TrailingStopLimit")]
    TrailingStopLimit(TrailingStopLimitOrder),
    /// A market on open order.
    #[serde(rename = "MARKET_ON_OPEN", alias = "MarketOnOpen")]
    MarketOnOpen(MarketOnOpenOrder),
    /// A market on close order.
    #[serde(rename = "MARKET_ON_CLOSE", alias = "MarketOnClose")]
    MarketOnClose(MarketOnCloseOrder),
    /// An option exercise instruction.
    #[serde(rename = "OPTION_EXERCISE", alias = "OptionExercise")]
    OptionExercise(OptionExerciseOrder),
    /// A combo market leg.
    #[serde(rename = "COMBO_MARKET", alias = "ComboMarket")]
    ComboMarket(ComboMarketOrder),
    /// A combo limit leg.
    #[serde(rename = "COMBO_LIMIT", alias = "ComboLimit")]
    ComboLimit(ComboLimitOrder),
    /// A combo leg limit leg.
    #[serde(rename = "COMBO_LEG_LIMIT", alias = "ComboLegLimit")]
    ComboLegLimit(ComboLegLimitOrder),
}

impl OrderAny {
    /// Returns the order type tag.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        match self {
            Self::Market(_) => OrderType::Market,
            Self::Limit(_) => OrderType::Limit,
            Self::StopMarket(_) => OrderType::StopMarket,
            Self::StopLimit(_) => OrderType::StopLimit,
            Self::LimitIfTouched(_) => OrderType::LimitIfTouched,
            Self::TrailingStop(_) => OrderType::TrailingStop,
            Self::TrailingStopLimit(_) => OrderType::TrailingStopLimit,
            Self::MarketOnOpen(_) => OrderType::MarketOnOpen,
            Self::MarketOnClose(_) => OrderType::MarketOnClose,
            Self::OptionExercise(_) => OrderType::OptionExercise,
            Self::ComboMarket(_) => OrderType::ComboMarket,
            Self::ComboLimit(_) => OrderType::ComboLimit,
            Self::ComboLegLimit(_) => OrderType::ComboLegLimit,
        }
    }

    /// Returns the shared order header.
    #[must_use]
    pub const fn core(&self) -> &OrderCore {
        match self {
            Self::Market(order) => &order.core,
            Self::Limit(order) => &order.core,
            Self::StopMarket(order) => &order.core,
            Self::StopLimit(order) => &order.core,
            Self::LimitIfTouched(order) => &order.core,
            Self::TrailingStop(order) => &order.core,
            Self::TrailingStopLimit(order) => &order.core,
            Self::MarketOnOpen(order) => &order.core,
            Self::MarketOnClose(order) => &order.core,
            Self::OptionExercise(order) => &order.core,
            Self::ComboMarket(order) => &order.core,
            Self::ComboLimit(order) => &order.core,
            Self::ComboLegLimit(order) => &order.core,
        }
    }

    /// Returns the shared order header mutably.
    #[must_use]
    pub const fn core_mut(&mut self) -> &mut OrderCore {
        match self {
            Self::Market(order) => &mut order.core,
            Self::Limit(order) => &mut order.core,
            Self::StopMarket(order) => &mut order.core,
            Self::StopLimit(order) => &mut order.core,
            Self::LimitIfTouched(order) => &mut order.core,
            Self::TrailingStop(order) => &mut order.core,
            Self::TrailingStopLimit(order) => &mut order.core,
            Self::MarketOnOpen(order) => &mut order.core,
            Self::MarketOnClose(order) => &mut order.core,
            Self::OptionExercise(order) => &mut order.core,
            Self::ComboMarket(order) => &mut order.core,
            Self::ComboLimit(order) => &mut order.core,
            Self::ComboLegLimit(order) => &mut order.core,
        }
    }

    /// Returns the order identifier.
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.core().id
    }

    /// Returns the symbol the order is attached to.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.core().symbol
    }

    /// Returns the signed order quantity.
    #[must_use]
    pub const fn quantity(&self) -> Decimal {
        self.core().quantity
    }

    /// Returns the UTC time the order was created.
    #[must_use]
    pub const fn created_time_utc(&self) -> DateTime<Utc> {
        self.core().created_time_utc
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.core().status
    }

    /// Returns the direction implied by the quantity sign.
    #[must_use]
    pub fn direction(&self) -> OrderDirection {
        self.core().direction()
    }

    /// Returns whether the order has reached a terminal status.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.core().is_closed()
    }

    /// Returns the combo group reference, if any.
    #[must_use]
    pub const fn group_id(&self) -> Option<GroupOrderId> {
        self.core().group_id
    }

    /// Returns the working limit price, for variants that carry one.
    #[must_use]
    pub const fn limit_price(&self) -> Option<Decimal> {
        match self {
            Self::Limit(order) => Some(order.limit_price),
            Self::StopLimit(order) => Some(order.limit_price),
            Self::LimitIfTouched(order) => Some(order.limit_price),
            Self::TrailingStopLimit(order) => Some(order.limit_price),
            Self::ComboLegLimit(order) => Some(order.limit_price),
            _ => None,
        }
    }

    /// Returns the working stop price, for variants that carry one.
    #[must_use]
    pub const fn stop_price(&self) -> Option<Decimal> {
        match self {
            Self::StopMarket(order) => Some(order.stop_price),
            Self::StopLimit(order) => Some(order.stop_price),
            Self::TrailingStop(order) => Some(order.stop_price),
            Self::TrailingStopLimit(order) => Some(order.stop_price),
            _ => None,
        }
    }

    /// Returns the touch trigger price, for limit if touched orders.
    #[must_use]
    pub const fn trigger_price(&self) -> Option<Decimal> {
        match self {
            Self::LimitIfTouched(order) => Some(order.trigger_price),
            _ => None,
        }
    }

    /// Applies a lifecycle status transition on the shared header.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not in the status DAG.
    pub fn transition_status(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        self.core_mut().transition_status(next)
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
    use crate::orders::stubs::{order_core, trailing_stop_sell};

    #[rstest]
    #[case::market(OrderAny::Market(MarketOrder::new(order_core(1, dec!(100)))))]
    #[case::limit(OrderAny::Limit(LimitOrder::new(order_core(2, dec!(100)), dec!(101.5))))]
    #[case::stop_limit(OrderAny::StopLimit(StopLimitOrder::new(
        order_core(3, dec!(100)),
        dec!(101.5),
        dec!(101.75),
    )))]
    #[case::lit(OrderAny::LimitIfTouched(LimitIfTouchedOrder::new(
        order_core(4, dec!(100)),
        dec!(290.55),
        dec!(290.50),
    )))]
    #[case::trailing(OrderAny::TrailingStop(trailing_stop_sell(dec!(95), dec!(5))))]
    #[case::moo(OrderAny::MarketOnOpen(MarketOnOpenOrder::new(order_core(6, dec!(100)))))]
    fn test_order_serde_round_trip(#[case] order: OrderAny) {
        let json = serde_json::to_string(&order).unwrap();
        let parsed: OrderAny = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, order);
    }

    #[rstest]
    fn test_order_any_accessors() {
        let order = OrderAny::StopLimit(StopLimitOrder::new(
            order_core(3, dec!(-100)),
            dec!(290.5),
            dec!(290.25),
        ));
        assert_eq!(order.order_type(), OrderType::StopLimit);
        assert_eq!(order.direction(), OrderDirection::Sell);
        assert_eq!(order.stop_price(), Some(dec!(290.5)));
        assert_eq!(order.limit_price(), Some(dec!(290.25)));
        assert_eq!(order.trigger_price(), None);
    }

    #[rstest]
    fn test_order_deserialize_pascal_case_tag_and_fields() {
        let json = r#"{
            "type": "StopLimit",
            "Id": 9,
            "Symbol": {"Value":"SPY","SecurityType":"EQUITY","Market":"usa"},
            "Quantity": 100,
            "Time": "2024-06-03T14:30:00Z",
            "StopPrice": 101.5,
            "LimitPrice": "101.75"
        }"#;
        let order: OrderAny = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_type(), OrderType::StopLimit);
        assert_eq!(order.quantity(), dec!(100));
        assert_eq!(order.stop_price(), Some(dec!(101.5)));
        assert_eq!(order.limit_price(), Some(dec!(101.75)));
    }
}
