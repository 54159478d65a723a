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

//! Enumerations for the trading domain model.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{AsRefStr, Display, EnumIter, EnumString, FromRepr};

use crate::enum_strum_serde;

/// The class of a tradable security.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityType {
    /// A common stock or ETF share.
    Equity = 1,
    /// A currency pair traded on the foreign exchange market.
    Forex = 2,
    /// A cryptocurrency spot pair.
    Crypto = 3,
    /// A perpetual or dated cryptocurrency future.
    CryptoFuture = 4,
    /// A contract for difference.
    Cfd = 5,
    /// An exchange-listed futures contract.
    Future = 6,
    /// An option contract on an equity underlying.
    Option = 7,
    /// An option contract on a futures underlying.
    FutureOption = 8,
    /// An option contract on an index underlying.
    IndexOption = 9,
    /// A non-tradable index level.
    Index = 10,
}

impl SecurityType {
    /// Returns whether the security type is an option style contract.
    #[must_use]
    pub const fn is_option(&self) -> bool {
        matches!(self, Self::Option | Self::FutureOption | Self::IndexOption)
    }
}

/// The direction an order moves inventory.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderDirection {
    /// Buying increases the position.
    Buy = 1,
    /// Selling decreases the position.
    Sell = 2,
    /// No directional intent (price inspection only).
    Hold = 3,
}

impl OrderDirection {
    /// Returns the direction implied by a signed quantity.
    #[must_use]
    pub fn from_quantity(quantity: rust_decimal::Decimal) -> Self {
        if quantity.is_sign_negative() {
            Self::Sell
        } else {
            Self::Buy
        }
    }
}

/// The lifecycle state of an order.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// No state change occurred (an evaluation which did not fill).
    None = 0,
    /// The order has been created but not yet acknowledged.
    New = 1,
    /// The order has been acknowledged and is working.
    Submitted = 2,
    /// Part of the order quantity has filled.
    PartiallyFilled = 3,
    /// The entire order quantity has filled (terminal).
    Filled = 4,
    /// The order was canceled before completion (terminal).
    Canceled = 5,
    /// The order was rejected as malformed or impermissible (terminal).
    Invalid = 6,
}

impl OrderStatus {
    /// Returns whether the status is terminal.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Filled | Self::Canceled | Self::Invalid)
    }
}

/// The order type tag of the closed order union.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Fill at the prevailing market price.
    Market = 1,
    /// Fill at the limit price or better.
    Limit = 2,
    /// Become a market order once the stop price trades through.
    StopMarket = 3,
    /// Become a limit order once the stop price trades through.
    StopLimit = 4,
    /// Become a quote-book limit order once the trigger price touches.
    LimitIfTouched = 5,
    /// A stop market order whose stop trails the market.
    TrailingStop = 6,
    /// A stop limit order whose stop and limit trail the market.
    TrailingStopLimit = 7,
    /// Fill at the next regular session open.
    MarketOnOpen = 8,
    /// Fill at the official session close.
    MarketOnClose = 9,
    /// Exercise an option contract at its strike.
    OptionExercise = 10,
    /// All legs fill at prevailing market prices together.
    ComboMarket = 11,
    /// All legs fill when the weighted combination crosses the group limit.
    ComboLimit = 12,
    /// Each leg carries its own limit; all must satisfy in the same slice.
    ComboLegLimit = 13,
}

/// The type of a point-in-time market data observation.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TickType {
    /// A trade observation.
    Trade = 1,
    /// A top-of-book quote observation.
    Quote = 2,
    /// An open interest observation.
    OpenInterest = 3,
}

/// The sampling resolution of a data subscription.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Resolution {
    /// Unaggregated ticks.
    Tick = 1,
    /// One-second bars.
    Second = 2,
    /// One-minute bars.
    Minute = 3,
    /// One-hour bars.
    Hour = 4,
    /// Daily bars.
    Daily = 5,
}

/// The content type of a data subscription.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketDataType {
    /// Bars aggregated from trades.
    TradeBar = 1,
    /// Bars aggregated from top-of-book quotes.
    QuoteBar = 2,
    /// Individual trade ticks.
    TradeTick = 3,
    /// Individual quote ticks.
    QuoteTick = 4,
    /// Open interest points.
    OpenInterest = 5,
}

/// How long an order remains working before expiry.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    /// Work until explicitly canceled.
    GoodTilCanceled = 0,
    /// Work until the end of the trading day.
    Day = 1,
    /// Work until the expiry carried on the order.
    GoodTilDate = 2,
}

impl Serialize for TimeInForce {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

impl<'de> Deserialize<'de> for TimeInForce {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Legacy order files carry the numeric `Duration` enum; current files a string.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Repr(usize),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self::from_str(&s).map_err(serde::de::Error::custom),
            Raw::Repr(n) => Self::from_repr(n).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid TimeInForce repr: {n}"))
            }),
        }
    }
}

/// How historical prices are adjusted for corporate actions.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceAdjustmentMode {
    /// Prices as traded.
    Raw = 1,
    /// Prices adjusted for splits and dividends.
    Adjusted = 2,
    /// Prices adjusted for splits only.
    SplitAdjusted = 3,
    /// Raw prices scaled by the current adjustment factor.
    ScaledRaw = 4,
}

/// The direction of a closed trade.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeDirection {
    /// The trade was entered long.
    Long = 1,
    /// The trade was entered short.
    Short = 2,
}

enum_strum_serde!(SecurityType);
enum_strum_serde!(OrderDirection);
enum_strum_serde!(OrderStatus);
enum_strum_serde!(OrderType);
enum_strum_serde!(TickType);
enum_strum_serde!(Resolution);
enum_strum_serde!(MarketDataType);
enum_strum_serde!(PriceAdjustmentMode);
enum_strum_serde!(TradeDirection);

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    #[rstest]
    #[case(dec!(100), OrderDirection::Buy)]
    #[case(dec!(-100), OrderDirection::Sell)]
    fn test_direction_from_quantity(
        #[case] quantity: rust_decimal::Decimal,
        #[case] expected: OrderDirection,
    ) {
        assert_eq!(OrderDirection::from_quantity(quantity), expected);
    }

    #[rstest]
    #[case(OrderStatus::None, false)]
    #[case(OrderStatus::Submitted, false)]
    #[case(OrderStatus::PartiallyFilled, false)]
    #[case(OrderStatus::Filled, true)]
    #[case(OrderStatus::Canceled, true)]
    #[case(OrderStatus::Invalid, true)]
    fn test_order_status_is_closed(#[case] status: OrderStatus, #[case] expected: bool) {
        assert_eq!(status.is_closed(), expected);
    }

    #[rstest]
    fn test_enum_serde_round_trip() {
        let json = serde_json::to_string(&OrderType::TrailingStopLimit).unwrap();
        assert_eq!(json, "\"TRAILING_STOP_LIMIT\"");
        let parsed: OrderType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, OrderType::TrailingStopLimit);
    }

    #[rstest]
    fn test_enum_deserialize_case_insensitive() {
        let parsed: SecurityType = serde_json::from_str("\"crypto_future\"").unwrap();
        assert_eq!(parsed, SecurityType::CryptoFuture);
    }

    #[rstest]
    fn test_time_in_force_from_legacy_repr() {
        let parsed: TimeInForce = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, TimeInForce::Day);
        let parsed: TimeInForce = serde_json::from_str("\"GOOD_TIL_CANCELED\"").unwrap();
        assert_eq!(parsed, TimeInForce::GoodTilCanceled);
    }

    #[rstest]
    fn test_security_type_is_option() {
        assert!(SecurityType::IndexOption.is_option());
        assert!(!SecurityType::Equity.is_option());
    }
}
