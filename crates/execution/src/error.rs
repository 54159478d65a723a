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

//! Errors surfaced by the fill engine.
//!
//! Contract breaches by the surrounding engine surface as errors; routine
//! no-fill conditions return a `None` status event instead. Nothing is logged
//! and swallowed.

use marlin_model::{
    enums::{OrderType, SecurityType},
    identifiers::{OrderId, Symbol},
};

/// An error surfaced to the caller of the fill engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FillError {
    /// The order parameters are malformed for evaluation.
    #[error("invalid order {order_id} for {symbol}: {reason}")]
    InvalidOrder {
        /// The offending order.
        order_id: OrderId,
        /// The symbol of the order.
        symbol: Symbol,
        /// Why the order is invalid.
        reason: String,
    },
    /// No subscription on the security can price the order.
    #[error("no market data subscription can price {order_type} order for {symbol}")]
    MissingSubscription {
        /// The symbol lacking a usable subscription.
        symbol: Symbol,
        /// The order type that could not be priced.
        order_type: OrderType,
    },
    /// The order type is not implemented for the asset class.
    #[error("{order_type} orders are not supported for {security_type} security {symbol}")]
    UnsupportedOrderType {
        /// The symbol of the order.
        symbol: Symbol,
        /// The unsupported order type.
        order_type: OrderType,
        /// The asset class lacking support.
        security_type: SecurityType,
    },
}
