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

//! Orders as a closed tagged union with a shared header and per-variant
//! trigger state.
//!
//! The fill engine matches on the [`OrderAny`] tag; there is no virtual
//! dispatch. Mutable trigger state (`stop_triggered`, `trigger_touched`,
//! trailing stop/limit prices) lives in the variant payloads and is latched
//! monotonically.

pub mod any;
pub mod base;
pub mod combo;
pub mod group;
pub mod limit;
pub mod limit_if_touched;
pub mod market;
pub mod market_on_close;
pub mod market_on_open;
pub mod option_exercise;
pub mod stop_limit;
pub mod stop_market;
#[cfg(any(test, feature = "stubs"))]
pub mod stubs;
pub mod trailing_stop;
pub mod trailing_stop_limit;

pub use any::OrderAny;
pub use base::OrderCore;
pub use combo::{ComboLegLimitOrder, ComboLimitOrder, ComboMarketOrder};
pub use group::GroupOrderManager;
pub use limit::LimitOrder;
pub use limit_if_touched::LimitIfTouchedOrder;
pub use market::MarketOrder;
pub use market_on_close::MarketOnCloseOrder;
pub use market_on_open::MarketOnOpenOrder;
pub use option_exercise::OptionExerciseOrder;
pub use stop_limit::StopLimitOrder;
pub use stop_market::StopMarketOrder;
pub use trailing_stop::TrailingStopOrder;
pub use trailing_stop_limit::TrailingStopLimitOrder;

use crate::enums::OrderStatus;

/// Errors raised by order state handling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    /// The requested status transition is not in the lifecycle DAG.
    #[error("invalid order status transition from {from} to {to}")]
    InvalidStateTransition {
        /// The status the order currently holds.
        from: OrderStatus,
        /// The status the transition requested.
        to: OrderStatus,
    },
}
