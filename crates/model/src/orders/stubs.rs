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

//! Order stubs for testing.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    enums::SecurityType,
    identifiers::{OrderId, Symbol},
    orders::{OrderCore, TrailingStopOrder},
};

/// Returns an order header for SPY created at 10:00 New York on the reference
/// session day.
#[must_use]
pub fn order_core(id: u64, quantity: Decimal) -> OrderCore {
    OrderCore::new(
        OrderId(id),
        Symbol::new("SPY", SecurityType::Equity, "usa"),
        quantity,
        Utc.with_ymd_and_hms(2024, 6, 3, 14, 0, 0).unwrap(),
    )
}

/// Returns a sell-side trailing stop with an absolute trailing amount.
#[must_use]
pub fn trailing_stop_sell(stop_price: Decimal, trailing_amount: Decimal) -> TrailingStopOrder {
    TrailingStopOrder::new(order_core(5, dec!(-100)), stop_price, trailing_amount, false)
}
