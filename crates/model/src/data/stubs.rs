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

//! Type stubs for testing.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use rstest::fixture;
use rust_decimal_macros::dec;

use crate::{
    data::{BarData, QuoteBar, Tick, TradeBar},
    enums::SecurityType,
    identifiers::Symbol,
};

/// A reference instant during the New York regular session (10:30 ET).
#[fixture]
pub fn session_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 14, 30, 0).unwrap()
}

#[fixture]
pub fn spy() -> Symbol {
    Symbol::new("SPY", SecurityType::Equity, "usa")
}

#[fixture]
pub fn btcusd() -> Symbol {
    Symbol::new("BTCUSD", SecurityType::Crypto, "coinbase")
}

#[fixture]
pub fn trade_bar_spy(spy: Symbol, session_time: DateTime<Utc>) -> TradeBar {
    TradeBar::new(
        spy,
        session_time,
        TimeDelta::minutes(1),
        dec!(102),
        dec!(103),
        dec!(101),
        dec!(102.3),
        dec!(250000),
    )
}

#[fixture]
pub fn quote_bar_spy(spy: Symbol, session_time: DateTime<Utc>) -> QuoteBar {
    QuoteBar::new(
        spy,
        session_time,
        TimeDelta::minutes(1),
        Some(BarData::new(
            dec!(101.9),
            dec!(102.9),
            dec!(100.9),
            dec!(102.2),
        )),
        Some(BarData::new(
            dec!(102.1),
            dec!(103.1),
            dec!(101.1),
            dec!(102.4),
        )),
        dec!(500),
        dec!(700),
    )
}

#[fixture]
pub fn trade_tick_spy(spy: Symbol, session_time: DateTime<Utc>) -> Tick {
    Tick::trade(spy, session_time, dec!(102.15))
}

#[fixture]
pub fn quote_tick_spy(spy: Symbol, session_time: DateTime<Utc>) -> Tick {
    Tick::quote(spy, session_time, Some(dec!(102.10)), Some(dec!(102.20)))
}
