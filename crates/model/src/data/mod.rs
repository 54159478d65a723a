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

//! Market data primitives consumed by the fill engine.

pub mod bar;
pub mod quote;
#[cfg(any(test, feature = "stubs"))]
pub mod stubs;
pub mod tick;

use chrono::{DateTime, Utc};

pub use bar::{BarData, TradeBar};
pub use quote::QuoteBar;
pub use tick::Tick;

use crate::identifiers::Symbol;

/// A market data item routed into a security's cache.
#[derive(Clone, Debug, PartialEq)]
pub enum MarketData {
    /// A bar aggregated from trades.
    TradeBar(TradeBar),
    /// A bar aggregated from top-of-book quotes.
    QuoteBar(QuoteBar),
    /// A single trade, quote, or open interest observation.
    Tick(Tick),
}

impl MarketData {
    /// Returns the symbol the data belongs to.
    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        match self {
            Self::TradeBar(bar) => &bar.symbol,
            Self::QuoteBar(bar) => &bar.symbol,
            Self::Tick(tick) => &tick.symbol,
        }
    }

    /// Returns the time the observation period ended.
    #[must_use]
    pub fn end_time(&self) -> DateTime<Utc> {
        match self {
            Self::TradeBar(bar) => bar.end_time(),
            Self::QuoteBar(bar) => bar.end_time(),
            Self::Tick(tick) => tick.time,
        }
    }

    /// Returns whether the data was fabricated to fill a gap in the series.
    #[must_use]
    pub const fn is_fill_forward(&self) -> bool {
        match self {
            Self::TradeBar(bar) => bar.is_fill_forward,
            Self::QuoteBar(bar) => bar.is_fill_forward,
            Self::Tick(tick) => tick.is_fill_forward,
        }
    }
}
