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

//! A closed round-trip trade, the unit the statistics aggregator consumes.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{enums::TradeDirection, identifiers::Symbol};

/// Represents a closed round-trip trade; immutable once constructed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// The traded symbol.
    pub symbol: Symbol,
    /// The UTC time the trade was entered.
    pub entry_time: DateTime<Utc>,
    /// The average entry price.
    pub entry_price: Decimal,
    /// The UTC time the trade was exited.
    pub exit_time: DateTime<Utc>,
    /// The average exit price.
    pub exit_price: Decimal,
    /// Whether the trade was entered long or short.
    pub direction: TradeDirection,
    /// The unsigned traded quantity.
    #[serde(with = "marlin_core::serialization::decimal_lenient")]
    pub quantity: Decimal,
    /// The realized profit or loss, net of nothing (fees carried separately).
    pub profit_loss: Decimal,
    /// The total fees paid entering and exiting.
    pub total_fees: Decimal,
    /// Maximum adverse excursion while the trade was open (non-positive).
    pub mae: Decimal,
    /// Maximum favorable excursion while the trade was open (non-negative).
    pub mfe: Decimal,
    /// An explicit win marker overriding the profit/loss sign, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_win: Option<bool>,
}

impl Trade {
    /// Returns the time the trade was held.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.exit_time - self.entry_time
    }

    /// Returns whether the trade counts as a winner: the explicit marker when
    /// present, otherwise a positive profit/loss.
    #[must_use]
    pub fn is_winner(&self) -> bool {
        self.is_win
            .unwrap_or_else(|| self.profit_loss > Decimal::ZERO)
    }

    /// Returns whether the trade counts as a loser: not a winner, with a
    /// non-zero profit/loss.
    #[must_use]
    pub fn is_loser(&self) -> bool {
        !self.is_winner() && !self.profit_loss.is_zero()
    }

    /// Returns the end-trade drawdown, how far the exit fell short of the
    /// best price seen while open.
    #[must_use]
    pub fn end_trade_drawdown(&self) -> Decimal {
        self.profit_loss - self.mfe
    }
}
