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

//! Configuration for the fill engine.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, FromRepr};

use marlin_model::enum_strum_serde;

/// How the price snapshot extractor selects among cached data.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
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
pub enum PriceMode {
    /// Quote ticks, then quote bars over trade bars, then trades.
    #[default]
    Standard = 1,
    /// Whichever of the latest trade or quote datum is strictly newer wins;
    /// ties favor trade data. Used for around-the-clock crypto venues.
    LatestPrice = 2,
}

enum_strum_serde!(PriceMode);

/// The config for a [`FillEngine`](crate::engine::FillEngine).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillEngineConfig {
    /// How the price snapshot extractor selects among cached data.
    #[serde(default)]
    pub price_mode: PriceMode,
    /// The start of the market-on-open submission blackout, exchange-local.
    #[serde(default = "FillEngineConfig::default_moo_blackout_start")]
    pub moo_blackout_start: NaiveTime,
    /// The end of the market-on-open submission blackout, exchange-local.
    #[serde(default = "FillEngineConfig::default_moo_blackout_end")]
    pub moo_blackout_end: NaiveTime,
}

impl FillEngineConfig {
    fn default_moo_blackout_start() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 31, 0).expect("valid time")
    }

    fn default_moo_blackout_end() -> NaiveTime {
        NaiveTime::from_hms_opt(16, 0, 0).expect("valid time")
    }

    /// Returns a config using the latest-price extractor for crypto venues.
    #[must_use]
    pub fn latest_price() -> Self {
        Self {
            price_mode: PriceMode::LatestPrice,
            ..Default::default()
        }
    }
}

impl Default for FillEngineConfig {
    fn default() -> Self {
        Self {
            price_mode: PriceMode::Standard,
            moo_blackout_start: Self::default_moo_blackout_start(),
            moo_blackout_end: Self::default_moo_blackout_end(),
        }
    }
}
