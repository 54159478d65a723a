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

//! The thin engine shell configuration surface around the fill core.

use chrono::{NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Configuration knobs for the simulation shell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Whether the engine runs against live markets rather than a backtest.
    #[serde(default)]
    pub live_mode: bool,
    /// How old cached data may be before fills are suppressed, in seconds.
    #[serde(default = "SimulationConfig::default_stale_price_threshold_secs")]
    pub stale_price_threshold_secs: i64,
    /// How many notifications the sink accepts per rolling window.
    #[serde(default = "SimulationConfig::default_max_notifications_per_window")]
    pub max_notifications_per_window: usize,
    /// The rolling notification window, in seconds.
    #[serde(default = "SimulationConfig::default_notification_window_secs")]
    pub notification_window_secs: i64,
    /// The start of the blackout window for market-on-open submission,
    /// exchange-local.
    #[serde(default = "SimulationConfig::default_moo_blackout_start")]
    pub moo_blackout_start: NaiveTime,
    /// The end of the blackout window for market-on-open submission,
    /// exchange-local.
    #[serde(default = "SimulationConfig::default_moo_blackout_end")]
    pub moo_blackout_end: NaiveTime,
}

impl SimulationConfig {
    const fn default_stale_price_threshold_secs() -> i64 {
        3600
    }

    const fn default_max_notifications_per_window() -> usize {
        30
    }

    const fn default_notification_window_secs() -> i64 {
        60
    }

    fn default_moo_blackout_start() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 31, 0).expect("valid time")
    }

    fn default_moo_blackout_end() -> NaiveTime {
        NaiveTime::from_hms_opt(16, 0, 0).expect("valid time")
    }

    /// Returns the stale price threshold as a [`TimeDelta`].
    #[must_use]
    pub fn stale_price_threshold(&self) -> TimeDelta {
        TimeDelta::seconds(self.stale_price_threshold_secs)
    }

    /// Returns the notification window as a [`TimeDelta`].
    #[must_use]
    pub fn notification_window(&self) -> TimeDelta {
        TimeDelta::seconds(self.notification_window_secs)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            live_mode: false,
            stale_price_threshold_secs: Self::default_stale_price_threshold_secs(),
            max_notifications_per_window: Self::default_max_notifications_per_window(),
            notification_window_secs: Self::default_notification_window_secs(),
            moo_blackout_start: Self::default_moo_blackout_start(),
            moo_blackout_end: Self::default_moo_blackout_end(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert!(!config.live_mode);
        assert_eq!(config.stale_price_threshold(), TimeDelta::hours(1));
        assert_eq!(config.max_notifications_per_window, 30);
        assert_eq!(config.notification_window(), TimeDelta::minutes(1));
    }

    #[rstest]
    fn test_partial_json_applies_defaults() {
        let config: SimulationConfig = serde_json::from_str(r#"{"liveMode":true}"#).unwrap();
        assert!(config.live_mode);
        assert_eq!(config.stale_price_threshold_secs, 3600);
        assert_eq!(
            config.moo_blackout_start,
            NaiveTime::from_hms_opt(9, 31, 0).unwrap()
        );
    }
}
