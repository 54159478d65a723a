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

//! The freshness gate deciding whether cached data may fill an order.

use chrono::{DateTime, TimeDelta, Utc};
use marlin_model::securities::Security;

/// Returns whether a cached datum may fill an order.
///
/// Data is fresh iff it is no older than `stale_threshold` against `now_utc`
/// and not older than `submit_floor_utc` (the order creation time, or the
/// scheduled session open for market-on-open orders). Fill-forward data is
/// never fresh.
#[must_use]
pub fn is_data_fresh(
    data_end_utc: DateTime<Utc>,
    is_fill_forward: bool,
    submit_floor_utc: DateTime<Utc>,
    now_utc: DateTime<Utc>,
    stale_threshold: TimeDelta,
) -> bool {
    if is_fill_forward {
        return false;
    }
    now_utc - data_end_utc <= stale_threshold && data_end_utc >= submit_floor_utc
}

/// Applies [`is_data_fresh`] to the latest datum in the security's cache,
/// with `now` taken from the security clock.
///
/// An empty cache is never fresh.
#[must_use]
pub fn security_data_is_fresh(
    security: &Security,
    submit_floor_utc: DateTime<Utc>,
    stale_threshold: TimeDelta,
) -> bool {
    let Some((data_end_utc, is_fill_forward)) = security.cache().last_update() else {
        return false;
    };
    is_data_fresh(
        data_end_utc,
        is_fill_forward,
        submit_floor_utc,
        security.utc_time(),
        stale_threshold,
    )
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::*;

    fn t(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 14, minute, 0).unwrap()
    }

    #[rstest]
    // Fresh: recent data after submission
    #[case(t(30), false, t(0), t(31), true)]
    // Stale: data older than the threshold
    #[case(t(30), false, t(0), t(31) + TimeDelta::hours(1), false)]
    // Exactly at the threshold still passes
    #[case(t(30), false, t(0), t(30) + TimeDelta::hours(1), true)]
    // Pre-submission data never fills
    #[case(t(30), false, t(31), t(31), false)]
    // Data ending exactly at submission passes
    #[case(t(30), false, t(30), t(31), true)]
    // Fill-forward data never fills
    #[case(t(30), true, t(0), t(31), false)]
    fn test_is_data_fresh(
        #[case] data_end: DateTime<Utc>,
        #[case] is_fill_forward: bool,
        #[case] submit_floor: DateTime<Utc>,
        #[case] now: DateTime<Utc>,
        #[case] expected: bool,
    ) {
        assert_eq!(
            is_data_fresh(
                data_end,
                is_fill_forward,
                submit_floor,
                now,
                TimeDelta::hours(1),
            ),
            expected,
        );
    }

    #[rstest]
    fn test_empty_cache_is_never_fresh() {
        use marlin_model::{data::stubs::spy, securities::ExchangeHours};

        let security = Security::new(spy(), ExchangeHours::equity_usa());
        assert!(!security_data_is_fresh(
            &security,
            DateTime::UNIX_EPOCH,
            TimeDelta::hours(1),
        ));
    }
}
