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

//! Exchange session hours and local time conversion.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

/// Represents the trading session hours of an exchange.
///
/// Sessions repeat on weekdays; holiday calendars are owned by an external
/// calendar database and are out of scope here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExchangeHours {
    /// The exchange time zone.
    pub timezone: Tz,
    /// The regular session open, exchange-local.
    pub market_open: NaiveTime,
    /// The regular session close, exchange-local.
    pub market_close: NaiveTime,
    /// The extended session open, exchange-local.
    pub extended_open: NaiveTime,
    /// The extended session close, exchange-local.
    pub extended_close: NaiveTime,
    /// Whether the market never closes (crypto venues).
    pub is_always_open: bool,
}

impl ExchangeHours {
    /// Creates session hours for a US equity exchange (09:30-16:00 New York,
    /// extended 04:00-20:00).
    #[must_use]
    pub fn equity_usa() -> Self {
        Self {
            timezone: chrono_tz::America::New_York,
            market_open: NaiveTime::from_hms_opt(9, 30, 0).expect("valid time"),
            market_close: NaiveTime::from_hms_opt(16, 0, 0).expect("valid time"),
            extended_open: NaiveTime::from_hms_opt(4, 0, 0).expect("valid time"),
            extended_close: NaiveTime::from_hms_opt(20, 0, 0).expect("valid time"),
            is_always_open: false,
        }
    }

    /// Creates session hours for a venue which trades around the clock.
    #[must_use]
    pub fn open_24_7() -> Self {
        Self {
            timezone: chrono_tz::UTC,
            market_open: NaiveTime::MIN,
            market_close: NaiveTime::from_hms_opt(23, 59, 59).expect("valid time"),
            extended_open: NaiveTime::MIN,
            extended_close: NaiveTime::from_hms_opt(23, 59, 59).expect("valid time"),
            is_always_open: true,
        }
    }

    /// Converts a UTC instant to exchange-local time.
    #[must_use]
    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.timezone)
    }

    /// Converts an exchange-local date and time to UTC.
    ///
    /// Ambiguous local times (DST fold) resolve to the earlier instant.
    #[must_use]
    pub fn to_utc(&self, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
        self.timezone
            .from_local_datetime(&date.and_time(time))
            .earliest()
            .map(|local| local.with_timezone(&Utc))
    }

    /// Returns whether the exchange trades on the given local date.
    #[must_use]
    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        self.is_always_open || date.weekday().number_from_monday() <= 5
    }

    /// Returns whether the exchange is open at the given UTC instant.
    #[must_use]
    pub fn is_open(&self, utc: DateTime<Utc>, extended_hours: bool) -> bool {
        if self.is_always_open {
            return true;
        }
        let local = self.to_local(utc);
        if !self.is_trading_day(local.date_naive()) {
            return false;
        }
        let time = local.time();
        let (open, close) = if extended_hours {
            (self.extended_open, self.extended_close)
        } else {
            (self.market_open, self.market_close)
        };
        time >= open && time < close
    }

    /// Returns the next scheduled regular session open strictly after `after`.
    #[must_use]
    pub fn next_market_open(&self, after: DateTime<Utc>) -> DateTime<Utc> {
        if self.is_always_open {
            return after;
        }
        let mut date = self.to_local(after).date_naive();
        loop {
            if self.is_trading_day(date)
                && let Some(open) = self.to_utc(date, self.market_open)
                && open > after
            {
                return open;
            }
            date += TimeDelta::days(1);
        }
    }

    /// Returns the next scheduled regular session close strictly after `after`.
    #[must_use]
    pub fn next_market_close(&self, after: DateTime<Utc>) -> DateTime<Utc> {
        if self.is_always_open {
            return after;
        }
        let mut date = self.to_local(after).date_naive();
        loop {
            if self.is_trading_day(date)
                && let Some(close) = self.to_utc(date, self.market_close)
                && close > after
            {
                return close;
            }
            date += TimeDelta::days(1);
        }
    }

    /// Returns the scheduled regular session close for the session trading on
    /// the given local date, or `None` when the exchange is shut that day.
    #[must_use]
    pub fn market_close_on(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        if !self.is_trading_day(date) {
            return None;
        }
        self.to_utc(date, self.market_close)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[rstest]
    // Monday 10:30 New York (EDT, UTC-4)
    #[case(utc(2024, 6, 3, 14, 30), false, true)]
    // Monday 08:00 New York: pre-market only
    #[case(utc(2024, 6, 3, 12, 0), false, false)]
    #[case(utc(2024, 6, 3, 12, 0), true, true)]
    // Saturday
    #[case(utc(2024, 6, 1, 14, 30), true, false)]
    fn test_equity_usa_is_open(
        #[case] utc_time: DateTime<Utc>,
        #[case] extended: bool,
        #[case] expected: bool,
    ) {
        let hours = ExchangeHours::equity_usa();
        assert_eq!(hours.is_open(utc_time, extended), expected);
    }

    #[rstest]
    fn test_open_24_7_is_always_open() {
        let hours = ExchangeHours::open_24_7();
        assert!(hours.is_open(utc(2024, 6, 1, 3, 0), false));
    }

    #[rstest]
    fn test_next_market_open_before_open_is_same_day() {
        let hours = ExchangeHours::equity_usa();
        // Monday 05:00 New York
        let open = hours.next_market_open(utc(2024, 6, 3, 9, 0));
        assert_eq!(open, utc(2024, 6, 3, 13, 30));
    }

    #[rstest]
    fn test_next_market_open_after_open_is_next_day() {
        let hours = ExchangeHours::equity_usa();
        // Monday 10:30 New York
        let open = hours.next_market_open(utc(2024, 6, 3, 14, 30));
        assert_eq!(open, utc(2024, 6, 4, 13, 30));
    }

    #[rstest]
    fn test_next_market_open_skips_weekend() {
        let hours = ExchangeHours::equity_usa();
        // Friday 15:00 New York
        let open = hours.next_market_open(utc(2024, 5, 31, 19, 0));
        assert_eq!(open, utc(2024, 6, 3, 13, 30));
    }

    #[rstest]
    fn test_market_close_on() {
        let hours = ExchangeHours::equity_usa();
        let close = hours
            .market_close_on(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap())
            .unwrap();
        assert_eq!(close, utc(2024, 6, 3, 20, 0));
        assert!(
            hours
                .market_close_on(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap())
                .is_none()
        );
    }
}
