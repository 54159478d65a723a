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

//! Real-time and static `Clock` implementations.
//!
//! The clock is an explicit collaborator passed at construction so tests can
//! inject a controllable time source; no ambient singletons.

use std::fmt::Debug;

use chrono::{DateTime, TimeDelta, Utc};

/// A source of the current UTC time.
pub trait Clock: Debug {
    /// Returns the current date and time as a timezone-aware `DateTime<Utc>`.
    fn utc_now(&self) -> DateTime<Utc>;
}

/// A static test clock advanced manually.
#[derive(Clone, Debug)]
pub struct TestClock {
    time: DateTime<Utc>,
}

impl TestClock {
    /// Creates a new [`TestClock`] instance at the UNIX epoch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            time: DateTime::UNIX_EPOCH,
        }
    }

    /// Sets the clock to the given instant.
    ///
    /// The clock never runs backwards; an earlier instant is ignored.
    pub fn set_time(&mut self, to: DateTime<Utc>) {
        if to > self.time {
            self.time = to;
        }
    }

    /// Advances the clock by the given delta.
    pub fn advance(&mut self, by: TimeDelta) {
        self.time += by;
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TestClock {
    fn utc_now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// A clock reading the host real time.
#[derive(Clone, Debug, Default)]
pub struct LiveClock;

impl LiveClock {
    /// Creates a new [`LiveClock`] instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for LiveClock {
    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
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
    fn test_test_clock_advances_monotonically() {
        let mut clock = TestClock::new();
        let start = clock.utc_now();

        clock.advance(TimeDelta::minutes(5));
        assert_eq!(clock.utc_now(), start + TimeDelta::minutes(5));

        // Setting an earlier time is ignored
        clock.set_time(start);
        assert_eq!(clock.utc_now(), start + TimeDelta::minutes(5));
    }

    #[rstest]
    fn test_live_clock_is_recent() {
        let clock = LiveClock::new();
        let now = clock.utc_now();
        assert!(Utc::now() - now < TimeDelta::seconds(5));
    }
}
