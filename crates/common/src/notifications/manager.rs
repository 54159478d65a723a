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

//! The live-mode gated, rate limited notification sink.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use chrono::{DateTime, TimeDelta, Utc};

use crate::{clock::Clock, notifications::Notification};

/// An append-only sink for messages emitted by strategies.
///
/// Submissions are accepted at the API boundary in every mode; messages are
/// only enqueued in live mode, at most `max_per_window` per rolling window.
/// The clock is injected so tests control time.
#[derive(Debug)]
pub struct NotificationManager {
    live_mode: bool,
    max_per_window: usize,
    window: TimeDelta,
    clock: Rc<RefCell<dyn Clock>>,
    accepted_times: VecDeque<DateTime<Utc>>,
    messages: Vec<Notification>,
}

impl NotificationManager {
    /// Creates a new [`NotificationManager`] instance.
    #[must_use]
    pub fn new(
        live_mode: bool,
        max_per_window: usize,
        window: TimeDelta,
        clock: Rc<RefCell<dyn Clock>>,
    ) -> Self {
        Self {
            live_mode,
            max_per_window,
            window,
            clock,
            accepted_times: VecDeque::new(),
            messages: Vec::new(),
        }
    }

    /// Returns the messages enqueued so far, in submission order.
    #[must_use]
    pub fn messages(&self) -> &[Notification] {
        &self.messages
    }

    /// Submits a notification, returning whether it was enqueued.
    ///
    /// Returns `false` outside live mode, and `false` when the rolling window
    /// allowance is exhausted.
    pub fn submit(&mut self, notification: Notification) -> bool {
        if !self.live_mode {
            return false;
        }

        let now = self.clock.borrow().utc_now();
        self.prune_window(now);

        if self.accepted_times.len() >= self.max_per_window {
            log::warn!(
                "Notification rate limit of {} per {}s reached; message dropped",
                self.max_per_window,
                self.window.num_seconds(),
            );
            return false;
        }

        self.accepted_times.push_back(now);
        self.messages.push(notification);
        true
    }

    fn prune_window(&mut self, now: DateTime<Utc>) {
        let horizon = now - self.window;
        while let Some(front) = self.accepted_times.front() {
            if *front <= horizon {
                self.accepted_times.pop_front();
            } else {
                break;
            }
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
    use crate::clock::TestClock;

    fn sms(n: usize) -> Notification {
        Notification::sms("+15551234567", Some(&format!("message {n}"))).unwrap()
    }

    fn manager(live_mode: bool, clock: Rc<RefCell<TestClock>>) -> NotificationManager {
        NotificationManager::new(live_mode, 30, TimeDelta::minutes(1), clock)
    }

    #[rstest]
    fn test_non_live_mode_accepts_but_does_not_enqueue() {
        let clock = Rc::new(RefCell::new(TestClock::new()));
        let mut manager = manager(false, clock);
        assert!(!manager.submit(sms(0)));
        assert!(manager.messages().is_empty());
    }

    #[rstest]
    fn test_rate_limit_caps_window() {
        let clock = Rc::new(RefCell::new(TestClock::new()));
        let mut manager = manager(true, clock.clone());

        for n in 0..30 {
            assert!(manager.submit(sms(n)), "message {n} should enqueue");
        }
        assert!(!manager.submit(sms(30)), "over-limit message should drop");
        assert_eq!(manager.messages().len(), 30);

        // The window rolls: a minute later the allowance is back
        clock.borrow_mut().advance(TimeDelta::seconds(61));
        assert!(manager.submit(sms(31)));
        assert_eq!(manager.messages().len(), 31);
    }

    #[rstest]
    fn test_window_is_rolling_not_fixed() {
        let clock = Rc::new(RefCell::new(TestClock::new()));
        let mut manager = manager(true, clock.clone());

        for n in 0..15 {
            assert!(manager.submit(sms(n)));
        }
        clock.borrow_mut().advance(TimeDelta::seconds(30));
        for n in 15..30 {
            assert!(manager.submit(sms(n)));
        }
        // First 15 are 30s old, still inside the window
        assert!(!manager.submit(sms(30)));

        // 31s later the first batch ages out but the second remains
        clock.borrow_mut().advance(TimeDelta::seconds(31));
        for n in 31..46 {
            assert!(manager.submit(sms(n)), "message {n} should enqueue");
        }
        assert!(!manager.submit(sms(46)));
    }
}
