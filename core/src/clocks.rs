// Bookshelf
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Sources of the current time.

use time::OffsetDateTime;

/// Something that can tell the current time.
pub trait Clock {
    /// Returns the current time in UTC.
    fn now_utc(&self) -> OffsetDateTime;
}

/// Clock backed by the operating system.
///
/// Timestamps are truncated to whole microseconds, which is what the database keeps.  Returning
/// the truncated value up front means a freshly created entity compares equal to its stored copy.
#[derive(Clone, Default)]
pub struct SystemClock {}

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();
        now.replace_microsecond(now.microsecond()).expect("microsecond() is always in range")
    }
}

/// Test utilities.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Clock that stays put until a test moves it forward.
    pub struct SettableClock {
        /// The time reported by `now_utc`.
        now: Mutex<OffsetDateTime>,
    }

    impl SettableClock {
        /// Creates a clock that reports `now`.
        pub fn new(now: OffsetDateTime) -> Self {
            Self { now: Mutex::new(now) }
        }

        /// Moves the clock forward by `delta`.
        pub fn advance(&self, delta: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += delta;
        }
    }

    impl Clock for SettableClock {
        fn now_utc(&self) -> OffsetDateTime {
            *self.now.lock().unwrap()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use time::macros::datetime;

        #[test]
        fn test_settableclock_stays_put() {
            let clock = SettableClock::new(datetime!(2023-12-01 10:15:00.123456 UTC));
            assert_eq!(datetime!(2023-12-01 10:15:00.123456 UTC), clock.now_utc());
            assert_eq!(datetime!(2023-12-01 10:15:00.123456 UTC), clock.now_utc());
        }

        #[test]
        fn test_settableclock_advance() {
            let clock = SettableClock::new(datetime!(2023-12-01 10:15:00 UTC));
            clock.advance(Duration::from_secs(90));
            assert_eq!(datetime!(2023-12-01 10:16:30 UTC), clock.now_utc());
            clock.advance(Duration::from_micros(5));
            assert_eq!(datetime!(2023-12-01 10:16:30.000005 UTC), clock.now_utc());
        }
    }
}
