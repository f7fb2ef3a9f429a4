//! Narrative (in-world) time.
//!
//! Game time is an integer count of seconds since midnight of Day 1. It is
//! advanced by the event log, never by the wall clock, so it is modelled as a
//! plain newtype instead of a `chrono` timestamp.

use serde::{Deserialize, Serialize};

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Narrative seconds that pass per combat round.
pub const ROUND_SECONDS: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NarrativeTime(i64);

/// Calendar components of a [`NarrativeTime`]. `day` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBreakdown {
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
}

impl NarrativeTime {
    pub const fn from_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    pub const fn seconds(self) -> i64 {
        self.0
    }

    /// Time after `rounds` combat rounds have elapsed.
    pub fn after_rounds(self, rounds: u32) -> Self {
        Self(self.0.saturating_add(i64::from(rounds).saturating_mul(ROUND_SECONDS)))
    }

    pub fn breakdown(self) -> TimeBreakdown {
        let days = self.0.div_euclid(SECONDS_PER_DAY);
        let remaining = self.0.rem_euclid(SECONDS_PER_DAY);
        TimeBreakdown {
            day: days + 1,
            hour: remaining / SECONDS_PER_HOUR,
            minute: (remaining % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            second: remaining % SECONDS_PER_MINUTE,
        }
    }
}

impl std::fmt::Display for NarrativeTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let TimeBreakdown {
            day,
            hour,
            minute,
            second,
        } = self.breakdown();
        let period = if hour < 12 { "AM" } else { "PM" };
        let display_hour = match hour % 12 {
            0 => 12,
            h => h,
        };

        if second > 0 {
            write!(f, "Day {day}, {display_hour}:{minute:02}:{second:02} {period}")
        } else {
            write!(f, "Day {day}, {display_hour}:{minute:02} {period}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midnight_of_day_one() {
        assert_eq!(NarrativeTime::from_seconds(0).to_string(), "Day 1, 12:00 AM");
    }

    #[test]
    fn afternoon_of_day_three() {
        let t = NarrativeTime::from_seconds(2 * SECONDS_PER_DAY + 15 * SECONDS_PER_HOUR + 5 * 60);
        assert_eq!(t.to_string(), "Day 3, 3:05 PM");
    }

    #[test]
    fn seconds_only_shown_when_non_zero() {
        let t = NarrativeTime::from_seconds(12 * SECONDS_PER_HOUR + 42);
        assert_eq!(t.to_string(), "Day 1, 12:00:42 PM");
    }

    #[test]
    fn after_rounds_adds_six_seconds_each() {
        let t = NarrativeTime::from_seconds(100).after_rounds(3);
        assert_eq!(t.seconds(), 118);
    }

    #[test]
    fn breakdown_is_one_based_on_day() {
        let b = NarrativeTime::from_seconds(SECONDS_PER_DAY + 61).breakdown();
        assert_eq!(
            b,
            TimeBreakdown {
                day: 2,
                hour: 0,
                minute: 1,
                second: 1
            }
        );
    }
}
