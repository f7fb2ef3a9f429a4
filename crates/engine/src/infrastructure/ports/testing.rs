//! Testability port for injecting wall-clock time.

use chrono::{DateTime, Utc};

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
