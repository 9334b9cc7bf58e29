use chrono::{DateTime, Utc};

/// Source of the current time, swappable in tests
#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
