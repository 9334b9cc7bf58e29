//! Wall clock adapter

use chrono::{DateTime, Utc};

use crate::application::ports::outbound::ClockPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
