//! Shared helpers for in-crate unit tests.

use chrono::{DateTime, Local, Utc};
use mockable::Clock;

/// Clock returning a fixed instant, for deterministic timestamp assertions.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
