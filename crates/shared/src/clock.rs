//! Clock collaborator providing "now"/"today" for catch-up comparisons.
//!
//! The scheduler's behavior depends on the current date, so the clock is
//! injected rather than read from the environment. Production callers use
//! [`SystemClock`]; tests and replay tooling use [`FixedClock`].

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Source of the current local date and time.
pub trait Clock {
    /// The current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// The current local date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    /// Pins the clock to the given instant.
    #[must_use]
    pub const fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Pins the clock to noon on the given day.
    #[must_use]
    pub fn on_day(day: NaiveDate) -> Self {
        Self {
            now: day.and_hms_opt(12, 0, 0).unwrap_or(NaiveDateTime::MIN),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}
