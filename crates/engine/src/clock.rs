//! Source of "today".
//!
//! Every relative computation (date windows, current month, "2 days ago")
//! starts from a single calendar date obtained here, so that all boundaries
//! share one timezone.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Clock {
    /// Current date in the given timezone.
    System(Tz),
    /// Always the same date; used for demos and tests.
    Fixed(NaiveDate),
}

impl Clock {
    /// System clock for an IANA timezone name such as `Europe/Rome`.
    pub fn system(timezone: &str) -> ResultEngine<Self> {
        let tz = timezone
            .parse::<Tz>()
            .map_err(|_| EngineError::InvalidTimezone(timezone.to_string()))?;
        Ok(Clock::System(tz))
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System(tz) => Utc::now().with_timezone(tz).date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::System(Tz::UTC)
    }
}
