use chrono::{Local, NaiveDate};

/// Format used for every date written to the output table.
pub const CANONICAL_DATE_FORMAT: &str = "%Y/%m/%d";

/// Source of "today" for date normalization.
pub trait Clock {
    fn today(&self) -> NaiveDate;

    fn today_canonical(&self) -> String {
        self.today().format(CANONICAL_DATE_FORMAT).to_string()
    }
}

/// The local calendar date of the machine running the check.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
