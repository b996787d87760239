//! cronmatch: seven-field cron pattern matching.
//!
//! Given a compiled pattern over second, minute, hour, day of month, month,
//! day of week and year, test whether an instant matches and find the next
//! instant strictly after a given one that does. Turning pattern text into
//! matchers is left to a parser; this crate starts from [`FieldSpec`]s or
//! ready-made [`FieldMatcher`]s.
//!
//! # Examples
//!
//! ```
//! use cronmatch::{FieldSpec, PatternSpec, TimeFields};
//! use jiff::tz::TimeZone;
//!
//! // Every day at 05:00:00.
//! let pattern = PatternSpec {
//!     second: FieldSpec::Value(0),
//!     minute: FieldSpec::Value(0),
//!     hour: FieldSpec::Value(5),
//!     ..PatternSpec::default()
//! }
//! .compile()
//! .unwrap();
//!
//! let now = TimeFields::new(2024, 1, 1, 5, 0, 1);
//! let next = pattern.next_after(&now, &TimeZone::UTC).unwrap().unwrap();
//! assert_eq!(next.to_string(), "2024-01-02T05:00:00+00:00[UTC]");
//! ```

pub mod calendar;
pub mod config;
pub mod display;
pub mod error;
pub mod eval;
pub mod field_spec;
pub mod fields;
pub mod matcher;
pub mod part;
pub mod pattern;

pub use config::SearchLimits;
pub use error::ScheduleError;
pub use eval::Occurrences;
pub use field_spec::{FieldSpec, PatternSpec};
pub use fields::TimeFields;
pub use matcher::{DaySet, FieldMatcher, ValueSet};
pub use part::Part;
pub use pattern::PatternMatcher;

use jiff::tz::TimeZone;
use jiff::Zoned;

// --- PatternMatcher search methods ---

impl PatternMatcher {
    /// Next instant strictly after `fields` that matches, on the wall clock
    /// of `tz`. `Ok(None)` when nothing matches within the search limits.
    ///
    /// No matching second is skipped: with a wildcard second field the
    /// answer after `09:00:05` is `09:00:06`, not the next minute or day.
    ///
    /// ```
    /// use cronmatch::{FieldSpec, PatternSpec, TimeFields};
    ///
    /// let every_second_of_nine = PatternSpec {
    ///     minute: FieldSpec::Value(0),
    ///     hour: FieldSpec::Value(9),
    ///     ..PatternSpec::default()
    /// }
    /// .compile()
    /// .unwrap();
    /// let next = every_second_of_nine
    ///     .next_fields_after(&TimeFields::new(2024, 1, 1, 9, 0, 5))
    ///     .unwrap();
    /// assert_eq!(next, Some(TimeFields::new(2024, 1, 1, 9, 0, 6)));
    /// ```
    pub fn next_after(
        &self,
        fields: &TimeFields,
        tz: &TimeZone,
    ) -> Result<Option<Zoned>, ScheduleError> {
        eval::next_after(self, fields, tz)
    }

    /// Like [`next_after`](Self::next_after), without a time zone.
    pub fn next_fields_after(
        &self,
        fields: &TimeFields,
    ) -> Result<Option<TimeFields>, ScheduleError> {
        eval::next_fields_after(self, fields)
    }

    /// Next match strictly after the instant `now`, in `now`'s time zone.
    pub fn next_after_zoned(&self, now: &Zoned) -> Result<Option<Zoned>, ScheduleError> {
        eval::next_after_zoned(self, now)
    }

    /// Up to `n` consecutive matches after `now`.
    pub fn next_n_after(&self, now: &Zoned, n: usize) -> Result<Vec<Zoned>, ScheduleError> {
        eval::next_n_after(self, now, n)
    }

    /// Lazily iterate over matches after `from`.
    pub fn occurrences(&self, from: &Zoned) -> Occurrences<'_> {
        eval::occurrences(self, from)
    }

    /// Check a zoned datetime against the pattern on its own wall clock.
    pub fn matches_zoned(&self, datetime: &Zoned) -> bool {
        TimeFields::from_zoned(datetime)
            .map(|fields| self.matches(&fields))
            .unwrap_or(false)
    }
}
