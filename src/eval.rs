use std::iter::FusedIterator;

use jiff::civil::{DateTime, Time};
use jiff::tz::TimeZone;
use jiff::{ToSpan, Zoned};
use tracing::{debug, trace};

use crate::calendar;
use crate::error::ScheduleError;
use crate::fields::TimeFields;
use crate::part::Part;
use crate::pattern::PatternMatcher;

/// What a part's matcher says about the value currently in that part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// The current value is accepted.
    Unchanged,
    /// The current value is rejected; this is the next accepted one.
    Advanced(u16),
    /// No accepted value at or above the current one in this context.
    Wrapped,
}

/// Position of the ripple-carry walk. Indices point into [`Part::CARRY_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Check the current value of a part against its matcher.
    Scanning(usize),
    /// Every less significant part is exhausted: move this one strictly
    /// past its current value.
    Carrying(usize),
    /// A more significant part moved: take the first accepted value here.
    Resetting(usize),
    Done,
}

/// Smallest value `>= from` accepted for `part` given the other values.
///
/// Day-of-month is the only part whose answer depends on context (month
/// and leap year), so it is resolved here and nowhere else.
fn probe(pattern: &PatternMatcher, part: Part, values: &TimeFields, from: u16) -> Option<u16> {
    let matcher = pattern.matcher(part);
    match part {
        Part::DayOfMonth => {
            matcher.day_ceiling(from, values.month.into(), values.is_leap_year())
        }
        _ => matcher.ceiling(from),
    }
}

fn step(pattern: &PatternMatcher, part: Part, values: &TimeFields) -> Step {
    let current = values.get(part);
    match probe(pattern, part, values, current) {
        Some(next) if next == current => Step::Unchanged,
        Some(next) => Step::Advanced(next),
        None => Step::Wrapped,
    }
}

/// Hand the carry to the next more significant part. Carrying out of the
/// year means the year domain is exhausted.
fn carry(index: usize) -> Option<State> {
    index.checked_sub(1).map(State::Carrying)
}

/// Earliest instant at or after `start` that every carry part accepts,
/// without looking at the day of week. `None` once the year would pass
/// `last_year` or the year domain runs out.
fn search_from(pattern: &PatternMatcher, start: TimeFields, last_year: u16) -> Option<TimeFields> {
    let order = Part::CARRY_ORDER;
    let mut values = start;
    let mut state = State::Scanning(0);

    loop {
        state = match state {
            State::Scanning(i) if i == order.len() => State::Done,
            State::Scanning(i) => match step(pattern, order[i], &values) {
                Step::Unchanged => State::Scanning(i + 1),
                Step::Advanced(next) => {
                    values.set(order[i], next);
                    State::Resetting(i + 1)
                }
                Step::Wrapped => carry(i)?,
            },
            State::Carrying(i) => {
                let part = order[i];
                match probe(pattern, part, &values, values.get(part) + 1) {
                    Some(next) => {
                        values.set(part, next);
                        State::Resetting(i + 1)
                    }
                    None => carry(i)?,
                }
            }
            State::Resetting(i) if i == order.len() => State::Done,
            State::Resetting(i) => {
                let part = order[i];
                match probe(pattern, part, &values, part.domain_min()) {
                    Some(first) => {
                        values.set(part, first);
                        State::Resetting(i + 1)
                    }
                    // Only the day can come up empty: the new month holds
                    // none of the accepted days, so move the month on.
                    None => carry(i)?,
                }
            }
            State::Done => break,
        };

        if values.year > last_year {
            return None;
        }
        trace!(?state, %values, "carry step");
    }

    values.day_of_week = calendar::weekday(
        values.year,
        values.month.into(),
        values.day_of_month.into(),
    ) as u8;
    Some(values)
}

fn calendar_err(e: jiff::Error) -> ScheduleError {
    ScheduleError::calendar(e.to_string())
}

/// Earliest instant strictly after `after` that matches every field of the
/// pattern, including day of week.
///
/// The result is the very next matching second. With a wildcard second,
/// `09:00:05` is followed by `09:00:06` when that second also matches the
/// other fields; only a restricted second field pushes the result further.
pub fn next_fields_after(
    pattern: &PatternMatcher,
    after: &TimeFields,
) -> Result<Option<TimeFields>, ScheduleError> {
    if after.year > Part::Year.domain_max() {
        return Ok(None);
    }
    // The horizon counts from where the year domain starts.
    let last_year = pattern
        .limits()
        .last_year_from(after.year.max(Part::Year.domain_min()));
    let mut from: DateTime = after
        .to_datetime()?
        .checked_add(1.second())
        .map_err(calendar_err)?;

    loop {
        let start = TimeFields::from_datetime(from)?;
        let Some(candidate) = search_from(pattern, start, last_year) else {
            debug!(%after, last_year, "no match within search horizon");
            return Ok(None);
        };
        if pattern.match_week(candidate.day_of_week.into()) {
            return Ok(Some(candidate));
        }
        // Weekday is fixed for the whole day, so nothing else on it matches.
        debug!(%candidate, "rejected by day of week");
        from = candidate
            .to_datetime()?
            .date()
            .tomorrow()
            .map_err(calendar_err)?
            .to_datetime(Time::midnight());
    }
}

/// Like [`next_fields_after`], placed on the wall clock of `tz`.
///
/// Wall-clock times skipped by a DST gap resolve forward; repeated ones
/// resolve to their first occurrence.
pub fn next_after(
    pattern: &PatternMatcher,
    after: &TimeFields,
    tz: &TimeZone,
) -> Result<Option<Zoned>, ScheduleError> {
    match next_fields_after(pattern, after)? {
        Some(fields) => fields
            .to_datetime()?
            .to_zoned(tz.clone())
            .map(Some)
            .map_err(calendar_err),
        None => Ok(None),
    }
}

/// Next match strictly after the instant `now`, on `now`'s own wall clock.
///
/// Across a DST fold the wall clock repeats, so a later wall-clock match can
/// still be an earlier instant; such candidates try their second occurrence
/// and are otherwise skipped.
pub fn next_after_zoned(
    pattern: &PatternMatcher,
    now: &Zoned,
) -> Result<Option<Zoned>, ScheduleError> {
    let tz = now.time_zone();
    let mut fields = TimeFields::from_zoned(now)?;
    loop {
        let Some(candidate) = next_fields_after(pattern, &fields)? else {
            return Ok(None);
        };
        let ambiguous = tz.to_ambiguous_zoned(candidate.to_datetime()?);
        let zoned = ambiguous.clone().compatible().map_err(calendar_err)?;
        if zoned.timestamp() > now.timestamp() {
            return Ok(Some(zoned));
        }
        let later = ambiguous.later().map_err(calendar_err)?;
        if later.timestamp() > now.timestamp() {
            return Ok(Some(later));
        }
        fields = candidate;
    }
}

/// Up to `n` consecutive matches after `now`.
pub fn next_n_after(
    pattern: &PatternMatcher,
    now: &Zoned,
    n: usize,
) -> Result<Vec<Zoned>, ScheduleError> {
    occurrences(pattern, now).take(n).collect()
}

pub fn occurrences<'a>(pattern: &'a PatternMatcher, from: &Zoned) -> Occurrences<'a> {
    Occurrences {
        pattern,
        current: Some(from.clone()),
    }
}

/// Lazy iterator over the matches of a pattern after a starting instant.
///
/// Ends when the search horizon is exhausted. After yielding an error it
/// yields nothing more.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    pattern: &'a PatternMatcher,
    current: Option<Zoned>,
}

impl Iterator for Occurrences<'_> {
    type Item = Result<Zoned, ScheduleError>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        match next_after_zoned(self.pattern, &current) {
            Ok(Some(next)) => {
                self.current = Some(next.clone());
                Some(Ok(next))
            }
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl FusedIterator for Occurrences<'_> {}
