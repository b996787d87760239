use crate::config::SearchLimits;
use crate::error::ScheduleError;
use crate::fields::TimeFields;
use crate::matcher::FieldMatcher;
use crate::part::Part;

/// A compiled seven-field pattern: one matcher per [`Part`], indexed by ordinal.
///
/// Immutable once built, so it can be shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatcher {
    matchers: [FieldMatcher; 7],
    limits: SearchLimits,
}

impl PatternMatcher {
    /// Compose seven matchers, given in [`Part`] ordinal order.
    ///
    /// Fails if a matcher was built for a different part, or if a
    /// day-of-month matcher and a discrete one sit in each other's slot.
    pub fn new(matchers: [FieldMatcher; 7]) -> Result<Self, ScheduleError> {
        for (slot, matcher) in Part::ALL.into_iter().zip(&matchers) {
            check_slot(slot, matcher)?;
        }
        Ok(Self {
            matchers,
            limits: SearchLimits::default(),
        })
    }

    /// Replace the search limits used by the `next_*` methods.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    pub fn matcher(&self, part: Part) -> &FieldMatcher {
        &self.matchers[part.ordinal()]
    }

    pub fn matchers(&self) -> &[FieldMatcher; 7] {
        &self.matchers
    }

    /// True when every field matcher accepts its component of `fields`.
    ///
    /// Day of month and day of week are combined with AND, even when both
    /// are restricted.
    pub fn matches(&self, fields: &TimeFields) -> bool {
        let leap = fields.is_leap_year();
        Part::ALL.into_iter().all(|part| {
            let value = fields.get(part);
            match part {
                Part::DayOfMonth => {
                    self.matcher(part)
                        .test_day(value, fields.month.into(), leap)
                }
                Part::DayOfWeek => self.match_week(value),
                _ => self.matcher(part).test(value),
            }
        })
    }

    /// Whether the day-of-week field accepts `day_of_week` (`0` = Sunday;
    /// `7` is read as Sunday too).
    pub fn match_week(&self, day_of_week: u16) -> bool {
        let day_of_week = if day_of_week == 7 { 0 } else { day_of_week };
        self.matcher(Part::DayOfWeek).test(day_of_week)
    }
}

fn check_slot(slot: Part, matcher: &FieldMatcher) -> Result<(), ScheduleError> {
    let misplaced = match matcher {
        FieldMatcher::Discrete(_) => slot == Part::DayOfMonth,
        FieldMatcher::DayOfMonth(_) => slot != Part::DayOfMonth,
        FieldMatcher::Wildcard(_) => false,
    };
    if misplaced {
        return Err(ScheduleError::WrongCapability {
            part: slot,
            kind: matcher.kind(),
        });
    }
    let found = matcher.part();
    if found != slot {
        return Err(ScheduleError::PartMismatch { slot, found });
    }
    Ok(())
}
