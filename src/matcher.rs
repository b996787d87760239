use crate::calendar::days_in_month;
use crate::error::ScheduleError;
use crate::part::Part;

const WORDS: usize = 3;

/// Fixed-size bitset over one part's domain.
///
/// Bit `i` stands for the value `part.domain_min() + i`. Three words cover
/// the widest domain (130 years).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueSet {
    part: Part,
    words: [u64; WORDS],
}

impl ValueSet {
    pub fn new(part: Part) -> Self {
        Self {
            part,
            words: [0; WORDS],
        }
    }

    pub fn part(&self) -> Part {
        self.part
    }

    pub fn insert(&mut self, value: u16) -> Result<(), ScheduleError> {
        if !self.part.contains(value) {
            return Err(ScheduleError::out_of_range(self.part, value));
        }
        let index = (value - self.part.domain_min()) as usize;
        self.words[index / 64] |= 1u64 << (index % 64);
        Ok(())
    }

    pub fn contains(&self, value: u16) -> bool {
        if !self.part.contains(value) {
            return false;
        }
        let index = (value - self.part.domain_min()) as usize;
        self.words[index / 64] & (1u64 << (index % 64)) != 0
    }

    /// Smallest member `>= value`.
    pub fn ceiling(&self, value: u16) -> Option<u16> {
        let min = self.part.domain_min();
        let start = value.saturating_sub(min) as usize;
        if start >= self.part.len() {
            return None;
        }
        let mut word = start / 64;
        let mut bits = self.words[word] & (u64::MAX << (start % 64));
        loop {
            if bits != 0 {
                return Some(min + (word * 64) as u16 + bits.trailing_zeros() as u16);
            }
            word += 1;
            if word == WORDS {
                return None;
            }
            bits = self.words[word];
        }
    }

    /// Smallest member.
    pub fn first(&self) -> Option<u16> {
        self.ceiling(self.part.domain_min())
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        (self.part.domain_min()..=self.part.domain_max()).filter(|v| self.contains(*v))
    }
}

/// Day-of-month values plus an optional "last day of the month" marker.
///
/// Which days exist depends on the month and on leap years, so the
/// queries here take that context.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DaySet {
    days: ValueSet,
    last_day: bool,
}

impl DaySet {
    pub fn days(&self) -> &ValueSet {
        &self.days
    }

    pub fn has_last_day(&self) -> bool {
        self.last_day
    }

    pub fn test_in(&self, day: u16, month: u16, leap: bool) -> bool {
        self.ceiling_in(day, month, leap) == Some(day)
    }

    /// Smallest accepted day `>= day` that exists in `month`.
    pub fn ceiling_in(&self, day: u16, month: u16, leap: bool) -> Option<u16> {
        let last = days_in_month(month, leap);
        let explicit = self.days.ceiling(day).filter(|d| *d <= last);
        let marker = (self.last_day && day <= last).then_some(last);
        match (explicit, marker) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// First accepted day of `month`, if the month has one.
    pub fn first_in(&self, month: u16, leap: bool) -> Option<u16> {
        self.ceiling_in(1, month, leap)
    }
}

/// Decides which values one part accepts.
///
/// A closed set of variants: `Wildcard` accepts the whole domain,
/// `Discrete` an explicit set, and `DayOfMonth` a set of days whose meaning
/// depends on the month being searched. Matchers are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldMatcher {
    Wildcard(Part),
    Discrete(ValueSet),
    DayOfMonth(DaySet),
}

impl FieldMatcher {
    pub fn wildcard(part: Part) -> Self {
        Self::Wildcard(part)
    }

    /// Explicit values for any part except day-of-month, which needs
    /// [`FieldMatcher::day_of_month`].
    pub fn discrete(
        part: Part,
        values: impl IntoIterator<Item = u16>,
    ) -> Result<Self, ScheduleError> {
        if part == Part::DayOfMonth {
            return Err(ScheduleError::WrongCapability {
                part,
                kind: "discrete",
            });
        }
        let mut set = ValueSet::new(part);
        for value in values {
            set.insert(value)?;
        }
        if set.is_empty() {
            return Err(ScheduleError::EmptySet { part });
        }
        Ok(Self::Discrete(set))
    }

    /// Days of the month, optionally including the month's last day.
    pub fn day_of_month(
        days: impl IntoIterator<Item = u16>,
        last_day: bool,
    ) -> Result<Self, ScheduleError> {
        let mut set = ValueSet::new(Part::DayOfMonth);
        for day in days {
            set.insert(day)?;
        }
        if set.is_empty() && !last_day {
            return Err(ScheduleError::EmptySet {
                part: Part::DayOfMonth,
            });
        }
        Ok(Self::DayOfMonth(DaySet {
            days: set,
            last_day,
        }))
    }

    /// The part this matcher was built for.
    pub fn part(&self) -> Part {
        match self {
            Self::Wildcard(part) => *part,
            Self::Discrete(set) => set.part(),
            Self::DayOfMonth(_) => Part::DayOfMonth,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Wildcard(_) => "wildcard",
            Self::Discrete(_) => "discrete",
            Self::DayOfMonth(_) => "day-of-month",
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard(_))
    }

    /// Whether `value` is accepted. The last-day marker of a day-of-month
    /// matcher needs a month to resolve and is ignored here.
    pub fn test(&self, value: u16) -> bool {
        match self {
            Self::Wildcard(part) => part.contains(value),
            Self::Discrete(set) => set.contains(value),
            Self::DayOfMonth(days) => days.days.contains(value),
        }
    }

    /// Smallest accepted value `>= value`, or `None` if the domain has no
    /// accepted value at or above it.
    pub fn ceiling(&self, value: u16) -> Option<u16> {
        match self {
            Self::Wildcard(part) => {
                (value <= part.domain_max()).then(|| value.max(part.domain_min()))
            }
            Self::Discrete(set) => set.ceiling(value),
            Self::DayOfMonth(days) => days.days.ceiling(value),
        }
    }

    /// Smallest accepted value `> value`. When none exists the result wraps
    /// to [`min_value`](Self::min_value), which is then `<= value`.
    pub fn next_after(&self, value: u16) -> u16 {
        self.ceiling(value.saturating_add(1))
            .unwrap_or_else(|| self.min_value())
    }

    /// Smallest accepted value. A day-of-month matcher holding only the
    /// last-day marker reports 28, the earliest day that can be last.
    pub fn min_value(&self) -> u16 {
        match self {
            Self::Wildcard(part) => part.domain_min(),
            Self::Discrete(set) => set.first().unwrap_or(set.part().domain_min()),
            Self::DayOfMonth(days) => match days.days.first() {
                Some(day) if !days.last_day || day <= 28 => day,
                _ => 28,
            },
        }
    }

    /// Smallest accepted day `>= day` that exists in the given month.
    ///
    /// This is the one query that needs calendar context; every variant is
    /// bounded by the month length here.
    pub fn day_ceiling(&self, day: u16, month: u16, leap: bool) -> Option<u16> {
        match self {
            Self::DayOfMonth(days) => days.ceiling_in(day, month, leap),
            other => other
                .ceiling(day)
                .filter(|d| *d <= days_in_month(month, leap)),
        }
    }

    pub fn test_day(&self, day: u16, month: u16, leap: bool) -> bool {
        self.day_ceiling(day, month, leap) == Some(day)
    }
}
