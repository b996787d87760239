use std::fmt;

use jiff::Unit;

/// One of the seven fields of a pattern, ordered by significance.
///
/// The discriminant is the ordinal used to index a compiled pattern:
/// `Second` is the least significant field and `Year` the most. `DayOfWeek`
/// sits at ordinal 5 but never takes part in carry propagation; a candidate's
/// weekday is derived from its date and checked after the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum Part {
    Second = 0,
    Minute = 1,
    Hour = 2,
    DayOfMonth = 3,
    Month = 4,
    DayOfWeek = 5,
    Year = 6,
}

impl Part {
    /// All parts in ordinal order.
    pub const ALL: [Part; 7] = [
        Part::Second,
        Part::Minute,
        Part::Hour,
        Part::DayOfMonth,
        Part::Month,
        Part::DayOfWeek,
        Part::Year,
    ];

    /// Parts that take part in the ripple-carry search, most significant first.
    pub const CARRY_ORDER: [Part; 6] = [
        Part::Year,
        Part::Month,
        Part::DayOfMonth,
        Part::Hour,
        Part::Minute,
        Part::Second,
    ];

    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    /// Smallest value in this part's domain.
    pub fn domain_min(self) -> u16 {
        match self {
            Self::Second | Self::Minute | Self::Hour | Self::DayOfWeek => 0,
            Self::DayOfMonth | Self::Month => 1,
            Self::Year => 1970,
        }
    }

    /// Largest value in this part's domain.
    pub fn domain_max(self) -> u16 {
        match self {
            Self::Second | Self::Minute => 59,
            Self::Hour => 23,
            Self::DayOfMonth => 31,
            Self::Month => 12,
            Self::DayOfWeek => 6,
            Self::Year => 2099,
        }
    }

    /// Number of values in the domain.
    pub fn len(self) -> usize {
        (self.domain_max() - self.domain_min()) as usize + 1
    }

    pub fn contains(self, value: u16) -> bool {
        (self.domain_min()..=self.domain_max()).contains(&value)
    }

    /// The calendar unit this part reads from a `jiff` datetime.
    ///
    /// Both day parts map to [`Unit::Day`]; they differ only in how the day
    /// is numbered.
    pub fn unit(self) -> Unit {
        match self {
            Self::Second => Unit::Second,
            Self::Minute => Unit::Minute,
            Self::Hour => Unit::Hour,
            Self::DayOfMonth | Self::DayOfWeek => Unit::Day,
            Self::Month => Unit::Month,
            Self::Year => Unit::Year,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::DayOfMonth => "day-of-month",
            Self::Month => "month",
            Self::DayOfWeek => "day-of-week",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
