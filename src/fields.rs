use std::cmp::Ordering;
use std::fmt;

use jiff::civil::DateTime;
use jiff::Zoned;

use crate::calendar;
use crate::error::ScheduleError;
use crate::part::Part;

/// One concrete second on a wall clock, split into pattern fields.
///
/// `month` is 1-based and `day_of_week` counts from `0` = Sunday. There is
/// no sub-second component. Values compare chronologically; `day_of_week`
/// is derived from the date and does not take part in ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeFields {
    pub second: u8,
    pub minute: u8,
    pub hour: u8,
    pub day_of_month: u8,
    pub month: u8,
    pub day_of_week: u8,
    pub year: u16,
}

impl TimeFields {
    /// Build fields from a wall-clock date and time. The weekday is computed.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            second,
            minute,
            hour,
            day_of_month: day,
            month,
            day_of_week: calendar::weekday(year, month.into(), day.into()) as u8,
            year,
        }
    }

    /// Override the weekday, for callers that track it themselves.
    pub fn with_day_of_week(mut self, day_of_week: u8) -> Self {
        self.day_of_week = day_of_week;
        self
    }

    /// Read the value of one part.
    pub fn get(&self, part: Part) -> u16 {
        match part {
            Part::Second => self.second.into(),
            Part::Minute => self.minute.into(),
            Part::Hour => self.hour.into(),
            Part::DayOfMonth => self.day_of_month.into(),
            Part::Month => self.month.into(),
            Part::DayOfWeek => self.day_of_week.into(),
            Part::Year => self.year,
        }
    }

    /// Write one part. Values come from matchers, which never exceed their
    /// part's domain, so the narrowing below cannot truncate.
    pub(crate) fn set(&mut self, part: Part, value: u16) {
        match part {
            Part::Second => self.second = value as u8,
            Part::Minute => self.minute = value as u8,
            Part::Hour => self.hour = value as u8,
            Part::DayOfMonth => self.day_of_month = value as u8,
            Part::Month => self.month = value as u8,
            Part::DayOfWeek => self.day_of_week = value as u8,
            Part::Year => self.year = value,
        }
    }

    pub fn is_leap_year(&self) -> bool {
        calendar::is_leap_year(self.year)
    }

    /// Split a civil datetime into fields, dropping sub-second precision.
    pub fn from_datetime(dt: DateTime) -> Result<Self, ScheduleError> {
        let year = u16::try_from(dt.year())
            .map_err(|_| ScheduleError::calendar(format!("year {} is not supported", dt.year())))?;
        Ok(Self {
            second: dt.second() as u8,
            minute: dt.minute() as u8,
            hour: dt.hour() as u8,
            day_of_month: dt.day() as u8,
            month: dt.month() as u8,
            day_of_week: dt.weekday().to_sunday_zero_offset() as u8,
            year,
        })
    }

    /// Split a zoned datetime into fields as seen on its own wall clock.
    pub fn from_zoned(zdt: &Zoned) -> Result<Self, ScheduleError> {
        Self::from_datetime(zdt.datetime())
    }

    /// Reassemble a civil datetime with a zero sub-second component.
    pub fn to_datetime(&self) -> Result<DateTime, ScheduleError> {
        let year = i16::try_from(self.year)
            .map_err(|_| ScheduleError::invalid_fields(*self, "year out of range"))?;
        DateTime::new(
            year,
            self.month as i8,
            self.day_of_month as i8,
            self.hour as i8,
            self.minute as i8,
            self.second as i8,
            0,
        )
        .map_err(|e| ScheduleError::invalid_fields(*self, e.to_string()))
    }

    fn chronological_key(&self) -> (u16, u8, u8, u8, u8, u8) {
        (
            self.year,
            self.month,
            self.day_of_month,
            self.hour,
            self.minute,
            self.second,
        )
    }
}

impl PartialOrd for TimeFields {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeFields {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chronological_key()
            .cmp(&other.chronological_key())
            .then(self.day_of_week.cmp(&other.day_of_week))
    }
}

impl fmt::Display for TimeFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day_of_month, self.hour, self.minute, self.second
        )
    }
}
