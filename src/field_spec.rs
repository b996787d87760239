//! Structured field specifications and their compilation into matchers.
//!
//! This is the boundary a pattern parser hands its results across: each
//! syntax element (single value, `*`, range, stepped range, list, last day)
//! has a variant here. No text is interpreted.

use crate::error::ScheduleError;
use crate::matcher::FieldMatcher;
use crate::part::Part;
use crate::pattern::PatternMatcher;

/// One field of a pattern in structured form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldSpec {
    /// `*`
    #[default]
    Any,
    /// `5`
    Value(u16),
    /// `1-5`, inclusive on both ends.
    Range { start: u16, end: u16 },
    /// `0-59/15`, every `step`-th value from `start` up to `end`.
    Step { start: u16, end: u16, step: u16 },
    /// `1,15,L`
    List(Vec<FieldSpec>),
    /// `L`, the last day of the month. Day-of-month only.
    LastDay,
}

impl FieldSpec {
    /// `*/step` over the whole domain of `part`.
    pub fn every(part: Part, step: u16) -> Self {
        Self::Step {
            start: part.domain_min(),
            end: part.domain_max(),
            step,
        }
    }

    /// Validate against `part` and build its matcher.
    pub fn compile(&self, part: Part) -> Result<FieldMatcher, ScheduleError> {
        if *self == FieldSpec::Any {
            return Ok(FieldMatcher::wildcard(part));
        }
        let mut values = Vec::new();
        let mut last_day = false;
        self.expand(part, &mut values, &mut last_day)?;
        if part == Part::DayOfMonth {
            FieldMatcher::day_of_month(values, last_day)
        } else {
            FieldMatcher::discrete(part, values)
        }
    }

    fn expand(
        &self,
        part: Part,
        values: &mut Vec<u16>,
        last_day: &mut bool,
    ) -> Result<(), ScheduleError> {
        match self {
            Self::Any => values.extend(part.domain_min()..=part.domain_max()),
            Self::Value(v) => values.push(normalize(part, *v)?),
            Self::Range { start, end } => {
                let (start, end) = bounds(part, *start, *end)?;
                values.extend((start..=end).map(|v| wrap_weekday(part, v)));
            }
            Self::Step { start, end, step } => {
                if *step == 0 {
                    return Err(ScheduleError::InvalidStep { part });
                }
                let (start, end) = bounds(part, *start, *end)?;
                values.extend(
                    (start..=end)
                        .step_by(*step as usize)
                        .map(|v| wrap_weekday(part, v)),
                );
            }
            Self::List(items) => {
                if items.is_empty() {
                    return Err(ScheduleError::EmptySet { part });
                }
                for item in items {
                    item.expand(part, values, last_day)?;
                }
            }
            Self::LastDay => {
                if part != Part::DayOfMonth {
                    return Err(ScheduleError::WrongCapability {
                        part,
                        kind: "last-day",
                    });
                }
                *last_day = true;
            }
        }
        Ok(())
    }
}

/// Day-of-week accepts 7 as a second spelling of Sunday.
fn upper_bound(part: Part) -> u16 {
    if part == Part::DayOfWeek {
        7
    } else {
        part.domain_max()
    }
}

fn wrap_weekday(part: Part, value: u16) -> u16 {
    if part == Part::DayOfWeek && value == 7 {
        0
    } else {
        value
    }
}

fn normalize(part: Part, value: u16) -> Result<u16, ScheduleError> {
    if value < part.domain_min() || value > upper_bound(part) {
        return Err(ScheduleError::out_of_range(part, value));
    }
    Ok(wrap_weekday(part, value))
}

fn bounds(part: Part, start: u16, end: u16) -> Result<(u16, u16), ScheduleError> {
    for v in [start, end] {
        if v < part.domain_min() || v > upper_bound(part) {
            return Err(ScheduleError::out_of_range(part, v));
        }
    }
    if start > end {
        return Err(ScheduleError::InvalidRange { part, start, end });
    }
    Ok((start, end))
}

/// All seven fields of a pattern in structured form. Missing fields are `*`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PatternSpec {
    pub second: FieldSpec,
    pub minute: FieldSpec,
    pub hour: FieldSpec,
    pub day_of_month: FieldSpec,
    pub month: FieldSpec,
    pub day_of_week: FieldSpec,
    pub year: FieldSpec,
}

impl PatternSpec {
    pub fn field(&self, part: Part) -> &FieldSpec {
        match part {
            Part::Second => &self.second,
            Part::Minute => &self.minute,
            Part::Hour => &self.hour,
            Part::DayOfMonth => &self.day_of_month,
            Part::Month => &self.month,
            Part::DayOfWeek => &self.day_of_week,
            Part::Year => &self.year,
        }
    }

    pub fn compile(&self) -> Result<PatternMatcher, ScheduleError> {
        let matchers = [
            self.second.compile(Part::Second)?,
            self.minute.compile(Part::Minute)?,
            self.hour.compile(Part::Hour)?,
            self.day_of_month.compile(Part::DayOfMonth)?,
            self.month.compile(Part::Month)?,
            self.day_of_week.compile(Part::DayOfWeek)?,
            self.year.compile(Part::Year)?,
        ];
        PatternMatcher::new(matchers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(m: &FieldMatcher) -> Vec<u16> {
        match m {
            FieldMatcher::Discrete(set) => set.iter().collect(),
            FieldMatcher::DayOfMonth(days) => days.days().iter().collect(),
            FieldMatcher::Wildcard(_) => Vec::new(),
        }
    }

    #[test]
    fn any_compiles_to_wildcard() {
        let m = FieldSpec::Any.compile(Part::Hour).unwrap();
        assert_eq!(m, FieldMatcher::wildcard(Part::Hour));
    }

    #[test]
    fn steps_and_lists() {
        let m = FieldSpec::every(Part::Minute, 15).compile(Part::Minute).unwrap();
        assert_eq!(values(&m), vec![0, 15, 30, 45]);

        let spec = FieldSpec::List(vec![
            FieldSpec::Value(5),
            FieldSpec::Range { start: 10, end: 12 },
            FieldSpec::Step {
                start: 20,
                end: 23,
                step: 2,
            },
        ]);
        let m = spec.compile(Part::Hour).unwrap();
        assert_eq!(values(&m), vec![5, 10, 11, 12, 20, 22]);
    }

    #[test]
    fn sunday_as_seven() {
        let m = FieldSpec::Value(7).compile(Part::DayOfWeek).unwrap();
        assert_eq!(values(&m), vec![0]);
        let m = FieldSpec::Range { start: 5, end: 7 }
            .compile(Part::DayOfWeek)
            .unwrap();
        assert_eq!(values(&m), vec![0, 5, 6]);
    }

    #[test]
    fn day_of_month_always_gets_its_own_variant() {
        let m = FieldSpec::Value(31).compile(Part::DayOfMonth).unwrap();
        assert!(matches!(m, FieldMatcher::DayOfMonth(_)));

        let m = FieldSpec::List(vec![FieldSpec::Value(1), FieldSpec::LastDay])
            .compile(Part::DayOfMonth)
            .unwrap();
        match m {
            FieldMatcher::DayOfMonth(days) => {
                assert!(days.has_last_day());
                assert_eq!(days.days().iter().collect::<Vec<_>>(), vec![1]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn validation_errors() {
        assert_eq!(
            FieldSpec::Value(60).compile(Part::Second),
            Err(ScheduleError::out_of_range(Part::Second, 60))
        );
        assert_eq!(
            FieldSpec::Value(0).compile(Part::Month),
            Err(ScheduleError::out_of_range(Part::Month, 0))
        );
        assert_eq!(
            FieldSpec::Range { start: 5, end: 1 }.compile(Part::Hour),
            Err(ScheduleError::InvalidRange {
                part: Part::Hour,
                start: 5,
                end: 1
            })
        );
        assert_eq!(
            FieldSpec::every(Part::Minute, 0).compile(Part::Minute),
            Err(ScheduleError::InvalidStep { part: Part::Minute })
        );
        assert_eq!(
            FieldSpec::LastDay.compile(Part::Month),
            Err(ScheduleError::WrongCapability {
                part: Part::Month,
                kind: "last-day"
            })
        );
        assert_eq!(
            FieldSpec::List(vec![]).compile(Part::Year),
            Err(ScheduleError::EmptySet { part: Part::Year })
        );
        assert_eq!(
            FieldSpec::Value(1969).compile(Part::Year),
            Err(ScheduleError::out_of_range(Part::Year, 1969))
        );
    }

    #[test]
    fn pattern_spec_defaults_to_every_second() {
        let pattern = PatternSpec::default().compile().unwrap();
        for part in Part::ALL {
            assert!(pattern.matcher(part).is_wildcard(), "{part}");
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_from_json() {
        let spec: PatternSpec = serde_json::from_str(
            r#"{
                "second": {"value": 0},
                "minute": {"list": [{"value": 0}, {"value": 30}]},
                "hour": {"step": {"start": 0, "end": 23, "step": 6}},
                "day_of_month": "last_day"
            }"#,
        )
        .unwrap();
        assert_eq!(spec.second, FieldSpec::Value(0));
        assert_eq!(spec.day_of_month, FieldSpec::LastDay);
        assert_eq!(spec.month, FieldSpec::Any);
        assert!(spec.compile().is_ok());
    }
}
