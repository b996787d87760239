use std::fmt;

use crate::matcher::{FieldMatcher, ValueSet};
use crate::part::Part;
use crate::pattern::PatternMatcher;

/// Write members as a comma-separated list, collapsing runs of three or
/// more consecutive values into `a-b`.
fn write_runs(f: &mut fmt::Formatter<'_>, set: &ValueSet) -> fmt::Result {
    let values: Vec<u16> = set.iter().collect();
    let mut first = true;
    let mut i = 0;
    while i < values.len() {
        let start = values[i];
        let mut end = start;
        while i + 1 < values.len() && values[i + 1] == end + 1 {
            i += 1;
            end = values[i];
        }
        if !first {
            write!(f, ",")?;
        }
        first = false;
        match end - start {
            0 => write!(f, "{start}")?,
            1 => write!(f, "{start},{end}")?,
            _ => write!(f, "{start}-{end}")?,
        }
        i += 1;
    }
    Ok(())
}

impl fmt::Display for FieldMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldMatcher::Wildcard(_) => write!(f, "*"),
            FieldMatcher::Discrete(set) => write_runs(f, set),
            FieldMatcher::DayOfMonth(days) => {
                write_runs(f, days.days())?;
                if days.has_last_day() {
                    if !days.days().is_empty() {
                        write!(f, ",")?;
                    }
                    write!(f, "L")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for PatternMatcher {
    /// Fields in ordinal order: second minute hour day month weekday year.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in Part::ALL.into_iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", self.matcher(part))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::field_spec::{FieldSpec, PatternSpec};
    use crate::part::Part;

    #[test]
    fn field_rendering() {
        let m = FieldSpec::every(Part::Minute, 15).compile(Part::Minute).unwrap();
        assert_eq!(m.to_string(), "0,15,30,45");

        let m = FieldSpec::List(vec![
            FieldSpec::Range { start: 1, end: 5 },
            FieldSpec::Value(7),
            FieldSpec::Value(8),
        ])
        .compile(Part::Hour)
        .unwrap();
        assert_eq!(m.to_string(), "1-5,7,8");

        let m = FieldSpec::List(vec![FieldSpec::Value(15), FieldSpec::LastDay])
            .compile(Part::DayOfMonth)
            .unwrap();
        assert_eq!(m.to_string(), "15,L");

        let m = FieldSpec::LastDay.compile(Part::DayOfMonth).unwrap();
        assert_eq!(m.to_string(), "L");
    }

    #[test]
    fn pattern_rendering() {
        let p = PatternSpec {
            second: FieldSpec::Value(0),
            minute: FieldSpec::Value(0),
            hour: FieldSpec::Value(5),
            day_of_week: FieldSpec::Range { start: 1, end: 5 },
            ..PatternSpec::default()
        }
        .compile()
        .unwrap();
        assert_eq!(p.to_string(), "0 0 5 * * 1-5 *");
    }
}
