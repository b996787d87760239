use crate::fields::TimeFields;
use crate::part::Part;

/// All errors produced by cronmatch.
///
/// Construction errors are raised eagerly by the builders and by
/// [`PatternMatcher::new`](crate::PatternMatcher::new). A search that finds
/// no match within its horizon is not an error; it yields `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ScheduleError {
    #[error("{part} value {value} is outside {min}..={max}")]
    OutOfRange {
        part: Part,
        value: u16,
        min: u16,
        max: u16,
    },

    #[error("invalid {part} range {start}-{end}")]
    InvalidRange { part: Part, start: u16, end: u16 },

    #[error("{part} step must be at least 1")]
    InvalidStep { part: Part },

    #[error("{part} matcher accepts no values")]
    EmptySet { part: Part },

    #[error("{slot} slot was given a matcher built for {found}")]
    PartMismatch { slot: Part, found: Part },

    #[error("{part} does not accept a {kind} matcher")]
    WrongCapability { part: Part, kind: &'static str },

    #[error("{fields} is not a valid instant: {message}")]
    InvalidFields { fields: TimeFields, message: String },

    #[error("calendar error: {message}")]
    Calendar { message: String },
}

impl ScheduleError {
    pub fn out_of_range(part: Part, value: u16) -> Self {
        Self::OutOfRange {
            part,
            value,
            min: part.domain_min(),
            max: part.domain_max(),
        }
    }

    pub fn invalid_fields(fields: TimeFields, message: impl Into<String>) -> Self {
        Self::InvalidFields {
            fields,
            message: message.into(),
        }
    }

    pub fn calendar(message: impl Into<String>) -> Self {
        Self::Calendar {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = ScheduleError::out_of_range(Part::Minute, 61);
        assert_eq!(err.to_string(), "minute value 61 is outside 0..=59");

        let err = ScheduleError::WrongCapability {
            part: Part::DayOfMonth,
            kind: "discrete",
        };
        assert_eq!(
            err.to_string(),
            "day-of-month does not accept a discrete matcher"
        );

        let err =
            ScheduleError::invalid_fields(TimeFields::new(2023, 2, 30, 0, 0, 0), "no such day");
        assert_eq!(
            err.to_string(),
            "2023-02-30T00:00:00 is not a valid instant: no such day"
        );
    }
}
