use cronmatch::{FieldSpec, PatternMatcher, PatternSpec, TimeFields};
use jiff::civil::DateTime;
use jiff::ToSpan;
use proptest::prelude::*;

fn list(values: impl IntoIterator<Item = u16>) -> FieldSpec {
    FieldSpec::List(values.into_iter().map(FieldSpec::Value).collect())
}

fn arb_values(min: u16, max: u16, len: std::ops::Range<usize>) -> impl Strategy<Value = FieldSpec> {
    prop::collection::btree_set(min..=max, len).prop_map(list)
}

/// A start instant somewhere in 2024..2026.
fn arb_instant() -> impl Strategy<Value = TimeFields> {
    (2024u16..2026, 1u8..=12, 1u8..=28, 0u8..24, 0u8..60, 0u8..60)
        .prop_map(|(y, mo, d, h, mi, s)| TimeFields::new(y, mo, d, h, mi, s))
}

/// Patterns that fire at least once an hour, so a second-by-second scan
/// stays cheap.
fn arb_clock_pattern() -> impl Strategy<Value = PatternSpec> {
    (
        prop_oneof![Just(FieldSpec::Any), arb_values(0, 59, 1..6)],
        arb_values(0, 59, 1..6),
    )
        .prop_map(|(second, minute)| PatternSpec {
            second,
            minute,
            ..PatternSpec::default()
        })
}

/// Patterns that fire at midnight on selected days.
fn arb_calendar_pattern() -> impl Strategy<Value = PatternSpec> {
    (
        prop_oneof![
            Just(FieldSpec::Any),
            Just(FieldSpec::LastDay),
            arb_values(1, 31, 1..4),
            arb_values(1, 31, 1..3).prop_map(|days| match days {
                FieldSpec::List(mut items) => {
                    items.push(FieldSpec::LastDay);
                    FieldSpec::List(items)
                }
                other => other,
            }),
        ],
        prop_oneof![Just(FieldSpec::Any), arb_values(1, 12, 1..4)],
        prop_oneof![Just(FieldSpec::Any), arb_values(0, 6, 1..4)],
    )
        .prop_map(|(day_of_month, month, day_of_week)| PatternSpec {
            second: FieldSpec::Value(0),
            minute: FieldSpec::Value(0),
            hour: FieldSpec::Value(0),
            day_of_month,
            month,
            day_of_week,
            ..PatternSpec::default()
        })
}

fn step_seconds(pattern: &PatternMatcher, after: &TimeFields, limit: usize) -> Option<TimeFields> {
    let mut dt: DateTime = after.to_datetime().unwrap();
    for _ in 0..limit {
        dt = dt.checked_add(1.second()).unwrap();
        let fields = TimeFields::from_datetime(dt).unwrap();
        if pattern.matches(&fields) {
            return Some(fields);
        }
    }
    None
}

fn step_days(pattern: &PatternMatcher, after: &TimeFields, limit: usize) -> Option<TimeFields> {
    let mut date = after.to_datetime().unwrap().date();
    for _ in 0..limit {
        date = date.tomorrow().unwrap();
        let midnight = date.to_datetime(jiff::civil::Time::midnight());
        let fields = TimeFields::from_datetime(midnight).unwrap();
        if pattern.matches(&fields) {
            return Some(fields);
        }
    }
    None
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The result is strictly after the input and matches the pattern.
    #[test]
    fn ordering_and_self_consistency(spec in arb_calendar_pattern(), after in arb_instant()) {
        let pattern = spec.compile().unwrap();
        if let Some(next) = pattern.next_fields_after(&after).unwrap() {
            prop_assert!(next > after, "{} is not after {}", next, after);
            prop_assert!(pattern.matches(&next), "{} does not match '{}'", next, pattern);
        }
    }

    /// Feeding a result back in moves strictly forward.
    #[test]
    fn monotonic(spec in arb_clock_pattern(), after in arb_instant()) {
        let pattern = spec.compile().unwrap();
        let first = pattern.next_fields_after(&after).unwrap().unwrap();
        let second = pattern.next_fields_after(&first).unwrap().unwrap();
        prop_assert!(second > first);
    }

    /// No matching second is skipped.
    #[test]
    fn minimal_within_the_hour(spec in arb_clock_pattern(), after in arb_instant()) {
        let pattern = spec.compile().unwrap();
        let expected = step_seconds(&pattern, &after, 2 * 3600);
        let got = pattern.next_fields_after(&after).unwrap();
        prop_assert_eq!(got, expected, "pattern '{}' after {}", pattern, after);
    }

    /// No matching day is skipped, including month-length and weekday effects.
    #[test]
    fn minimal_across_days(spec in arb_calendar_pattern(), after in arb_instant()) {
        let pattern = spec.compile().unwrap();
        let scanned = step_days(&pattern, &after, 40 * 366);
        let got = pattern.next_fields_after(&after).unwrap();
        match scanned {
            Some(expected) => prop_assert_eq!(
                got,
                Some(expected),
                "pattern '{}' after {}",
                pattern,
                after
            ),
            None => prop_assert!(
                got.map_or(true, |g| g.year >= after.year + 40),
                "pattern '{}' after {}: scan found nothing but got {:?}", pattern, after, got
            ),
        }
    }
}
