//! Gregorian calendar helpers the day-of-month matcher needs.

/// Gregorian leap-year rule.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-based). Out-of-range months have no days.
pub fn days_in_month(month: u16, leap: bool) -> u16 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        2 => 28,
        _ => 0,
    }
}

/// Day of week for a Gregorian date, `0` = Sunday through `6` = Saturday.
///
/// Sakamoto's method; the day is not checked against the month length.
pub fn weekday(year: u16, month: u16, day: u16) -> u16 {
    const OFFSETS: [u16; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    if !(1..=12).contains(&month) {
        return 0;
    }
    let y = u32::from(if month < 3 { year.saturating_sub(1) } else { year });
    let sum = y + y / 4 - y / 100 + y / 400
        + u32::from(OFFSETS[month as usize - 1])
        + u32::from(day);
    (sum % 7) as u16
}
