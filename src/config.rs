/// Default search horizon, in years past the starting instant.
pub const DEFAULT_MAX_YEARS: u16 = 100;

/// Bounds on how far a next-match search may look ahead.
///
/// Patterns that can never fire (day 31 in February) or fire only rarely
/// would otherwise keep carrying into the year field. A search that would
/// land beyond `start year + max_years` reports no match instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchLimits {
    pub max_years: u16,
}

impl SearchLimits {
    pub fn with_max_years(mut self, max_years: u16) -> Self {
        self.max_years = max_years;
        self
    }

    /// Last year a search starting in `year` may return.
    pub fn last_year_from(&self, year: u16) -> u16 {
        year.saturating_add(self.max_years)
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_years: DEFAULT_MAX_YEARS,
        }
    }
}
