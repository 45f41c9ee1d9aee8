use chrono::{Duration, NaiveDate};

/// Inclusive civil-date interval.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Number of calendar days covered, inclusive of both endpoints.
    ///
    /// Never less than 1, even for an inverted span.
    pub fn total_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(1)
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Iterate every date in `[start, end]` in chronological order.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let total = if self.is_inverted() {
            0
        } else {
            self.total_days()
        };
        (0..total).map(move |offset| self.start + Duration::days(offset))
    }

    /// The sub-span covering day indices `[from, to]` relative to `start`.
    pub fn slice_days(&self, from: i64, to: i64) -> Self {
        Self {
            start: self.start + Duration::days(from),
            end: self.start + Duration::days(to),
        }
    }
}

impl std::fmt::Display for DateSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::DateSpan;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_day_counts_one() {
        let span = DateSpan::single(d(2021, 1, 1));
        assert_eq!(span.total_days(), 1);
        assert_eq!(span.iter_days().count(), 1);
    }

    #[test]
    fn inclusive_day_count() {
        let span = DateSpan::new(d(2021, 1, 1), d(2021, 1, 5));
        assert_eq!(span.total_days(), 5);

        let days: Vec<_> = span.iter_days().collect();
        assert_eq!(days.first(), Some(&d(2021, 1, 1)));
        assert_eq!(days.last(), Some(&d(2021, 1, 5)));
    }

    #[test]
    fn inverted_span_yields_no_days() {
        let span = DateSpan::new(d(2021, 1, 5), d(2021, 1, 1));
        assert!(span.is_inverted());
        assert_eq!(span.total_days(), 1);
        assert_eq!(span.iter_days().count(), 0);
    }

    #[test]
    fn crosses_year_boundary() {
        let span = DateSpan::new(d(2020, 1, 1), d(2021, 1, 1));
        assert_eq!(span.total_days(), 367); // 2020 is a leap year
    }
}
