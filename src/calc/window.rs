use crate::calc::dates::{
    add_months, date_range, end_of_week, first_of_month, last_of_month, month_name,
    start_of_week, weekday_name, WeekStart,
};
use crate::calc::filter::StatusFilter;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Calendar zoom level.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Month,
    Week,
    Day,
}

/// The ordered cell dates to render for a reference date.
///
/// Month grids run from the start of the week holding the 1st through the end
/// of the week holding the last day, so their length is always a multiple of 7.
/// The weekday filter only applies to day granularity, where it expands the
/// view to every matching weekday of the reference month.
pub fn visible_dates(
    reference: NaiveDate,
    granularity: Granularity,
    weekday_filter: Option<Weekday>,
    week_start: WeekStart,
) -> Vec<NaiveDate> {
    match granularity {
        Granularity::Month => date_range(
            start_of_week(first_of_month(reference), week_start),
            end_of_week(last_of_month(reference), week_start),
        ),
        Granularity::Week => date_range(
            start_of_week(reference, week_start),
            end_of_week(reference, week_start),
        ),
        Granularity::Day => match weekday_filter {
            Some(weekday) => date_range(first_of_month(reference), last_of_month(reference))
                .into_iter()
                .filter(|d| d.weekday() == weekday)
                .collect(),
            None => vec![reference],
        },
    }
}

/// Moves `date` by `steps` units of the granularity (negative = backwards).
pub fn step(date: NaiveDate, granularity: Granularity, steps: i32) -> NaiveDate {
    let shifted = match granularity {
        Granularity::Month => return add_months(date, steps),
        Granularity::Week => date.checked_add_signed(Duration::weeks(steps as i64)),
        Granularity::Day => date.checked_add_signed(Duration::days(steps as i64)),
    };
    shifted.unwrap_or(date)
}

/// Ephemeral navigation and filter state for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub reference_date: NaiveDate,
    pub granularity: Granularity,
    pub status_filter: StatusFilter,
    pub weekday_filter: Option<Weekday>,
    pub week_start: WeekStart,
}

impl ViewState {
    pub fn new(reference_date: NaiveDate, granularity: Granularity, week_start: WeekStart) -> Self {
        ViewState {
            reference_date,
            granularity,
            status_filter: StatusFilter::default(),
            weekday_filter: None,
            week_start,
        }
    }

    pub fn visible_dates(&self) -> Vec<NaiveDate> {
        visible_dates(
            self.reference_date,
            self.granularity,
            self.weekday_filter,
            self.week_start,
        )
    }

    pub fn next(&mut self) {
        self.reference_date = step(self.reference_date, self.granularity, 1);
        tracing::debug!(reference = %self.reference_date, "navigated forward");
    }

    pub fn previous(&mut self) {
        self.reference_date = step(self.reference_date, self.granularity, -1);
        tracing::debug!(reference = %self.reference_date, "navigated back");
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.reference_date = today;
    }

    /// Leaving day granularity drops the weekday filter, which only has
    /// meaning there.
    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.granularity = granularity;
        if granularity != Granularity::Day {
            self.weekday_filter = None;
        }
    }

    /// Switches to day granularity showing every `weekday` of the month.
    pub fn set_weekday_filter(&mut self, weekday: Option<Weekday>) {
        if weekday.is_some() {
            self.granularity = Granularity::Day;
        }
        self.weekday_filter = weekday;
    }

    /// Header text for the current window, e.g. "October 2026" or
    /// "Oct 11 - Oct 17, 2026".
    pub fn range_label(&self) -> String {
        let reference = self.reference_date;
        match self.granularity {
            Granularity::Month => {
                format!("{} {}", month_name(reference.month()), reference.year())
            }
            Granularity::Week => {
                let start = start_of_week(reference, self.week_start);
                let end = end_of_week(reference, self.week_start);
                format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
            }
            Granularity::Day => match self.weekday_filter {
                Some(weekday) => format!(
                    "{}s in {} {}",
                    weekday_name(weekday),
                    month_name(reference.month()),
                    reference.year()
                ),
                None => reference.format("%A, %b %-d, %Y").to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn month_grid(reference: NaiveDate, week_start: WeekStart) -> Vec<NaiveDate> {
        visible_dates(reference, Granularity::Month, None, week_start)
    }

    #[test]
    fn test_month_grid_is_whole_weeks_covering_month() {
        let mut reference = d(2023, 1, 1);
        for _ in 0..36 {
            for week_start in [WeekStart::Sunday, WeekStart::Monday] {
                let grid = month_grid(reference, week_start);
                assert_eq!(grid.len() % 7, 0, "grid for {reference}");
                assert!(grid.len() >= 28 && grid.len() <= 42);
                assert_eq!(grid[0].weekday(), week_start.weekday());
                assert!(grid.contains(&first_of_month(reference)));
                assert!(grid.contains(&last_of_month(reference)));
            }
            reference = add_months(reference, 1);
        }
    }

    #[test]
    fn test_month_grid_october_2026() {
        // Oct 1 2026 is a Thursday, Oct 31 a Saturday
        let grid = month_grid(d(2026, 10, 17), WeekStart::Sunday);
        assert_eq!(grid.first(), Some(&d(2026, 9, 27)));
        assert_eq!(grid.last(), Some(&d(2026, 10, 31)));
        assert_eq!(grid.len(), 35);
    }

    #[test]
    fn test_month_grid_february_2015_is_exactly_four_weeks() {
        // Feb 1 2015 is a Sunday and the month has 28 days
        let grid = month_grid(d(2015, 2, 10), WeekStart::Sunday);
        assert_eq!(grid.len(), 28);
    }

    #[test]
    fn test_month_grid_is_consecutive() {
        let grid = month_grid(d(2024, 6, 10), WeekStart::Sunday);
        for pair in grid.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    #[test]
    fn test_week_is_seven_consecutive_days_containing_reference() {
        let reference = d(2026, 10, 14);
        let week = visible_dates(reference, Granularity::Week, None, WeekStart::Sunday);
        assert_eq!(week.len(), 7);
        assert!(week.contains(&reference));
        assert_eq!(week[0], d(2026, 10, 11));
        assert_eq!(week[6], d(2026, 10, 17));
    }

    #[test]
    fn test_week_spanning_year_boundary() {
        let week = visible_dates(d(2025, 1, 1), Granularity::Week, None, WeekStart::Sunday);
        assert_eq!(week[0], d(2024, 12, 29));
        assert_eq!(week[6], d(2025, 1, 4));
    }

    #[test]
    fn test_week_ignores_weekday_filter() {
        let week = visible_dates(
            d(2026, 10, 14),
            Granularity::Week,
            Some(Weekday::Mon),
            WeekStart::Sunday,
        );
        assert_eq!(week.len(), 7);
    }

    #[test]
    fn test_day_without_filter_is_reference_only() {
        let reference = d(2026, 10, 17);
        let days = visible_dates(reference, Granularity::Day, None, WeekStart::Sunday);
        assert_eq!(days, vec![reference]);
    }

    #[test]
    fn test_day_with_monday_filter_lists_march_mondays() {
        let days = visible_dates(
            d(2025, 3, 12),
            Granularity::Day,
            Some(Weekday::Mon),
            WeekStart::Sunday,
        );
        assert_eq!(
            days,
            vec![
                d(2025, 3, 3),
                d(2025, 3, 10),
                d(2025, 3, 17),
                d(2025, 3, 24),
                d(2025, 3, 31)
            ]
        );
    }

    #[test]
    fn test_visible_dates_idempotent() {
        let a = visible_dates(d(2024, 2, 29), Granularity::Month, None, WeekStart::Monday);
        let b = visible_dates(d(2024, 2, 29), Granularity::Month, None, WeekStart::Monday);
        assert_eq!(a, b);
    }

    #[test]
    fn test_step_month_clamps() {
        assert_eq!(step(d(2025, 1, 31), Granularity::Month, 1), d(2025, 2, 28));
        assert_eq!(step(d(2024, 1, 31), Granularity::Month, 1), d(2024, 2, 29));
    }

    #[test]
    fn test_step_week_and_day() {
        assert_eq!(step(d(2026, 10, 17), Granularity::Week, 1), d(2026, 10, 24));
        assert_eq!(step(d(2026, 10, 17), Granularity::Week, -1), d(2026, 10, 10));
        assert_eq!(step(d(2026, 10, 31), Granularity::Day, 1), d(2026, 11, 1));
    }

    #[test]
    fn test_view_state_navigation() {
        let mut view = ViewState::new(d(2025, 1, 31), Granularity::Month, WeekStart::Sunday);
        view.next();
        assert_eq!(view.reference_date, d(2025, 2, 28));
        view.previous();
        assert_eq!(view.reference_date, d(2025, 1, 28));
        view.go_to_today(d(2026, 10, 17));
        assert_eq!(view.reference_date, d(2026, 10, 17));
        assert_eq!(view.granularity, Granularity::Month);
    }

    #[test]
    fn test_set_weekday_filter_switches_to_day() {
        let mut view = ViewState::new(d(2025, 3, 12), Granularity::Month, WeekStart::Sunday);
        view.set_weekday_filter(Some(Weekday::Mon));
        assert_eq!(view.granularity, Granularity::Day);
        assert_eq!(view.visible_dates().len(), 5);
        view.set_granularity(Granularity::Week);
        assert_eq!(view.weekday_filter, None);
    }

    #[test]
    fn test_range_labels() {
        let mut view = ViewState::new(d(2026, 10, 17), Granularity::Month, WeekStart::Sunday);
        assert_eq!(view.range_label(), "October 2026");
        view.set_granularity(Granularity::Week);
        assert_eq!(view.range_label(), "Oct 11 - Oct 17, 2026");
        view.set_granularity(Granularity::Day);
        assert_eq!(view.range_label(), "Saturday, Oct 17, 2026");
        view.set_weekday_filter(Some(Weekday::Mon));
        assert_eq!(view.range_label(), "Mondays in October 2026");
    }
}
