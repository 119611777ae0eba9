use crate::calc::status::is_past_date;
use crate::calc::window::{Granularity, ViewState};
use crate::data::{Campaign, CampaignStatus};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Statuses to include. Empty means every status passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFilter {
    statuses: BTreeSet<CampaignStatus>,
}

impl StatusFilter {
    pub fn new(statuses: impl IntoIterator<Item = CampaignStatus>) -> Self {
        StatusFilter {
            statuses: statuses.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn contains(&self, status: CampaignStatus) -> bool {
        self.statuses.contains(&status)
    }

    pub fn allows(&self, status: CampaignStatus) -> bool {
        self.is_empty() || self.contains(status)
    }

    pub fn toggle(&mut self, status: CampaignStatus) {
        if !self.statuses.remove(&status) {
            self.statuses.insert(status);
        }
    }

    pub fn clear(&mut self) {
        self.statuses.clear();
    }

    /// "All Campaigns" or the selected statuses, e.g. "planned, live".
    pub fn label(&self) -> String {
        if self.is_empty() {
            return "All Campaigns".to_string();
        }
        self.statuses
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Campaigns whose closed [start, end] interval contains `date` and whose
/// stored status passes the filter, in input order.
pub fn campaigns_on_date<'a>(
    date: NaiveDate,
    campaigns: &'a [Campaign],
    filter: &StatusFilter,
) -> Vec<&'a Campaign> {
    campaigns
        .iter()
        .filter(|c| c.is_active_on(date) && filter.allows(c.status))
        .collect()
}

/// List-view ordering: filtered, then by start date (ties keep input order).
pub fn list_campaigns<'a>(campaigns: &'a [Campaign], filter: &StatusFilter) -> Vec<&'a Campaign> {
    let mut list: Vec<&Campaign> = campaigns.iter().filter(|c| filter.allows(c.status)).collect();
    list.sort_by_key(|c| c.start_date);
    list
}

#[derive(Debug, Clone)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    pub campaigns: Vec<&'a Campaign>,
    /// False for leading/trailing days borrowed from adjacent months.
    pub in_focus_month: bool,
    pub is_today: bool,
    pub is_past: bool,
}

impl<'a> DayCell<'a> {
    /// The campaigns to draw when a cell fits at most `max`.
    pub fn shown(&self, max: usize) -> &[&'a Campaign] {
        &self.campaigns[..self.campaigns.len().min(max)]
    }

    /// How many campaigns collapse into "+N more".
    pub fn overflow(&self, max: usize) -> usize {
        self.campaigns.len().saturating_sub(max)
    }
}

#[derive(Debug, Clone)]
pub struct CalendarWindow<'a> {
    pub label: String,
    pub granularity: Granularity,
    pub cells: Vec<DayCell<'a>>,
}

impl<'a> CalendarWindow<'a> {
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.cells.iter().map(|c| c.date).collect()
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell<'a>> {
        self.cells.iter().find(|c| c.date == date)
    }

    /// Cells grouped seven to a row, for grid rendering.
    pub fn weeks(&self) -> std::slice::Chunks<'_, DayCell<'a>> {
        self.cells.chunks(7)
    }
}

/// Assembles the visible dates and their active campaigns for one render.
pub fn build_window<'a>(
    campaigns: &'a [Campaign],
    view: &ViewState,
    today: NaiveDate,
) -> CalendarWindow<'a> {
    let focus = view.reference_date;
    let cells = view
        .visible_dates()
        .into_iter()
        .map(|date| DayCell {
            date,
            campaigns: campaigns_on_date(date, campaigns, &view.status_filter),
            in_focus_month: view.granularity != Granularity::Month
                || (date.year() == focus.year() && date.month() == focus.month()),
            is_today: date == today,
            is_past: is_past_date(date, today),
        })
        .collect();
    CalendarWindow {
        label: view.range_label(),
        granularity: view.granularity,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::dates::WeekStart;
    use crate::data::seed::seed_campaigns;
    use chrono::Duration;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn camp(id: &str, start: NaiveDate, end: NaiveDate, status: CampaignStatus) -> Campaign {
        Campaign::new(id, "Sale", "", start, end, status, "#4CAF50")
    }

    #[test]
    fn test_single_day_campaign_is_on_its_day() {
        let day = d(2024, 7, 5);
        let campaigns = vec![camp("1", day, day, CampaignStatus::Planned)];
        let found = campaigns_on_date(day, &campaigns, &StatusFilter::default());
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_interval_endpoints_inclusive() {
        let campaigns = vec![camp("1", d(2024, 6, 10), d(2024, 6, 20), CampaignStatus::Live)];
        let all = StatusFilter::default();
        assert_eq!(campaigns_on_date(d(2024, 6, 10), &campaigns, &all).len(), 1);
        assert_eq!(campaigns_on_date(d(2024, 6, 20), &campaigns, &all).len(), 1);
        assert!(campaigns_on_date(d(2024, 6, 9), &campaigns, &all).is_empty());
        assert!(campaigns_on_date(d(2024, 6, 21), &campaigns, &all).is_empty());
    }

    #[test]
    fn test_status_filter_restricts_results() {
        let campaigns = vec![
            camp("1", d(2024, 6, 1), d(2024, 6, 30), CampaignStatus::Live),
            camp("2", d(2024, 6, 1), d(2024, 6, 30), CampaignStatus::Planned),
        ];
        let live_only = StatusFilter::new([CampaignStatus::Live]);
        let found = campaigns_on_date(d(2024, 6, 15), &campaigns, &live_only);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
    }

    #[test]
    fn test_results_keep_input_order() {
        let campaigns = vec![
            camp("b", d(2024, 6, 1), d(2024, 6, 30), CampaignStatus::Live),
            camp("a", d(2024, 6, 1), d(2024, 6, 30), CampaignStatus::Live),
        ];
        let ids: Vec<_> = campaigns_on_date(d(2024, 6, 2), &campaigns, &StatusFilter::default())
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_filter_toggle_and_label() {
        let mut filter = StatusFilter::default();
        assert_eq!(filter.label(), "All Campaigns");
        filter.toggle(CampaignStatus::Live);
        filter.toggle(CampaignStatus::Planned);
        assert_eq!(filter.label(), "planned, live");
        filter.toggle(CampaignStatus::Live);
        assert!(!filter.contains(CampaignStatus::Live));
        assert!(!filter.allows(CampaignStatus::Live));
        filter.clear();
        assert!(filter.allows(CampaignStatus::Completed));
    }

    #[test]
    fn test_list_campaigns_sorted_by_start() {
        let seed = seed_campaigns();
        let titles: Vec<_> = list_campaigns(&seed, &StatusFilter::default())
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec![
                "Spring Collection",
                "Summer Sale",
                "Flash Sale",
                "Back to School",
                "Black Friday"
            ]
        );
    }

    #[test]
    fn test_list_campaigns_filtered_empty() {
        let seed = seed_campaigns();
        let filter = StatusFilter::new([CampaignStatus::Unknown]);
        assert!(list_campaigns(&seed, &filter).is_empty());
    }

    #[test]
    fn test_end_to_end_month_window_around_today() {
        let today = d(2026, 10, 17);
        let campaigns = vec![camp(
            "1",
            today - Duration::days(2),
            today + Duration::days(5),
            CampaignStatus::Live,
        )];
        let view = ViewState::new(today, Granularity::Month, WeekStart::Sunday);
        let window = build_window(&campaigns, &view, today);

        let today_cell = window.cell(today).unwrap();
        assert!(today_cell.is_today);
        assert!(today_cell.campaigns.iter().any(|c| c.id == "1"));

        let earlier = window.cell(today - Duration::days(10)).unwrap();
        assert!(earlier.campaigns.is_empty());
        assert!(earlier.is_past);
    }

    #[test]
    fn test_window_marks_adjacent_month_days() {
        let today = d(2026, 10, 17);
        let view = ViewState::new(today, Granularity::Month, WeekStart::Sunday);
        let window = build_window(&[], &view, today);
        assert!(!window.cell(d(2026, 9, 27)).unwrap().in_focus_month);
        assert!(window.cell(d(2026, 10, 1)).unwrap().in_focus_month);
        assert_eq!(window.label, "October 2026");
        assert_eq!(window.weeks().count(), 5);
    }

    #[test]
    fn test_week_window_all_in_focus() {
        let today = d(2026, 10, 1);
        let view = ViewState::new(today, Granularity::Week, WeekStart::Sunday);
        let window = build_window(&[], &view, today);
        assert!(window.cells.iter().all(|c| c.in_focus_month));
        assert_eq!(window.dates().len(), 7);
    }

    #[test]
    fn test_black_friday_spans_into_december_grid() {
        let seed = seed_campaigns();
        let today = d(2026, 10, 17);
        let view = ViewState::new(d(2024, 12, 10), Granularity::Month, WeekStart::Sunday);
        let window = build_window(&seed, &view, today);
        // Dec 2024 grid starts Sunday Dec 1; Nov 29-30 are not in it
        assert_eq!(window.cells[0].date, d(2024, 12, 1));
        let first = window.cell(d(2024, 12, 1)).unwrap();
        assert_eq!(first.campaigns[0].title, "Black Friday");
        assert!(window.cell(d(2024, 12, 3)).unwrap().campaigns.is_empty());
    }

    #[test]
    fn test_overflow_counts() {
        let day = d(2024, 6, 15);
        let campaigns: Vec<Campaign> = (0..5)
            .map(|i| camp(&i.to_string(), day, day, CampaignStatus::Live))
            .collect();
        let view = ViewState::new(day, Granularity::Day, WeekStart::Sunday);
        let window = build_window(&campaigns, &view, day);
        let cell = &window.cells[0];
        assert_eq!(cell.shown(3).len(), 3);
        assert_eq!(cell.overflow(3), 2);
        assert_eq!(cell.overflow(10), 0);
        assert_eq!(cell.shown(10).len(), 5);
    }

    #[test]
    fn test_empty_campaigns_produce_empty_cells() {
        let today = d(2026, 10, 17);
        let view = ViewState::new(today, Granularity::Week, WeekStart::Monday);
        let window = build_window(&[], &view, today);
        assert!(window.cells.iter().all(|c| c.campaigns.is_empty()));
    }
}
