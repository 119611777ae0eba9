use crate::calc::{derive_temporal_status, list_campaigns, StatusFilter};
use crate::data::{Campaign, CampaignStatus, CampaignStore};
use crate::ui::palette::status_style;
use anyhow::Result;
use chrono::{Local, NaiveDate};

pub fn run(statuses: &[CampaignStatus]) -> Result<()> {
    let store = CampaignStore::load()?;
    let filter = StatusFilter::new(statuses.iter().copied());
    let today = Local::now().date_naive();
    let list = list_campaigns(store.campaigns(), &filter);
    write_campaigns(&list, &filter, today, &mut std::io::stdout())
}

pub(crate) fn write_campaigns<W: std::io::Write>(
    list: &[&Campaign],
    filter: &StatusFilter,
    today: NaiveDate,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Campaigns ({})", filter.label())?;
    writeln!(out, "---")?;
    if list.is_empty() {
        writeln!(out, "  No campaigns found with the selected filter")?;
    } else {
        writeln!(
            out,
            "  {:<4} {:<13} {:<22} {:<26} {}",
            "#", "Status", "Title", "Dates", "Description"
        )?;
    }
    let mut any_stale = false;
    for (i, c) in list.iter().enumerate() {
        let derived = derive_temporal_status(c, today);
        let style = status_style(derived);
        let stale = if derived != c.status {
            any_stale = true;
            "*"
        } else {
            ""
        };
        writeln!(
            out,
            "  {:<4} {:<13} {:<22} {:<26} {}",
            i + 1,
            format!("{} {}{}", style.glyph, style.label, stale),
            c.title,
            c.date_range_label(),
            c.description
        )?;
    }
    writeln!(out, "---")?;
    if any_stale {
        writeln!(out, "* stored status is out of date; shown status follows the calendar")?;
    }
    writeln!(out, "Total: {} campaign(s)", list.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::seed::seed_campaigns;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn render(campaigns: &[Campaign], filter: &StatusFilter, today: NaiveDate) -> String {
        let list = list_campaigns(campaigns, filter);
        let mut buf = Vec::new();
        write_campaigns(&list, filter, today, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_campaigns_empty() {
        let out = render(&[], &StatusFilter::default(), d(2026, 10, 17));
        assert!(out.contains("No campaigns found with the selected filter"));
        assert!(out.contains("Total: 0 campaign(s)"));
    }

    #[test]
    fn test_write_campaigns_sorted_by_start() {
        let seed = seed_campaigns();
        let out = render(&seed, &StatusFilter::default(), d(2024, 1, 1));
        let spring = out.find("Spring Collection").unwrap();
        let friday = out.find("Black Friday").unwrap();
        assert!(spring < friday);
        assert!(out.contains("Total: 5 campaign(s)"));
        assert!(out.contains("Mar 1 - Mar 15, 2024"));
    }

    #[test]
    fn test_write_campaigns_flags_stale_status() {
        let seed = seed_campaigns();
        let out = render(&seed, &StatusFilter::default(), d(2026, 10, 17));
        // Summer Sale was stored live but ended in 2024
        assert!(out.contains("Completed*"));
        assert!(out.contains("stored status is out of date"));
    }

    #[test]
    fn test_write_campaigns_no_stale_note_when_current() {
        let seed = seed_campaigns();
        let filter = StatusFilter::new([CampaignStatus::Live]);
        let out = render(&seed, &filter, d(2024, 6, 15));
        assert!(out.contains("Campaigns (live)"));
        assert!(out.contains("Summer Sale"));
        assert!(!out.contains("out of date"));
        assert!(out.contains("Total: 1 campaign(s)"));
    }
}
