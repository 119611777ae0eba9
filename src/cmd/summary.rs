use crate::calc::dates::parse_date;
use crate::calc::{summarize, StatusCounts};
use crate::data::{CampaignStatus, CampaignStore};
use crate::ui::palette::status_style;
use anyhow::Result;
use chrono::{Local, NaiveDate};

pub fn run(date: Option<&str>) -> Result<()> {
    let store = CampaignStore::load()?;
    let as_of = match date {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    let counts = summarize(store.campaigns(), as_of);
    write_summary(&counts, as_of, &mut std::io::stdout())
}

pub(crate) fn write_summary<W: std::io::Write>(
    counts: &StatusCounts,
    as_of: NaiveDate,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Campaign Summary as of {}", as_of.format("%Y-%m-%d"))?;
    writeln!(out, "---")?;
    writeln!(out, "{:<20} {}", "Live Promotions:", counts.live)?;
    writeln!(out, "{:<20} {}", "Planned:", counts.planned)?;
    writeln!(out, "{:<20} {}", "Completed:", counts.completed)?;
    if counts.unknown > 0 {
        let label = format!("{}:", status_style(CampaignStatus::Unknown).label);
        writeln!(out, "{:<20} {}", label, counts.unknown)?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} campaign(s)", counts.total())?;
    Ok(())
}
