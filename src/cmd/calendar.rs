use crate::calc::dates::{parse_date, weekday_from_index};
use crate::calc::{
    build_window, derive_temporal_status, CalendarWindow, DayCell, Granularity, StatusFilter,
    ViewState,
};
use crate::data::{AppSettings, Campaign, CampaignStatus, CampaignStore};
use crate::ui::palette::status_style;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::io::Write;

/// Options for the `calendar` subcommand.
#[derive(Debug, Default)]
pub struct CalendarArgs {
    pub view: Option<Granularity>,
    pub date: Option<String>,
    pub weekday: Option<u8>,
    pub status: Vec<CampaignStatus>,
    pub json: bool,
}

pub fn run(args: &CalendarArgs) -> Result<()> {
    let store = CampaignStore::load()?;
    let settings = AppSettings::load()?;
    let today = Local::now().date_naive();

    let view = build_view(args, &settings, today)?;
    let window = build_window(store.campaigns(), &view, today);
    tracing::info!(label = %window.label, cells = window.cells.len(), "built calendar window");

    let mut out = std::io::stdout();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &window_json(&window, today))?;
        writeln!(out)?;
        Ok(())
    } else {
        write_window(&window, settings.max_per_cell, today, &mut out)
    }
}

/// A campaign as placed on a date. `status` is reconciled with the calendar;
/// `stored_status` is what the data file says.
#[derive(Debug, Serialize)]
struct CampaignJson<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: CampaignStatus,
    stored_status: CampaignStatus,
    color: &'a str,
}

impl<'a> CampaignJson<'a> {
    fn new(c: &'a Campaign, today: NaiveDate) -> Self {
        CampaignJson {
            id: &c.id,
            title: &c.title,
            description: &c.description,
            start_date: c.start_date,
            end_date: c.end_date,
            status: derive_temporal_status(c, today),
            stored_status: c.status,
            color: &c.color,
        }
    }
}

#[derive(Debug, Serialize)]
struct DayCellJson<'a> {
    date: NaiveDate,
    in_focus_month: bool,
    is_today: bool,
    is_past: bool,
    campaigns: Vec<CampaignJson<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WindowJson<'a> {
    label: &'a str,
    granularity: Granularity,
    cells: Vec<DayCellJson<'a>>,
}

pub(crate) fn window_json<'a>(window: &'a CalendarWindow<'a>, today: NaiveDate) -> WindowJson<'a> {
    let cell_json = |cell: &'a DayCell<'a>| DayCellJson {
        date: cell.date,
        in_focus_month: cell.in_focus_month,
        is_today: cell.is_today,
        is_past: cell.is_past,
        campaigns: cell
            .campaigns
            .iter()
            .map(|&c| CampaignJson::new(c, today))
            .collect(),
    };
    WindowJson {
        label: &window.label,
        granularity: window.granularity,
        cells: window.cells.iter().map(cell_json).collect(),
    }
}

pub(crate) fn build_view(
    args: &CalendarArgs,
    settings: &AppSettings,
    today: NaiveDate,
) -> Result<ViewState> {
    let reference = match &args.date {
        Some(raw) => parse_date(raw)?,
        None => today,
    };
    let mut view = ViewState::new(
        reference,
        args.view.unwrap_or(settings.default_view),
        settings.week_start,
    );
    view.status_filter = StatusFilter::new(args.status.iter().copied());
    if let Some(index) = args.weekday {
        view.set_weekday_filter(Some(weekday_from_index(index)?));
    }
    Ok(view)
}

pub(crate) fn write_window<W: std::io::Write>(
    window: &CalendarWindow,
    max_per_cell: usize,
    today: NaiveDate,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", window.label)?;
    writeln!(out, "---")?;
    for cell in &window.cells {
        let mut marker = String::new();
        if cell.is_today {
            marker.push_str("  [today]");
        }
        if !cell.in_focus_month {
            marker.push_str("  (other month)");
        }
        writeln!(out, "  {}{}", cell.date.format("%a %Y-%m-%d"), marker)?;
        for c in cell.shown(max_per_cell) {
            let style = status_style(derive_temporal_status(c, today));
            writeln!(out, "      {} {:<24} {}", style.glyph, c.title, style.label)?;
        }
        let more = cell.overflow(max_per_cell);
        if more > 0 {
            writeln!(out, "      +{} more", more)?;
        }
    }
    writeln!(out, "---")?;
    let busy = window.cells.iter().filter(|c| !c.campaigns.is_empty()).count();
    writeln!(
        out,
        "Total: {} day(s), {} with campaigns",
        window.cells.len(),
        busy
    )?;
    Ok(())
}
