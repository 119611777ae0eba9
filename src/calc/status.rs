use crate::data::{Campaign, CampaignStatus};
use chrono::NaiveDate;
use serde::Serialize;

/// True iff `date` falls on a day before `today`. Today itself is never past.
pub fn is_past_date(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

/// Reconciles the author-assigned status with the calendar.
///
/// A campaign whose end date has passed is completed no matter what was
/// stored. Otherwise a stored planned or live status stands while its dates
/// agree with it, and anything else falls back to the stored value. Every
/// view that shows a status goes through this function.
pub fn derive_temporal_status(campaign: &Campaign, today: NaiveDate) -> CampaignStatus {
    if is_past_date(campaign.end_date, today) {
        return CampaignStatus::Completed;
    }
    match campaign.status {
        CampaignStatus::Planned if campaign.start_date > today => CampaignStatus::Planned,
        CampaignStatus::Live if campaign.end_date >= today => CampaignStatus::Live,
        stored => stored,
    }
}

/// Per-status totals backing the summary counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub planned: usize,
    pub live: usize,
    pub completed: usize,
    pub unknown: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.planned + self.live + self.completed + self.unknown
    }

    pub fn get(&self, status: CampaignStatus) -> usize {
        match status {
            CampaignStatus::Planned => self.planned,
            CampaignStatus::Live => self.live,
            CampaignStatus::Completed => self.completed,
            CampaignStatus::Unknown => self.unknown,
        }
    }
}

pub fn summarize(campaigns: &[Campaign], today: NaiveDate) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for c in campaigns {
        match derive_temporal_status(c, today) {
            CampaignStatus::Planned => counts.planned += 1,
            CampaignStatus::Live => counts.live += 1,
            CampaignStatus::Completed => counts.completed += 1,
            CampaignStatus::Unknown => counts.unknown += 1,
        }
    }
    counts
}
