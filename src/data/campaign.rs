use crate::data::persistence::Persistable;
use crate::error::ValidationError;
use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Author-assigned lifecycle status. Any unrecognised value in a data file
/// lands on `Unknown` rather than failing the load.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Planned,
    Live,
    Completed,
    #[serde(other)]
    #[value(skip)]
    Unknown,
}

impl CampaignStatus {
    /// The statuses a user can filter on, in display order.
    pub const SELECTABLE: [CampaignStatus; 3] = [
        CampaignStatus::Planned,
        CampaignStatus::Live,
        CampaignStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CampaignStatus::Planned => "planned",
            CampaignStatus::Live => "live",
            CampaignStatus::Completed => "completed",
            CampaignStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Campaign {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: CampaignStatus,
    #[serde(default)]
    pub color: String,
}

impl Campaign {
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: CampaignStatus,
        color: &str,
    ) -> Self {
        Campaign {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            start_date,
            end_date,
            status,
            color: color.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId {
                title: self.title.clone(),
            });
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle {
                id: self.id.clone(),
            });
        }
        if self.start_date > self.end_date {
            return Err(ValidationError::InvertedDates {
                id: self.id.clone(),
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Returns true if date is in [start_date, end_date] inclusive.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// "Jun 10 - Jun 20, 2024"
    pub fn date_range_label(&self) -> String {
        format!(
            "{} - {}",
            self.start_date.format("%b %-d"),
            self.end_date.format("%b %-d, %Y")
        )
    }
}

/// On-disk shape of `campaigns.yaml`.
#[derive(Serialize, Deserialize, Default, Debug)]
pub struct CampaignData {
    pub campaigns: Vec<Campaign>,
}

impl Persistable for CampaignData {
    fn filename() -> &'static str {
        "campaigns.yaml"
    }
}

/// Validated, immutable snapshot of the campaign set handed to the engine.
#[derive(Debug, Clone, Default)]
pub struct CampaignStore {
    campaigns: Vec<Campaign>,
}

impl CampaignStore {
    pub fn from_campaigns(campaigns: Vec<Campaign>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for c in &campaigns {
            c.validate()?;
            if !seen.insert(c.id.as_str()) {
                return Err(ValidationError::DuplicateId { id: c.id.clone() });
            }
        }
        Ok(CampaignStore { campaigns })
    }

    pub fn seed() -> Self {
        CampaignStore {
            campaigns: crate::data::seed::seed_campaigns(),
        }
    }

    /// Uses `campaigns.yaml` from the data directory when present, otherwise
    /// the built-in seed.
    pub fn load() -> Result<Self> {
        match CampaignData::try_load()? {
            Some(data) => {
                let store = CampaignStore::try_from(data)?;
                tracing::info!(count = store.len(), "loaded campaigns from data directory");
                Ok(store)
            }
            None => {
                tracing::info!("no campaigns.yaml found, using seed campaigns");
                Ok(CampaignStore::seed())
            }
        }
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn get(&self, id: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }
}

impl TryFrom<CampaignData> for CampaignStore {
    type Error = ValidationError;

    fn try_from(data: CampaignData) -> Result<Self, Self::Error> {
        CampaignStore::from_campaigns(data.campaigns)
    }
}
