use crate::calc::{Granularity, WeekStart};
use crate::data::persistence::Persistable;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Campaigns shown in a calendar cell before collapsing into "+N more".
pub const DEFAULT_MAX_PER_CELL: usize = 3;

/// Largest cap a grid cell can usefully show.
pub const MAX_PER_CELL_LIMIT: usize = 20;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub week_start: WeekStart,
    pub max_per_cell: usize,
    pub default_view: Granularity,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            week_start: WeekStart::Sunday,
            max_per_cell: DEFAULT_MAX_PER_CELL,
            default_view: Granularity::Month,
        }
    }
}

/// Wrapper that reads the `settings` key from config.yaml.
#[derive(Serialize, Deserialize, Default, Debug)]
pub(crate) struct SettingsWrapper {
    #[serde(default)]
    pub(crate) settings: AppSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
}

impl AppSettings {
    pub fn load() -> Result<Self> {
        let settings = SettingsWrapper::load()?.settings.sanitized();
        tracing::debug!(?settings, "loaded settings");
        Ok(settings)
    }

    /// A zero cap would hide every campaign behind "+N more"; caps above
    /// `MAX_PER_CELL_LIMIT` are clamped to it.
    fn sanitized(mut self) -> Self {
        if self.max_per_cell == 0 {
            tracing::warn!(
                "max_per_cell of 0 is not usable, falling back to {}",
                DEFAULT_MAX_PER_CELL
            );
            self.max_per_cell = DEFAULT_MAX_PER_CELL;
        } else if self.max_per_cell > MAX_PER_CELL_LIMIT {
            tracing::warn!(
                "max_per_cell of {} is too large, clamping to {}",
                self.max_per_cell,
                MAX_PER_CELL_LIMIT
            );
            self.max_per_cell = MAX_PER_CELL_LIMIT;
        }
        self
    }
}
