use crate::data::app_settings::SettingsWrapper;
use crate::data::seed::seed_campaigns;
use crate::data::{AppSettings, CampaignData, Persistable};
use anyhow::Result;
use std::path::Path;

pub fn run() -> Result<()> {
    let dir = crate::data::persistence::get_data_dir()?;
    run_in_dir(&dir)?;
    println!("Data files initialized in {}.", dir.display());
    Ok(())
}

/// Writes the default config and the seed campaign fixture into `dir`.
/// Existing files are left alone.
pub(crate) fn run_in_dir(dir: &Path) -> Result<()> {
    write_if_missing(
        dir,
        &SettingsWrapper {
            settings: AppSettings::default(),
        },
    )?;
    write_if_missing(
        dir,
        &CampaignData {
            campaigns: seed_campaigns(),
        },
    )?;
    Ok(())
}

fn write_if_missing<T: Persistable>(dir: &Path, data: &T) -> Result<()> {
    let path = dir.join(T::filename());
    if path.exists() {
        tracing::info!(path = %path.display(), "keeping existing file");
        return Ok(());
    }
    data.save_to(dir)?;
    tracing::info!(path = %path.display(), "wrote default file");
    Ok(())
}
