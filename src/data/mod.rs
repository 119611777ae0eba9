pub mod app_settings;
pub mod campaign;
pub mod persistence;
pub mod seed;

pub use app_settings::AppSettings;
pub use campaign::{Campaign, CampaignData, CampaignStatus, CampaignStore};
pub use persistence::Persistable;
