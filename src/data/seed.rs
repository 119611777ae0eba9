use crate::data::campaign::{Campaign, CampaignStatus};
use chrono::NaiveDate;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("seed dates are valid calendar dates")
}

/// The built-in campaign set used when no `campaigns.yaml` is present.
pub fn seed_campaigns() -> Vec<Campaign> {
    vec![
        Campaign::new(
            "1",
            "Summer Sale",
            "20% off on all summer products",
            d(2024, 6, 10),
            d(2024, 6, 20),
            CampaignStatus::Live,
            "#4CAF50",
        ),
        Campaign::new(
            "2",
            "Back to School",
            "Special discounts on school supplies",
            d(2024, 8, 15),
            d(2024, 8, 30),
            CampaignStatus::Planned,
            "#2196F3",
        ),
        Campaign::new(
            "3",
            "Spring Collection",
            "New spring items launch",
            d(2024, 3, 1),
            d(2024, 3, 15),
            CampaignStatus::Completed,
            "#9C27B0",
        ),
        Campaign::new(
            "4",
            "Flash Sale",
            "24-hour flash discounts",
            d(2024, 7, 5),
            d(2024, 7, 6),
            CampaignStatus::Planned,
            "#FF9800",
        ),
        Campaign::new(
            "5",
            "Black Friday",
            "Biggest sale of the year",
            d(2024, 11, 29),
            d(2024, 12, 2),
            CampaignStatus::Planned,
            "#607D8B",
        ),
    ]
}
