use crate::data::CampaignStatus;
use ratatui::style::Color;

/// Display attributes for one campaign status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusStyle {
    pub label: &'static str,
    pub glyph: &'static str,
    pub color: Color,
}

const STATUS_STYLES: [(CampaignStatus, StatusStyle); 3] = [
    (
        CampaignStatus::Planned,
        StatusStyle {
            label: "Planned",
            glyph: "+",
            color: Color::Blue,
        },
    ),
    (
        CampaignStatus::Live,
        StatusStyle {
            label: "Live",
            glyph: "✓",
            color: Color::Green,
        },
    ),
    (
        CampaignStatus::Completed,
        StatusStyle {
            label: "Completed",
            glyph: "✗",
            color: Color::Magenta,
        },
    ),
];

/// Style for statuses without a table entry, i.e. `Unknown`.
const NEUTRAL: StatusStyle = StatusStyle {
    label: "Unknown",
    glyph: "·",
    color: Color::DarkGray,
};

pub fn status_style(status: CampaignStatus) -> StatusStyle {
    STATUS_STYLES
        .iter()
        .find(|(s, _)| *s == status)
        .map(|(_, style)| *style)
        .unwrap_or(NEUTRAL)
}

/// Parses a campaign's `#RRGGBB` colour hint.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// The campaign's own colour, or its status colour when the hint is unusable.
pub fn campaign_color(color: &str, status: CampaignStatus) -> Color {
    parse_hex_color(color).unwrap_or_else(|| status_style(status).color)
}
