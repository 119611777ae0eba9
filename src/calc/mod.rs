pub mod dates;
pub mod filter;
pub mod status;
pub mod window;

pub use dates::WeekStart;
pub use filter::{build_window, list_campaigns, CalendarWindow, DayCell, StatusFilter};
pub use status::{derive_temporal_status, summarize, StatusCounts};
pub use window::{Granularity, ViewState};
