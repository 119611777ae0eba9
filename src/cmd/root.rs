use crate::data::{AppSettings, CampaignStore};
use crate::ui::calendar_view::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::Local;

pub fn run() -> Result<()> {
    let store = CampaignStore::load()?;
    let settings = AppSettings::load()?;
    tracing::info!(campaigns = store.len(), "starting calendar");

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    let mut app = App::new(&store, settings, today);

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    result
}
