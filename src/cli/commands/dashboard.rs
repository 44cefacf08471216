//! Dashboard command implementation.

use std::time::Duration;

use tracing::info;

use crate::config::PulseConfig;
use crate::dashboard::DashboardController;
use crate::tui::DashboardApp;

/// Error type for the dashboard command.
#[derive(Debug, thiserror::Error)]
pub enum DashboardCommandError {
    /// The terminal could not be set up or drawn to.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Run the interactive dashboard until the user quits.
pub async fn dashboard(
    config: &PulseConfig,
    tick_rate: Duration,
    load_on_start: bool,
) -> Result<(), DashboardCommandError> {
    info!(?tick_rate, load_on_start, "Opening dashboard");

    let controller = DashboardController::from_config(config);
    let mut app = DashboardApp::new(controller, tick_rate)?;
    let result = app.run(load_on_start).await;
    drop(app);
    result?;

    info!("Dashboard closed");
    Ok(())
}
