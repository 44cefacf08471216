//! Terminal dashboard.
//!
//! Renders the controller's published state and forwards key presses:
//! - Loading indicator while a load is in flight
//! - Error message with a retry hint
//! - Empty state when nothing has been loaded
//! - One card per metric

mod app;
mod ui;

pub use app::{action_for, Action, DashboardApp, ViewState};
pub use ui::draw;
