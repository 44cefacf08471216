//! Dashboard rendering with ratatui.

use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::ViewState;
use crate::dashboard::LoadState;
use crate::models::SharedMetric;

/// Spinner frames for animation.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Height of one metric card.
const CARD_HEIGHT: u16 = 4;

/// Draw the entire dashboard.
pub fn draw(f: &mut Frame, state: &LoadState, view: &ViewState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Body
            Constraint::Length(3), // Footer
        ])
        .split(area);

    draw_header(f, main_chunks[0], state, view);
    draw_body(f, main_chunks[1], state, view);
    draw_footer(f, main_chunks[2], state);
}

/// Draw the header bar.
fn draw_header(f: &mut Frame, area: Rect, state: &LoadState, view: &ViewState) {
    let mut spans = vec![
        Span::styled(
            " ♥ ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "PulseTrack",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
    ];

    if state.is_loading {
        let spinner = SPINNER_FRAMES[view.spinner_frame % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            spinner,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(" syncing", Style::default().fg(Color::DarkGray)));
    } else if let Some(updated) = state.last_updated {
        let local = updated.with_timezone(&Local);
        spans.push(Span::styled("Updated ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            local.format("%H:%M:%S").to_string(),
            Style::default().fg(Color::Blue),
        ));
    } else {
        spans.push(Span::styled("Not loaded", Style::default().fg(Color::DarkGray)));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray))
            .border_set(symbols::border::ROUNDED),
    );

    f.render_widget(header, area);
}

/// Draw status messages above the metric cards.
fn draw_body(f: &mut Frame, area: Rect, state: &LoadState, view: &ViewState) {
    let status = status_lines(state, view);
    let mut constraints = vec![Constraint::Length(status.len() as u16)];
    constraints.extend(state.metrics.iter().map(|_| Constraint::Length(CARD_HEIGHT)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(2)
        .split(area);

    f.render_widget(
        Paragraph::new(status).alignment(Alignment::Center),
        chunks[0],
    );

    for (metric, chunk) in state.metrics.iter().zip(chunks.iter().skip(1)) {
        draw_metric_card(f, *chunk, metric);
    }
}

/// Loading, error and empty-state messages.
fn status_lines(state: &LoadState, view: &ViewState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if state.is_loading {
        let spinner = SPINNER_FRAMES[view.spinner_frame % SPINNER_FRAMES.len()];
        lines.push(Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Cyan)),
            Span::styled(" Updating metrics", Style::default().fg(Color::DarkGray)),
        ]));
    }

    if let Some(error) = state.error {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        if !state.is_loading {
            lines.push(Line::from(Span::styled(
                "Press r to retry",
                Style::default().fg(Color::Yellow),
            )));
        }
    }

    if state.is_empty() {
        lines.push(Line::from(Span::styled(
            "No metrics available",
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines
}

/// Draw one metric as a bordered card.
fn draw_metric_card(f: &mut Frame, area: Rect, metric: &SharedMetric) {
    let card = Paragraph::new(vec![
        Line::from(Span::styled(
            metric.value(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(format!(" {} ", metric.name()))
            .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .border_set(symbols::border::ROUNDED),
    );

    f.render_widget(card, area);
}

/// Draw the footer with the keys that apply right now.
fn draw_footer(f: &mut Frame, area: Rect, state: &LoadState) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let label = Style::default().fg(Color::DarkGray);

    let mut help = vec![Span::styled(" q", key), Span::styled(" quit  ", label)];
    if state.is_loading {
        help.push(Span::styled("c", key));
        help.push(Span::styled(" cancel", label));
    } else if state.error.is_some() {
        help.push(Span::styled("r", key));
        help.push(Span::styled(" retry", label));
    } else {
        help.push(Span::styled("r", key));
        help.push(Span::styled(" refresh", label));
    }

    let footer = Paragraph::new(Line::from(help)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray))
            .border_set(symbols::border::ROUNDED),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DashboardError;
    use crate::models::{HeartRate, Steps};
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn render(state: &LoadState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal
            .draw(|f| draw(f, state, &ViewState::default()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_empty_state() {
        let screen = render(&LoadState::default());
        assert!(screen.contains("No metrics available"));
        assert!(screen.contains("Not loaded"));
        assert!(screen.contains("refresh"));
    }

    #[test]
    fn test_loading_state() {
        let screen = render(&LoadState {
            is_loading: true,
            ..Default::default()
        });
        assert!(screen.contains("Updating metrics"));
        assert!(screen.contains("cancel"));
        assert!(!screen.contains("No metrics available"));
    }

    #[test]
    fn test_error_state() {
        let screen = render(&LoadState {
            error: Some(DashboardError::FailedToLoad),
            ..Default::default()
        });
        assert!(screen.contains("Failed to load data. Please try again."));
        assert!(screen.contains("Press r to retry"));
        assert!(!screen.contains("No metrics available"));
    }

    #[test]
    fn test_metric_cards() {
        let screen = render(&LoadState {
            metrics: vec![
                Arc::new(HeartRate::new(70)) as SharedMetric,
                Arc::new(Steps::new(5000)) as SharedMetric,
            ],
            last_updated: Some(Utc::now()),
            ..Default::default()
        });
        assert!(screen.contains("Heart Rate"));
        assert!(screen.contains("70 BPM"));
        assert!(screen.contains("Steps"));
        assert!(screen.contains("5000 steps"));
        assert!(screen.contains("Updated"));
    }
}
