//! Rendering layer.
//!
//! Pure functions from view state to widgets: the render layer never
//! mutates state, it only reads the latest snapshot the controllers
//! published.

pub mod chart;
mod tariffs;
pub mod theme;
mod usage;

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppDestination};
use crate::view_state::SpecialErrorScreen;

/// Render one frame of the application.
pub fn draw(frame: &mut Frame, app: &App) {
    let [tabs_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_tabs(frame, tabs_area, app.destination());

    match app.destination() {
        AppDestination::Usage => {
            usage::render(frame, body_area, &app.usage_view_state());
        }
        AppDestination::Tariffs => {
            tariffs::render(
                frame,
                body_area,
                &app.tariffs_view_state(),
                app.selected_product(),
            );
        }
    }

    render_footer(frame, footer_area, app);
}

fn render_tabs(frame: &mut Frame, area: Rect, destination: AppDestination) {
    let titles: Vec<&str> = AppDestination::ALL.iter().map(|d| d.title()).collect();
    let selected = AppDestination::ALL
        .iter()
        .position(|d| *d == destination)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::COLOR_BORDER))
                .title(" wattscope "),
        )
        .style(Style::default().fg(theme::COLOR_DIM))
        .highlight_style(
            Style::default()
                .fg(theme::COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

/// The footer shows the head of the notification queue when one is
/// pending, otherwise the key hints.
fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let front_error = match app.destination() {
        AppDestination::Usage => app.usage_view_state().error_messages.first().cloned(),
        AppDestination::Tariffs => app.tariffs_view_state().error_messages.first().cloned(),
    };

    let line = match front_error {
        Some(error) => Line::from(format!("error: {}  (e to dismiss)", error.message))
            .style(Style::default().fg(theme::COLOR_ERROR)),
        None => Line::from(
            "tab switch | r reload | up/down select | enter open | esc close | left/right period | p style | q quit",
        )
        .style(Style::default().fg(theme::COLOR_DIM)),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Full-screen sticky error view. Requires an explicit dismissal key.
pub(crate) fn render_error_screen(frame: &mut Frame, area: Rect, kind: SpecialErrorScreen) {
    let message = match kind {
        SpecialErrorScreen::HttpError { status_code } => {
            format!("The server returned HTTP {status_code}.")
        }
        SpecialErrorScreen::NetworkError => {
            "We cannot reach the server. Check your connection and try again.".to_string()
        }
    };
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(message),
        Line::from(""),
        Line::from("Press d to dismiss and try again.")
            .style(Style::default().fg(theme::COLOR_DIM)),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::COLOR_ERROR))
            .title(" Something went wrong "),
    );
    frame.render_widget(paragraph, area);
}

pub(crate) fn loading_paragraph(text: &str) -> Paragraph<'static> {
    Paragraph::new(text.to_string())
        .style(Style::default().fg(theme::COLOR_LOADING))
        .alignment(Alignment::Center)
}

/// Truncate to the given display width, appending an ellipsis when text
/// was cut. Widths are measured in terminal cells, not bytes.
pub(crate) fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        assert_eq!(truncate_with_ellipsis("long product name", 8), "long pr…");
    }

    #[test]
    fn test_truncate_zero_width_is_empty() {
        assert_eq!(truncate_with_ellipsis("anything", 0), "");
    }
}
