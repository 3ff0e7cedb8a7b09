//! Usage screen rendering.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{BarChart, BarGroup, Block, Borders, Paragraph};
use ratatui::Frame;

use crate::view_state::{
    breakpoints, RequestedChartLayout, UsageScreenType, UsageViewState,
};

use super::{chart, loading_paragraph, render_error_screen, theme};

pub fn render(frame: &mut Frame, area: Rect, state: &UsageViewState) {
    if let UsageScreenType::Error(kind) = state.requested_screen_type {
        render_error_screen(frame, area, kind);
        return;
    }
    if state.is_loading && state.bar_chart_data.is_none() {
        frame.render_widget(loading_paragraph("Loading consumption..."), area);
        return;
    }

    let chart_height = match state.requested_chart_layout {
        RequestedChartLayout::Portrait => area.height.saturating_sub(6),
        RequestedChartLayout::Landscape {
            requested_max_height,
        } => {
            let rows = (requested_max_height / breakpoints::CELL_HEIGHT_DP) as u16;
            rows.min(area.height.saturating_sub(6))
        }
    };

    let [title_area, chart_area, insights_area, groups_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(chart_height.max(3)),
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .areas(area);

    render_title(frame, title_area, state);
    render_chart(frame, chart_area, state);
    render_insights(frame, insights_area, state);
    render_groups(frame, groups_area, state);
}

fn render_title(frame: &mut Frame, area: Rect, state: &UsageViewState) {
    let period = state
        .consumption_query_filter
        .as_ref()
        .map(|filter| filter.period_description())
        .unwrap_or_default();
    let mut title = format!("Consumption {period}");
    if state.is_demo_mode == Some(true) {
        title.push_str("  [demo]");
    }
    frame.render_widget(Paragraph::new(chart::chart_title(&title)), area);
}

fn render_chart(frame: &mut Frame, area: Rect, state: &UsageViewState) {
    let Some(data) = &state.bar_chart_data else {
        return;
    };
    let max_kwh = *state.consumption_range.end();
    let spectrum = theme::freezing_blue_spectrum();
    let bars = chart::consumption_bars(data, max_kwh, &spectrum);

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::COLOR_BORDER)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(1)
        .max((max_kwh * 1000.0) as u64);
    frame.render_widget(chart, area);
}

fn render_insights(frame: &mut Frame, area: Rect, state: &UsageViewState) {
    let Some(insights) = &state.insights else {
        return;
    };
    let mut summary = format!(
        "Total {:.2} kWh over {} day(s), {:.2} kWh/day",
        insights.consumption_aggregate,
        insights.consumption_time_span_days,
        insights.consumption_daily_average
    );
    if let Some(cost) = insights.estimated_cost {
        summary.push_str(&format!(", about GBP {cost:.2}"));
    }
    frame.render_widget(
        Paragraph::new(summary).style(Style::default().fg(theme::COLOR_DIM)),
        area,
    );
}

/// Grouped day/month cells flow into the derived number of columns.
fn render_groups(frame: &mut Frame, area: Rect, state: &UsageViewState) {
    if state.consumption_grouped_cells.is_empty() || area.height == 0 {
        return;
    }
    let columns = state.requested_usage_columns.max(1);
    let constraints = vec![Constraint::Ratio(1, columns as u32); columns];
    let column_areas = Layout::horizontal(constraints).split(area);

    let per_column = state.consumption_grouped_cells.len().div_ceil(columns);
    for (column_area, chunk) in column_areas
        .iter()
        .zip(state.consumption_grouped_cells.chunks(per_column))
    {
        let lines: Vec<Line> = chunk
            .iter()
            .map(|group| {
                Line::from(format!("{}  {:.2} kWh", group.title, group.total()))
                    .style(Style::default().fg(theme::COLOR_ACCENT))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), *column_area);
    }
}
