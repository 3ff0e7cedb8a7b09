//! Tariffs screen rendering.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::view_state::{
    TariffScreenLayoutStyle, TariffsScreenType, TariffsViewState,
};

use super::{loading_paragraph, render_error_screen, theme, truncate_with_ellipsis};

pub fn render(frame: &mut Frame, area: Rect, state: &TariffsViewState, selected: usize) {
    if let Some(TariffsScreenType::Error(kind)) = state.requested_screen_type {
        render_error_screen(frame, area, kind);
        return;
    }
    if state.should_show_loading_screen() {
        frame.render_widget(loading_paragraph("Loading products..."), area);
        return;
    }

    match state.requested_layout {
        TariffScreenLayoutStyle::ListDetailPane => {
            let list_share = if state.requested_wide_list_layout { 50 } else { 40 };
            let [list_area, detail_area] = Layout::horizontal([
                Constraint::Percentage(list_share),
                Constraint::Percentage(100 - list_share),
            ])
            .areas(area);
            render_list(frame, list_area, state, selected);
            render_detail_pane(frame, detail_area, state);
        }
        _ => {
            if state.requested_screen_type == Some(TariffsScreenType::FullScreenDetail)
                && state.product_details.is_some()
            {
                render_detail_pane(frame, area, state);
            } else {
                render_list(frame, area, state, selected);
            }
        }
    }
}

fn render_list(frame: &mut Frame, area: Rect, state: &TariffsViewState, selected: usize) {
    let title = match &state.query_postcode {
        Some(postcode) => format!(" Tariffs ({postcode}) "),
        None => " Tariffs ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::COLOR_BORDER))
        .title(title);

    let text_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = state
        .product_summaries
        .iter()
        .enumerate()
        .map(|(index, product)| {
            let mut row = product.display_name.clone();
            if let Some(term) = product.term {
                row.push_str(&format!(" ({term}m)"));
            }
            // Wide rows carry the description inline.
            if state.requested_wide_list_layout {
                row.push_str("  ");
                row.push_str(&product.description);
            }
            let style = if index == selected {
                Style::default()
                    .fg(theme::COLOR_SELECTION)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::COLOR_ACCENT)
            };
            ListItem::new(Line::from(truncate_with_ellipsis(&row, text_width)).style(style))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_detail_pane(frame: &mut Frame, area: Rect, state: &TariffsViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::COLOR_BORDER))
        .title(" Product ");

    let Some(details) = &state.product_details else {
        let hint = Paragraph::new("Select a product to see its tariffs")
            .style(Style::default().fg(theme::COLOR_DIM))
            .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let mut lines = vec![
        Line::from(details.full_name.clone()).style(
            Style::default()
                .fg(theme::COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(details.description.clone()).style(Style::default().fg(theme::COLOR_DIM)),
        Line::from(""),
    ];
    for tariff in &details.tariffs {
        let region = tariff.retail_region().unwrap_or_default();
        lines.push(Line::from(format!(
            "{:>2}  {:>6.2} p/kWh  {:>6.2} p/day",
            region, tariff.unit_rate_inc_vat, tariff.standing_charge_inc_vat
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}
