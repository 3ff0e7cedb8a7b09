//! Chart presentation helpers.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Bar;

use crate::models::BarChartData;

use super::theme;

/// A centered chart heading.
pub fn chart_title(title: &str) -> Line<'static> {
    Line::from(title.to_string())
        .style(
            Style::default()
                .fg(theme::COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .centered()
}

/// Build chart bars colored by magnitude across the given spectrum.
///
/// Bar values are scaled to watt-hours so small half-hourly readings keep
/// integer resolution; the printed value stays in kWh.
pub fn consumption_bars(data: &BarChartData, max_kwh: f64, spectrum: &[Color]) -> Vec<Bar<'static>> {
    data.values
        .iter()
        .zip(data.labels.iter())
        .map(|(value, label)| {
            let color = theme::spectrum_color_for(spectrum, *value, max_kwh);
            Bar::default()
                .value((value * 1000.0).round() as u64)
                .text_value(format!("{value:.2}"))
                .label(Line::from(label.clone()))
                .style(Style::default().fg(color))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> BarChartData {
        BarChartData {
            labels: vec!["00:00".to_string(), "00:30".to_string()],
            tooltips: vec!["a".to_string(), "b".to_string()],
            values: vec![0.25, 1.0],
        }
    }

    #[test]
    fn test_bars_scale_to_watt_hours() {
        let spectrum = theme::freezing_blue_spectrum();
        let bars = consumption_bars(&sample_data(), 1.0, &spectrum);
        assert_eq!(bars.len(), 2);
    }

    #[test]
    fn test_chart_title_is_centered() {
        let line = chart_title("Consumption August 2024");
        assert_eq!(line.alignment, Some(ratatui::layout::Alignment::Center));
    }
}
