//! Chart payloads derived from fetched consumption.

use serde::{Deserialize, Serialize};

use super::{Consumption, ConsumptionPresentationStyle, Tariff};

/// Pre-computed bar chart inputs for the usage screen.
///
/// Labels, tooltips and values are parallel vectors: one entry per fetched
/// interval, in fetch order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarChartData {
    /// Short axis labels, e.g. `09:30` or `Mon`.
    pub labels: Vec<String>,
    /// Full interval descriptions shown on hover/selection.
    pub tooltips: Vec<String>,
    /// Bar heights in kWh.
    pub values: Vec<f64>,
}

impl BarChartData {
    /// Build chart inputs from fetched cells for the given granularity.
    pub fn from_consumptions(
        consumptions: &[Consumption],
        style: ConsumptionPresentationStyle,
    ) -> Self {
        let label_format = match style {
            ConsumptionPresentationStyle::DayHalfHourly => "%H:%M",
            ConsumptionPresentationStyle::WeekSevenDays => "%a",
            ConsumptionPresentationStyle::MonthWeeks
            | ConsumptionPresentationStyle::MonthThirtyDays => "%d",
            ConsumptionPresentationStyle::Year => "%b",
        };
        let labels = consumptions
            .iter()
            .map(|c| c.interval_start.format(label_format).to_string())
            .collect();
        let tooltips = consumptions
            .iter()
            .map(|c| {
                format!(
                    "{} - {}: {:.2} kWh",
                    c.interval_start.format("%d %b %H:%M"),
                    c.interval_end.format("%H:%M"),
                    c.kwh_consumed
                )
            })
            .collect();
        let values = consumptions.iter().map(|c| c.kwh_consumed).collect();
        Self {
            labels,
            tooltips,
            values,
        }
    }
}

/// Headline statistics for the fetched period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insights {
    /// Total kWh across the period.
    pub consumption_aggregate: f64,
    /// Number of days the fetched cells span.
    pub consumption_time_span_days: i64,
    /// Average kWh per spanned day.
    pub consumption_daily_average: f64,
    /// Estimated cost in pounds on the given tariff, when one is known.
    pub estimated_cost: Option<f64>,
}

impl Insights {
    /// Derive insights from fetched cells, or `None` when there are none.
    pub fn calculate(consumptions: &[Consumption], tariff: Option<&Tariff>) -> Option<Self> {
        let first = consumptions.first()?;
        let last = consumptions.last()?;

        let aggregate: f64 = consumptions.iter().map(|c| c.kwh_consumed).sum();
        let span_days = (last.interval_end - first.interval_start).num_days().max(1);
        let daily_average = aggregate / span_days as f64;
        let estimated_cost = tariff.map(|t| {
            let pence =
                aggregate * t.unit_rate_inc_vat + span_days as f64 * t.standing_charge_inc_vat;
            pence / 100.0
        });

        Some(Self {
            consumption_aggregate: aggregate,
            consumption_time_span_days: span_days,
            consumption_daily_average: daily_average,
            estimated_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn cell(start: DateTime<Utc>, kwh: f64) -> Consumption {
        Consumption {
            kwh_consumed: kwh,
            interval_start: start,
            interval_end: start + Duration::minutes(30),
        }
    }

    fn start(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 5, h, 0, 0).unwrap()
    }

    #[test]
    fn test_bar_chart_vectors_are_parallel() {
        let cells = vec![cell(start(9), 0.25), cell(start(10), 0.5)];
        let chart = BarChartData::from_consumptions(
            &cells,
            ConsumptionPresentationStyle::DayHalfHourly,
        );
        assert_eq!(chart.labels, vec!["09:00", "10:00"]);
        assert_eq!(chart.values, vec![0.25, 0.5]);
        assert_eq!(chart.tooltips.len(), 2);
        assert!(chart.tooltips[0].contains("0.25 kWh"));
    }

    #[test]
    fn test_bar_chart_week_labels_are_weekdays() {
        // 2024-08-05 is a Monday.
        let cells = vec![cell(start(0), 1.0)];
        let chart = BarChartData::from_consumptions(
            &cells,
            ConsumptionPresentationStyle::WeekSevenDays,
        );
        assert_eq!(chart.labels, vec!["Mon"]);
    }

    #[test]
    fn test_insights_for_empty_cells_is_none() {
        assert_eq!(Insights::calculate(&[], None), None);
    }

    #[test]
    fn test_insights_aggregate_and_daily_average() {
        let cells = vec![cell(start(9), 1.0), cell(start(10), 2.0)];
        let insights = Insights::calculate(&cells, None).unwrap();
        assert!((insights.consumption_aggregate - 3.0).abs() < f64::EPSILON);
        // Cells span less than a day; the span clamps to one day.
        assert_eq!(insights.consumption_time_span_days, 1);
        assert!((insights.consumption_daily_average - 3.0).abs() < f64::EPSILON);
        assert_eq!(insights.estimated_cost, None);
    }

    #[test]
    fn test_insights_cost_combines_unit_rate_and_standing_charge() {
        let tariff = Tariff {
            tariff_code: "E-1R-VAR-22-11-01-A".to_string(),
            display_name: "Flexible".to_string(),
            full_name: "Flexible Tariff".to_string(),
            unit_rate_inc_vat: 30.0,
            standing_charge_inc_vat: 50.0,
        };
        let cells = vec![cell(start(9), 10.0)];
        let insights = Insights::calculate(&cells, Some(&tariff)).unwrap();
        // 10 kWh * 30p + 1 day * 50p = 350p = 3.50 pounds.
        assert!((insights.estimated_cost.unwrap() - 3.5).abs() < 1e-9);
    }
}
