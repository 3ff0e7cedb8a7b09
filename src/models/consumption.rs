//! Consumption domain models and the query filter driving usage fetches.

use chrono::{DateTime, Datelike, Days, Months, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// One metered interval, typically half-hourly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Consumption {
    /// Energy consumed in the interval, in kWh.
    pub kwh_consumed: f64,
    pub interval_start: DateTime<Utc>,
    pub interval_end: DateTime<Utc>,
}

/// Consumption cells grouped under a display heading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsumptionGroupedCells {
    /// Heading shown above the group, e.g. `Monday 05 Aug 2024`.
    pub title: String,
    pub consumptions: Vec<Consumption>,
}

impl ConsumptionGroupedCells {
    /// Total kWh across the group.
    pub fn total(&self) -> f64 {
        self.consumptions.iter().map(|c| c.kwh_consumed).sum()
    }
}

/// How the usage screen presents the selected period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionPresentationStyle {
    DayHalfHourly,
    WeekSevenDays,
    MonthWeeks,
    MonthThirtyDays,
    Year,
}

impl ConsumptionPresentationStyle {
    pub const ALL: [ConsumptionPresentationStyle; 5] = [
        ConsumptionPresentationStyle::DayHalfHourly,
        ConsumptionPresentationStyle::WeekSevenDays,
        ConsumptionPresentationStyle::MonthWeeks,
        ConsumptionPresentationStyle::MonthThirtyDays,
        ConsumptionPresentationStyle::Year,
    ];

    /// The next style in presentation order, wrapping at the end.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

/// The period and granularity of a consumption fetch.
///
/// Immutable: navigation produces a new filter with a shifted reference
/// point, leaving the original untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsumptionQueryFilter {
    pub presentation_style: ConsumptionPresentationStyle,
    /// Any instant inside the period of interest.
    pub reference_point: DateTime<Utc>,
}

impl ConsumptionQueryFilter {
    pub fn new(
        presentation_style: ConsumptionPresentationStyle,
        reference_point: DateTime<Utc>,
    ) -> Self {
        Self {
            presentation_style,
            reference_point,
        }
    }

    /// Today's half-hourly view.
    pub fn today() -> Self {
        Self::new(ConsumptionPresentationStyle::DayHalfHourly, Utc::now())
    }

    /// The same period presented with a different granularity.
    pub fn with_presentation_style(&self, style: ConsumptionPresentationStyle) -> Self {
        Self::new(style, self.reference_point)
    }

    /// The half-open UTC interval `[from, to)` this filter asks for.
    pub fn requested_period(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let day = start_of_day(self.reference_point);
        match self.presentation_style {
            ConsumptionPresentationStyle::DayHalfHourly => (day, add_days(day, 1)),
            ConsumptionPresentationStyle::WeekSevenDays => {
                (sub_days(day, 6), add_days(day, 1))
            }
            ConsumptionPresentationStyle::MonthWeeks
            | ConsumptionPresentationStyle::MonthThirtyDays => {
                let month = start_of_month(self.reference_point);
                (month, add_months(month, 1))
            }
            ConsumptionPresentationStyle::Year => {
                let year = start_of_year(self.reference_point);
                (year, add_months(year, 12))
            }
        }
    }

    /// A filter one period earlier.
    pub fn navigate_backward(&self) -> Self {
        Self::new(self.presentation_style, self.shift(-1))
    }

    /// A filter one period later.
    pub fn navigate_forward(&self) -> Self {
        Self::new(self.presentation_style, self.shift(1))
    }

    /// Whether the next period has started by `now`.
    pub fn can_navigate_forward(&self, now: DateTime<Utc>) -> bool {
        self.navigate_forward().requested_period().0 <= now
    }

    /// Human-readable heading for the selected period.
    pub fn period_description(&self) -> String {
        let (from, to) = self.requested_period();
        let last_day = sub_days(to, 1);
        match self.presentation_style {
            ConsumptionPresentationStyle::DayHalfHourly => {
                from.format("%A %d %b %Y").to_string()
            }
            ConsumptionPresentationStyle::WeekSevenDays => format!(
                "{} to {}",
                from.format("%d %b"),
                last_day.format("%d %b %Y")
            ),
            ConsumptionPresentationStyle::MonthWeeks
            | ConsumptionPresentationStyle::MonthThirtyDays => {
                from.format("%B %Y").to_string()
            }
            ConsumptionPresentationStyle::Year => from.format("%Y").to_string(),
        }
    }

    /// Group fetched cells under display headings, preserving input order.
    pub fn group_cells(&self, consumptions: &[Consumption]) -> Vec<ConsumptionGroupedCells> {
        let mut groups: Vec<ConsumptionGroupedCells> = Vec::new();
        for consumption in consumptions {
            let title = self.group_title(consumption.interval_start);
            match groups.last_mut() {
                Some(last) if last.title == title => {
                    last.consumptions.push(consumption.clone());
                }
                _ => groups.push(ConsumptionGroupedCells {
                    title,
                    consumptions: vec![consumption.clone()],
                }),
            }
        }
        groups
    }

    fn group_title(&self, at: DateTime<Utc>) -> String {
        match self.presentation_style {
            ConsumptionPresentationStyle::Year => at.format("%B %Y").to_string(),
            _ => at.format("%A %d %b %Y").to_string(),
        }
    }

    fn shift(&self, periods: i32) -> DateTime<Utc> {
        let point = self.reference_point;
        let shifted = match self.presentation_style {
            ConsumptionPresentationStyle::DayHalfHourly => shift_days(point, periods),
            ConsumptionPresentationStyle::WeekSevenDays => shift_days(point, periods * 7),
            ConsumptionPresentationStyle::MonthWeeks
            | ConsumptionPresentationStyle::MonthThirtyDays => shift_months(point, periods),
            ConsumptionPresentationStyle::Year => shift_months(point, periods * 12),
        };
        shifted.unwrap_or(point)
    }
}

impl Default for ConsumptionQueryFilter {
    fn default() -> Self {
        Self::today()
    }
}

/// Chart axis range for a set of cells: zero up to the ceiling of the
/// largest cell, or `0.0..=0.0` when there is nothing to plot.
pub fn consumption_range(consumptions: &[Consumption]) -> RangeInclusive<f64> {
    let max = consumptions
        .iter()
        .map(|c| c.kwh_consumed)
        .fold(0.0_f64, f64::max);
    0.0..=max.ceil()
}

fn start_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive().and_time(NaiveTime::MIN).and_utc()
}

fn start_of_month(at: DateTime<Utc>) -> DateTime<Utc> {
    let date = at.date_naive();
    let first = date
        .checked_sub_days(Days::new(date.day0() as u64))
        .unwrap_or(date);
    first.and_time(NaiveTime::MIN).and_utc()
}

fn start_of_year(at: DateTime<Utc>) -> DateTime<Utc> {
    let date = at.date_naive();
    let first = date
        .checked_sub_days(Days::new(date.ordinal0() as u64))
        .unwrap_or(date);
    first.and_time(NaiveTime::MIN).and_utc()
}

fn add_days(at: DateTime<Utc>, days: u64) -> DateTime<Utc> {
    at.checked_add_days(Days::new(days)).unwrap_or(at)
}

fn sub_days(at: DateTime<Utc>, days: u64) -> DateTime<Utc> {
    at.checked_sub_days(Days::new(days)).unwrap_or(at)
}

fn add_months(at: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    at.checked_add_months(Months::new(months)).unwrap_or(at)
}

fn shift_days(at: DateTime<Utc>, days: i32) -> Option<DateTime<Utc>> {
    if days >= 0 {
        at.checked_add_days(Days::new(days as u64))
    } else {
        at.checked_sub_days(Days::new((-days) as u64))
    }
}

fn shift_months(at: DateTime<Utc>, months: i32) -> Option<DateTime<Utc>> {
    if months >= 0 {
        at.checked_add_months(Months::new(months as u32))
    } else {
        at.checked_sub_months(Months::new((-months) as u32))
    }
}
