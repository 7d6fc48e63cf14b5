/// Time-normalized series for line chart renderers
///
/// When at least one entry carries a real date, x is the number of days
/// since the earliest dated entry, so points keep their true spacing in
/// time. Without any real dates every entry becomes an ordinal category.

use chrono::NaiveDate;
use serde::Serialize;

use crate::chart::{ChartError, ChartOptions};
use crate::domain::WeightEntry;

/// How the x coordinate of a series is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XAxis {
    /// One category per entry, in input order
    Ordinal,
    /// Continuous days elapsed since the earliest date
    DaysFromStart,
}

impl XAxis {
    pub fn label(&self) -> &'static str {
        match self {
            XAxis::Ordinal => "Entry",
            XAxis::DaysFromStart => "Days from Start",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: f64,
    pub weight: f64,
    /// Category name or formatted date
    pub label: String,
    pub date: Option<NaiveDate>,
}

/// Everything a renderer needs to draw the weight line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub title: String,
    pub subtitle: String,
    pub axis: XAxis,
    pub unit: String,
    pub points: Vec<SeriesPoint>,
}

impl TimeSeries {
    pub fn build(entries: &[WeightEntry], options: &ChartOptions) -> Result<Self, ChartError> {
        if entries.is_empty() {
            return Err(ChartError::NoData);
        }

        let mut dated: Vec<(NaiveDate, &WeightEntry)> = entries
            .iter()
            .filter_map(|e| e.valid_date().map(|d| (d, e)))
            .collect();
        dated.sort_by_key(|(date, _)| *date);

        let (axis, points, subtitle) = match (dated.first(), dated.last()) {
            (Some(&(start, _)), Some(&(end, _))) => {
                let points = dated
                    .iter()
                    .map(|&(date, entry)| SeriesPoint {
                        x: (date - start).num_days() as f64,
                        weight: entry.weight,
                        label: options.date_format.format(date),
                        date: Some(date),
                    })
                    .collect();
                let subtitle = format!(
                    "Period: {} to {}",
                    options.date_format.format(start),
                    options.date_format.format(end)
                );
                (XAxis::DaysFromStart, points, subtitle)
            }
            _ => {
                let points = entries
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| SeriesPoint {
                        x: i as f64,
                        weight: entry.weight,
                        label: format!("Entry {}", i + 1),
                        date: None,
                    })
                    .collect();
                (XAxis::Ordinal, points, format!("Total entries: {}", entries.len()))
            }
        };

        Ok(Self {
            title: options.title.clone(),
            subtitle,
            axis,
            unit: options.unit.to_string(),
            points,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest and largest x, or `None` for an empty series
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        bounds(self.points.iter().map(|p| p.x))
    }

    /// Smallest and largest weight, or `None` for an empty series
    pub fn weight_bounds(&self) -> Option<(f64, f64)> {
        bounds(self.points.iter().map(|p| p.weight))
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
