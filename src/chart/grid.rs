/// Terminal character grid
///
/// Plots entries on a fixed 10 row grid. Columns are entry positions in
/// chronological order, capped at 20; later entries are listed below the
/// grid but not plotted.

use std::fmt;

use crate::chart::{sort_chronologically, ChartError, ChartOptions};
use crate::domain::WeightEntry;

pub const GRID_ROWS: usize = 10;
pub const GRID_MAX_COLUMNS: usize = 20;

const POINT: char = '●';

#[derive(Debug, Clone, PartialEq)]
pub struct GridChart {
    pub title: String,
    pub entry_count: usize,
    /// Padded lower bound of the weight axis
    pub min_weight: f64,
    /// Padded upper bound of the weight axis
    pub max_weight: f64,
    pub unit_label: String,
    /// `cells[row][col]`; row 0 is the top of the chart
    pub cells: Vec<Vec<bool>>,
    /// One formatted line per entry, in plotting order
    pub listing: Vec<String>,
}

impl GridChart {
    /// Lay out entries in chronological order, whatever order they arrive in
    pub fn build(entries: &[WeightEntry], options: &ChartOptions) -> Result<Self, ChartError> {
        let mut sorted = entries.to_vec();
        sort_chronologically(&mut sorted);
        let entries = sorted.as_slice();
        let first = entries.first().ok_or(ChartError::NoData)?;

        let (mut min_weight, mut max_weight) = entries
            .iter()
            .fold((first.weight, first.weight), |(lo, hi), e| {
                (lo.min(e.weight), hi.max(e.weight))
            });

        let mut range = max_weight - min_weight;
        if range == 0.0 {
            range = 1.0;
        }
        let padding = range * 0.1;
        min_weight -= padding;
        max_weight += padding;
        let range = max_weight - min_weight;

        let width = entries.len().min(GRID_MAX_COLUMNS);
        let mut cells = vec![vec![false; width]; GRID_ROWS];

        for (col, entry) in entries.iter().take(width).enumerate() {
            let offset = (max_weight - entry.weight) / range * (GRID_ROWS - 1) as f64;
            let row = offset as usize;
            if offset >= 0.0 && row < GRID_ROWS {
                cells[row][col] = true;
            }
        }

        let listing = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let unit = entry.unit.unwrap_or(options.unit);
                let mut line = format!(
                    "{:2}. {}: {:.1} {}",
                    i + 1,
                    options.date_format.format_optional(entry.valid_date()),
                    entry.weight,
                    unit
                );
                if let Some(note) = entry.note.as_deref().filter(|n| !n.is_empty()) {
                    line.push_str(&format!(" ({})", note));
                }
                line
            })
            .collect();

        Ok(Self {
            title: options.title.clone(),
            entry_count: entries.len(),
            min_weight,
            max_weight,
            unit_label: options.unit.to_string(),
            cells,
            listing,
        })
    }

    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Weight shown next to the given row
    pub fn row_label(&self, row: usize) -> f64 {
        let range = self.max_weight - self.min_weight;
        self.max_weight - (row as f64 / (GRID_ROWS - 1) as f64) * range
    }

    pub fn is_plotted(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }
}

impl fmt::Display for GridChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.title)?;
        writeln!(f, "Weight Chart ({} entries)", self.entry_count)?;
        writeln!(
            f,
            "Range: {:.1} - {:.1} {}",
            self.min_weight, self.max_weight, self.unit_label
        )?;
        writeln!(f)?;

        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{:6.1} |", self.row_label(row))?;
            for &plotted in cells {
                write!(f, "{}", if plotted { POINT } else { ' ' })?;
            }
            writeln!(f)?;
        }
        writeln!(f, "       +{}", "-".repeat(self.width()))?;

        writeln!(f)?;
        writeln!(f, "Weight Entries:")?;
        for line in &self.listing {
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }
}
