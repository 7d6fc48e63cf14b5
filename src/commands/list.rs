/// Handler for listing entries, optionally as a chart

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::chart::{self, ChartArtifact, ChartOptions, ChartOutput};
use crate::commands::parse_optional_date;
use crate::config::AppConfig;
use crate::domain::{ListOptions, SortDirection, SortKey, Unit, UserId, WeightEntry};
use crate::storage::WeightStore;
use crate::AppError;

/// Parameters for listing entries
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    pub from: Option<String>,
    pub to: Option<String>,
    /// 0 means no limit
    pub limit: usize,
    /// "date" or "weight"
    pub sort: String,
    pub descending: bool,
    /// Only entries in this unit
    pub unit: Option<String>,
    pub owner: Option<UserId>,
    /// Produce a chart instead of a plain listing
    pub graph: bool,
    /// "terminal", "html" or "png"
    pub output: String,
    pub file: Option<String>,
    /// Directory chart files are written under
    pub chart_dir: Option<PathBuf>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            limit: 0,
            sort: "date".to_string(),
            descending: true,
            unit: None,
            owner: None,
            graph: false,
            output: "terminal".to_string(),
            file: None,
            chart_dir: None,
        }
    }
}

/// Response from listing entries
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub entries: Vec<WeightEntry>,
    /// Set when a chart was requested
    pub chart: Option<ChartArtifact>,
}

/// Translate user-facing list parameters into store options
pub fn build_list_options(config: &AppConfig, params: &ListParams) -> Result<ListOptions, AppError> {
    let from = parse_optional_date(config, params.from.as_deref())?;
    let to = parse_optional_date(config, params.to.as_deref())?;
    let sort_by: SortKey = params.sort.parse()?;
    let direction = if params.descending {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };

    let mut options = ListOptions::default()
        .between(from, to)
        .sorted_by(sort_by, direction)
        .with_limit(params.limit);

    if let Some(unit) = Unit::parse_optional(params.unit.as_deref().unwrap_or("").trim())? {
        options = options.with_unit(unit);
    }
    if let Some(owner) = params.owner {
        options = options.owned_by(owner);
    }

    Ok(options)
}

/// List entries, generating a chart from them when asked
pub fn list_entries<S: WeightStore>(
    store: &S,
    config: &AppConfig,
    params: ListParams,
) -> Result<ListResponse, AppError> {
    let options = build_list_options(config, &params)?;
    let entries = store.list(&options)?;
    tracing::debug!("Listed {} weight entries", entries.len());

    if !params.graph {
        return Ok(ListResponse {
            entries,
            chart: None,
        });
    }

    let mut chart_options = ChartOptions {
        title: ChartOptions::title_for(entries.len()),
        output: params.output.parse::<ChartOutput>()?,
        output_file: params.file.clone(),
        date_format: config.display_format,
        unit: config.default_unit,
        ..ChartOptions::default()
    };
    if let Some(dir) = params.chart_dir {
        chart_options.output_dir = dir;
    }

    let artifact = chart::generate_chart(entries.clone(), &chart_options)?;

    Ok(ListResponse {
        entries,
        chart: Some(artifact),
    })
}
