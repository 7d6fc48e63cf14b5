/// Chart generation from stored entries to files on disk
use std::fs;

use chrono::NaiveDate;
use tempfile::tempdir;
use weight_tracker::chart::{self, TimeSeries, XAxis};
use weight_tracker::commands::{list_entries, ListParams};
use weight_tracker::*;

fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    for (weight, day) in [(75.5, 1), (76.0, 15), (75.2, 31)] {
        let entry = NewEntry::new(weight, NaiveDate::from_ymd_opt(2024, 1, day), Some(Unit::Kg), None)
            .unwrap();
        store.add(entry).unwrap();
    }
    store
}

#[test]
fn test_html_chart_written_under_chart_dir() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let store = seeded_store();
    let params = ListParams {
        graph: true,
        output: "html".to_string(),
        file: Some("monthly/january".to_string()),
        chart_dir: Some(temp_dir.path().to_path_buf()),
        ..ListParams::default()
    };

    let response = list_entries(&store, &AppConfig::default(), params).unwrap();
    let expected = temp_dir.path().join("monthly").join("january.html");
    assert_eq!(response.chart, Some(ChartArtifact::File(expected.clone())));

    let html = fs::read_to_string(expected).unwrap();
    assert!(html.contains("Weight Tracking Chart (3 entries)"));
    assert!(html.contains("Period: 01-01-2024 to 31-01-2024"));
    assert!(html.contains(r#""x":30.0"#));
}

#[test]
fn test_generated_file_name() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let store = seeded_store();
    let params = ListParams {
        graph: true,
        output: "png".to_string(),
        chart_dir: Some(temp_dir.path().to_path_buf()),
        ..ListParams::default()
    };

    let response = list_entries(&store, &AppConfig::default(), params).unwrap();
    let Some(ChartArtifact::File(path)) = response.chart else {
        panic!("expected a chart file");
    };

    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("weight-chart_"));
    assert!(name.ends_with(".html"));
    assert!(path.exists());
}

#[test]
fn test_unknown_output_type_rejected() {
    let store = seeded_store();
    let params = ListParams {
        graph: true,
        output: "pdf".to_string(),
        ..ListParams::default()
    };

    let err = list_entries(&store, &AppConfig::default(), params).unwrap_err();
    assert!(matches!(err, AppError::Chart(ChartError::UnsupportedOutput(_))));
}

#[test]
fn test_series_from_listed_entries() {
    let store = seeded_store();
    let mut entries = store.list(&ListOptions::default()).unwrap();
    chart::sort_chronologically(&mut entries);

    let series = TimeSeries::build(&entries, &ChartOptions::default()).unwrap();
    assert_eq!(series.axis, XAxis::DaysFromStart);
    let xs: Vec<f64> = series.points.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 14.0, 30.0]);
}
