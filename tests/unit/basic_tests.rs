/// Basic unit tests to verify core functionality
use chrono::NaiveDate;
use weight_tracker::*;

fn stored(id: i64, weight: f64, date: Option<NaiveDate>) -> WeightEntry {
    WeightEntry {
        id: EntryId(id),
        weight,
        date,
        unit: Some(Unit::Kg),
        note: None,
        owner: None,
    }
}

#[test]
fn test_entry_validation() {
    assert!(NewEntry::new(0.1, None, None, None).is_ok());
    assert_eq!(
        NewEntry::new(0.0, None, None, None),
        Err(DomainError::InvalidWeight(0.0))
    );
    assert!(NewEntry::new(f64::NAN, None, None, None).is_err());
    assert!(NewEntry::new(-70.0, None, Some(Unit::Lbs), None).is_err());
}

#[test]
fn test_unit_parsing() {
    assert_eq!(Unit::parse_optional("").unwrap(), None);
    assert_eq!(Unit::parse_optional("kg").unwrap(), Some(Unit::Kg));
    assert_eq!(
        Unit::parse_optional("stone"),
        Err(DomainError::InvalidUnit("stone".to_string()))
    );
}

#[test]
fn test_patch_sets_or_leaves_fields() {
    let existing = WeightEntry {
        note: Some("before".to_string()),
        ..stored(1, 80.0, NaiveDate::from_ymd_opt(2025, 1, 1))
    };

    let merged = EntryPatch::new(existing.id)
        .unit(Unit::Lbs)
        .note("")
        .apply_to(&existing)
        .unwrap();
    assert_eq!(merged.weight, 80.0);
    assert_eq!(merged.unit, Some(Unit::Lbs));
    assert_eq!(merged.note.as_deref(), Some("before"));

    assert!(EntryPatch::new(existing.id).is_empty());
    assert!(EntryPatch::new(existing.id)
        .weight(0.0)
        .apply_to(&existing)
        .is_err());
}

#[test]
fn test_statistics_example() {
    let entries = vec![
        stored(1, 75.5, NaiveDate::from_ymd_opt(2024, 1, 1)),
        stored(2, 76.0, NaiveDate::from_ymd_opt(2024, 1, 15)),
        stored(3, 75.2, NaiveDate::from_ymd_opt(2024, 2, 1)),
    ];
    let stats = WeightStatistics::from_entries(&entries);

    assert_eq!(stats.total_entries, 3);
    assert_eq!(stats.min_weight, 75.2);
    assert_eq!(stats.max_weight, 76.0);
    assert!((stats.average_weight - 75.5667).abs() < 1e-3);
    assert!((stats.weight_range - 0.8).abs() < 1e-9);
    assert_eq!(stats.span_days(), 31);
}

#[test]
fn test_statistics_order_independent_aggregates() {
    let mut entries = vec![
        stored(1, 70.0, NaiveDate::from_ymd_opt(2024, 3, 1)),
        stored(2, 72.0, None),
        stored(3, 71.0, NaiveDate::from_ymd_opt(2024, 3, 11)),
    ];
    let forward = WeightStatistics::from_entries(&entries);
    entries.reverse();
    let backward = WeightStatistics::from_entries(&entries);

    assert_eq!(forward.min_weight, backward.min_weight);
    assert_eq!(forward.max_weight, backward.max_weight);
    assert_eq!(forward.span_days(), backward.span_days());
    assert_eq!(forward.span_days(), 10);
    assert!((forward.average_weight - backward.average_weight).abs() < 1e-9);
}

#[test]
fn test_date_formats_from_environment() {
    let config = AppConfig::from_env_fn(|key| match key {
        "DATE_INPUT_FORMAT" => Some("mm/dd/yyyy".to_string()),
        "DATE_DISPLAY_FORMAT" => Some("yyyy-mm-dd".to_string()),
        _ => None,
    });

    let date = config.parse_date("12/31/2024").unwrap();
    assert_eq!(config.format_date(Some(date)), "2024-12-31");
    assert!(matches!(
        config.parse_date("31-12-2024"),
        Err(FormatError::InvalidDate { .. })
    ));
}

#[test]
fn test_user_names() {
    assert!(User::new("lior").is_ok());
    assert!(User::new("   ").is_err());
    assert!(User::new("two words").is_err());
}
