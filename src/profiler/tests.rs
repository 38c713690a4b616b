#![expect(clippy::unwrap_used, clippy::indexing_slicing)]
use super::*;
use crate::dataset::{Cell, from_rows};
use crate::error::DecayError;
use chrono::{Months, NaiveDate, TimeZone as _};
use polars::prelude::*;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[test]
fn test_null_percent_counts_every_cell() -> Result<()> {
    let df = DataFrame::new(vec![
        Column::new("a".into(), vec![Some(1i64), None, Some(3)]),
        Column::new("b".into(), vec![Some("x"), Some("y"), None]),
    ])?;
    let report = profile(&df, fixed_now(), &ProfileOptions::default())?;

    assert!(close(report.null_percent, 200.0 / 6.0), "got {}", report.null_percent);
    // 33% sits between the fill band (< 20) and the drop band (> 50).
    assert!(!report.recommendations.contains(&Recommendation::FillMissingValues));
    assert!(!report.recommendations.contains(&Recommendation::DropHighNullColumns));
    Ok(())
}

#[test]
fn test_duplicate_percent_counts_non_first_occurrences() -> Result<()> {
    let df = DataFrame::new(vec![
        Column::new("k".into(), vec!["A", "B", "A", "C", "A"]),
        Column::new("v".into(), vec![1i64, 2, 1, 3, 1]),
    ])?;
    let report = profile(&df, fixed_now(), &ProfileOptions::default())?;

    // Rows 3 and 5 repeat row 1; the first "A" row is not a duplicate.
    assert!(close(report.duplicate_percent, 40.0), "got {}", report.duplicate_percent);
    assert!(report.recommendations.contains(&Recommendation::RemoveDuplicateRows));
    Ok(())
}

#[test]
fn test_outdated_percent_uses_injected_now() -> Result<()> {
    let today = fixed_now().date_naive();
    let three_years_ago = today.checked_sub_months(Months::new(36)).unwrap();
    let one_year_ago = today.checked_sub_months(Months::new(12)).unwrap();
    let df = from_rows(
        &["seen"],
        &[
            vec![Cell::from(today)],
            vec![Cell::from(three_years_ago)],
            vec![Cell::from(one_year_ago)],
        ],
    )?;

    let report = profile(&df, fixed_now(), &ProfileOptions::default())?;
    assert!(close(report.outdated_percent, 100.0 / 3.0), "got {}", report.outdated_percent);
    assert!(report.columns[0].date_column);

    // A longer threshold makes nothing stale.
    let lenient = ProfileOptions {
        staleness_years: 5,
        ..ProfileOptions::default()
    };
    let report = profile(&df, fixed_now(), &lenient)?;
    assert!(close(report.outdated_percent, 0.0));
    Ok(())
}

#[test]
fn test_outdated_row_counts_once_across_date_columns() -> Result<()> {
    let old = NaiveDate::from_ymd_opt(2015, 6, 1).unwrap();
    let recent = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let df = from_rows(
        &["created", "updated"],
        &[
            vec![Cell::from(old), Cell::from(old)],
            vec![Cell::from(recent), Cell::from(recent)],
        ],
    )?;
    let report = profile(&df, fixed_now(), &ProfileOptions::default())?;
    assert!(close(report.outdated_percent, 50.0));
    Ok(())
}

#[test]
fn test_datetime_columns_participate() -> Result<()> {
    let old = NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    let df = from_rows(&["ts"], &[vec![Cell::DateTime(old)], vec![Cell::Null]])?;
    let report = profile(&df, fixed_now(), &ProfileOptions::default())?;
    assert!(close(report.outdated_percent, 50.0));
    Ok(())
}

#[test]
fn test_mixed_date_and_datetime_cells_stay_temporal() -> Result<()> {
    let old_day = NaiveDate::from_ymd_opt(2019, 4, 2).unwrap();
    let recent = NaiveDate::from_ymd_opt(2026, 2, 1)
        .unwrap()
        .and_hms_opt(9, 15, 0)
        .unwrap();
    let df = from_rows(&["seen"], &[vec![Cell::Date(old_day)], vec![Cell::DateTime(recent)]])?;
    let report = profile(&df, fixed_now(), &ProfileOptions::default())?;
    assert_eq!(report.columns[0].kind, ColumnKind::Temporal);
    assert!(close(report.outdated_percent, 50.0));
    Ok(())
}

#[test]
fn test_name_hinted_text_dates_are_opt_in() -> Result<()> {
    let df = DataFrame::new(vec![Column::new(
        "last_updated".into(),
        vec!["2019-01-05", "2026-02-01", "2025-12-24"],
    )])?;

    let declared = profile(&df, fixed_now(), &ProfileOptions::default())?;
    assert!(close(declared.outdated_percent, 0.0));
    assert!(!declared.columns[0].date_column);

    let hinted = ProfileOptions {
        date_detection: DateDetection::NameHinted,
        ..ProfileOptions::default()
    };
    let report = profile(&df, fixed_now(), &hinted)?;
    assert!(close(report.outdated_percent, 100.0 / 3.0));
    assert!(report.columns[0].date_column);
    Ok(())
}

#[test]
fn test_case_variants_flag_whole_column() -> Result<()> {
    let df = DataFrame::new(vec![
        Column::new("city".into(), vec!["NY", "ny", "LA"]),
        Column::new("n".into(), vec![1i64, 2, 3]),
    ])?;
    let report = profile(&df, fixed_now(), &ProfileOptions::default())?;

    let city = &report.columns[0];
    assert!(city.inconsistent);
    assert_eq!(city.distinct_count, 3);
    assert!(!report.columns[1].inconsistent);
    assert!(close(report.inconsistency_percent, 50.0));
    assert!(report.recommendations.contains(&Recommendation::StandardizeTextCasing));
    Ok(())
}

#[test]
fn test_whitespace_variants_are_inconsistent() -> Result<()> {
    let df = DataFrame::new(vec![Column::new("code".into(), vec!["A1", "A1 ", "B2"])])?;
    let report = profile(&df, fixed_now(), &ProfileOptions::default())?;
    assert!(close(report.inconsistency_percent, 100.0));
    Ok(())
}

#[test]
fn test_consistent_text_is_not_flagged_by_default() -> Result<()> {
    let df = DataFrame::new(vec![Column::new("email".into(), vec!["a@x.io", "b@x.io", "c@x.io"])])?;
    let report = profile(&df, fixed_now(), &ProfileOptions::default())?;
    assert!(close(report.inconsistency_percent, 0.0));

    let strict = ProfileOptions {
        cardinality_limit: Some(CardinalityLimit::default()),
        ..ProfileOptions::default()
    };
    let report = profile(&df, fixed_now(), &strict)?;
    assert!(close(report.inconsistency_percent, 100.0));
    Ok(())
}

#[test]
fn test_recommendations_keep_table_order() -> Result<()> {
    let df = DataFrame::new(vec![
        Column::new("a".into(), vec![None, None, None, Some(1.0)]),
        Column::new("b".into(), vec![None::<f64>; 4]),
    ])?;
    let report = profile(&df, fixed_now(), &ProfileOptions::default())?;

    assert!(close(report.null_percent, 87.5));
    assert!(close(report.duplicate_percent, 50.0));
    assert!(close(report.decay_score, 65.625));
    assert_eq!(
        report.recommendations,
        vec![
            Recommendation::DropHighNullColumns,
            Recommendation::RemoveDuplicateRows,
        ]
    );
    Ok(())
}

#[test]
fn test_decay_score_matches_formula() -> Result<()> {
    let df = DataFrame::new(vec![
        Column::new("city".into(), vec![Some("NY"), Some("ny"), None, Some("NY")]),
        Column::new("n".into(), vec![Some(1i64), Some(2), Some(3), Some(1)]),
    ])?;
    let report = profile(&df, fixed_now(), &ProfileOptions::default())?;
    let expected = (100.0 - 0.25 * report.components().sum()).max(0.0);
    assert!(close(report.decay_score, expected));
    Ok(())
}

#[test]
fn test_empty_frames_yield_degenerate_report() -> Result<()> {
    let no_columns = DataFrame::empty();
    let no_rows = DataFrame::new(vec![Column::new("a".into(), Vec::<String>::new())])?;

    for df in [no_columns, no_rows] {
        let report = profile(&df, fixed_now(), &ProfileOptions::default())?;
        assert!(close(report.null_percent, 0.0));
        assert!(close(report.duplicate_percent, 0.0));
        assert!(close(report.outdated_percent, 0.0));
        assert!(close(report.inconsistency_percent, 0.0));
        assert!(close(report.decay_score, 100.0));
        assert!(report.recommendations.is_empty());
    }
    Ok(())
}

#[test]
fn test_unknown_columns_only_contribute_nulls() -> Result<()> {
    let df = DataFrame::new(vec![Column::new("flag".into(), vec![Some(true), None])])?;
    let report = profile(&df, fixed_now(), &ProfileOptions::default())?;
    assert_eq!(report.columns[0].kind, ColumnKind::Unknown);
    assert!(close(report.null_percent, 50.0));
    assert!(close(report.inconsistency_percent, 0.0));
    Ok(())
}

#[test]
fn test_out_of_range_threshold_is_invalid_input() {
    let df = DataFrame::empty();
    let opts = ProfileOptions {
        staleness_years: u32::MAX,
        ..ProfileOptions::default()
    };
    let err = profile(&df, fixed_now(), &opts).unwrap_err();
    assert!(matches!(err, DecayError::InvalidInput(_)));
}

#[test]
fn test_report_display_rounds_to_two_decimals() -> Result<()> {
    let df = DataFrame::new(vec![
        Column::new("a".into(), vec![Some(1i64), None, Some(3)]),
        Column::new("b".into(), vec![Some(1i64), Some(2), None]),
    ])?;
    let report = profile(&df, fixed_now(), &ProfileOptions::default())?;
    let text = report.to_string();
    assert!(text.contains("Null %: 33.33%"), "{text}");
    assert!(text.contains("Decay Score: 91.67"), "{text}");
    Ok(())
}
