//! Integration tests for dataset loading, target handling and feature binning

mod common;

use common::{
    create_large_test_dataframe, create_string_target_dataframe, create_temp_csv,
    create_temp_parquet, create_test_dataframe,
};
use ivbin::pipeline::*;

fn find<'a>(analysis: &'a FeatureAnalysis, name: &str) -> &'a FeatureBinning {
    analysis
        .features
        .iter()
        .find(|f| f.feature_name == name)
        .unwrap_or_else(|| panic!("feature '{}' was not binned", name))
}

// ============================================================================
// Feature binning over a DataFrame
// ============================================================================

#[test]
fn test_analyze_bins_numeric_features() {
    let df = create_test_dataframe();
    let analysis =
        analyze_features(&df, "target", None, &BinningOptions::default(), None).unwrap();

    assert_eq!(analysis.features.len(), 3);
    assert!(analysis.skipped.is_empty());

    let good = find(&analysis, "feature_good");
    assert_eq!(good.binning.breaks, vec![f64::NEG_INFINITY, 6.0, 9.0, 12.0, 18.0]);
    assert!(good.iv > 0.0);

    let constant = find(&analysis, "feature_constant");
    assert_eq!(constant.binning.breaks, vec![f64::NEG_INFINITY]);
    assert_eq!(constant.iv, 0.0);
}

#[test]
fn test_analyze_sorts_by_iv() {
    let df = create_test_dataframe();
    let analysis =
        analyze_features(&df, "target", None, &BinningOptions::default(), None).unwrap();

    for pair in analysis.features.windows(2) {
        assert!(pair[0].iv >= pair[1].iv);
    }
}

#[test]
fn test_null_feature_values_form_missing_bin() {
    let df = create_test_dataframe();
    let features = vec!["feature_nulls".to_string()];
    let analysis = analyze_features(
        &df,
        "target",
        Some(&features),
        &BinningOptions::default(),
        None,
    )
    .unwrap();

    let binned = find(&analysis, "feature_nulls");
    let missing = binned.table.missing_bin.as_ref().unwrap();
    assert_eq!(missing.count, 4.0);
    assert_eq!(missing.zeros, 2.0);
    assert_eq!(missing.ones, 2.0);

    let binned_rows: f64 = binned.table.bins.iter().map(|b| b.count).sum();
    assert_eq!(binned_rows, 16.0);
}

#[test]
fn test_non_numeric_feature_is_skipped() {
    let df = create_test_dataframe();
    let features = vec!["feature_good".to_string(), "label".to_string()];
    let analysis = analyze_features(
        &df,
        "target",
        Some(&features),
        &BinningOptions::default(),
        None,
    )
    .unwrap();

    assert_eq!(analysis.features.len(), 1);
    assert_eq!(analysis.skipped.len(), 1);
    assert_eq!(analysis.skipped[0].feature_name, "label");
}

#[test]
fn test_options_apply_to_every_feature() {
    let df = create_test_dataframe();
    let options = BinningOptions::default().with_max_bin(2);
    let analysis = analyze_features(&df, "target", None, &options, None).unwrap();

    for feature in &analysis.features {
        assert!(feature.binning.num_bins <= 2);
    }
    assert_eq!(
        find(&analysis, "feature_good").binning.breaks,
        vec![f64::NEG_INFINITY, 9.0]
    );
}

#[test]
fn test_invalid_options_fail_before_binning() {
    let df = create_test_dataframe();
    let options = BinningOptions::default().with_max_bin(0);
    assert!(analyze_features(&df, "target", None, &options, None).is_err());
}

#[test]
fn test_many_random_features() {
    let df = create_large_test_dataframe(2000, 12, 99);
    let options = BinningOptions::default().with_min_cnt(100.0);
    let analysis = analyze_features(&df, "target", None, &options, None).unwrap();

    assert_eq!(analysis.features.len() + analysis.skipped.len(), 12);
    for feature in &analysis.features {
        for split in &feature.binning.splits {
            assert!(split.asc_count >= 100.0);
            assert!(split.dsc_count >= 100.0);
        }
    }
}

// ============================================================================
// Target handling
// ============================================================================

#[test]
fn test_binary_target_needs_no_mapping() {
    let df = create_test_dataframe();
    assert!(matches!(
        analyze_target_column(&df, "target").unwrap(),
        TargetAnalysis::AlreadyBinary
    ));
}

#[test]
fn test_string_target_needs_mapping() {
    let df = create_string_target_dataframe();
    match analyze_target_column(&df, "target").unwrap() {
        TargetAnalysis::NeedsMapping { unique_values } => {
            assert_eq!(unique_values.len(), 2);
            assert!(unique_values.contains(&"B".to_string()));
            assert!(unique_values.contains(&"G".to_string()));
        }
        TargetAnalysis::AlreadyBinary => panic!("string target reported as binary"),
    }
}

#[test]
fn test_mapped_target_matches_numeric_target() {
    let df = create_string_target_dataframe();
    let mapping = TargetMapping::new("B".to_string(), "G".to_string());

    assert_eq!(count_mapped_records(&df, "target", &mapping).unwrap(), (10, 10, 0));

    let analysis = analyze_features(
        &df,
        "target",
        None,
        &BinningOptions::default(),
        Some(&mapping),
    )
    .unwrap();
    assert_eq!(
        find(&analysis, "feature_good").binning.breaks,
        vec![f64::NEG_INFINITY, 6.0, 9.0, 12.0, 18.0]
    );
}

#[test]
fn test_string_target_without_mapping_fails() {
    let df = create_string_target_dataframe();
    assert!(analyze_features(&df, "target", None, &BinningOptions::default(), None).is_err());
}

#[test]
fn test_missing_target_column_fails() {
    let df = create_test_dataframe();
    assert!(
        analyze_features(&df, "nonexistent", None, &BinningOptions::default(), None).is_err()
    );
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_csv_round_trip_bins_the_same() {
    let mut df = create_test_dataframe();
    let (_dir, path) = create_temp_csv(&mut df);

    let loaded = load_dataset(&path, 10_000).unwrap();
    assert_eq!(loaded.height(), 20);

    let analysis =
        analyze_features(&loaded, "target", None, &BinningOptions::default(), None).unwrap();
    assert_eq!(
        find(&analysis, "feature_good").binning.breaks,
        vec![f64::NEG_INFINITY, 6.0, 9.0, 12.0, 18.0]
    );
}

#[test]
fn test_parquet_column_names() {
    let mut df = create_test_dataframe();
    let (_dir, path) = create_temp_parquet(&mut df);

    let columns = get_column_names(&path).unwrap();
    assert_eq!(
        columns,
        vec![
            "target",
            "feature_good",
            "feature_constant",
            "feature_nulls",
            "label"
        ]
    );
}

#[test]
fn test_unsupported_extension_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("data.xlsx");
    std::fs::write(&path, "not a dataset").unwrap();

    assert!(load_dataset(&path, 10_000).is_err());
}
