// Classification priority and annotation contract tests
//
// The rule order is part of the contract: each test here pins one case where
// a shorter prefix would win if the table were reordered.

use super::*;
use crate::table::Table;

#[test]
fn test_po_beats_p() {
    assert_eq!(classify_region("PO1"), PARIETAL_OCCIPITAL_LOBE);
    assert_eq!(classify_region("POZ"), PARIETAL_OCCIPITAL_LOBE);
    assert_eq!(classify_region("P3"), PARIETAL_LOBE);
}

#[test]
fn test_tp_beats_t() {
    assert_eq!(classify_region("TP9"), TEMPORAL_PARIETAL_LOBE);
    assert_eq!(classify_region("T7"), TEMPORAL_LOBE);
}

#[test]
fn test_fc_and_ft_beat_f() {
    assert_eq!(classify_region("FC5"), MOTOR_CORTEX);
    assert_eq!(classify_region("FT8"), FRONTAL_TEMPORAL_LOBE);
    assert_eq!(classify_region("F7"), FRONTAL_LOBE);
    assert_eq!(classify_region("FP1"), FRONTAL_LOBE);
    assert_eq!(classify_region("FZ"), FRONTAL_LOBE);
}

#[test]
fn test_af_is_frontal() {
    assert_eq!(classify_region("AF3"), FRONTAL_LOBE);
    assert_eq!(classify_region("AFZ"), FRONTAL_LOBE);
}

#[test]
fn test_cp_beats_c() {
    assert_eq!(classify_region("CP1"), SENSORY_MOTOR_CORTEX);
    assert_eq!(classify_region("C3"), CENTRAL_SULCUS);
    assert_eq!(classify_region("CZ"), CENTRAL_SULCUS);
}

#[test]
fn test_occipital() {
    assert_eq!(classify_region("O1"), OCCIPITAL_LOBE);
    assert_eq!(classify_region("OZ"), OCCIPITAL_LOBE);
}

#[test]
fn test_unknown_names() {
    assert_eq!(classify_region("Z9"), UNKNOWN_REGION);
    assert_eq!(classify_region(""), UNKNOWN_REGION);
    assert_eq!(classify_region("Unknown"), UNKNOWN_REGION);
    assert_eq!(classify_region("X"), UNKNOWN_REGION);
    assert_eq!(classify_region("nd"), UNKNOWN_REGION);
}

#[test]
fn test_prefix_match_is_case_sensitive() {
    assert_eq!(classify_region("po1"), UNKNOWN_REGION);
}

/// Real channel list from the alcoholism EEG recordings
#[test]
fn test_dataset_channels_classify() {
    let channels = [
        "FP1", "FP2", "F7", "F8", "AF1", "AF2", "FZ", "F4", "F3", "FC6", "FC5", "FC2", "FC1",
        "T8", "T7", "CZ", "C3", "C4", "CP5", "CP6", "CP1", "CP2", "P3", "P4", "PZ", "P8", "P7",
        "PO2", "PO1", "O2", "O1", "X", "AF7", "AF8", "F5", "F6", "FT7", "FT8", "FPZ", "FC4",
        "FC3", "C6", "C5", "F2", "F1", "TP8", "TP7", "AFZ", "CP3", "CP4", "P5", "P6", "C1",
        "C2", "PO7", "PO8", "FCZ", "POZ", "OZ", "P2", "P1", "CPZ", "nd", "Y",
    ];

    let unknown: Vec<&str> = channels
        .iter()
        .copied()
        .filter(|c| classify_region(c) == UNKNOWN_REGION)
        .collect();

    assert_eq!(unknown, vec!["X", "nd", "Y"]);
}

#[test]
fn test_annotated_rows_match_classifier() {
    let table = Table::from_columns(&[
        ("sensor position", vec!["PO8", "TP7", "FC1", "Y", "O2", "AF8"]),
        ("sensor value", vec!["1", "2", "3", "4", "5", "6"]),
    ])
    .unwrap();

    let annotated = annotate_regions(&table, "sensor position", &RegionRules::standard()).unwrap();
    let s = annotated.column_index("sensor position").unwrap();
    let r = annotated.column_index(REGION_COLUMN).unwrap();

    assert_eq!(annotated.len(), 5);
    for row in annotated.rows() {
        let sensor = row[s].as_str().unwrap();
        assert_eq!(row[r].as_str(), Some(classify_region(sensor)));
        assert_ne!(row[r].as_str(), Some(UNKNOWN_REGION));
    }
}

#[test]
fn test_custom_rules_flow_through_annotation() {
    let table = Table::from_columns(&[("sensor position", vec!["O1", "P3"])]).unwrap();

    let annotated =
        annotate_regions(&table, "sensor position", &RegionRules::without_occipital()).unwrap();

    assert_eq!(annotated.len(), 1);
}
