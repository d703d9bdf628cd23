use geodist_core::chamfer::ChamferPreset;
use geodist_core::config::{ChamferSelection, GeodesicConfig, OutputKind};
use geodist_core::error::GeodistError;

// ---------------------------------------------------------------------------
// Defaults and Display
// ---------------------------------------------------------------------------

#[test]
fn test_default_config() {
    let config = GeodesicConfig::default();
    assert!(config.normalize);
    assert_eq!(config.output, OutputKind::F32);
    assert_eq!(config.chamfer, ChamferSelection::Preset(ChamferPreset::Borgefors));
    assert!((config.threshold - 0.5).abs() < 1e-6);
}

#[test]
fn test_output_kind_display() {
    assert_eq!(format!("{}", OutputKind::F32), "f32");
    assert_eq!(format!("{}", OutputKind::U16), "u16");
    assert!(OutputKind::U8.is_bounded());
    assert!(!OutputKind::F64.is_bounded());
}

#[test]
fn test_selection_display() {
    assert_eq!(
        format!("{}", ChamferSelection::Preset(ChamferPreset::ChessKnight)),
        "Chess knight (5,7,11)"
    );
    let custom = ChamferSelection::Custom {
        rank: 2,
        weights: vec![2.0, 3.0],
    };
    assert_eq!(format!("{custom}"), "Custom 2D [2.0, 3.0]");
}

// ---------------------------------------------------------------------------
// Building masks
// ---------------------------------------------------------------------------

#[test]
fn test_selection_builds_preset() {
    let mask = ChamferSelection::Preset(ChamferPreset::Svensson3D)
        .build()
        .unwrap();
    assert_eq!(mask.rank(), 3);
    assert_eq!(mask.offsets().len(), 50);
}

#[test]
fn test_custom_selection_validates() {
    let bad = ChamferSelection::Custom {
        rank: 2,
        weights: vec![0.0],
    };
    assert!(matches!(bad.build(), Err(GeodistError::InvalidMask(_))));
    let good = ChamferSelection::Custom {
        rank: 3,
        weights: vec![1.0],
    };
    assert_eq!(good.build().unwrap().offsets().len(), 6);
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn test_toml_round_trip() {
    let config = GeodesicConfig {
        normalize: false,
        output: OutputKind::U16,
        threshold: 0.25,
        chamfer: ChamferSelection::Custom {
            rank: 2,
            weights: vec![5.0, 7.0, 11.0],
        },
    };
    let text = toml::to_string_pretty(&config).unwrap();
    let back: GeodesicConfig = toml::from_str(&text).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_toml_missing_fields_use_defaults() {
    let config: GeodesicConfig = toml::from_str("output = \"U8\"\n").unwrap();
    assert_eq!(config.output, OutputKind::U8);
    assert!(config.normalize);
    assert_eq!(config.chamfer, ChamferSelection::default());
}

#[test]
fn test_json_preset_selection() {
    let config = GeodesicConfig {
        chamfer: ChamferSelection::Preset(ChamferPreset::Verwer),
        ..GeodesicConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"Verwer\""));
    let back: GeodesicConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.chamfer, config.chamfer);
}

// ---------------------------------------------------------------------------
// Rank adaptation
// ---------------------------------------------------------------------------

#[test]
fn test_default_selection_adapts_to_volume() {
    let selection = GeodesicConfig::default().chamfer.for_rank(3).unwrap();
    assert_eq!(selection, ChamferSelection::Preset(ChamferPreset::Borgefors3D));
    assert_eq!(selection.build().unwrap().rank(), 3);
}

#[test]
fn test_selection_of_matching_rank_unchanged() {
    let selection = ChamferSelection::Preset(ChamferPreset::Verwer);
    assert_eq!(selection.for_rank(2).unwrap(), selection);
}

#[test]
fn test_knight_preset_has_no_3d_counterpart() {
    let err = ChamferSelection::Preset(ChamferPreset::ChessKnight)
        .for_rank(3)
        .unwrap_err();
    assert!(matches!(err, GeodistError::InvalidMask(_)));
}

#[test]
fn test_custom_selection_rank_checked() {
    let custom = ChamferSelection::Custom {
        rank: 2,
        weights: vec![3.0, 4.0],
    };
    assert_eq!(custom.for_rank(2).unwrap(), custom);
    assert!(matches!(
        custom.for_rank(3),
        Err(GeodistError::InvalidMask(_))
    ));
}
