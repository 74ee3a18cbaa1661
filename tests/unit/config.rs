use super::*;

#[test]
fn defaults_match_reference_service() {
    let cfg = RampConfig::default();
    assert_eq!(cfg.bounds(), SpeedBounds::default());
    assert_eq!(cfg.target_segments, 240);
    assert_eq!(cfg.encode.crf, 18);
    assert_eq!(cfg.encode.preset, "veryfast");
    assert_eq!(cfg.filter_warn_len, 30_000);
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_file_keeps_defaults() {
    let cfg = RampConfig::from_json_str(
        r#"{"max_speed": 8.0, "profile": "FIFO", "encode": {"preset": "slow"}}"#,
    )
    .unwrap();
    assert_eq!(cfg.max_speed, 8.0);
    assert_eq!(cfg.min_speed, 1.0);
    assert_eq!(cfg.profile, CurveProfile::Fifo);
    assert_eq!(cfg.encode.preset, "slow");
    assert_eq!(cfg.encode.codec, "libx264");
    assert_eq!(cfg.logging.level, "info");
}

#[test]
fn invalid_values_are_rejected() {
    let err = RampConfig::from_json_str(r#"{"min_speed": 6.0}"#).unwrap_err();
    assert!(err.is_invalid_configuration());

    let err = RampConfig::from_json_str(r#"{"target_segments": 0}"#).unwrap_err();
    assert!(err.is_invalid_configuration());

    let err = RampConfig::from_json_str(r#"{"profile": "FOFI"}"#).unwrap_err();
    assert!(matches!(err, RampError::Serde(_)));
}

#[test]
fn json_roundtrip_through_file() {
    let dir = std::path::PathBuf::from("target").join("unit_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("speedramp.json");

    let cfg = RampConfig {
        target_segments: 64,
        profile: CurveProfile::Siso,
        ..RampConfig::default()
    };
    std::fs::write(&path, cfg.to_json_pretty().unwrap()).unwrap();
    assert_eq!(RampConfig::from_path(&path).unwrap(), cfg);
}

#[test]
fn unreadable_file_is_an_io_error() {
    let err = RampConfig::from_path(Path::new("target/no/such/config.json")).unwrap_err();
    assert!(matches!(err, RampError::Other(_)), "{err:?}");
    assert!(!err.is_invalid_configuration());
    assert!(err.to_string().contains("read config"), "{err}");
}
