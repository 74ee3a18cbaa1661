use super::*;

#[test]
fn parses_full_probe_output() {
    let json = br#"{
        "programs": [],
        "streams": [{"r_frame_rate": "30/1", "nb_frames": "300"}],
        "format": {"duration": "10.000000"}
    }"#;
    let info = parse_ffprobe_json(json).unwrap();
    assert_eq!(info.total_frames, 300);
    assert_eq!(info.fps, 30.0);
    assert_eq!(info.duration_seconds, 10.0);
}

#[test]
fn frame_count_falls_back_to_duration_times_fps() {
    let json = br#"{"streams": [{"r_frame_rate": "25/1"}], "format": {"duration": "4.99"}}"#;
    let info = parse_ffprobe_json(json).unwrap();
    assert_eq!(info.total_frames, 124);
    assert_eq!(info.fps, 25.0);
}

#[test]
fn missing_rate_and_duration_use_defaults() {
    let json = br#"{"streams": [{"nb_frames": "12"}]}"#;
    let info = parse_ffprobe_json(json).unwrap();
    assert_eq!(info.fps, 30.0);
    assert_eq!(info.duration_seconds, 0.0);
    assert_eq!(info.total_frames, 12);
}

#[test]
fn zero_denominator_rate_uses_fallback() {
    let json = br#"{"streams": [{"r_frame_rate": "0/0"}], "format": {"duration": "2"}}"#;
    let info = parse_ffprobe_json(json).unwrap();
    assert_eq!(info.fps, 30.0);
    assert_eq!(info.total_frames, 60);
}

#[test]
fn ntsc_rate_is_fractional() {
    let json = br#"{"streams": [{"r_frame_rate": "30000/1001", "nb_frames": "N/A"}], "format": {"duration": "2.0"}}"#;
    let info = parse_ffprobe_json(json).unwrap();
    assert!((info.fps - 29.97).abs() < 1e-2);
    assert_eq!(info.total_frames, 59);
}

#[test]
fn rejects_missing_stream_and_bad_json() {
    assert!(matches!(
        parse_ffprobe_json(br#"{"streams": [], "format": {"duration": "1"}}"#),
        Err(RampError::Probe(_))
    ));
    assert!(matches!(
        parse_ffprobe_json(b"not json"),
        Err(RampError::Probe(_))
    ));
    assert!(matches!(
        parse_ffprobe_json(br#"{"streams": [{"r_frame_rate": "0/1"}]}"#),
        Err(RampError::Probe(_))
    ));
}
