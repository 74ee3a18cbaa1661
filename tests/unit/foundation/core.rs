use super::*;

#[test]
fn default_bounds_match_process_defaults() {
    let b = SpeedBounds::default();
    assert_eq!(b.min_speed, 1.0);
    assert_eq!(b.max_speed, 5.0);
    assert!(b.validate().is_ok());
}

#[test]
fn bounds_reject_inverted_and_non_positive() {
    assert!(SpeedBounds::new(2.0, 1.0).unwrap_err().is_invalid_configuration());
    assert!(SpeedBounds::new(0.0, 1.0).unwrap_err().is_invalid_configuration());
    assert!(SpeedBounds::new(-1.0, 1.0).unwrap_err().is_invalid_configuration());
    assert!(SpeedBounds::new(1.0, f64::NAN).is_err());
    assert!(SpeedBounds::new(1.0, f64::INFINITY).is_err());
    assert!(SpeedBounds::new(3.0, 3.0).is_ok());
}

#[test]
fn bounds_reject_speeds_below_render_resolution() {
    assert!(SpeedBounds::new(0.00004, 0.5).unwrap_err().is_invalid_configuration());
    assert!(SpeedBounds::new(SPEED_RESOLUTION / 2.0, 1.0).is_err());
    assert!(SpeedBounds::new(SPEED_RESOLUTION, 1.0).is_ok());
}

#[test]
fn min_frames_rounds_max_speed_up() {
    assert_eq!(SpeedBounds::new(1.0, 5.0).unwrap().min_frames_per_segment(), 5);
    assert_eq!(SpeedBounds::new(1.0, 4.2).unwrap().min_frames_per_segment(), 5);
    assert_eq!(SpeedBounds::new(0.25, 0.5).unwrap().min_frames_per_segment(), 1);
}

#[test]
fn lerp_stays_inside_bounds() {
    let b = SpeedBounds::new(1.0, 5.0).unwrap();
    assert_eq!(b.lerp(0.0), 1.0);
    assert_eq!(b.lerp(1.0), 5.0);
    assert_eq!(b.lerp(0.5), 3.0);
    assert_eq!(b.lerp(-3.0), 1.0);
    assert_eq!(b.lerp(7.0), 5.0);
}

#[test]
fn frame_rate_parse_and_fallback() {
    assert_eq!(
        FrameRate::parse("30000/1001"),
        Some(FrameRate {
            num: 30000,
            den: 1001
        })
    );
    assert_eq!(FrameRate::parse("25"), Some(FrameRate { num: 25, den: 1 }));
    assert_eq!(FrameRate::parse("abc"), None);
    assert_eq!(FrameRate::parse("1/2/3"), None);
    assert_eq!(FrameRate { num: 0, den: 0 }.as_f64(), 30.0);
    assert!((FrameRate::parse("30000/1001").unwrap().as_f64() - 29.97).abs() < 1e-2);
}

#[test]
fn media_duration_from_frames() {
    let m = MediaInfo::new(0.0, 300, 30.0);
    assert_eq!(m.frames_duration_secs(), 10.0);
}
