use super::*;

#[test]
fn fps_validation_and_conversions() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());

    let fps = Fps::new(20, 1).unwrap();
    assert_eq!(fps.secs_to_frames_round(5.0), 100);
    assert_eq!(fps.secs_to_frames_round(0.024), 0);
    assert_eq!(fps.secs_to_frames_round(0.026), 1);
    assert_eq!(fps.frames_to_secs(40), 2.0);
    assert_eq!(fps.secs_to_frames_round(-3.0), 0);

    let ntsc = Fps::new(30000, 1001).unwrap();
    assert_eq!(ntsc.secs_to_frames_round(1.0), 30);
}

#[test]
fn canvas_requires_non_zero_dims() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert_eq!(Canvas::new(4, 3).unwrap().rgba_len(), 48);
}

#[test]
fn opaque_pixel_keeps_color_and_full_alpha() {
    let p = Rgba8Premul::opaque(Rgb8::new(120, 200, 20));
    assert_eq!(p.to_array(), [120, 200, 20, 255]);
    assert_eq!(Rgba8Premul::transparent().to_array(), [0, 0, 0, 0]);
    assert_eq!(Rgb8::from((1, 2, 3)), Rgb8::new(1, 2, 3));
    assert_eq!(Rgba8Premul::from_array([4, 5, 6, 7]).to_array(), [4, 5, 6, 7]);
}

#[test]
fn frame_index_displays_as_number() {
    assert_eq!(FrameIndex(42).to_string(), "42");
    assert_eq!(FrameIndex(3).as_f64(), 3.0);
}
