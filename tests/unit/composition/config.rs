use super::*;

fn fps20() -> Fps {
    Fps::new(20, 1).unwrap()
}

#[test]
fn length_requires_exactly_one_field() {
    assert!(matches!(
        RenderLength::default().resolve(fps20()),
        Err(FramefoldError::Config(_))
    ));
    let both = RenderLength {
        frames: Some(3),
        seconds: Some(1.0),
    };
    assert!(matches!(both.resolve(fps20()), Err(FramefoldError::Config(_))));
}

#[test]
fn missing_length_names_both_arguments() {
    let msg = RenderLength::default()
        .resolve(fps20())
        .unwrap_err()
        .to_string();
    assert!(msg.contains("length_frames"));
    assert!(msg.contains("length_seconds"));
}

#[test]
fn seconds_are_rounded_to_frames() {
    assert_eq!(RenderLength::seconds(5.0).resolve(fps20()).unwrap(), 100);
    assert_eq!(RenderLength::seconds(0.07).resolve(fps20()).unwrap(), 1);
    assert_eq!(RenderLength::frames(7).resolve(fps20()).unwrap(), 7);
    assert!(RenderLength::seconds(-1.0).resolve(fps20()).is_err());
    assert!(RenderLength::seconds(f64::INFINITY).resolve(fps20()).is_err());
}

#[test]
fn config_parses_from_json_with_default_background() {
    let json = r#"{ "width": 64, "height": 48, "fps": { "num": 30, "den": 1 } }"#;
    let cfg = VideoConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg, VideoConfig::new(64, 48, Fps::new(30, 1).unwrap()));
    assert_eq!(cfg.background.pixel(), Rgba8Premul::opaque(Rgb8::BLACK));
}

#[test]
fn config_parses_explicit_backgrounds() {
    let json = r#"{ "width": 8, "height": 8, "fps": { "num": 24, "den": 1 },
                    "background": { "color": { "r": 255, "g": 255, "b": 255 } } }"#;
    let cfg = VideoConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.background, Background::Color(Rgb8::WHITE));

    let json = r#"{ "width": 8, "height": 8, "fps": { "num": 24, "den": 1 },
                    "background": "transparent" }"#;
    let cfg = VideoConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.background.pixel(), Rgba8Premul::transparent());
    assert_eq!(cfg.background.matte(), Rgb8::BLACK);
    assert_eq!(Background::Color(Rgb8::WHITE).matte(), Rgb8::WHITE);
}

#[test]
fn invalid_configs_are_rejected() {
    let zero = r#"{ "width": 0, "height": 8, "fps": { "num": 24, "den": 1 } }"#;
    assert!(matches!(
        VideoConfig::from_reader(zero.as_bytes()),
        Err(FramefoldError::Validation(_))
    ));
    assert!(matches!(
        VideoConfig::from_reader("not json".as_bytes()),
        Err(FramefoldError::Serde(_))
    ));
    assert!(VideoConfig::from_path("does/not/exist.json").is_err());
}

#[test]
fn render_opts_defaults() {
    let o = RenderOpts::default();
    assert_eq!(o.progress_every, None);
    assert!(!o.parallel);
    assert_eq!(o.chunk_size, 64);
    assert_eq!(o.threads, None);
}
