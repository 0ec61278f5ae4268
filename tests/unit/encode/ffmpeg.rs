use super::*;
use crate::foundation::core::Fps;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        canvas: Canvas::new(width, height).unwrap(),
        fps: Fps::new(20, 1).unwrap(),
        frames: 1,
        matte: Rgb8::BLACK,
    }
}

fn args_of(cfg: &SinkConfig, opts: &FfmpegSinkOpts) -> Vec<String> {
    encoder_args(cfg, opts)
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn odd_dimensions_are_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/never_written.mp4"));
    let err = sink.begin(cfg(11, 10)).unwrap_err();
    assert!(matches!(err, FramefoldError::Validation(_)));
    assert!(sink.encoder.is_none());
}

#[test]
fn non_mp4_output_is_rejected() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/never_written.mov"));
    let err = sink.begin(cfg(10, 10)).unwrap_err();
    assert!(err.to_string().contains(".mp4"));
}

#[test]
fn frames_and_end_outside_a_pass_fail() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/never_written.mp4"));
    let frame = Frame::from_rgba8_premul(2, 2, vec![0; 16]).unwrap();
    assert!(matches!(
        sink.push_frame(FrameIndex(0), &frame),
        Err(FramefoldError::Encode(_))
    ));
    assert!(sink.end().is_err());
}

#[test]
fn command_line_describes_the_raw_input_and_encoder() {
    let opts = FfmpegSinkOpts::new("out/clip.mp4");
    let args = args_of(&cfg(640, 480), &opts);
    assert_eq!(args[0], "-y");
    let after = |flag: &str| {
        let i = args.iter().position(|a| a == flag).unwrap();
        args[i + 1].clone()
    };
    assert_eq!(after("-s"), "640x480");
    assert_eq!(after("-r"), "20/1");
    assert_eq!(after("-i"), "pipe:0");
    assert_eq!(after("-c:v"), "libx264");
    assert_eq!(after("-crf"), "18");
    assert_eq!(args.last().unwrap(), "out/clip.mp4");

    let keep = FfmpegSinkOpts {
        overwrite: false,
        ..FfmpegSinkOpts::new("clip.mp4")
    };
    assert_eq!(args_of(&cfg(2, 2), &keep)[0], "-n");
}

#[test]
fn mp4_extension_check_is_case_insensitive() {
    assert!(is_mp4_path(Path::new("out/video.MP4")));
    assert!(is_mp4_path(Path::new("video.mp4")));
    assert!(!is_mp4_path(Path::new("frames")));
    assert!(!is_mp4_path(Path::new("video.mov")));
}
