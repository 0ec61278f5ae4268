use framefold::animation::ops::{drift, wave};
use framefold::{
    Background, Circle, DynamicValue, FfmpegSink, FfmpegSinkOpts, FrameSink, Fps, NoiseField,
    PngSequenceOpts, PngSequenceSink, RenderLength, RenderOpts, Rgb8, Video, VideoConfig, Wave,
    is_ffmpeg_on_path,
};

const SIZE: u32 = 2000;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let sink: Box<dyn FrameSink> = if is_ffmpeg_on_path() {
        Box::new(FfmpegSink::new(FfmpegSinkOpts::new(
            "target/demos/orbiting_circle.mp4",
        )))
    } else {
        tracing::warn!("ffmpeg not found on PATH, writing a PNG sequence instead");
        Box::new(PngSequenceSink::new(PngSequenceOpts::new(
            "target/demos/orbiting_circle",
        )))
    };

    let cfg = VideoConfig::new(SIZE, SIZE, Fps::new(20, 1)?)
        .with_background(Background::Color(Rgb8::BLACK));
    let mut video = Video::new(cfg, sink)?;

    let radius = DynamicValue::new(1.0);
    radius.add_updater(drift(4.0));
    let center_x = DynamicValue::new(500.0);
    center_x.add_updater(wave(-4.0, 3.0, Wave::Cos));

    video
        .add_layer(NoiseField::new(Rgb8::new(20, 30, 60)).with_opacity(0.7))
        .add_layer(Circle::new(center_x, 1000.0, radius, Rgb8::new(120, 200, 20)));

    let opts = RenderOpts {
        parallel: true,
        ..RenderOpts::default()
    };
    let stats = video.render(RenderLength::seconds(5.0), &opts)?;
    println!("rendered {} frames", stats.frames_rendered);
    Ok(())
}
