use std::ffi::OsString;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::encode::{ensure_dir, flatten_onto};
use crate::foundation::core::{Canvas, FrameIndex, Rgb8};
use crate::foundation::error::{FramefoldError, FramefoldResult};
use crate::render::frame::Frame;

/// Output file and encoder settings for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Target `.mp4` file; missing parent directories are created.
    pub out_path: PathBuf,
    /// Replace an existing file instead of failing.
    pub overwrite: bool,
    /// libx264 constant rate factor, lower is better quality.
    pub crf: u8,
}

impl FfmpegSinkOpts {
    /// Overwriting output at CRF 18.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            crf: 18,
        }
    }
}

/// Pipes frames, flattened over the pass matte, into `ffmpeg` as raw RGBA and encodes H.264.
///
/// The canvas must have even dimensions (yuv420p). Frames must arrive as `0, 1, 2, ...`.
#[derive(Debug)]
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
}

#[derive(Debug)]
struct Encoder {
    child: Child,
    stdin: ChildStdin,
    stderr: JoinHandle<Vec<u8>>,
    canvas: Canvas,
    matte: Rgb8,
    next: u64,
    rgba: Vec<u8>,
}

impl FfmpegSink {
    /// Sink that starts `ffmpeg` on `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
        }
    }

    fn check(&self, canvas: Canvas) -> FramefoldResult<()> {
        if !canvas.width.is_multiple_of(2) || !canvas.height.is_multiple_of(2) {
            return Err(FramefoldError::validation(format!(
                "mp4 output needs even dimensions, canvas is {}x{}",
                canvas.width, canvas.height
            )));
        }
        let out = &self.opts.out_path;
        if !is_mp4_path(out) {
            return Err(FramefoldError::validation(format!(
                "ffmpeg sink output '{}' must have an .mp4 extension",
                out.display()
            )));
        }
        if !self.opts.overwrite && out.exists() {
            return Err(FramefoldError::validation(format!(
                "'{}' exists and overwrite is off",
                out.display()
            )));
        }
        Ok(())
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> FramefoldResult<()> {
        if self.encoder.is_some() {
            return Err(FramefoldError::encode("ffmpeg sink is already running"));
        }
        self.check(cfg.canvas)?;
        if let Some(dir) = self.opts.out_path.parent()
            && !dir.as_os_str().is_empty()
        {
            ensure_dir(dir)?;
        }

        let mut child = Command::new("ffmpeg")
            .args(encoder_args(&cfg, &self.opts))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => FramefoldError::encode("ffmpeg was not found on PATH"),
                _ => FramefoldError::encode(format!("failed to start ffmpeg: {e}")),
            })?;
        let (Some(stdin), Some(mut stderr)) = (child.stdin.take(), child.stderr.take()) else {
            let _ = child.kill();
            return Err(FramefoldError::encode("ffmpeg started without piped stdio"));
        };
        // Drained on its own thread so a chatty encoder cannot stall the frame pipe.
        let stderr = std::thread::spawn(move || {
            let mut log = Vec::new();
            let _ = stderr.read_to_end(&mut log);
            log
        });

        tracing::debug!(
            out = %self.opts.out_path.display(),
            width = cfg.canvas.width,
            height = cfg.canvas.height,
            frames = cfg.frames,
            "spawned ffmpeg"
        );
        self.encoder = Some(Encoder {
            child,
            stdin,
            stderr,
            canvas: cfg.canvas,
            matte: cfg.matte,
            next: 0,
            rgba: Vec::with_capacity(cfg.canvas.rgba_len()),
        });
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> FramefoldResult<()> {
        let enc = self
            .encoder
            .as_mut()
            .ok_or_else(|| FramefoldError::encode("ffmpeg sink received a frame outside a pass"))?;
        if idx.0 != enc.next {
            return Err(FramefoldError::encode(format!(
                "ffmpeg sink expected frame {}, got {idx}",
                enc.next
            )));
        }
        if frame.canvas() != enc.canvas {
            return Err(FramefoldError::validation(format!(
                "frame is {}x{}, pass is {}x{}",
                frame.width, frame.height, enc.canvas.width, enc.canvas.height
            )));
        }

        flatten_onto(frame, enc.matte, &mut enc.rgba);
        enc.stdin
            .write_all(&enc.rgba)
            .map_err(|e| FramefoldError::encode(format!("ffmpeg stopped reading frames: {e}")))?;
        enc.next += 1;
        Ok(())
    }

    fn end(&mut self) -> FramefoldResult<()> {
        let enc = self
            .encoder
            .take()
            .ok_or_else(|| FramefoldError::encode("ffmpeg sink ended without a pass"))?;
        enc.finish()
    }
}

impl Encoder {
    fn finish(self) -> FramefoldResult<()> {
        let Self {
            mut child,
            stdin,
            stderr,
            ..
        } = self;
        // Closing stdin is ffmpeg's end-of-stream.
        drop(stdin);
        let status = child
            .wait()
            .map_err(|e| FramefoldError::encode(format!("waiting for ffmpeg failed: {e}")))?;
        let log = stderr.join().unwrap_or_default();
        if status.success() {
            return Ok(());
        }
        Err(FramefoldError::encode(format!(
            "ffmpeg exited with {status}: {}",
            String::from_utf8_lossy(&log).trim()
        )))
    }
}

/// Command line reading raw RGBA from stdin and writing H.264 into `opts.out_path`.
fn encoder_args(cfg: &SinkConfig, opts: &FfmpegSinkOpts) -> Vec<OsString> {
    let crf = opts.crf.to_string();
    let mut args: Vec<OsString> = vec![
        if opts.overwrite { "-y" } else { "-n" }.into(),
        "-loglevel".into(),
        "error".into(),
        "-f".into(),
        "rawvideo".into(),
        "-pix_fmt".into(),
        "rgba".into(),
        "-s".into(),
        format!("{}x{}", cfg.canvas.width, cfg.canvas.height).into(),
        "-r".into(),
        format!("{}/{}", cfg.fps.num, cfg.fps.den).into(),
        "-i".into(),
        "pipe:0".into(),
    ];
    for arg in [
        "-an",
        "-c:v",
        "libx264",
        "-crf",
        crf.as_str(),
        "-pix_fmt",
        "yuv420p",
        "-movflags",
        "+faststart",
    ] {
        args.push(arg.into());
    }
    args.push(opts.out_path.clone().into_os_string());
    args
}

/// `true` when `ffmpeg -version` runs successfully.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

/// `true` when `path` ends in `.mp4`, ignoring case.
pub fn is_mp4_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("mp4"))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
