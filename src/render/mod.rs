/// Premultiplied RGBA8 frame buffer.
pub mod frame;
/// Coherent noise sources.
pub mod noise;
/// Integer-grid shape rasterization.
pub mod raster;
