/// Video geometry, render length, and scheduling options.
pub mod config;
/// Layer stack and render driver.
pub mod video;
