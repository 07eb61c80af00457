//! Rendering: the surface abstraction, the scene algorithm and its backends.
//!
//! The scene is written against [`Surface`] only. Backends decide what a
//! fill or a text run turns into: a recorded command, pixels, or SVG markup.

pub mod paint;
pub mod record;
pub mod scene;
pub mod svg;

#[cfg(feature = "raster")]
pub mod glyphs;
#[cfg(feature = "raster")]
pub mod raster;

pub use paint::{Font, LinearGradient, Paint, PaintCommand, PathBuilder, PathEl, Rgb};
pub use record::RecordingSurface;
pub use scene::{render_panel, render_scene, render_scene_with, PanelSpec, PassSummary};
pub use svg::SvgSurface;

#[cfg(feature = "raster")]
pub use raster::RasterSurface;

/// The drawing-surface capabilities the scene needs.
///
/// Mirrors a 2D canvas context: a current fill style and font, rectangle,
/// path and text fills. Gradients and paths are plain values built with
/// [`LinearGradient`] and [`PathBuilder`].
pub trait Surface {
    /// Width in device pixels.
    fn width(&self) -> u32;

    /// Height in device pixels.
    fn height(&self) -> u32;

    fn set_fill_style(&mut self, paint: Paint);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Fill a closed path with the current fill style (non-zero winding).
    fn fill_path(&mut self, path: &[PathEl]);

    fn set_font(&mut self, font: Font);

    /// Draw `text` with its alphabetic baseline starting at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// Finished output of one pass on a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: Vec::new(),
        }
    }
}
