//! Canvas host: owns the viewport and asks for a full pass on every mount
//! and resize.
//!
//! Each pass gets a new surface from a [`SurfaceFactory`] and a fresh
//! generator, so nothing from one pass leaks into the next. A factory that
//! cannot supply a surface turns the pass into a no-op.

use log::{debug, info, warn};

use crate::rendering::{render_scene, Font, Paint, PathEl, RecordingSurface, Surface, SvgSurface};
use crate::{OutputFormat, Result, Viewport};

#[cfg(feature = "raster")]
use crate::rendering::{Frame, RasterSurface};

/// Supplies drawing surfaces to the host and collects their output.
pub trait SurfaceFactory {
    type Surface: Surface;
    type Output;

    /// A blank surface for `viewport`, or `None` when none is available.
    fn create(&mut self, viewport: Viewport) -> Option<Self::Surface>;

    /// Turn a finished surface into the host's output.
    fn finish(&mut self, surface: Self::Surface) -> Result<Self::Output>;
}

/// One of the built-in backends, chosen at run time.
pub enum Backend {
    Record(RecordingSurface),
    Svg(SvgSurface),
    #[cfg(feature = "raster")]
    Raster(RasterSurface),
}

impl Backend {
    pub fn new(format: OutputFormat, viewport: Viewport) -> Result<Self> {
        let Viewport { width, height } = viewport;
        Ok(match format {
            OutputFormat::Json => Backend::Record(RecordingSurface::new(width, height)),
            OutputFormat::Svg => Backend::Svg(SvgSurface::new(width, height)),
            #[cfg(feature = "raster")]
            OutputFormat::Png => Backend::Raster(RasterSurface::new(width, height)?),
            #[cfg(not(feature = "raster"))]
            OutputFormat::Png => {
                return Err(crate::Error::ConfigError(
                    "PNG output requires the `raster` feature".into(),
                ))
            }
        })
    }

    /// Encoded bytes of everything painted so far.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Backend::Record(s) => Ok(s.finish()?.data),
            Backend::Svg(s) => Ok(s.finish().data),
            #[cfg(feature = "raster")]
            Backend::Raster(mut s) => s.encode_png(),
        }
    }

    fn inner(&mut self) -> &mut dyn Surface {
        match self {
            Backend::Record(s) => s,
            Backend::Svg(s) => s,
            #[cfg(feature = "raster")]
            Backend::Raster(s) => s,
        }
    }

    fn inner_ref(&self) -> &dyn Surface {
        match self {
            Backend::Record(s) => s,
            Backend::Svg(s) => s,
            #[cfg(feature = "raster")]
            Backend::Raster(s) => s,
        }
    }
}

impl Surface for Backend {
    fn width(&self) -> u32 {
        self.inner_ref().width()
    }

    fn height(&self) -> u32 {
        self.inner_ref().height()
    }

    fn set_fill_style(&mut self, paint: Paint) {
        self.inner().set_fill_style(paint)
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.inner().fill_rect(x, y, width, height)
    }

    fn fill_path(&mut self, path: &[PathEl]) {
        self.inner().fill_path(path)
    }

    fn set_font(&mut self, font: Font) {
        self.inner().set_font(font)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.inner().fill_text(text, x, y)
    }
}

/// Factory producing encoded bytes in one [`OutputFormat`].
#[derive(Debug, Clone, Copy)]
pub struct FormatFactory {
    pub format: OutputFormat,
}

impl FormatFactory {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl SurfaceFactory for FormatFactory {
    type Surface = Backend;
    type Output = Vec<u8>;

    fn create(&mut self, viewport: Viewport) -> Option<Backend> {
        match Backend::new(self.format, viewport) {
            Ok(b) => Some(b),
            Err(e) => {
                warn!("no {} surface for {}: {}", self.format, viewport, e);
                None
            }
        }
    }

    fn finish(&mut self, surface: Backend) -> Result<Vec<u8>> {
        surface.into_bytes()
    }
}

/// Factory handing out recording surfaces; output is the raw command list.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordingFactory;

impl SurfaceFactory for RecordingFactory {
    type Surface = RecordingSurface;
    type Output = Vec<crate::rendering::PaintCommand>;

    fn create(&mut self, viewport: Viewport) -> Option<RecordingSurface> {
        Some(RecordingSurface::new(viewport.width, viewport.height))
    }

    fn finish(&mut self, surface: RecordingSurface) -> Result<Self::Output> {
        Ok(surface.into_commands())
    }
}

/// Holds the mounted viewport and the output of the latest pass.
pub struct CanvasHost<F: SurfaceFactory> {
    factory: F,
    viewport: Option<Viewport>,
    output: Option<F::Output>,
    passes: u64,
}

impl<F: SurfaceFactory> CanvasHost<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            viewport: None,
            output: None,
            passes: 0,
        }
    }

    /// Attach to a viewport and draw the first pass.
    pub fn mount(&mut self, viewport: Viewport) -> Result<()> {
        info!("mounting canvas at {}", viewport);
        self.viewport = Some(viewport);
        self.redraw()
    }

    /// Resize notification: record the new size and redraw from scratch.
    ///
    /// Ignored while unmounted.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if self.viewport.is_none() {
            warn!("resize to {}x{} before mount; ignoring", width, height);
            return Ok(());
        }
        self.viewport = Some(Viewport { width, height });
        self.redraw()
    }

    /// Detach; the last output stays readable until the next mount.
    pub fn unmount(&mut self) {
        debug!("unmounting canvas");
        self.viewport = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.viewport.is_some()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Output of the most recent completed pass.
    ///
    /// `None` after a skipped pass, so it never describes an older viewport.
    pub fn output(&self) -> Option<&F::Output> {
        self.output.as_ref()
    }

    pub fn take_output(&mut self) -> Option<F::Output> {
        self.output.take()
    }

    /// Number of passes that ran to completion.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    fn redraw(&mut self) -> Result<()> {
        let Some(viewport) = self.viewport else {
            return Ok(());
        };
        let Some(mut surface) = self.factory.create(viewport) else {
            warn!("no drawing surface for {}; skipping pass", viewport);
            self.output = None;
            return Ok(());
        };
        let summary = render_scene(&mut surface);
        debug!(
            "pass {} at {}: {} panels, {} body lines",
            self.passes + 1,
            viewport,
            summary.panels,
            summary.body_lines
        );
        self.output = Some(self.factory.finish(surface)?);
        self.passes += 1;
        Ok(())
    }
}

/// Render one pass at `viewport` and return the encoded bytes.
pub fn render_bytes(format: OutputFormat, viewport: Viewport) -> Result<Vec<u8>> {
    let mut backend = Backend::new(format, viewport)?;
    render_scene(&mut backend);
    backend.into_bytes()
}

/// Render one raster pass and return its straight-alpha RGBA8 frame.
#[cfg(feature = "raster")]
pub fn render_frame(viewport: Viewport) -> Result<Frame> {
    let mut surface = RasterSurface::new(viewport.width, viewport.height)?;
    render_scene(&mut surface);
    Ok(surface.finish())
}
