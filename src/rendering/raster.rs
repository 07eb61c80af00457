//! Immediate raster backend powered by `vello_cpu`.
//!
//! Every surface call paints straight into a CPU render context; `finish`
//! resolves it into straight-alpha RGBA8 and `encode_png` wraps that as PNG.

use log::{debug, warn};
use vello_cpu::kurbo::{BezPath, Point, Rect};
use vello_cpu::peniko::{Color, ColorStop, Gradient};
use vello_cpu::{Pixmap, RenderContext};

use super::glyphs;
use super::paint::{Font, LinearGradient, Paint, PathEl, Rgb};
use super::{Frame, Surface};
use crate::{Error, Result};

/// What the next fill uses.
enum FillPaint {
    Solid(Color),
    Gradient(Gradient),
    /// Zero-length gradients paint nothing, as on a 2D canvas.
    Nothing,
}

pub struct RasterSurface {
    width: u32,
    height: u32,
    /// `None` for zero-area surfaces; every paint call is then a no-op.
    ctx: Option<RenderContext>,
    paint: FillPaint,
    font: Font,
}

fn to_color(c: Rgb) -> Color {
    Color::new([c.r as f32, c.g as f32, c.b as f32, 1.0])
}

fn to_gradient(g: &LinearGradient) -> FillPaint {
    if g.x0 == g.x1 && g.y0 == g.y1 {
        return FillPaint::Nothing;
    }
    let stops: Vec<ColorStop> = g
        .stops
        .iter()
        .map(|s| ColorStop::from((s.offset as f32, to_color(s.color))))
        .collect();
    FillPaint::Gradient(
        Gradient::new_linear(Point::new(g.x0, g.y0), Point::new(g.x1, g.y1))
            .with_stops(stops.as_slice()),
    )
}

fn to_bez_path(path: &[PathEl]) -> BezPath {
    let mut p = BezPath::new();
    for el in path {
        match *el {
            PathEl::MoveTo { x, y } => p.move_to((x, y)),
            PathEl::LineTo { x, y } => p.line_to((x, y)),
            PathEl::QuadTo { cx, cy, x, y } => p.quad_to((cx, cy), (x, y)),
            PathEl::Close => p.close_path(),
        }
    }
    p
}

impl RasterSurface {
    /// Create a surface of `width` x `height` device pixels.
    ///
    /// Zero-area surfaces are accepted and paint nothing. Dimensions beyond
    /// the renderer's 16-bit limit are a render error.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let ctx = if width == 0 || height == 0 {
            debug!("raster surface {}x{} has no area", width, height);
            None
        } else {
            let w = u16::try_from(width)
                .map_err(|_| Error::RenderError(format!("width {} exceeds {}", width, u16::MAX)))?;
            let h = u16::try_from(height)
                .map_err(|_| Error::RenderError(format!("height {} exceeds {}", height, u16::MAX)))?;
            Some(RenderContext::new(w, h))
        };
        Ok(Self {
            width,
            height,
            ctx,
            paint: FillPaint::Solid(to_color(Rgb::new(0.0, 0.0, 0.0))),
            font: Font::default(),
        })
    }

    fn fill(&mut self, shape: Shape<'_>) {
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };
        match &self.paint {
            FillPaint::Solid(c) => ctx.set_paint(*c),
            FillPaint::Gradient(g) => ctx.set_paint(g.clone()),
            FillPaint::Nothing => return,
        }
        match shape {
            Shape::Rect(r) => ctx.fill_rect(&r),
            Shape::Path(p) => ctx.fill_path(p),
        }
    }

    /// Resolve everything painted so far into straight-alpha RGBA8 pixels.
    pub fn finish(&mut self) -> Frame {
        let Some(ctx) = self.ctx.as_mut() else {
            return Frame::empty(self.width, self.height);
        };
        // Both dimensions were checked against u16 when the context was made.
        let mut pixmap = Pixmap::new(self.width as u16, self.height as u16);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let mut data = pixmap.data_as_u8_slice().to_vec();
        unpremultiply(&mut data);
        Frame {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Finish the pass and encode it as an 8-bit RGBA PNG.
    pub fn encode_png(&mut self) -> Result<Vec<u8>> {
        let frame = self.finish();
        encode_png(&frame)
    }
}

enum Shape<'a> {
    Rect(Rect),
    Path(&'a BezPath),
}

fn unpremultiply(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u32 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// Encode an RGBA8 frame as PNG.
pub fn encode_png(frame: &Frame) -> Result<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.is_empty() || frame.data.len() != expected {
        return Err(Error::EncodeError(format!(
            "cannot encode {}x{} frame with {} bytes",
            frame.width,
            frame.height,
            frame.data.len()
        )));
    }
    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, frame.width, frame.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| Error::EncodeError(e.to_string()))?;
    writer
        .write_image_data(&frame.data)
        .map_err(|e| Error::EncodeError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| Error::EncodeError(e.to_string()))?;
    Ok(out)
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_fill_style(&mut self, paint: Paint) {
        self.paint = match paint {
            Paint::Solid(c) => FillPaint::Solid(to_color(c)),
            Paint::Linear(g) => to_gradient(&g),
        };
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
            warn!("skipping non-finite rect ({}, {}, {}, {})", x, y, width, height);
            return;
        }
        // Negative extents flip the rectangle, as on a 2D canvas.
        let r = Rect::new(x, y, x + width, y + height).abs();
        self.fill(Shape::Rect(r));
    }

    fn fill_path(&mut self, path: &[PathEl]) {
        let p = to_bez_path(path);
        self.fill(Shape::Path(&p));
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let cells = glyphs::layout(
            text,
            x,
            y,
            self.font.size,
            self.font.italic,
            self.font.bold,
        );
        for c in cells {
            self.fill_rect(c.x, c.y, c.w, c.h);
        }
    }
}
