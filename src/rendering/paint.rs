//! Paint model shared by every surface backend: colors, gradients, fonts,
//! path elements and the recorded command set.

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// A color stored as the raw fractions it was drawn from.
///
/// Channels are kept unscaled so backends can decide when to quantise; the
/// scaled `r * 255` values are never rounded before a backend composes its
/// own color representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Take three consecutive draws as red, green, blue.
    pub fn draw<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let r = rng.next_f64();
        let g = rng.next_f64();
        let b = rng.next_f64();
        Self { r, g, b }
    }

    /// Channels scaled to the 0..255 range, unrounded.
    pub fn scaled(&self) -> [f64; 3] {
        [self.r * 255.0, self.g * 255.0, self.b * 255.0]
    }

    /// Quantised, fully opaque RGBA.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let [r, g, b] = self.scaled().map(|c| c.round().clamp(0.0, 255.0) as u8);
        [r, g, b, 255]
    }

    /// CSS color string with full float precision, e.g. `rgba(64.05, 139.07, 87.28, 1)`.
    pub fn css(&self) -> String {
        let [r, g, b] = self.scaled();
        format!("rgba({}, {}, {}, 1)", r, g, b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgb,
}

/// Linear gradient in surface coordinates from `(x0, y0)` to `(x1, y1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            stops: Vec::new(),
        }
    }

    pub fn add_color_stop(&mut self, offset: f64, color: Rgb) {
        self.stops.push(ColorStop { offset, color });
    }

    /// Two-stop gradient whose colors come from the next six draws.
    pub fn two_stop<R: RandomSource + ?Sized>(rng: &mut R, x1: f64, y1: f64) -> Self {
        let mut g = Self::new(0.0, 0.0, x1, y1);
        let start = Rgb::draw(rng);
        let end = Rgb::draw(rng);
        g.add_color_stop(0.0, start);
        g.add_color_stop(1.0, end);
        g
    }
}

/// Current fill style of a surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paint {
    Solid(Rgb),
    Linear(LinearGradient),
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Solid(Rgb::new(0.0, 0.0, 0.0))
    }
}

impl From<Rgb> for Paint {
    fn from(c: Rgb) -> Self {
        Paint::Solid(c)
    }
}

impl From<LinearGradient> for Paint {
    fn from(g: LinearGradient) -> Self {
        Paint::Linear(g)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: f64,
    pub italic: bool,
    pub bold: bool,
    pub family: String,
}

impl Font {
    pub fn new(size: f64, family: impl Into<String>) -> Self {
        Self {
            size,
            italic: false,
            bold: false,
            family: family.into(),
        }
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// CSS shorthand, e.g. `italic bold 42.666666666666664px Arial`.
    pub fn css(&self) -> String {
        let mut s = String::new();
        if self.italic {
            s.push_str("italic ");
        }
        if self.bold {
            s.push_str("bold ");
        }
        s.push_str(&format!("{}px {}", self.size, self.family));
        s
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::new(10.0, "sans-serif")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathEl {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadTo { cx: f64, cy: f64, x: f64, y: f64 },
    Close,
}

/// Accumulates path elements using canvas-style method names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathBuilder {
    els: Vec<PathEl>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.els.push(PathEl::MoveTo { x, y });
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.els.push(PathEl::LineTo { x, y });
        self
    }

    pub fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) -> &mut Self {
        self.els.push(PathEl::QuadTo { cx, cy, x, y });
        self
    }

    pub fn close_path(&mut self) -> &mut Self {
        self.els.push(PathEl::Close);
        self
    }

    pub fn elements(&self) -> &[PathEl] {
        &self.els
    }

    pub fn finish(self) -> Vec<PathEl> {
        self.els
    }
}

/// Rounded rectangle made of straight edges and one quadratic arc per corner.
pub fn rounded_rect(x: f64, y: f64, w: f64, h: f64, radius: f64) -> Vec<PathEl> {
    let mut p = PathBuilder::new();
    p.move_to(x + radius, y)
        .line_to(x + w - radius, y)
        .quadratic_curve_to(x + w, y, x + w, y + radius)
        .line_to(x + w, y + h - radius)
        .quadratic_curve_to(x + w, y + h, x + w - radius, y + h)
        .line_to(x + radius, y + h)
        .quadratic_curve_to(x, y + h, x, y + h - radius)
        .line_to(x, y + radius)
        .quadratic_curve_to(x, y, x + radius, y)
        .close_path();
    p.finish()
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PaintCommand {
    SetFillStyle { paint: Paint },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    FillPath { path: Vec<PathEl> },
    SetFont { font: Font },
    FillText { x: f64, y: f64, text: String },
}
