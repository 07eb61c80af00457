//! Vector backend: keeps the pass as a retained SVG scene.
//!
//! Fills become `<rect>`, `<path>` and `<text>` elements; every gradient fill
//! style gets its own `<linearGradient>` in `<defs>` with
//! `gradientUnits="userSpaceOnUse"` so coordinates match the canvas model.

use std::fmt::Write as _;

use super::paint::{Font, Paint, PathEl, Rgb};
use super::{Frame, Surface};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    fill: String,
    font: Font,
    gradients: usize,
    defs: String,
    body: String,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fill: Rgb::new(0.0, 0.0, 0.0).css(),
            font: Font::default(),
            gradients: 0,
            defs: String::new(),
            body: String::new(),
        }
    }

    /// The complete SVG document.
    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(self.defs.len() + self.body.len() + 256);
        let _ = writeln!(
            out,
            r#"<svg xmlns="{}" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            SVG_NS, self.width, self.height, self.width, self.height
        );
        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            out.push_str(&self.defs);
            out.push_str("</defs>\n");
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }

    pub fn finish(&self) -> Frame {
        Frame {
            width: self.width,
            height: self.height,
            data: self.to_svg().into_bytes(),
        }
    }
}

/// Canvas accepts negative extents and flips the rectangle; SVG does not.
fn normalize(pos: f64, len: f64) -> (f64, f64) {
    if len < 0.0 {
        (pos + len, -len)
    } else {
        (pos, len)
    }
}

fn escape(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            _ => s.push(ch),
        }
    }
    s
}

fn path_data(path: &[PathEl]) -> String {
    let mut d = String::new();
    for el in path {
        if !d.is_empty() {
            d.push(' ');
        }
        let _ = match *el {
            PathEl::MoveTo { x, y } => write!(d, "M{} {}", x, y),
            PathEl::LineTo { x, y } => write!(d, "L{} {}", x, y),
            PathEl::QuadTo { cx, cy, x, y } => write!(d, "Q{} {} {} {}", cx, cy, x, y),
            PathEl::Close => write!(d, "Z"),
        };
    }
    d
}

impl Surface for SvgSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_fill_style(&mut self, paint: Paint) {
        self.fill = match paint {
            Paint::Solid(c) => c.css(),
            Paint::Linear(g) => {
                let id = format!("g{}", self.gradients);
                self.gradients += 1;
                let _ = writeln!(
                    self.defs,
                    r#"<linearGradient id="{}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                    id, g.x0, g.y0, g.x1, g.y1
                );
                for stop in &g.stops {
                    let _ = writeln!(
                        self.defs,
                        r#"<stop offset="{}" stop-color="{}"/>"#,
                        stop.offset,
                        stop.color.css()
                    );
                }
                self.defs.push_str("</linearGradient>\n");
                format!("url(#{})", id)
            }
        };
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (x, width) = normalize(x, width);
        let (y, height) = normalize(y, height);
        let _ = writeln!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            x, y, width, height, self.fill
        );
    }

    fn fill_path(&mut self, path: &[PathEl]) {
        let _ = writeln!(
            self.body,
            r#"<path d="{}" fill="{}"/>"#,
            path_data(path),
            self.fill
        );
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let mut attrs = format!(
            r#"font-family="{}" font-size="{}""#,
            escape(&self.font.family),
            self.font.size
        );
        if self.font.italic {
            attrs.push_str(r#" font-style="italic""#);
        }
        if self.font.bold {
            attrs.push_str(r#" font-weight="bold""#);
        }
        let _ = writeln!(
            self.body,
            r#"<text x="{}" y="{}" {} fill="{}">{}</text>"#,
            x,
            y,
            attrs,
            self.fill,
            escape(text)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::paint::{rounded_rect, LinearGradient};

    #[test]
    fn gradient_fill_goes_to_defs() {
        let mut s = SvgSurface::new(100, 50);
        let mut g = LinearGradient::new(0.0, 0.0, 20.0, 10.0);
        g.add_color_stop(0.0, Rgb::new(0.5, 0.0, 0.0));
        g.add_color_stop(1.0, Rgb::new(0.0, 0.0, 0.5));
        s.set_fill_style(g.into());
        s.fill_rect(0.0, 0.0, 100.0, 50.0);
        let svg = s.to_svg();
        assert!(svg.contains(r#"<linearGradient id="g0" gradientUnits="userSpaceOnUse" x1="0" y1="0" x2="20" y2="10">"#));
        assert!(svg.contains(r#"stop-color="rgba(127.5, 0, 0, 1)""#));
        assert!(svg.contains(r#"fill="url(#g0)""#));
    }

    #[test]
    fn negative_rect_is_flipped() {
        let mut s = SvgSurface::new(10, 10);
        s.fill_rect(5.0, 5.0, -4.0, 2.0);
        assert!(s.to_svg().contains(r#"<rect x="1" y="5" width="4" height="2""#));
    }

    #[test]
    fn text_carries_font_and_is_escaped() {
        let mut s = SvgSurface::new(10, 10);
        s.set_font(Font::new(12.0, "Arial").italic().bold());
        s.fill_text("a<b", 1.0, 2.0);
        let svg = s.to_svg();
        assert!(svg.contains(r#"font-style="italic""#));
        assert!(svg.contains(r#"font-weight="bold""#));
        assert!(svg.contains(">a&lt;b</text>"));
    }

    #[test]
    fn rounded_path_uses_quadratic_commands() {
        let mut s = SvgSurface::new(100, 100);
        s.fill_path(&rounded_rect(0.0, 0.0, 50.0, 40.0, 8.0));
        let svg = s.to_svg();
        assert!(svg.contains(r#"d="M8 0 L42 0 Q50 0 50 8"#));
        assert!(svg.contains(" Z\""));
    }
}
