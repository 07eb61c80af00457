//! The card-mosaic scene.
//!
//! A pass creates a fresh [`SeededRandom`] with [`SCENE_SEED`], fills the
//! surface with a two-stop background gradient, then paints
//! [`PANEL_COUNT`] panels in order. Every panel takes exactly
//! [`DRAWS_PER_PANEL`] draws, so panel `n` always starts at draw
//! `BACKGROUND_DRAWS + n * DRAWS_PER_PANEL`.

use log::{debug, trace};

use super::paint::{rounded_rect, Font, LinearGradient, Rgb};
use super::Surface;
use crate::random::{RandomSource, SeededRandom};

pub const SCENE_SEED: i64 = 1;
pub const PANEL_COUNT: usize = 20;
pub const BACKGROUND_DRAWS: usize = 6;
pub const DRAWS_PER_PANEL: usize = 25;
pub const DRAWS_PER_PASS: usize = BACKGROUND_DRAWS + PANEL_COUNT * DRAWS_PER_PANEL;

pub const FONT_FAMILY: &str = "Arial";
pub const CORNER_RADIUS: f64 = 8.0;

/// Counters reported after a pass; nothing in the pass depends on them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub panels: usize,
    pub body_lines: usize,
}

/// Everything one panel derives from its 25 draws.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub index: usize,
    /// Center.
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// `surface width / 30`: title font size and header bar height.
    pub font_size: f64,
    pub body: Rgb,
    pub header: LinearGradient,
    pub content: LinearGradient,
    pub title_color: Rgb,
    pub text_color: Rgb,
}

impl PanelSpec {
    /// Consume the next 25 draws, in paint order.
    pub fn derive<R: RandomSource + ?Sized>(
        index: usize,
        width: f64,
        height: f64,
        rng: &mut R,
    ) -> Self {
        let x = width * rng.next_f64();
        let y = height * rng.next_f64();
        let w = (width / 4.0) * (rng.next_f64() + 0.5);
        let h = (height / 5.0) * (rng.next_f64() + 0.8);
        let font_size = width / 30.0;

        let body = Rgb::draw(rng);
        let header = LinearGradient::two_stop(rng, width * 0.2, height * 0.5);
        let content = LinearGradient::two_stop(rng, width * 0.5, height * 0.1);
        let title_color = Rgb::draw(rng);
        let text_color = Rgb::draw(rng);

        Self {
            index,
            x,
            y,
            w,
            h,
            font_size,
            body,
            header,
            content,
            title_color,
            text_color,
        }
    }

    pub fn left(&self) -> f64 {
        self.x - self.w / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y - self.h / 2.0
    }

    pub fn title(&self) -> String {
        format!("Title{}", self.index)
    }

    pub fn line_font_size(&self) -> f64 {
        self.font_size / 2.0
    }

    /// `floor(h / line_font_size) - 4`; lines `1..max_lines` are drawn.
    ///
    /// A zero-width surface gives a zero font size. The ratio is then not
    /// finite and the panel gets no body lines.
    pub fn max_lines(&self) -> i64 {
        let ratio = (self.h / self.line_font_size()).floor();
        if !ratio.is_finite() {
            return 0;
        }
        ratio as i64 - 4
    }

    /// Body text lines with their baseline positions.
    pub fn body_lines(&self) -> impl Iterator<Item = (String, f64, f64)> + '_ {
        let fs = self.line_font_size();
        let x = self.left() + 20.0;
        (1..self.max_lines()).map(move |i| {
            (
                format!("{}. text content", i),
                x,
                self.top() + (i + 3) as f64 * fs,
            )
        })
    }
}

/// Run one full pass with a fresh generator seeded with [`SCENE_SEED`].
pub fn render_scene<S: Surface + ?Sized>(surface: &mut S) -> PassSummary {
    let mut rng = SeededRandom::new(SCENE_SEED);
    render_scene_with(surface, &mut rng)
}

/// Run one pass drawing from `rng` instead of a fresh generator.
pub fn render_scene_with<S, R>(surface: &mut S, rng: &mut R) -> PassSummary
where
    S: Surface + ?Sized,
    R: RandomSource + ?Sized,
{
    let width = surface.width() as f64;
    let height = surface.height() as f64;
    debug!("render pass: {}x{}", surface.width(), surface.height());

    let bg = LinearGradient::two_stop(rng, width * 0.2, height * 0.2);
    surface.set_fill_style(bg.into());
    surface.fill_rect(0.0, 0.0, width, height);

    let mut summary = PassSummary::default();
    for cnt in 0..PANEL_COUNT {
        summary.body_lines += render_panel(surface, cnt, rng);
        summary.panels += 1;
    }
    debug!(
        "render pass done: {} panels, {} body lines",
        summary.panels, summary.body_lines
    );
    summary
}

/// Derive and paint panel `cnt`. Returns the number of body lines drawn.
pub fn render_panel<S, R>(surface: &mut S, cnt: usize, rng: &mut R) -> usize
where
    S: Surface + ?Sized,
    R: RandomSource + ?Sized,
{
    let width = surface.width() as f64;
    let height = surface.height() as f64;
    let spec = PanelSpec::derive(cnt, width, height, rng);
    trace!(
        "panel {}: center=({:.1}, {:.1}) size={:.1}x{:.1}",
        cnt,
        spec.x,
        spec.y,
        spec.w,
        spec.h
    );
    paint_panel(surface, &spec)
}

fn paint_panel<S: Surface + ?Sized>(surface: &mut S, spec: &PanelSpec) -> usize {
    let left = spec.left();
    let top = spec.top();
    // Header height and the content inset both reuse the title font size.
    let bar = spec.font_size;

    surface.set_fill_style(spec.body.into());
    surface.fill_rect(left, top, spec.w, spec.h);

    surface.set_fill_style(spec.header.clone().into());
    surface.fill_rect(left + 4.0, top + 4.0, spec.w - 8.0, bar);

    surface.set_fill_style(spec.content.clone().into());
    let path = rounded_rect(
        left + 8.0,
        top + 8.0 + bar,
        spec.w - 16.0,
        spec.h - 16.0 - bar,
        CORNER_RADIUS,
    );
    surface.fill_path(&path);

    surface.set_fill_style(spec.title_color.into());
    surface.set_font(Font::new(spec.font_size, FONT_FAMILY).italic().bold());
    surface.fill_text(&spec.title(), left + 4.0, top + spec.font_size);

    surface.set_fill_style(spec.text_color.into());
    surface.set_font(Font::new(spec.line_font_size(), FONT_FAMILY));
    let mut lines = 0;
    for (text, x, y) in spec.body_lines() {
        surface.fill_text(&text, x, y);
        lines += 1;
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::TracingRandom;
    use crate::rendering::paint::{Paint, PaintCommand};
    use crate::rendering::record::RecordingSurface;

    fn texts(s: &RecordingSurface) -> Vec<String> {
        s.commands()
            .iter()
            .filter_map(|c| match c {
                PaintCommand::FillText { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn pass_consumes_exact_draw_budget() {
        let mut surface = RecordingSurface::new(1280, 720);
        let mut rng = TracingRandom::new(SeededRandom::new(SCENE_SEED));
        render_scene_with(&mut surface, &mut rng);
        assert_eq!(rng.draw_count(), 506);
        assert_eq!(DRAWS_PER_PASS, 506);
    }

    #[test]
    fn background_uses_first_six_draws() {
        let mut surface = RecordingSurface::new(1000, 500);
        render_scene(&mut surface);
        let mut rng = SeededRandom::new(1);
        let start = Rgb::draw(&mut rng);
        let end = Rgb::draw(&mut rng);
        match &surface.commands()[0] {
            PaintCommand::SetFillStyle {
                paint: Paint::Linear(g),
            } => {
                assert_eq!((g.x0, g.y0, g.x1, g.y1), (0.0, 0.0, 200.0, 100.0));
                assert_eq!(g.stops[0].color, start);
                assert_eq!(g.stops[1].color, end);
                assert_eq!(g.stops[1].offset, 1.0);
            }
            other => panic!("unexpected first command {:?}", other),
        }
        assert_eq!(
            surface.commands()[1],
            PaintCommand::FillRect {
                x: 0.0,
                y: 0.0,
                width: 1000.0,
                height: 500.0
            }
        );
    }

    #[test]
    fn panel_depends_only_on_draw_position() {
        let (w, h) = (1280.0, 720.0);
        let mut rng = SeededRandom::new(SCENE_SEED);
        for _ in 0..131 {
            rng.next();
        }
        let isolated = PanelSpec::derive(5, w, h, &mut rng);

        let mut rng = SeededRandom::new(SCENE_SEED);
        LinearGradient::two_stop(&mut rng, w * 0.2, h * 0.2);
        let mut in_pass = None;
        for cnt in 0..6 {
            in_pass = Some(PanelSpec::derive(cnt, w, h, &mut rng));
        }
        assert_eq!(in_pass, Some(isolated));
    }

    #[test]
    fn first_panel_paints_exact_geometry() {
        let (width, height) = (800.0, 600.0);
        let mut surface = RecordingSurface::new(800, 600);
        render_scene(&mut surface);

        let mut rng = SeededRandom::new(SCENE_SEED);
        let d: Vec<f64> = rng
            .by_ref()
            .skip(BACKGROUND_DRAWS)
            .take(DRAWS_PER_PANEL)
            .collect();
        let x = width * d[0];
        let y = height * d[1];
        let w = (width / 4.0) * (d[2] + 0.5);
        let h = (height / 5.0) * (d[3] + 0.8);
        let left = x - w / 2.0;
        let top = y - h / 2.0;
        let bar = width / 30.0;
        assert_eq!(left, 596.3245884773663);
        assert_eq!(top, 344.4740226337449);

        let gradient = |x1: f64, y1: f64, c: &[f64]| {
            let mut g = LinearGradient::new(0.0, 0.0, x1, y1);
            g.add_color_stop(0.0, Rgb::new(c[0], c[1], c[2]));
            g.add_color_stop(1.0, Rgb::new(c[3], c[4], c[5]));
            Paint::Linear(g)
        };

        let mut expected = vec![
            PaintCommand::SetFillStyle {
                paint: Rgb::new(d[4], d[5], d[6]).into(),
            },
            PaintCommand::FillRect {
                x: left,
                y: top,
                width: w,
                height: h,
            },
            PaintCommand::SetFillStyle {
                paint: gradient(width * 0.2, height * 0.5, &d[7..13]),
            },
            PaintCommand::FillRect {
                x: left + 4.0,
                y: top + 4.0,
                width: w - 8.0,
                height: bar,
            },
            PaintCommand::SetFillStyle {
                paint: gradient(width * 0.5, height * 0.1, &d[13..19]),
            },
            PaintCommand::FillPath {
                path: rounded_rect(left + 8.0, top + 8.0 + bar, w - 16.0, h - 16.0 - bar, 8.0),
            },
            PaintCommand::SetFillStyle {
                paint: Rgb::new(d[19], d[20], d[21]).into(),
            },
            PaintCommand::SetFont {
                font: Font::new(bar, "Arial").italic().bold(),
            },
            PaintCommand::FillText {
                x: left + 4.0,
                y: top + bar,
                text: "Title0".into(),
            },
            PaintCommand::SetFillStyle {
                paint: Rgb::new(d[22], d[23], d[24]).into(),
            },
            PaintCommand::SetFont {
                font: Font::new(width / 60.0, "Arial"),
            },
        ];
        for i in 1..7 {
            expected.push(PaintCommand::FillText {
                x: left + 20.0,
                y: top + (i + 3) as f64 * (width / 60.0),
                text: format!("{}. text content", i),
            });
        }

        let start = 2;
        assert_eq!(&surface.commands()[start..start + expected.len()], &expected[..]);
        // Panel 1 starts right after the sixth body line.
        assert!(matches!(
            surface.commands()[start + expected.len()],
            PaintCommand::SetFillStyle { paint: Paint::Solid(_) }
        ));
    }

    #[test]
    fn titles_are_numbered_in_order() {
        let mut surface = RecordingSurface::new(800, 600);
        render_scene(&mut surface);
        let titles: Vec<String> = texts(&surface)
            .into_iter()
            .filter(|t| t.starts_with("Title"))
            .collect();
        let expected: Vec<String> = (0..20).map(|i| format!("Title{}", i)).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn body_lines_follow_max_lines() {
        let mut rng = SeededRandom::new(SCENE_SEED);
        let spec = PanelSpec::derive(0, 600.0, 900.0, &mut rng);
        let n = spec.max_lines();
        let lines: Vec<_> = spec.body_lines().collect();
        assert_eq!(lines.len() as i64, (n - 1).max(0));
        if let Some((text, x, y)) = lines.first() {
            assert_eq!(text, "1. text content");
            assert_eq!(*x, spec.left() + 20.0);
            assert_eq!(*y, spec.top() + 4.0 * spec.line_font_size());
        }
    }

    #[test]
    fn short_surface_draws_no_body_lines() {
        let mut surface = RecordingSurface::new(600, 10);
        let summary = render_scene(&mut surface);
        assert_eq!(summary.body_lines, 0);
        assert_eq!(texts(&surface).len(), PANEL_COUNT);
    }

    #[test]
    fn zero_sized_surface_completes() {
        for (w, h) in [(0, 0), (0, 400), (400, 0)] {
            let mut surface = RecordingSurface::new(w, h);
            let summary = render_scene(&mut surface);
            assert_eq!(summary.panels, PANEL_COUNT);
            assert_eq!(summary.body_lines, 0);
        }
    }

    #[test]
    fn header_bar_reuses_font_size() {
        let mut surface = RecordingSurface::new(900, 600);
        render_scene(&mut surface);
        // background(2) + body(2) + header(2)
        match &surface.commands()[5] {
            PaintCommand::FillRect { height, .. } => assert_eq!(*height, 900.0 / 30.0),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn scaled_channels_stay_in_range() {
        let mut rng = TracingRandom::new(SeededRandom::new(SCENE_SEED));
        let mut surface = RecordingSurface::new(640, 480);
        render_scene_with(&mut surface, &mut rng);
        for v in rng.values() {
            let scaled = v * 255.0;
            assert!((0.0..255.0).contains(&scaled));
        }
    }
}
