//! Reproducibility of full passes across backends and the host

use colorcanvas::random::{SeededRandom, TracingRandom};
use colorcanvas::rendering::scene::{DRAWS_PER_PANEL, PANEL_COUNT, SCENE_SEED};
use colorcanvas::rendering::{render_scene, render_scene_with, PanelSpec, RecordingSurface};
use colorcanvas::{render_bytes, CanvasHost, OutputFormat, RecordingFactory, Viewport};

fn trace_pass(width: u32, height: u32) -> Vec<f64> {
    let mut surface = RecordingSurface::new(width, height);
    let mut rng = TracingRandom::new(SeededRandom::new(SCENE_SEED));
    render_scene_with(&mut surface, &mut rng);
    rng.into_parts().1
}

#[test]
fn two_passes_draw_identical_values() {
    let a = trace_pass(1280, 720);
    let b = trace_pass(1280, 720);
    assert_eq!(a.len(), 506);
    assert_eq!(a, b);
}

#[test]
fn draw_values_do_not_depend_on_size() {
    // Sizes change geometry, never the sequence itself.
    assert_eq!(trace_pass(1280, 720), trace_pass(333, 999));
}

#[test]
fn two_passes_record_identical_commands() {
    let mut a = RecordingSurface::new(1024, 768);
    let mut b = RecordingSurface::new(1024, 768);
    render_scene(&mut a);
    render_scene(&mut b);
    assert_eq!(a.commands(), b.commands());
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

#[test]
fn every_panel_starts_at_its_draw_offset() {
    let values = trace_pass(800, 600);
    for n in 0..PANEL_COUNT {
        let mut rng = SeededRandom::new(SCENE_SEED);
        for _ in 0..(6 + n * DRAWS_PER_PANEL) {
            rng.next();
        }
        let spec = PanelSpec::derive(n, 800.0, 600.0, &mut rng);
        assert_eq!(spec.x, 800.0 * values[6 + n * DRAWS_PER_PANEL]);
        assert_eq!(spec.text_color.b, values[6 + (n + 1) * DRAWS_PER_PANEL - 1]);
    }
}

#[test]
fn svg_output_is_reproducible() {
    let v = Viewport { width: 640, height: 360 };
    let a = render_bytes(OutputFormat::Svg, v).unwrap();
    let b = render_bytes(OutputFormat::Svg, v).unwrap();
    assert_eq!(a, b);
    let svg = String::from_utf8(a).unwrap();
    assert_eq!(svg.matches("<linearGradient").count(), 1 + 2 * PANEL_COUNT);
    assert_eq!(svg.matches("<path").count(), PANEL_COUNT);
    assert!(svg.contains(">Title19</text>"));
}

#[test]
fn host_resize_redraws_from_scratch() {
    let mut host = CanvasHost::new(RecordingFactory);
    host.mount(Viewport { width: 500, height: 500 }).unwrap();
    let mounted = host.take_output().unwrap();

    host.resize(900, 400).unwrap();
    let resized = host.take_output().unwrap();
    assert_ne!(mounted, resized);

    let mut direct = RecordingSurface::new(900, 400);
    render_scene(&mut direct);
    assert_eq!(resized, direct.into_commands());
    assert_eq!(host.passes(), 2);
}

#[test]
fn degenerate_sizes_do_not_panic() {
    for (w, h) in [(0, 0), (1, 1), (0, 720), (1280, 0), (3, 4000)] {
        let mut s = RecordingSurface::new(w, h);
        let summary = render_scene(&mut s);
        assert_eq!(summary.panels, PANEL_COUNT);
    }
}
