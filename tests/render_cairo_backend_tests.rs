#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use trade_scatter::TradeError;
use trade_scatter::api::{TradeSession, ViewConfig};
use trade_scatter::core::TradeRecord;
use trade_scatter::render::{
    CairoContextRenderer, CairoRenderer, NullRenderer, SceneLayout, ScenePresenter,
};

fn static_session() -> TradeSession<ScenePresenter> {
    let records = vec![
        TradeRecord::new("A", "X", 2017, 10.0, 5.0).expect("record A"),
        TradeRecord::new("B", "Y", 2017, 3.0, 8.0).expect("record B"),
        TradeRecord::new("C", "X", 2018, 1.0, 1.0).expect("record C"),
    ];
    let config = ViewConfig::default().without_animation();
    let presenter =
        ScenePresenter::new(SceneLayout::default(), 0).expect("scene presenter");
    TradeSession::new(presenter, records, config).expect("session init")
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, TradeError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_every_scene_primitive() {
    let session = static_session();
    let mut renderer = CairoRenderer::new(1400, 700).expect("renderer");
    let mut counter = NullRenderer::default();

    session.presenter().render(&mut renderer).expect("cairo render");
    session.presenter().render(&mut counter).expect("null render");

    let stats = renderer.last_stats();
    assert_eq!(stats.lines_drawn, counter.last_line_count);
    assert_eq!(stats.rects_drawn, counter.last_rect_count);
    assert_eq!(stats.circles_drawn, 1);
    assert_eq!(stats.texts_drawn, counter.last_text_count);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let session = static_session();
    let frame = session.presenter().build_render_frame().expect("frame");
    let surface = ImageSurface::create(Format::ARgb32, 1400, 700).expect("surface");
    let context = Context::new(&surface).expect("context");
    let mut renderer = CairoRenderer::new(1, 1).expect("renderer");

    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on external context");
    assert_eq!(renderer.last_stats().circles_drawn, 1);
}

#[test]
fn cairo_renderer_writes_png() {
    let session = static_session();
    let mut renderer = CairoRenderer::new(1400, 700).expect("renderer");
    session.presenter().render(&mut renderer).expect("render");

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("scene.png");
    renderer.write_png(&path).expect("write png");
    let bytes = std::fs::read(&path).expect("read png");
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}
