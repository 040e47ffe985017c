use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use trade_scatter::api::{TradeSession, ViewConfig};
use trade_scatter::core::{TradeRecord, build_indexes};
use trade_scatter::render::{NullRenderer, SceneLayout, ScenePresenter};

fn generated_records(countries: usize, years: i32) -> Vec<TradeRecord> {
    let mut records = Vec::with_capacity(countries * years as usize);
    for year in 2000..2000 + years {
        for i in 0..countries {
            let t = i as f64;
            let exports = 1_000.0 + (t * 37.0 + f64::from(year)) % 500_000.0;
            let imports = 1_000.0 + (t * 53.0 + f64::from(year) * 3.0) % 550_000.0;
            records.push(
                TradeRecord::new(
                    format!("country-{i}"),
                    format!("continent-{}", i % 6),
                    year,
                    exports,
                    imports,
                )
                .expect("valid generated record"),
            );
        }
    }
    records
}

fn bench_build_indexes_20k(c: &mut Criterion) {
    let records = generated_records(1_000, 20);

    c.bench_function("build_indexes_20k", |b| {
        b.iter(|| {
            let _ = build_indexes(black_box(&records)).expect("build indexes");
        })
    });
}

fn bench_select_year_static_scene(c: &mut Criterion) {
    let records = generated_records(200, 20);
    let config = ViewConfig::default()
        .with_top_k(Some(40))
        .without_animation();
    let presenter =
        ScenePresenter::new(SceneLayout::default(), config.transition_duration_ms)
            .expect("scene presenter");
    let mut session = TradeSession::new(presenter, records, config).expect("session init");

    let mut year = 2000;
    c.bench_function("select_year_static_scene", |b| {
        b.iter(|| {
            year = if year == 2019 { 2000 } else { year + 1 };
            session.select_year(black_box(year)).expect("select year");
        })
    });
}

fn bench_render_frame_animated_scene(c: &mut Criterion) {
    let records = generated_records(200, 5);
    let config = ViewConfig::default().with_top_k(Some(40));
    let presenter =
        ScenePresenter::new(SceneLayout::default(), config.transition_duration_ms)
            .expect("scene presenter");
    let mut session = TradeSession::new(presenter, records, config).expect("session init");
    session.select_year(2002).expect("select year");
    session
        .presenter_mut()
        .advance_to(600.0)
        .expect("advance clock");
    let mut renderer = NullRenderer::default();

    c.bench_function("render_frame_animated_scene", |b| {
        b.iter(|| {
            session
                .presenter()
                .render(black_box(&mut renderer))
                .expect("render frame");
        })
    });
}

criterion_group!(
    benches,
    bench_build_indexes_20k,
    bench_select_year_static_scene,
    bench_render_frame_animated_scene
);
criterion_main!(benches);
