use std::path::PathBuf;

use trade_scatter::api::{TradeSession, ViewConfig};
use trade_scatter::core::load_records_from_path;
use trade_scatter::render::{NullRenderer, SceneLayout, ScenePresenter};

const USAGE: &str = "usage: trade_scene_tool --input <csv> [--year <year>] [--top-k <count>] [--duration-ms <ms>] [--png <path>]";

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    year: Option<i32>,
    top_k: Option<usize>,
    duration_ms: Option<u64>,
    png: Option<PathBuf>,
}

fn main() {
    let _ = trade_scatter::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let records = load_records_from_path(&args.input)
        .map_err(|err| format!("failed to load `{}`: {err}", args.input.display()))?;

    let mut config = ViewConfig::default().with_top_k(args.top_k);
    if let Some(duration_ms) = args.duration_ms {
        config = config.with_transition_duration_ms(duration_ms);
    }

    let presenter = ScenePresenter::new(SceneLayout::default(), config.transition_duration_ms)
        .map_err(|err| format!("invalid scene layout: {err}"))?;
    let mut session =
        TradeSession::new(presenter, records, config).map_err(|err| err.to_string())?;

    if let Some(year) = args.year {
        session.select_year(year).map_err(|err| err.to_string())?;
    }

    // Settle every transition so the output shows the final scene.
    #[allow(clippy::cast_precision_loss)]
    let settle_at = session.presenter().clock_ms() + config.transition_duration_ms as f64;
    session
        .presenter_mut()
        .advance_to(settle_at)
        .map_err(|err| err.to_string())?;

    let snapshot = session.current_view();
    println!(
        "{}",
        snapshot.to_json_pretty().map_err(|err| err.to_string())?
    );

    let mut renderer = NullRenderer::default();
    session
        .presenter()
        .render(&mut renderer)
        .map_err(|err| err.to_string())?;
    eprintln!(
        "frame: lines={} rects={} circles={} texts={}",
        renderer.last_line_count,
        renderer.last_rect_count,
        renderer.last_circle_count,
        renderer.last_text_count
    );

    if let Some(path) = args.png {
        write_png(session.presenter(), &path)?;
    }
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn write_png(presenter: &ScenePresenter, path: &std::path::Path) -> Result<(), String> {
    use trade_scatter::render::CairoRenderer;

    let canvas = presenter.layout().canvas;
    let width = i32::try_from(canvas.width).map_err(|err| err.to_string())?;
    let height = i32::try_from(canvas.height).map_err(|err| err.to_string())?;
    let mut renderer = CairoRenderer::new(width, height).map_err(|err| err.to_string())?;
    presenter
        .render(&mut renderer)
        .map_err(|err| err.to_string())?;
    renderer
        .write_png(path)
        .map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

#[cfg(not(feature = "cairo-backend"))]
fn write_png(_presenter: &ScenePresenter, _path: &std::path::Path) -> Result<(), String> {
    Err("--png requires the `cairo-backend` feature".to_owned())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut year = None;
    let mut top_k = None;
    let mut duration_ms = None;
    let mut png = None::<PathBuf>;

    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("missing value for `{flag}`\n{USAGE}"))
        };
        match flag.as_str() {
            "--input" => input = Some(PathBuf::from(value()?)),
            "--year" => {
                year = Some(
                    value()?
                        .parse::<i32>()
                        .map_err(|err| format!("invalid --year: {err}"))?,
                );
            }
            "--top-k" => {
                top_k = Some(
                    value()?
                        .parse::<usize>()
                        .map_err(|err| format!("invalid --top-k: {err}"))?,
                );
            }
            "--duration-ms" => {
                duration_ms = Some(
                    value()?
                        .parse::<u64>()
                        .map_err(|err| format!("invalid --duration-ms: {err}"))?,
                );
            }
            "--png" => png = Some(PathBuf::from(value()?)),
            other => return Err(format!("unknown flag `{other}`\n{USAGE}")),
        }
    }

    let input = input.ok_or_else(|| USAGE.to_owned())?;
    Ok(CliArgs {
        input,
        year,
        top_k,
        duration_ms,
        png,
    })
}
