use std::f64::consts::TAU;
use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{TradeError, TradeResult};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> TradeResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Renders offscreen into an image surface through `Renderer::render`, or in
/// place on an external Cairo context through `CairoContextRenderer`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> TradeResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(TradeError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> TradeResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the last rendered surface as PNG.
    pub fn write_png(&self, path: impl AsRef<Path>) -> TradeResult<()> {
        let mut file = File::create(path)?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|err| TradeError::InvalidData(format!("failed to write png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> TradeResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        for line in &frame.lines {
            stroke_line(context, line)?;
        }
        for rect in &frame.rects {
            fill_rect(context, rect)?;
        }
        for circle in &frame.circles {
            fill_circle(context, circle)?;
        }
        for text in &frame.texts {
            show_text(context, text);
        }

        self.last_stats = CairoRenderStats {
            lines_drawn: frame.lines.len(),
            rects_drawn: frame.rects.len(),
            circles_drawn: frame.circles.len(),
            texts_drawn: frame.texts.len(),
        };
        Ok(())
    }
}

fn stroke_line(context: &Context, line: &LinePrimitive) -> TradeResult<()> {
    apply_color(context, line.color);
    context.set_line_width(line.stroke_width);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err))
}

fn fill_rect(context: &Context, rect: &RectPrimitive) -> TradeResult<()> {
    // Zero-width year bars are legal and simply paint nothing.
    if rect.width == 0.0 || rect.height == 0.0 {
        return Ok(());
    }
    apply_color(context, rect.fill_color);
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill rect", err))
}

fn fill_circle(context: &Context, circle: &CirclePrimitive) -> TradeResult<()> {
    if circle.fill_color.alpha <= 0.0 {
        return Ok(());
    }
    apply_color(context, circle.fill_color);
    context.new_sub_path();
    context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill circle", err))
}

fn show_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let font = FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
    layout.set_font_description(Some(&font));
    layout.set_text(&text.text);

    let (width, _) = layout.pixel_size();
    let offset = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => f64::from(width) / 2.0,
        TextHAlign::Right => f64::from(width),
    };
    apply_color(context, text.color);
    context.move_to(text.x - offset, text.y);
    pangocairo::functions::show_layout(context, &layout);
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> TradeResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> TradeResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> TradeError {
    TradeError::InvalidData(format!("{prefix}: {err}"))
}
