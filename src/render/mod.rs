mod frame;
mod null_renderer;
mod presenter;
mod primitives;
mod reconcile;
mod scene;
mod scene_layout;
mod tick_format;
mod transition;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use presenter::{Presenter, YearBar};
pub use primitives::{
    CATEGORY10, CirclePrimitive, Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use reconcile::{KeyedDiff, reconcile};
pub use scene::{BarNode, BubbleChangeStats, BubbleNode, LegendEntry, ScenePresenter};
pub use scene_layout::SceneLayout;
pub use tick_format::format_tick_label;
pub use transition::{BubblePose, Interpolate, Transition, TransitionScheduler, ease_cubic_in_out};

use crate::error::TradeResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from dataset and selection logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> TradeResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
