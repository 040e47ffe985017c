use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{TradeError, TradeResult};
use crate::render::Color;

/// Geometry and palette for the scatterplot scene.
///
/// Defaults reproduce the reference chart: a 1400x700 canvas, a scatter plot
/// inset by the margins, and a 100x300 year selector at (1310, 150).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    pub canvas: Viewport,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub axis_tick_count: usize,
    pub nice_tick_count: usize,
    pub bubble_radius: f64,
    pub bubble_label_offset: f64,
    pub font_size_px: f64,
    pub legend_swatch_px: f64,
    pub legend_spacing_px: f64,
    pub year_panel_x: f64,
    pub year_panel_y: f64,
    pub year_panel_width: f64,
    pub year_panel_height: f64,
    pub year_band_padding: f64,
    pub year_axis_tick_count: usize,
    pub selected_bar_color: Color,
    pub default_bar_color: Color,
    pub axis_color: Color,
    pub grid_color: Color,
    pub text_color: Color,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            canvas: Viewport::new(1400, 700),
            margin_top: 30.0,
            margin_right: 120.0,
            margin_bottom: 40.0,
            margin_left: 40.0,
            axis_tick_count: 5,
            nice_tick_count: 10,
            bubble_radius: 5.0,
            bubble_label_offset: 5.0,
            font_size_px: 10.0,
            legend_swatch_px: 12.0,
            legend_spacing_px: 14.0,
            year_panel_x: 1310.0,
            year_panel_y: 150.0,
            year_panel_width: 100.0,
            year_panel_height: 300.0,
            year_band_padding: 0.1,
            year_axis_tick_count: 2,
            selected_bar_color: Color::from_rgb_u32(0xf26868),
            default_bar_color: Color::from_rgb_u32(0x4594e8),
            axis_color: Color::rgb(0.0, 0.0, 0.0),
            grid_color: Color::rgb(0.85, 0.85, 0.85),
            text_color: Color::rgb(0.0, 0.0, 0.0),
        }
    }
}

impl SceneLayout {
    #[must_use]
    pub fn plot_width(&self) -> f64 {
        f64::from(self.canvas.width) - self.margin_left - self.margin_right
    }

    #[must_use]
    pub fn plot_height(&self) -> f64 {
        f64::from(self.canvas.height) - self.margin_top - self.margin_bottom
    }

    pub fn validate(&self) -> TradeResult<()> {
        if !self.canvas.is_valid() {
            return Err(TradeError::InvalidViewport {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        for (name, value) in [
            ("margin_top", self.margin_top),
            ("margin_right", self.margin_right),
            ("margin_bottom", self.margin_bottom),
            ("margin_left", self.margin_left),
            ("year_panel_x", self.year_panel_x),
            ("year_panel_y", self.year_panel_y),
            ("bubble_label_offset", self.bubble_label_offset),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TradeError::InvalidData(format!(
                    "layout `{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("bubble_radius", self.bubble_radius),
            ("font_size_px", self.font_size_px),
            ("legend_swatch_px", self.legend_swatch_px),
            ("legend_spacing_px", self.legend_spacing_px),
            ("year_panel_width", self.year_panel_width),
            ("year_panel_height", self.year_panel_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TradeError::InvalidData(format!(
                    "layout `{name}` must be finite and > 0"
                )));
            }
        }
        if self.plot_width() <= 0.0 || self.plot_height() <= 0.0 {
            return Err(TradeError::InvalidData(
                "margins leave no room for the plot area".to_owned(),
            ));
        }
        if self.axis_tick_count == 0 || self.nice_tick_count == 0 {
            return Err(TradeError::InvalidData(
                "tick counts must be > 0".to_owned(),
            ));
        }
        if !(0.0..1.0).contains(&self.year_band_padding) {
            return Err(TradeError::InvalidData(
                "year band padding must be in [0, 1)".to_owned(),
            ));
        }

        for color in [
            self.selected_bar_color,
            self.default_bar_color,
            self.axis_color,
            self.grid_color,
            self.text_color,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}
