//! # Document Context
//!
//! Settings and per-document values every conversion function reads.
//!
//! ## Key Types
//! - `ConversionSettings`: tunables, deserializable from JSON with defaults for every field.
//! - `DocumentContext`: immutable canvas metadata (frame rate, size, view box, scale).

use crate::convert::parse_canvas_time;
use crate::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};
use sif_data::{Node, TreeError};

const TRUNC_SNAP: f64 = 1e6;

/// Tie rule used when a time in seconds lands exactly between two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FrameRounding {
    /// Ties go to the even frame (the rule of the reference exporter).
    #[default]
    HalfEven,
    HalfAwayFromZero,
}

impl FrameRounding {
    pub fn round(&self, frame: f64) -> f64 {
        match self {
            FrameRounding::HalfEven => frame.round_ties_even(),
            FrameRounding::HalfAwayFromZero => frame.round(),
        }
    }
}

/// Conversion tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    /// Gamma of the source colors; channels are raised to `1 / gamma`.
    pub gamma: f64,
    /// Multiplier turning a source opacity into a target percentage.
    pub opacity_constant: f64,
    /// Emitted coordinates are truncated to this many decimal places.
    pub decimal_places: u32,
    pub frame_rounding: FrameRounding,
    pub default_width: u32,
    pub default_height: u32,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            gamma: 2.2,
            opacity_constant: 100.0,
            decimal_places: 3,
            frame_rounding: FrameRounding::HalfEven,
            default_width: 480,
            default_height: 270,
        }
    }
}

impl ConversionSettings {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Truncates toward zero at `decimal_places`. Never returns negative zero.
    ///
    /// The scaled value is first snapped to a 1e-6 grid so that inputs which
    /// already have `decimal_places` digits (`1.001 * 1000 = 1000.999...`)
    /// keep their last digit.
    pub fn trunc(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.decimal_places as i32);
        let scaled = ((value * scale) * TRUNC_SNAP).round() / TRUNC_SNAP;
        scaled.trunc() / scale + 0.0
    }
}

/// Canvas metadata shared by every conversion call of one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentContext {
    pub fps: f64,
    pub width: f64,
    pub height: f64,
    /// Left, top, right, bottom in source units.
    pub view_box: [f64; 4],
    pub pixels_per_unit: f64,
    pub begin_frame: f64,
    pub end_frame: f64,
    pub name: Option<String>,
    pub settings: ConversionSettings,
}

impl DocumentContext {
    pub fn new(
        fps: f64,
        width: f64,
        height: f64,
        view_box: [f64; 4],
        settings: ConversionSettings,
    ) -> Self {
        let pixels_per_unit = calculate_pixels_per_unit(width, &view_box);
        Self {
            fps,
            width,
            height,
            view_box,
            pixels_per_unit,
            begin_frame: 0.0,
            end_frame: 0.0,
            name: None,
            settings,
        }
    }

    pub fn with_pixels_per_unit(mut self, pixels_per_unit: f64) -> Self {
        self.pixels_per_unit = pixels_per_unit;
        self
    }

    pub fn with_frame_range(mut self, begin_frame: f64, end_frame: f64) -> Self {
        self.begin_frame = begin_frame;
        self.end_frame = end_frame;
        self
    }

    /// Reads the `<canvas>` root: `view-box`, `width`/`height`, `fps`,
    /// `begin-time`/`end-time` and the optional `<name>` child.
    pub fn from_canvas(root: &Node, settings: ConversionSettings) -> Result<Self> {
        if root.tag() != "canvas" {
            return Err(ConvertError::UnexpectedNode {
                expected: "canvas".to_string(),
                found: root.tag().to_string(),
            });
        }

        let raw_box = root.require_attr("view-box")?;
        let parsed: Vec<f64> = raw_box
            .split_whitespace()
            .map(|v| v.parse::<f64>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|_| invalid_number("<canvas view-box>", raw_box))?;
        let view_box: [f64; 4] = parsed
            .try_into()
            .map_err(|_| invalid_number("<canvas view-box>", raw_box))?;

        let width = match root.attr("width") {
            Some(_) => root.attr_f64("width")?.trunc(),
            None => settings.default_width as f64,
        };
        let height = match root.attr("height") {
            Some(_) => root.attr_f64("height")?.trunc(),
            None => settings.default_height as f64,
        };
        let fps = root.attr_f64("fps")?;

        let begin_frame = match root.attr("begin-time") {
            Some(t) => parse_canvas_time(t, fps)?,
            None => 0.0,
        };
        let end_frame = match root.attr("end-time") {
            Some(t) => parse_canvas_time(t, fps)?,
            None => 0.0,
        };
        let name = root.child("name").and_then(|n| n.text()).map(str::to_string);

        let mut ctx = Self::new(fps, width, height, view_box, settings)
            .with_frame_range(begin_frame, end_frame);
        ctx.name = name;
        Ok(ctx)
    }

    /// Seconds to the nearest frame under the configured tie rule.
    pub fn frame_of(&self, seconds: f64) -> i64 {
        self.settings.frame_rounding.round(seconds * self.fps) as i64
    }

    pub fn trunc(&self, value: f64) -> f64 {
        self.settings.trunc(value)
    }
}

/// Target pixels per source unit: canvas pixel width over the view box width.
pub fn calculate_pixels_per_unit(image_width: f64, view_box: &[f64; 4]) -> f64 {
    let image_area_width = view_box[2] - view_box[0];
    image_width / image_area_width
}

fn invalid_number(context: &str, value: &str) -> ConvertError {
    ConvertError::Tree(TreeError::InvalidNumber {
        context: context.to_string(),
        value: value.to_string(),
    })
}
