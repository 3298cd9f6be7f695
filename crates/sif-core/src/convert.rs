//! Unit, time, angle and color conversion between the two formats.

use crate::context::{ConversionSettings, DocumentContext};
use crate::error::{ConvertError, Result};
use crate::geometry::{Matrix2, Vector};
use sif_data::Node;

/// Source angles run counter-clockwise from +x, target angles clockwise from +y.
///
/// The fractional part is dropped first. Whole turns are removed before the
/// reorientation and added back afterwards, so multi-turn spins keep their
/// winding count.
pub fn get_angle(theta: f64) -> f64 {
    let theta = theta.trunc() as i64;
    let shift = -(theta / 360);
    let theta = theta.rem_euclid(360);
    let theta = (90 - theta).rem_euclid(360);
    (theta + shift * 360) as f64
}

/// Moves a pixel position from the centered, y-up source axes to the
/// top-left, y-down target axes. Inside a layer transform only y flips.
pub fn change_axis(x: f64, y: f64, is_transform: bool, ctx: &DocumentContext) -> [f64; 2] {
    if is_transform {
        [x, -y]
    } else {
        [x + ctx.width / 2.0, -y + ctx.height / 2.0]
    }
}

/// Gamma-corrects one channel and maps it to 0..=255.
pub fn clamp_col(color: f64, settings: &ConversionSettings) -> u8 {
    let color = color.powf(1.0 / settings.gamma) * 255.0;
    (color as i64).clamp(0, 255) as u8
}

/// `#rrggbb` of a `<color>` node. Missing channels read as red 1, green 0, blue 0.
pub fn get_color_hex(node: &Node, settings: &ConversionSettings) -> Result<String> {
    let (mut red, mut green, mut blue) = (1.0, 0.0, 0.0);
    for col in node.children() {
        match col.tag() {
            "r" => red = col.text_f64()?,
            "g" => green = col.text_f64()?,
            "b" => blue = col.text_f64()?,
            _ => {}
        }
    }
    Ok(format!(
        "#{:02x}{:02x}{:02x}",
        clamp_col(red, settings),
        clamp_col(green, settings),
        clamp_col(blue, settings)
    ))
}

/// Splits a whitespace separated time literal into (number, unit suffix) tokens.
fn time_tokens(literal: &str) -> Result<Vec<(f64, char)>> {
    let malformed = || ConvertError::MalformedTimeLiteral(literal.to_string());
    let tokens: Vec<&str> = literal.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(malformed());
    }
    tokens
        .into_iter()
        .map(|token| {
            let unit = token.chars().last().ok_or_else(malformed)?;
            let number = &token[..token.len() - unit.len_utf8()];
            let value = number.parse::<f64>().map_err(|_| malformed())?;
            Ok((value, unit))
        })
        .collect()
}

/// Seconds represented by a waypoint time such as `"1h 2m 0.5s"`.
///
/// Frame tokens (`f`) are only meaningful on the canvas and are rejected here.
pub fn parse_time(literal: &str) -> Result<f64> {
    let mut total = 0.0;
    for (value, unit) in time_tokens(literal)? {
        total += match unit {
            'h' => value * 60.0 * 60.0,
            'm' => value * 60.0,
            's' => value,
            _ => return Err(ConvertError::MalformedTimeLiteral(literal.to_string())),
        };
    }
    Ok(total)
}

/// Frames represented by a canvas `begin-time`/`end-time`; `f` tokens count raw frames.
pub fn parse_canvas_time(literal: &str, fps: f64) -> Result<f64> {
    let mut frames = 0.0;
    for (value, unit) in time_tokens(literal)? {
        frames += match unit {
            'h' => value * 60.0 * 60.0 * fps,
            'm' => value * 60.0 * fps,
            's' => value * fps,
            'f' => value,
            _ => return Err(ConvertError::MalformedTimeLiteral(literal.to_string())),
        };
    }
    Ok(frames)
}

/// Time of a `<waypoint>` in seconds.
pub fn get_time(waypoint: &Node) -> Result<f64> {
    parse_time(waypoint.require_attr("time")?)
}

/// Frame of a `<waypoint>`, rounded with the document's tie rule.
pub fn get_frame(waypoint: &Node, ctx: &DocumentContext) -> Result<i64> {
    Ok(ctx.frame_of(get_time(waypoint)?))
}

/// How a parameter varies over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnimationState {
    /// Plain value node.
    Constant = 0,
    /// `<animated>` holding a single waypoint.
    Single = 1,
    /// `<animated>` holding two or more waypoints; needs resampling.
    Animated = 2,
}

pub fn is_animated(node: &Node) -> AnimationState {
    if node.tag() != "animated" {
        return AnimationState::Constant;
    }
    if node.len() == 1 {
        AnimationState::Single
    } else {
        AnimationState::Animated
    }
}

/// Cartesian offset of a tangent given as radius and angle in degrees.
pub fn radial_to_tangent(radius: f64, angle: f64) -> Vector {
    Matrix2::rotation(angle.to_radians()).get_transformed(&Vector::new(radius, 0.0))
}

pub fn trunc_decimals(values: [f64; 2], ctx: &DocumentContext) -> [f64; 2] {
    [ctx.trunc(values[0]), ctx.trunc(values[1])]
}
