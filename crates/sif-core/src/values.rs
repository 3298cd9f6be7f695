//! Waypoint value extraction.
//!
//! Reads the value stored at one waypoint of an `<animated>` node and
//! converts it to target units according to the node's value kind.

use crate::context::DocumentContext;
use crate::convert::{get_angle, get_frame, parse_time};
use crate::error::{ConvertError, Result};
use crate::geometry::{Color, Vector};
use crate::kind::ValueKind;
use sif_data::Node;
use std::str::FromStr;

/// A converted waypoint value. Every variant except `Position` records the
/// frame the waypoint sits on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaypointValue {
    /// Pixel position, not yet moved to target axes.
    Position { x: f64, y: f64 },
    /// Length in pixels.
    Real { value: f64, frame: i64 },
    CircleRadius { diameter: f64, frame: i64 },
    /// Angle already reoriented to the target convention.
    Angle { degrees: f64, frame: i64 },
    RegionAngle { degrees: f64, frame: i64 },
    StarAngle { degrees: f64, frame: i64 },
    /// Rotation of a rotate layer, sign already reversed.
    RotateLayerAngle { degrees: f64, frame: i64 },
    Opacity { percent: f64, frame: i64 },
    EffectsOpacity { amount: f64, frame: i64 },
    Points { count: i64, frame: i64 },
    RectangleSize { width: f64, height: f64, frame: i64 },
    ImageScale { scale: f64, extra: f64, frame: i64 },
    LayerZoom { percent: f64, frame: i64 },
    GroupScale { x_percent: f64, y_percent: f64, frame: i64 },
    Time { seconds: f64, frame: i64 },
    Color { color: Color, frame: i64 },
    Bool { value: bool, frame: i64 },
}

impl WaypointValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            WaypointValue::Position { .. } => ValueKind::Vector,
            WaypointValue::Real { .. } => ValueKind::Real,
            WaypointValue::CircleRadius { .. } => ValueKind::CircleRadius,
            WaypointValue::Angle { .. } => ValueKind::Angle,
            WaypointValue::RegionAngle { .. } => ValueKind::RegionAngle,
            WaypointValue::StarAngle { .. } => ValueKind::StarAngleNew,
            WaypointValue::RotateLayerAngle { .. } => ValueKind::RotateLayerAngle,
            WaypointValue::Opacity { .. } => ValueKind::Opacity,
            WaypointValue::EffectsOpacity { .. } => ValueKind::EffectsOpacity,
            WaypointValue::Points { .. } => ValueKind::Points,
            WaypointValue::RectangleSize { .. } => ValueKind::RectangleSize,
            WaypointValue::ImageScale { .. } => ValueKind::ImageScale,
            WaypointValue::LayerZoom { .. } => ValueKind::ScaleLayerZoom,
            WaypointValue::GroupScale { .. } => ValueKind::GroupLayerScale,
            WaypointValue::Time { .. } => ValueKind::Time,
            WaypointValue::Color { .. } => ValueKind::Color,
            WaypointValue::Bool { .. } => ValueKind::Bool,
        }
    }

    pub fn frame(&self) -> Option<i64> {
        match *self {
            WaypointValue::Position { .. } => None,
            WaypointValue::Real { frame, .. }
            | WaypointValue::CircleRadius { frame, .. }
            | WaypointValue::Angle { frame, .. }
            | WaypointValue::RegionAngle { frame, .. }
            | WaypointValue::StarAngle { frame, .. }
            | WaypointValue::RotateLayerAngle { frame, .. }
            | WaypointValue::Opacity { frame, .. }
            | WaypointValue::EffectsOpacity { frame, .. }
            | WaypointValue::Points { frame, .. }
            | WaypointValue::RectangleSize { frame, .. }
            | WaypointValue::ImageScale { frame, .. }
            | WaypointValue::LayerZoom { frame, .. }
            | WaypointValue::GroupScale { frame, .. }
            | WaypointValue::Time { frame, .. }
            | WaypointValue::Color { frame, .. }
            | WaypointValue::Bool { frame, .. } => Some(frame),
        }
    }

    /// The single number of scalar kinds.
    pub fn scalar(&self) -> Option<f64> {
        match *self {
            WaypointValue::Real { value, .. } => Some(value),
            WaypointValue::CircleRadius { diameter, .. } => Some(diameter),
            WaypointValue::Angle { degrees, .. }
            | WaypointValue::RegionAngle { degrees, .. }
            | WaypointValue::StarAngle { degrees, .. }
            | WaypointValue::RotateLayerAngle { degrees, .. } => Some(degrees),
            WaypointValue::Opacity { percent, .. } => Some(percent),
            WaypointValue::EffectsOpacity { amount, .. } => Some(amount),
            WaypointValue::Points { count, .. } => Some(count as f64),
            WaypointValue::Time { seconds, .. } => Some(seconds),
            _ => None,
        }
    }

    pub fn position(&self) -> Option<Vector> {
        match *self {
            WaypointValue::Position { x, y } => Some(Vector::new(x, y)),
            _ => None,
        }
    }

    pub fn boolean(&self) -> Option<bool> {
        match *self {
            WaypointValue::Bool { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Value laid out the way the target format stores this kind.
    pub fn lottie_value(&self) -> Vec<f64> {
        match *self {
            WaypointValue::Position { x, y } => vec![x, y],
            WaypointValue::CircleRadius { diameter, .. } => vec![diameter, diameter],
            WaypointValue::RectangleSize { width, height, .. } => vec![width, height],
            WaypointValue::ImageScale { scale, extra, .. } => vec![scale, extra],
            WaypointValue::LayerZoom { percent, .. } => vec![percent, percent],
            WaypointValue::GroupScale {
                x_percent,
                y_percent,
                ..
            } => vec![x_percent, y_percent],
            WaypointValue::Color { color, .. } => color.get_val().to_vec(),
            WaypointValue::Bool { value, .. } => vec![if value { 1.0 } else { 0.0 }],
            other => vec![other.scalar().unwrap_or_default()],
        }
    }
}

/// Extracts waypoint `i` of an `<animated>` node, dispatching on its `type`.
pub fn parse_position(animated: &Node, i: usize, ctx: &DocumentContext) -> Result<WaypointValue> {
    let kind = ValueKind::from_str(animated.require_attr("type")?)?;
    let waypoint = animated.nth(i)?;
    let frame = match kind {
        ValueKind::Vector | ValueKind::Origin => 0,
        _ => get_frame(waypoint, ctx)?,
    };
    parse_value_node(waypoint.first_child()?, kind, frame, ctx)
}

/// Converts one value node (the child of a waypoint, or a static parameter value).
pub fn parse_value_node(
    node: &Node,
    kind: ValueKind,
    frame: i64,
    ctx: &DocumentContext,
) -> Result<WaypointValue> {
    let ppu = ctx.pixels_per_unit;
    let value = || node.attr_f64("value");

    Ok(match kind {
        ValueKind::Vector | ValueKind::Origin => {
            let (x, y) = vector_components(node)?;
            WaypointValue::Position {
                x: x * ppu,
                y: y * ppu,
            }
        }
        ValueKind::Real => WaypointValue::Real {
            value: value()? * ppu,
            frame,
        },
        ValueKind::CircleRadius => WaypointValue::CircleRadius {
            diameter: value()? * ppu * 2.0,
            frame,
        },
        ValueKind::Angle => WaypointValue::Angle {
            degrees: get_angle(value()?),
            frame,
        },
        ValueKind::RegionAngle => WaypointValue::RegionAngle {
            degrees: value()?,
            frame,
        },
        ValueKind::StarAngleNew => WaypointValue::StarAngle {
            degrees: value()?,
            frame,
        },
        ValueKind::RotateLayerAngle => WaypointValue::RotateLayerAngle {
            degrees: -value()?,
            frame,
        },
        ValueKind::Opacity => WaypointValue::Opacity {
            percent: value()? * ctx.settings.opacity_constant,
            frame,
        },
        ValueKind::EffectsOpacity => WaypointValue::EffectsOpacity {
            amount: value()?,
            frame,
        },
        ValueKind::Points => WaypointValue::Points {
            count: value()?.trunc() as i64,
            frame,
        },
        ValueKind::RectangleSize => WaypointValue::RectangleSize {
            width: value()? * ppu,
            height: node.attr_f64("value2")? * ppu,
            frame,
        },
        ValueKind::ImageScale => WaypointValue::ImageScale {
            scale: value()?,
            extra: node.attr_f64("value2")?,
            frame,
        },
        ValueKind::ScaleLayerZoom => WaypointValue::LayerZoom {
            percent: value()?.exp() * 100.0,
            frame,
        },
        ValueKind::GroupLayerScale => {
            let (x, y) = vector_components(node)?;
            WaypointValue::GroupScale {
                x_percent: x * 100.0,
                y_percent: y * 100.0,
                frame,
            }
        }
        ValueKind::Time => WaypointValue::Time {
            seconds: parse_time(node.require_attr("value")?)?,
            frame,
        },
        ValueKind::Color => {
            let gamma = ctx.settings.gamma;
            let channel = |i: usize| -> Result<f64> { Ok(node.nth(i)?.text_f64()?) };
            WaypointValue::Color {
                color: Color::new(
                    channel(0)?.powf(1.0 / gamma),
                    channel(1)?.powf(1.0 / gamma),
                    channel(2)?.powf(1.0 / gamma),
                    channel(3)?,
                ),
                frame,
            }
        }
        ValueKind::Bool => WaypointValue::Bool {
            value: parse_bool(node.require_attr("value")?),
            frame,
        },
    })
}

/// Value kind implied by the tag of a static value node.
pub fn kind_of_static(node: &Node) -> Result<ValueKind> {
    match node.tag() {
        "vector" => Ok(ValueKind::Vector),
        "real" => Ok(ValueKind::Real),
        "angle" => Ok(ValueKind::Angle),
        "bool" => Ok(ValueKind::Bool),
        "color" => Ok(ValueKind::Color),
        "time" => Ok(ValueKind::Time),
        "integer" => Ok(ValueKind::Points),
        other => Err(ConvertError::UnknownValueKind(other.to_string())),
    }
}

fn vector_components(node: &Node) -> Result<(f64, f64)> {
    Ok((node.nth(0)?.text_f64()?, node.nth(1)?.text_f64()?))
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim(), "true" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ConversionSettings;
    use crate::geometry::approximate_equal;
    use sif_data::build::*;

    fn ctx() -> DocumentContext {
        DocumentContext::new(
            24.0,
            480.0,
            270.0,
            [-4.0, 2.25, 4.0, -2.25],
            ConversionSettings::default(),
        )
    }

    fn single(kind: &str, time: &str, value: Node) -> Node {
        animated(kind, vec![waypoint(time, value)])
    }

    #[test]
    fn test_vector_has_no_frame() {
        let node = single("vector", "1s", vector(1.0, -0.5));
        let v = parse_position(&node, 0, &ctx()).unwrap();
        assert_eq!(v, WaypointValue::Position { x: 60.0, y: -30.0 });
        assert_eq!(v.frame(), None);
        assert_eq!(v.lottie_value(), vec![60.0, -30.0]);
    }

    #[test]
    fn test_scalar_kinds() {
        let ctx = ctx();
        let radius = parse_position(&single("circle_radius", "0.5s", real(0.5)), 0, &ctx).unwrap();
        assert_eq!(radius, WaypointValue::CircleRadius { diameter: 60.0, frame: 12 });
        assert_eq!(radius.lottie_value(), vec![60.0, 60.0]);

        let turned = parse_position(&single("angle", "1s", angle(0.0)), 0, &ctx).unwrap();
        assert_eq!(turned, WaypointValue::Angle { degrees: 90.0, frame: 24 });

        let raw = parse_position(&single("region_angle", "1s", angle(33.5)), 0, &ctx).unwrap();
        assert_eq!(raw.scalar(), Some(33.5));

        let rotate_node = single("rotate_layer_angle", "0s", angle(45.0));
        let rotate = parse_position(&rotate_node, 0, &ctx).unwrap();
        assert_eq!(rotate.scalar(), Some(-45.0));

        let opacity = parse_position(&single("opacity", "0s", real(0.25)), 0, &ctx).unwrap();
        assert_eq!(opacity, WaypointValue::Opacity { percent: 25.0, frame: 0 });

        let points = parse_position(&single("points", "2s", integer(5)), 0, &ctx).unwrap();
        assert_eq!(points, WaypointValue::Points { count: 5, frame: 48 });
    }

    #[test]
    fn test_compound_kinds() {
        let ctx = ctx();
        let size = Node::new("real").with_attr("value", "1").with_attr("value2", "0.5");
        let rect = parse_position(&single("rectangle_size", "0s", size), 0, &ctx).unwrap();
        assert_eq!(rect, WaypointValue::RectangleSize { width: 60.0, height: 30.0, frame: 0 });
        assert_eq!(rect.lottie_value(), vec![60.0, 30.0]);

        let zoom = parse_position(&single("scale_layer_zoom", "0s", real(0.0)), 0, &ctx).unwrap();
        assert_eq!(zoom, WaypointValue::LayerZoom { percent: 100.0, frame: 0 });
        let zoom = parse_position(&single("scale_layer_zoom", "0s", real(1.0)), 0, &ctx).unwrap();
        assert!(approximate_equal(zoom.lottie_value()[0], std::f64::consts::E * 100.0));

        let scale_node = single("group_layer_scale", "1s", vector(1.5, 0.5));
        let scale = parse_position(&scale_node, 0, &ctx).unwrap();
        assert_eq!(
            scale,
            WaypointValue::GroupScale { x_percent: 150.0, y_percent: 50.0, frame: 24 }
        );

        let t = parse_position(&single("time", "1s", time("2s")), 0, &ctx).unwrap();
        assert_eq!(t, WaypointValue::Time { seconds: 2.0, frame: 24 });
    }

    #[test]
    fn test_color_is_gamma_corrected() {
        let node = single("color", "0s", color(0.25, 1.0, 0.0, 0.5));
        match parse_position(&node, 0, &ctx()).unwrap() {
            WaypointValue::Color { color, frame } => {
                assert_eq!(frame, 0);
                assert!(approximate_equal(color.red, 0.25f64.powf(1.0 / 2.2)));
                assert_eq!(color.green, 1.0);
                assert_eq!(color.blue, 0.0);
                assert_eq!(color.alpha, 0.5);
            }
            other => panic!("Expected color, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_fails() {
        let node = single("gradient", "0s", real(1.0));
        assert_eq!(
            parse_position(&node, 0, &ctx()),
            Err(ConvertError::UnknownValueKind("gradient".to_string()))
        );
        assert!(kind_of_static(&Node::new("gradient")).is_err());
    }

    #[test]
    fn test_frame_literal_in_waypoint_fails() {
        let node = single("real", "3f", real(1.0));
        assert!(matches!(
            parse_position(&node, 0, &ctx()),
            Err(ConvertError::MalformedTimeLiteral(_))
        ));
    }
}
