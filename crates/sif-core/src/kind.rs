use crate::error::{ConvertError, Result};
use std::fmt;
use std::str::FromStr;

/// The `type` tag of an animated node, selecting how its waypoint values are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Vector,
    Real,
    CircleRadius,
    Angle,
    RegionAngle,
    StarAngleNew,
    RotateLayerAngle,
    Opacity,
    EffectsOpacity,
    Points,
    RectangleSize,
    ImageScale,
    ScaleLayerZoom,
    GroupLayerScale,
    Time,
    Color,
    Bool,
    /// Position of a layer or shape origin.
    Origin,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Vector => "vector",
            ValueKind::Real => "real",
            ValueKind::CircleRadius => "circle_radius",
            ValueKind::Angle => "angle",
            ValueKind::RegionAngle => "region_angle",
            ValueKind::StarAngleNew => "star_angle_new",
            ValueKind::RotateLayerAngle => "rotate_layer_angle",
            ValueKind::Opacity => "opacity",
            ValueKind::EffectsOpacity => "effects_opacity",
            ValueKind::Points => "points",
            ValueKind::RectangleSize => "rectangle_size",
            ValueKind::ImageScale => "image_scale",
            ValueKind::ScaleLayerZoom => "scale_layer_zoom",
            ValueKind::GroupLayerScale => "group_layer_scale",
            ValueKind::Time => "time",
            ValueKind::Color => "color",
            ValueKind::Bool => "bool",
            ValueKind::Origin => "origin",
        }
    }
}

impl FromStr for ValueKind {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "vector" => ValueKind::Vector,
            "real" => ValueKind::Real,
            "circle_radius" => ValueKind::CircleRadius,
            "angle" => ValueKind::Angle,
            "region_angle" => ValueKind::RegionAngle,
            "star_angle_new" => ValueKind::StarAngleNew,
            "rotate_layer_angle" => ValueKind::RotateLayerAngle,
            "opacity" => ValueKind::Opacity,
            "effects_opacity" => ValueKind::EffectsOpacity,
            "points" => ValueKind::Points,
            "rectangle_size" => ValueKind::RectangleSize,
            "image_scale" => ValueKind::ImageScale,
            "scale_layer_zoom" => ValueKind::ScaleLayerZoom,
            "group_layer_scale" => ValueKind::GroupLayerScale,
            "time" => ValueKind::Time,
            "color" => ValueKind::Color,
            "bool" => ValueKind::Bool,
            "origin" => ValueKind::Origin,
            other => return Err(ConvertError::UnknownValueKind(other.to_string())),
        })
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
