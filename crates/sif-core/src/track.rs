//! # Tracks
//!
//! Normalized, frame-indexed form of a source parameter.
//!
//! A parameter arrives either as a plain value node or as an `<animated>`
//! node. Both are read into a `Track` owned by the caller; a plain value
//! becomes a single waypoint at frame 0. The input tree is never modified.

use crate::context::DocumentContext;
use crate::convert::{get_frame, is_animated, AnimationState};
use crate::error::{ConvertError, Result};
use crate::geometry::Vector;
use crate::kind::ValueKind;
use crate::values::{kind_of_static, parse_value_node, WaypointValue};
use sif_data::Node;
use std::str::FromStr;
use tracing::debug;

/// Interpolation on one side of a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    #[default]
    Clamped,
    Tcb,
    Constant,
    Ease,
    Linear,
}

impl Interpolation {
    /// Unknown names fall back to `Clamped`, the source format's default.
    pub fn parse(name: Option<&str>) -> Self {
        match name {
            None => Interpolation::Clamped,
            Some("clamped") => Interpolation::Clamped,
            Some("tcb") | Some("auto") => Interpolation::Tcb,
            Some("constant") => Interpolation::Constant,
            Some("ease") | Some("halt") => Interpolation::Ease,
            Some("linear") => Interpolation::Linear,
            Some(other) => {
                debug!(interpolation = other, "Unknown interpolation, using clamped");
                Interpolation::Clamped
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint<T> {
    pub frame: i64,
    pub value: T,
    pub before: Interpolation,
    pub after: Interpolation,
}

/// Values a track can interpolate, with the overshoot guard of clamped waypoints.
pub trait TrackValue: Copy {
    fn zero() -> Self;

    /// Zeroes the components of `tangent` for which `cur` is a local extremum
    /// between `prev` and `next`.
    fn clamp_tangent(prev: Self, cur: Self, next: Self, tangent: Self) -> Self;
}

impl TrackValue for f64 {
    fn zero() -> Self {
        0.0
    }

    fn clamp_tangent(prev: f64, cur: f64, next: f64, tangent: f64) -> f64 {
        if (cur >= prev && cur >= next) || (cur <= prev && cur <= next) {
            0.0
        } else {
            tangent
        }
    }
}

impl TrackValue for Vector {
    fn zero() -> Self {
        Vector::ZERO
    }

    fn clamp_tangent(prev: Vector, cur: Vector, next: Vector, tangent: Vector) -> Vector {
        Vector {
            val1: f64::clamp_tangent(prev.val1, cur.val1, next.val1, tangent.val1),
            val2: f64::clamp_tangent(prev.val2, cur.val2, next.val2, tangent.val2),
            kind: tangent.kind,
        }
    }
}

/// Ordered waypoints of one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Track<T> {
    pub waypoints: Vec<Waypoint<T>>,
    /// How the parameter was declared before normalization.
    pub state: AnimationState,
}

impl<T: Copy> Track<T> {
    pub fn constant(value: T) -> Self {
        Self {
            waypoints: vec![Waypoint {
                frame: 0,
                value,
                before: Interpolation::Clamped,
                after: Interpolation::Clamped,
            }],
            state: AnimationState::Constant,
        }
    }

    /// Reads a parameter value node (plain or `<animated>`), converting each
    /// waypoint with `kind` (or the node's own kind) and mapping it through `extract`.
    pub fn from_node(
        node: &Node,
        kind: Option<ValueKind>,
        ctx: &DocumentContext,
        extract: impl Fn(&WaypointValue) -> Option<T>,
    ) -> Result<Self> {
        let state = is_animated(node);
        let mismatch = |value: &WaypointValue| ConvertError::UnexpectedNode {
            expected: kind.map(|k| k.to_string()).unwrap_or_default(),
            found: value.kind().to_string(),
        };

        if state == AnimationState::Constant {
            let kind = match kind {
                Some(k) => k,
                None => kind_of_static(node)?,
            };
            let parsed = parse_value_node(node, kind, 0, ctx)?;
            let value = extract(&parsed).ok_or_else(|| mismatch(&parsed))?;
            return Ok(Self::constant(value));
        }

        let kind = match kind {
            Some(k) => k,
            None => ValueKind::from_str(node.require_attr("type")?)?,
        };
        let mut waypoints = Vec::with_capacity(node.len());
        for waypoint in node.children_tagged("waypoint") {
            let frame = get_frame(waypoint, ctx)?;
            let parsed = parse_value_node(waypoint.first_child()?, kind, frame, ctx)?;
            let value = extract(&parsed).ok_or_else(|| mismatch(&parsed))?;
            waypoints.push(Waypoint {
                frame,
                value,
                before: Interpolation::parse(waypoint.attr("before")),
                after: Interpolation::parse(waypoint.attr("after")),
            });
        }
        if waypoints.is_empty() {
            return Err(ConvertError::Tree(sif_data::TreeError::MissingChild {
                parent: node.tag().to_string(),
                tag: "waypoint".to_string(),
            }));
        }
        waypoints.sort_by_key(|w| w.frame);

        Ok(Self { waypoints, state })
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Only tracks with two or more waypoints vary over time.
    pub fn is_animated(&self) -> bool {
        self.state == AnimationState::Animated
    }

    pub fn frames(&self) -> impl Iterator<Item = i64> + '_ {
        self.waypoints.iter().map(|w| w.frame)
    }

    /// Step sampling: the value of the last waypoint at or before `frame`,
    /// or the first waypoint when `frame` precedes them all.
    pub fn value_at(&self, frame: i64) -> T {
        let idx = self.waypoints.partition_point(|w| w.frame <= frame);
        self.waypoints[idx.saturating_sub(1)].value
    }
}

impl Track<Vector> {
    /// Position track, values in pixels.
    pub fn vectors(node: &Node, ctx: &DocumentContext) -> Result<Self> {
        Self::from_node(node, Some(ValueKind::Vector), ctx, WaypointValue::position)
    }
}

impl Track<f64> {
    pub fn scalars(node: &Node, kind: ValueKind, ctx: &DocumentContext) -> Result<Self> {
        Self::from_node(node, Some(kind), ctx, WaypointValue::scalar)
    }
}

impl Track<bool> {
    pub fn booleans(node: &Node, ctx: &DocumentContext) -> Result<Self> {
        Self::from_node(node, Some(ValueKind::Bool), ctx, WaypointValue::boolean)
    }
}
