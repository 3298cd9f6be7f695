//! # Region Resampling
//!
//! Turns an animated spline, whose vertices, tangents, split flags and
//! layer origin each run on their own waypoint grid, into one synchronized
//! shape timeline where every keyframe carries every vertex.
//!
//! ## Stages
//! 1. [`normalize_bline`]: reads every sub-parameter into a [`Track`]; constants
//!    become single-waypoint tracks. The layer node is only read.
//! 2. Frame window and frame set over all animated tracks.
//! 3. Per-vertex curves (point path, radius/theta properties) kept in a
//!    [`CurveStore`] scoped to the call.
//! 4. One [`ShapeSegment`] per frame of the set, sampled at the frame and at
//!    the next frame of the set, then a terminal record.

use crate::animatable::Animator;
use crate::context::DocumentContext;
use crate::convert::{radial_to_tangent, trunc_decimals};
use crate::error::{ConvertError, Result};
use crate::geometry::Vector;
use crate::keyframed::{gen_properties_multi_dimensional_keyframed, gen_value_keyframed};
use crate::kind::ValueKind;
use crate::store::CurveStore;
use crate::track::Track;
use crate::window::{FrameSet, FrameWindow};
use lottie_data::model::{BezierPath, Property, ShapeKeyframe, ShapeSegment, TerminalKeyframe, Vec2};
use sif_data::{Node, TreeError};
use tracing::{debug, instrument, trace, warn};

/// Radius and angle of one tangent handle.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialTracks {
    /// Pixels.
    pub radius: Track<f64>,
    /// Source degrees, counter-clockwise from +x.
    pub theta: Track<f64>,
}

impl RadialTracks {
    /// Reads a `<radial_composite>` node.
    pub fn from_node(node: &Node, ctx: &DocumentContext) -> Result<Self> {
        if node.tag() != "radial_composite" {
            return Err(ConvertError::UnexpectedNode {
                expected: "radial_composite".to_string(),
                found: node.tag().to_string(),
            });
        }
        let radius = node.require_child("radius")?.first_child()?;
        let theta = node.require_child("theta")?.first_child()?;
        Ok(Self {
            radius: Track::scalars(radius, ValueKind::Real, ctx)?,
            theta: Track::scalars(theta, ValueKind::RegionAngle, ctx)?,
        })
    }
}

/// All sub-tracks of one spline vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexTracks {
    pub point: Track<Vector>,
    pub t1: RadialTracks,
    pub t2: RadialTracks,
    pub split_radius: Track<bool>,
    pub split_angle: Track<bool>,
}

impl VertexTracks {
    /// Reads one `<entry><composite type="bline_point">` of a spline.
    pub fn from_entry(entry: &Node, ctx: &DocumentContext) -> Result<Self> {
        let composite = entry.first_child()?;
        if composite.tag() != "composite" {
            return Err(ConvertError::UnexpectedNode {
                expected: "composite".to_string(),
                found: composite.tag().to_string(),
            });
        }
        Ok(Self {
            point: Track::vectors(value_of(composite, "point")?, ctx)?,
            t1: RadialTracks::from_node(value_of(composite, "t1")?, ctx)?,
            t2: RadialTracks::from_node(value_of(composite, "t2")?, ctx)?,
            split_radius: split_flag(composite, "split_radius", ctx)?,
            split_angle: split_flag(composite, "split_angle", ctx)?,
        })
    }

    fn extend(&self, window: &mut FrameWindow, frames: &mut FrameSet) {
        window.update(&self.point);
        frames.update(&self.point);
        window.update(&self.split_radius);
        frames.update(&self.split_radius);
        window.update(&self.split_angle);
        frames.update(&self.split_angle);
        for radial in [&self.t1, &self.t2] {
            window.update(&radial.radius);
            frames.update(&radial.radius);
            window.update(&radial.theta);
            frames.update(&radial.theta);
        }
    }
}

fn value_of<'a>(composite: &'a Node, tag: &str) -> Result<&'a Node> {
    Ok(composite.require_child(tag)?.first_child()?)
}

/// Older documents only carry the combined `split` flag.
fn split_flag(composite: &Node, tag: &str, ctx: &DocumentContext) -> Result<Track<bool>> {
    match composite.child(tag).or_else(|| composite.child("split")) {
        Some(flag) => Track::booleans(flag.first_child()?, ctx),
        None => Ok(Track::constant(false)),
    }
}

/// A region layer read into tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBline {
    pub vertices: Vec<VertexTracks>,
    pub origin: Track<Vector>,
    pub closed: bool,
}

impl NormalizedBline {
    /// Window and frame set over every animated track. A timeline where
    /// nothing moves collapses to frame 0.
    pub fn frame_window(&self) -> (FrameWindow, FrameSet) {
        let mut window = FrameWindow::new();
        let mut frames = FrameSet::new();
        for vertex in &self.vertices {
            vertex.extend(&mut window, &mut frames);
        }
        window.update(&self.origin);
        frames.update(&self.origin);

        if window.is_empty() {
            frames.insert(0);
        }
        (window.finalize(), frames)
    }
}

/// Reads the `bline` and `origin` parameters of a region layer.
pub fn normalize_bline(layer: &Node, ctx: &DocumentContext) -> Result<NormalizedBline> {
    let bline = layer
        .param("bline")
        .ok_or_else(|| TreeError::MissingChild {
            parent: layer.tag().to_string(),
            tag: "param name=\"bline\"".to_string(),
        })?
        .first_child()?;
    if bline.tag() != "bline" {
        return Err(ConvertError::UnexpectedNode {
            expected: "bline".to_string(),
            found: bline.tag().to_string(),
        });
    }
    let closed = matches!(bline.attr("loop"), Some(v) if v != "false");

    let vertices = bline
        .children_tagged("entry")
        .map(|entry| VertexTracks::from_entry(entry, ctx))
        .collect::<Result<Vec<_>>>()?;

    let origin = match layer.param("origin") {
        Some(param) => Track::vectors(param.first_child()?, ctx)?,
        None => {
            warn!(layer = %layer, "Region without origin, using (0, 0)");
            Track::constant(Vector::ZERO)
        }
    };

    Ok(NormalizedBline {
        vertices,
        origin,
        closed,
    })
}

/// Radius and angle curves of one tangent, sampled by the emitter.
#[derive(Debug, Clone)]
pub struct RadialCurves {
    pub radius: Property<f64>,
    pub theta: Property<f64>,
}

impl RadialCurves {
    fn from_tracks(tracks: &RadialTracks) -> Self {
        Self {
            radius: gen_value_keyframed(&tracks.radius, None),
            theta: gen_value_keyframed(&tracks.theta, None),
        }
    }

    fn sample(&self, frame: f64) -> (f64, f64) {
        (
            Animator::resolve_f64(&self.radius, frame),
            Animator::resolve_f64(&self.theta, frame),
        )
    }
}

/// Precomputed curves of one vertex.
#[derive(Debug, Clone)]
pub struct VertexCurves {
    /// Vertex position in target axes, without the layer origin.
    pub point_path: Property<Vec2>,
    pub t1: RadialCurves,
    pub t2: RadialCurves,
    pub split_radius: Track<bool>,
    pub split_angle: Track<bool>,
}

impl VertexCurves {
    pub fn new(vertex: &VertexTracks, ctx: &DocumentContext) -> Self {
        Self {
            point_path: gen_properties_multi_dimensional_keyframed(&vertex.point, false, ctx, None),
            t1: RadialCurves::from_tracks(&vertex.t1),
            t2: RadialCurves::from_tracks(&vertex.t2),
            split_radius: vertex.split_radius.clone(),
            split_angle: vertex.split_angle.clone(),
        }
    }
}

/// Both tangents of a vertex at `frame`, in source axes.
///
/// Radius and angle are sampled first and combined afterwards. Without a
/// split radius (angle) the second tangent reuses the first one's radius (angle).
pub fn get_tangent_at_frame(curves: &VertexCurves, frame: i64) -> (Vector, Vector) {
    let at = frame as f64;
    let (r1, a1) = curves.t1.sample(at);
    let (r2, a2) = curves.t2.sample(at);

    let r2 = if curves.split_radius.value_at(frame) { r2 } else { r1 };
    let a2 = if curves.split_angle.value_at(frame) { a2 } else { a1 };

    (radial_to_tangent(r1, a1), radial_to_tangent(r2, a2))
}

/// Source tangents to target in/out handles: thirded, the incoming one
/// reversed, y flipped.
pub fn convert_tangent_to_lottie(t1: Vector, t2: Vector) -> (Vector, Vector) {
    let t1 = t1 / 3.0;
    let t2 = t2 / 3.0;
    (Vector::new(-t1.val1, t1.val2), Vector::new(t2.val1, -t2.val2))
}

fn push_vertex(
    block: &mut BezierPath,
    curves: &VertexCurves,
    origin: &Property<Vec2>,
    frame: i64,
    ctx: &DocumentContext,
) {
    let at = frame as f64;
    // Curves hold unrounded values; this is the only truncation point.
    let position =
        Animator::resolve_vec2(&curves.point_path, at) + Animator::resolve_vec2(origin, at);

    let (t1, t2) = get_tangent_at_frame(curves, frame);
    let (tan_in, tan_out) = convert_tangent_to_lottie(t1, t2);

    block.i.push(trunc_decimals(tan_in.get_list(), ctx));
    block.o.push(trunc_decimals(tan_out.get_list(), ctx));
    block.v.push(trunc_decimals(position.to_array(), ctx));
}

/// Emits the synchronized timeline of an already normalized spline.
pub fn resample_bline(bline: &NormalizedBline, ctx: &DocumentContext) -> Vec<ShapeKeyframe> {
    let (window, frames) = bline.frame_window();
    debug!(
        first = window.first,
        last = window.last,
        frames = frames.len(),
        vertices = bline.vertices.len(),
        "Computed frame window"
    );

    let mut store = CurveStore::new();
    let keys: Vec<_> = bline
        .vertices
        .iter()
        .map(|vertex| store.put(VertexCurves::new(vertex, ctx)))
        .collect();
    let origin = gen_properties_multi_dimensional_keyframed(&bline.origin, true, ctx, None);

    let mut timeline = Vec::with_capacity(frames.len() + 1);
    for frame in frames.within(window) {
        let next = frames.next_frame(frame, window);
        let mut segment = ShapeSegment::new(frame as f64, bline.closed);
        let (start, end) = segment.blocks_mut();
        for curves in keys.iter().filter_map(|key| store.get(key)) {
            push_vertex(start, curves, &origin, frame, ctx);
            push_vertex(end, curves, &origin, next, ctx);
        }
        trace!(frame, next, "Emitted shape keyframe");
        timeline.push(ShapeKeyframe::Segment(segment));
    }
    timeline.push(ShapeKeyframe::Terminal(TerminalKeyframe { t: window.last as f64 }));

    timeline
}

/// Synchronized shape timeline of a `<layer type="region">`.
#[instrument(level = "debug", skip(layer, ctx))]
pub fn gen_bline_region(layer: &Node, ctx: &DocumentContext) -> Result<Vec<ShapeKeyframe>> {
    let bline = normalize_bline(layer, ctx)?;
    Ok(resample_bline(&bline, ctx))
}
