//! # Keyframed Properties
//!
//! Emits a [`Track`] as a keyframed target property that reproduces the
//! source interpolation when sampled by [`crate::animatable::Animator`].
//!
//! Each waypoint gets an incoming and an outgoing Hermite tangent, expressed
//! in the parameter space of the segment it belongs to:
//! - `linear`: the chord of that segment.
//! - `clamped`, `tcb`: non-uniform Catmull-Rom; `clamped` additionally zeroes
//!   components at local extrema so the curve cannot overshoot.
//! - `ease`: zero.
//! - `constant`: the segment becomes a hold keyframe.
//!
//! Positions carry the tangents as spatial handles (`to`/`ti`); scalars encode
//! them in the time easing handles.

use crate::context::DocumentContext;
use crate::convert::change_axis;
use crate::geometry::{approximate_equal, CurveValue, Vector};
use crate::track::{Interpolation, Track, TrackValue, Waypoint};
use lottie_data::model::{EasingHandle, Keyframe, Property, Vec2};
use tracing::trace;

/// Incoming and outgoing tangent of one waypoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tangents<T> {
    pub incoming: T,
    pub outgoing: T,
}

fn side_tangent<T: TrackValue + CurveValue>(
    waypoints: &[Waypoint<T>],
    i: usize,
    interpolation: Interpolation,
    outgoing: bool,
) -> T {
    let n = waypoints.len();
    let cur = waypoints[i].value;

    let chord = if outgoing {
        waypoints[i + 1].value - cur
    } else {
        cur - waypoints[i - 1].value
    };

    match interpolation {
        Interpolation::Ease | Interpolation::Constant => T::zero(),
        Interpolation::Linear => chord,
        Interpolation::Tcb | Interpolation::Clamped => {
            if i == 0 || i == n - 1 {
                return chord;
            }
            let (prev, next) = (&waypoints[i - 1], &waypoints[i + 1]);
            let span = (next.frame - prev.frame) as f64;
            let own = if outgoing {
                (next.frame - waypoints[i].frame) as f64
            } else {
                (waypoints[i].frame - prev.frame) as f64
            };
            let tangent = (next.value - prev.value) * (own / span);
            if interpolation == Interpolation::Clamped {
                T::clamp_tangent(prev.value, cur, next.value, tangent)
            } else {
                tangent
            }
        }
    }
}

/// Per-waypoint tangents of a track with two or more waypoints.
pub fn compute_tangents<T: TrackValue + CurveValue>(track: &Track<T>) -> Vec<Tangents<T>> {
    let waypoints = &track.waypoints;
    let n = waypoints.len();
    (0..n)
        .map(|i| Tangents {
            incoming: if i == 0 {
                T::zero()
            } else {
                side_tangent(waypoints, i, waypoints[i].before, false)
            },
            outgoing: if i + 1 == n {
                T::zero()
            } else {
                side_tangent(waypoints, i, waypoints[i].after, true)
            },
        })
        .collect()
}

fn is_hold<T>(from: &Waypoint<T>, to: &Waypoint<T>) -> bool {
    from.after == Interpolation::Constant || to.before == Interpolation::Constant
}

/// Position property in target pixels. With `transform_axis` only y flips
/// (layer transform space); otherwise the point is also recentered.
/// Values are left unrounded; truncation happens when a vertex is emitted.
pub fn gen_properties_multi_dimensional_keyframed(
    track: &Track<Vector>,
    transform_axis: bool,
    ctx: &DocumentContext,
    ix: Option<u32>,
) -> Property<Vec2> {
    let point = |v: Vector| change_axis(v.val1, v.val2, transform_axis, ctx);
    let handle = |v: Vector| vec![v.val1, -v.val2];

    let waypoints = &track.waypoints;
    if waypoints.len() < 2 {
        return Property::fixed(point(track.value_at(0)), ix);
    }

    let tangents = compute_tangents(track);
    let mut keyframes = Vec::with_capacity(waypoints.len());
    for (i, pair) in waypoints.windows(2).enumerate() {
        let (from, to) = (&pair[0], &pair[1]);
        let mut kf = Keyframe::at(from.frame as f64);
        kf.s = Some(point(from.value));
        kf.e = Some(point(to.value));
        if is_hold(from, to) {
            kf.h = Some(1);
        } else {
            kf.o = Some(EasingHandle::LINEAR_OUT);
            kf.i = Some(EasingHandle::LINEAR_IN);
            kf.to = Some(handle(tangents[i].outgoing / 3.0));
            kf.ti = Some(handle(-tangents[i + 1].incoming / 3.0));
        }
        keyframes.push(kf);
    }

    let last = &waypoints[waypoints.len() - 1];
    let mut end = Keyframe::at(last.frame as f64);
    end.s = Some(point(last.value));
    keyframes.push(end);

    trace!(keyframes = keyframes.len(), "Emitted position keyframes");
    Property::animated(keyframes, ix)
}

/// Scalar property. The Hermite segment is encoded exactly in the easing
/// handles: with x at 1/3 and 2/3 the time mapping stays linear and the y
/// values are the normalized Bezier controls of the value curve.
pub fn gen_value_keyframed(track: &Track<f64>, ix: Option<u32>) -> Property<f64> {
    let waypoints = &track.waypoints;
    if waypoints.len() < 2 {
        return Property::fixed(track.value_at(0), ix);
    }

    let tangents = compute_tangents(track);
    let mut keyframes = Vec::with_capacity(waypoints.len());
    for (i, pair) in waypoints.windows(2).enumerate() {
        let (from, to) = (&pair[0], &pair[1]);
        let mut kf = Keyframe::at(from.frame as f64);
        kf.s = Some(from.value);
        kf.e = Some(to.value);
        if is_hold(from, to) {
            kf.h = Some(1);
        } else {
            let delta = to.value - from.value;
            if approximate_equal(delta, 0.0) {
                kf.o = Some(EasingHandle::LINEAR_OUT);
                kf.i = Some(EasingHandle::LINEAR_IN);
            } else {
                let out = tangents[i].outgoing;
                let inc = tangents[i + 1].incoming;
                kf.o = Some(EasingHandle::new(1.0 / 3.0, out / (3.0 * delta)));
                kf.i = Some(EasingHandle::new(2.0 / 3.0, 1.0 - inc / (3.0 * delta)));
            }
        }
        keyframes.push(kf);
    }

    let last = &waypoints[waypoints.len() - 1];
    let mut end = Keyframe::at(last.frame as f64);
    end.s = Some(last.value);
    keyframes.push(end);

    Property::animated(keyframes, ix)
}
