use crate::geometry::Hermite;
use glam::DVec2;
use lottie_data::model::{EasingHandle, Property, Value};

pub trait Interpolatable: Sized + Clone {
    fn lerp(&self, other: &Self, t: f64) -> Self;

    fn lerp_spatial(
        &self,
        other: &Self,
        t: f64,
        _tan_in: Option<&Vec<f64>>,
        _tan_out: Option<&Vec<f64>>,
    ) -> Self {
        self.lerp(other, t)
    }
}

impl Interpolatable for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Interpolatable for DVec2 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        DVec2::lerp(*self, *other, t)
    }

    fn lerp_spatial(
        &self,
        other: &Self,
        t: f64,
        tan_in: Option<&Vec<f64>>,
        tan_out: Option<&Vec<f64>>,
    ) -> Self {
        let handle = |h: Option<&Vec<f64>>| match h {
            Some(v) if v.len() >= 2 => DVec2::new(v[0], v[1]),
            _ => DVec2::ZERO,
        };

        // Bezier handles are a third of the Hermite tangents.
        let t_out = handle(tan_out) * 3.0;
        let t_in = handle(tan_in) * -3.0;

        Hermite::new(*self, *other, t_out, t_in).value(t)
    }
}

// Cubic Bezier Easing
pub fn solve_cubic_bezier(p1: DVec2, p2: DVec2, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Newton-Raphson
    let mut t = x;
    for _ in 0..8 {
        let one_minus_t = 1.0 - t;
        let x_est = 3.0 * one_minus_t * one_minus_t * t * p1.x
            + 3.0 * one_minus_t * t * t * p2.x
            + t * t * t;

        let err = x_est - x;
        if err.abs() < 1e-7 {
            break;
        }

        let dx_dt = 3.0 * one_minus_t * one_minus_t * p1.x
            + 6.0 * one_minus_t * t * (p2.x - p1.x)
            + 3.0 * t * t * (1.0 - p2.x);

        if dx_dt.abs() < 1e-9 {
            break;
        }
        t -= err / dx_dt;
    }

    let one_minus_t = 1.0 - t;
    3.0 * one_minus_t * one_minus_t * t * p1.y + 3.0 * one_minus_t * t * t * p2.y + t * t * t
}

fn handle_point(h: Option<EasingHandle>, fallback: DVec2) -> DVec2 {
    h.map(|h| DVec2::new(h.x, h.y)).unwrap_or(fallback)
}

/// Samples emitted properties at arbitrary (fractional) frames.
pub struct Animator;

impl Animator {
    pub fn resolve<T, U>(
        prop: &Property<T>,
        frame: f64,
        converter: impl Fn(&T) -> U,
        default: U,
    ) -> U
    where
        U: Interpolatable,
    {
        match &prop.k {
            Value::Default => default,
            Value::Static(v) => converter(v),
            Value::Animated(keyframes) => {
                if keyframes.is_empty() {
                    return default;
                }

                // First keyframe with kf.t > frame; the segment is [idx-1, idx].
                let idx = keyframes.partition_point(|kf| kf.t <= frame);

                if idx == 0 {
                    if let Some(s) = &keyframes[0].s {
                        return converter(s);
                    }
                    return default;
                }

                let len = keyframes.len();
                if idx >= len {
                    let last = &keyframes[len - 1];
                    if let Some(e) = &last.e {
                        return converter(e);
                    }
                    if let Some(s) = &last.s {
                        return converter(s);
                    }
                    return default;
                }

                let kf_start = &keyframes[idx - 1];
                let kf_end = &keyframes[idx];

                let start_val = kf_start
                    .s
                    .as_ref()
                    .map(&converter)
                    .unwrap_or(default.clone());

                if kf_start.is_hold() {
                    return start_val;
                }

                let end_val = kf_start
                    .e
                    .as_ref()
                    .map(&converter)
                    .or_else(|| kf_end.s.as_ref().map(&converter))
                    .unwrap_or(start_val.clone());

                let duration = kf_end.t - kf_start.t;
                if duration <= 0.0 {
                    return start_val;
                }

                let p1 = handle_point(kf_start.o, DVec2::new(0.0, 0.0));
                let p2 = handle_point(kf_start.i, DVec2::new(1.0, 1.0));
                let local_t = solve_cubic_bezier(p1, p2, (frame - kf_start.t) / duration);

                start_val.lerp_spatial(
                    &end_val,
                    local_t,
                    kf_start.ti.as_ref(),
                    kf_start.to.as_ref(),
                )
            }
        }
    }

    pub fn resolve_vec2(prop: &Property<[f64; 2]>, frame: f64) -> DVec2 {
        Self::resolve(prop, frame, |v| DVec2::from_array(*v), DVec2::ZERO)
    }

    pub fn resolve_f64(prop: &Property<f64>, frame: f64) -> f64 {
        Self::resolve(prop, frame, |v| *v, 0.0)
    }
}
