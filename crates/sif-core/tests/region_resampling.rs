use lottie_data::model::{ShapeKeyframe, ShapeSegment};
use sif_core::{
    gen_bline_region, normalize_bline, ConversionSettings, DocumentContext, FrameWindow,
};
use sif_data::build::*;
use sif_data::Node;

/// Zero-sized canvas with one pixel per unit: positions pass through unchanged
/// apart from the y flip.
fn ctx(fps: f64) -> DocumentContext {
    DocumentContext::new(fps, 0.0, 0.0, [-4.0, 2.25, 4.0, -2.25], ConversionSettings::default())
        .with_pixels_per_unit(1.0)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn zero_tangent() -> Node {
    radial_composite(real(0.0), angle(0.0))
}

/// Static vertex with zero tangents and no split flags.
fn fixed_entry(x: f64, y: f64) -> Node {
    bline_point(vector(x, y), zero_tangent(), zero_tangent(), boolean(false), boolean(false))
}

fn segments(timeline: &[ShapeKeyframe]) -> Vec<&ShapeSegment> {
    timeline.iter().filter_map(ShapeKeyframe::as_segment).collect()
}

fn times(timeline: &[ShapeKeyframe]) -> Vec<f64> {
    timeline.iter().map(ShapeKeyframe::time).collect()
}

#[test]
fn test_window_merges_independent_tracks() {
    init_tracing();
    let point = animated(
        "vector",
        vec![waypoint("2s", vector(0.0, 0.0)), waypoint("5s", vector(3.0, 0.0))],
    );
    let radius = animated("real", vec![waypoint("0s", real(1.0)), waypoint("7s", real(2.0))]);
    let entry = bline_point(
        point,
        radial_composite(radius, angle(0.0)),
        zero_tangent(),
        boolean(false),
        boolean(false),
    );
    let layer = region_layer(vector(0.0, 0.0), bline(false, vec![entry]));
    let ctx = ctx(1.0);

    let (window, frames) = normalize_bline(&layer, &ctx).unwrap().frame_window();
    assert_eq!(window, FrameWindow { first: 0, last: 7 });
    assert_eq!(frames.within(window).collect::<Vec<_>>(), vec![0, 2, 5, 7]);

    let timeline = gen_bline_region(&layer, &ctx).unwrap();
    assert_eq!(times(&timeline), vec![0.0, 2.0, 5.0, 7.0, 7.0]);
    assert!(matches!(timeline.last(), Some(ShapeKeyframe::Terminal(_))));

    // Each segment ends where the next one starts.
    let segs = segments(&timeline);
    for pair in segs.windows(2) {
        assert_eq!(pair[0].e, pair[1].s);
    }
    // The point is held before its first waypoint.
    assert_eq!(segs[0].s[0].v, vec![[0.0, 0.0]]);
    assert_eq!(segs[1].e[0].v, vec![[3.0, 0.0]]);
}

#[test]
fn test_static_region_is_single_frame() {
    let layer = region_layer(vector(0.0, 0.0), bline(false, vec![fixed_entry(1.0, 2.0)]));

    let timeline = gen_bline_region(&layer, &ctx(24.0)).unwrap();
    assert_eq!(timeline.len(), 2);
    assert_eq!(times(&timeline), vec![0.0, 0.0]);
    let seg = timeline[0].as_segment().unwrap();
    assert_eq!(seg.s, seg.e);
    assert_eq!(seg.s[0].v, vec![[1.0, -2.0]]);
}

#[test]
fn test_two_waypoint_round_trip() {
    // 10 frames at 24 fps.
    let point = animated(
        "vector",
        vec![waypoint("0s", vector(0.0, 0.0)), waypoint("0.41666667s", vector(100.0, 0.0))],
    );
    let entry = bline_point(point, zero_tangent(), zero_tangent(), boolean(false), boolean(false));
    let layer = region_layer(vector(0.0, 0.0), bline(false, vec![entry]));

    let timeline = gen_bline_region(&layer, &ctx(24.0)).unwrap();
    let json = serde_json::to_value(&timeline).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {
                "t": 0.0,
                "i": { "x": 0.5, "y": 0.5 },
                "o": { "x": 0.5, "y": 0.5 },
                "s": [{ "c": false, "i": [[0.0, 0.0]], "o": [[0.0, 0.0]], "v": [[0.0, 0.0]] }],
                "e": [{ "c": false, "i": [[0.0, 0.0]], "o": [[0.0, 0.0]], "v": [[100.0, 0.0]] }]
            },
            {
                "t": 10.0,
                "i": { "x": 0.5, "y": 0.5 },
                "o": { "x": 0.5, "y": 0.5 },
                "s": [{ "c": false, "i": [[0.0, 0.0]], "o": [[0.0, 0.0]], "v": [[100.0, 0.0]] }],
                "e": [{ "c": false, "i": [[0.0, 0.0]], "o": [[0.0, 0.0]], "v": [[100.0, 0.0]] }]
            },
            { "t": 10.0 }
        ])
    );
}

#[test]
fn test_split_tangents_and_loop_flag() {
    let split_angle =
        animated("bool", vec![waypoint("0s", boolean(false)), waypoint("2s", boolean(true))]);
    let entry = bline_point(
        vector(0.0, 0.0),
        radial_composite(real(3.0), angle(0.0)),
        radial_composite(real(6.0), angle(90.0)),
        boolean(true),
        split_angle,
    );
    let layer = region_layer(vector(0.0, 0.0), bline(true, vec![entry]));

    let timeline = gen_bline_region(&layer, &ctx(1.0)).unwrap();
    assert_eq!(times(&timeline), vec![0.0, 2.0, 2.0]);
    let segs = segments(&timeline);
    assert!(segs.iter().all(|s| s.s[0].c && s.e[0].c));

    // Frame 0: angle shared, own radius.
    assert_eq!(segs[0].s[0].i, vec![[-1.0, 0.0]]);
    assert_eq!(segs[0].s[0].o, vec![[2.0, 0.0]]);
    // Frame 2: both independent.
    assert_eq!(segs[0].e[0].o, vec![[0.0, -2.0]]);
    assert_eq!(segs[1].s[0].o, vec![[0.0, -2.0]]);
    assert_eq!(segs[1].s[0].i, vec![[-1.0, 0.0]]);
}

#[test]
fn test_origin_moves_every_vertex() {
    let origin = animated(
        "vector",
        vec![
            waypoint_with("0s", "linear", "linear", vector(0.0, 0.0)),
            waypoint_with("4s", "linear", "linear", vector(10.0, 10.0)),
        ],
    );
    let entries = vec![fixed_entry(1.0, 1.0), fixed_entry(-1.0, 0.0)];
    let layer = region_layer(origin, bline(true, entries));

    let timeline = gen_bline_region(&layer, &ctx(1.0)).unwrap();
    assert_eq!(times(&timeline), vec![0.0, 4.0, 4.0]);
    let first = timeline[0].as_segment().unwrap();
    assert_eq!(first.s[0].v, vec![[1.0, -1.0], [-1.0, 0.0]]);
    assert_eq!(first.e[0].v, vec![[11.0, -11.0], [9.0, -10.0]]);
    assert_eq!(first.s[0].i.len(), 2);
    assert_eq!(first.s[0].o.len(), 2);
}

#[test]
fn test_malformed_waypoint_time_aborts() {
    let point = animated(
        "vector",
        vec![waypoint("0s", vector(0.0, 0.0)), waypoint("12f", vector(1.0, 0.0))],
    );
    let entry = bline_point(point, zero_tangent(), zero_tangent(), boolean(false), boolean(false));
    let layer = region_layer(vector(0.0, 0.0), bline(false, vec![entry]));
    assert!(matches!(
        gen_bline_region(&layer, &ctx(24.0)),
        Err(sif_core::ConvertError::MalformedTimeLiteral(_))
    ));
}

#[test]
fn test_vertices_are_truncated_once() {
    // Each term alone would truncate to zero; their sum must not.
    let entries = vec![fixed_entry(0.0005, 0.0), fixed_entry(1.0005, 0.0)];
    let layer = region_layer(vector(0.0005, 0.0), bline(false, entries));
    let timeline = gen_bline_region(&layer, &ctx(24.0)).unwrap();
    let seg = timeline[0].as_segment().unwrap();
    assert_eq!(seg.s[0].v, vec![[0.001, 0.0], [1.001, 0.0]]);

    // Values that already fit the decimal places keep their last digit.
    let layer = region_layer(vector(0.0, 0.0), bline(false, vec![fixed_entry(1.001, -2.002)]));
    let timeline = gen_bline_region(&layer, &ctx(24.0)).unwrap();
    let seg = timeline[0].as_segment().unwrap();
    assert_eq!(seg.s[0].v, vec![[1.001, 2.002]]);
}

#[test]
fn test_tangents_follow_angle_between_waypoints() {
    init_tracing();
    // The point track adds frame 5, halfway through the angle animation.
    let point = animated(
        "vector",
        vec![waypoint("0s", vector(0.0, 0.0)), waypoint("5s", vector(1.0, 0.0))],
    );
    let theta = animated(
        "angle",
        vec![
            waypoint_with("0s", "linear", "linear", angle(0.0)),
            waypoint_with("10s", "linear", "linear", angle(180.0)),
        ],
    );
    let entry = bline_point(
        point,
        radial_composite(real(3.0), theta),
        zero_tangent(),
        boolean(false),
        boolean(false),
    );
    let layer = region_layer(vector(0.0, 0.0), bline(false, vec![entry]));

    let timeline = gen_bline_region(&layer, &ctx(1.0)).unwrap();
    assert_eq!(times(&timeline), vec![0.0, 5.0, 10.0, 10.0]);
    let segs = segments(&timeline);

    assert_eq!(segs[0].s[0].i, vec![[-1.0, 0.0]]);
    assert_eq!(segs[0].s[0].o, vec![[1.0, 0.0]]);
    // 90 degrees at frame 5: a unit handle straight up, mirrored on the way out.
    assert_eq!(segs[1].s[0].i, vec![[0.0, 1.0]]);
    assert_eq!(segs[1].s[0].o, vec![[0.0, -1.0]]);
    assert_eq!(segs[0].e[0].i, segs[1].s[0].i);
    // 180 degrees at frame 10.
    assert_eq!(segs[2].s[0].i, vec![[1.0, 0.0]]);
    assert_eq!(segs[2].s[0].o, vec![[-1.0, 0.0]]);
}
