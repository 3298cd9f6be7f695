use sif_lottie::sif_data::build::*;
use sif_lottie::sif_data::Node;
use sif_lottie::{
    convert_document, convert_regions, ConversionSettings, ConvertError, DocumentContext,
};

fn document_ctx() -> DocumentContext {
    let settings = ConversionSettings::default();
    DocumentContext::new(24.0, 480.0, 270.0, [-4.0, 2.25, 4.0, -2.25], settings)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn zero_tangent() -> Node {
    radial_composite(real(0.0), angle(0.0))
}

fn square(size: f64, looped: bool) -> Node {
    let corners = [(0.0, 0.0), (size, 0.0), (size, size), (0.0, size)];
    let entries = corners.iter().map(|&(x, y)| {
        bline_point(vector(x, y), zero_tangent(), zero_tangent(), boolean(false), boolean(false))
    });
    region_layer(vector(0.0, 0.0), bline(looped, entries))
}

fn moving_square() -> Node {
    let point = animated(
        "vector",
        vec![waypoint("0s", vector(0.0, 0.0)), waypoint("1s", vector(1.0, 0.0))],
    );
    let entry = bline_point(point, zero_tangent(), zero_tangent(), boolean(false), boolean(false));
    region_layer(vector(0.0, 0.0), bline(true, vec![entry]))
}

#[test]
fn test_convert_document_picks_active_regions() {
    init_tracing();
    let canvas = canvas(480, 270, 24.0, [-4.0, 2.25, 4.0, -2.25])
        .with_child(square(1.0, true).with_attr("desc", "first"))
        .with_child(Node::new("layer").with_attr("type", "circle"))
        .with_child(square(1.0, true).with_attr("active", "false"))
        .with_child(moving_square().with_attr("desc", "second"));

    let shapes = convert_document(&canvas, ConversionSettings::default()).unwrap();
    assert_eq!(shapes.len(), 2);
    assert_eq!(shapes[0].nm.as_deref(), Some("first"));
    assert_eq!(shapes[1].nm.as_deref(), Some("second"));
    assert_eq!(shapes[1].ix, Some(1));

    // 60 px per unit, recentered on the 480x270 canvas.
    let first = shapes[0].ks.k[0].as_segment().unwrap();
    assert_eq!(first.s[0].v, vec![[240.0, 135.0], [300.0, 135.0], [300.0, 75.0], [240.0, 75.0]]);

    let moving = &shapes[1].ks.k;
    assert_eq!(moving.len(), 3);
    assert_eq!(moving[0].as_segment().unwrap().e[0].v, vec![[300.0, 135.0]]);
    assert_eq!(moving[2].time(), 24.0);
}

#[test]
fn test_batch_keeps_input_order() {
    let ctx = document_ctx();
    let layers: Vec<Node> = (1..=16).map(|n| square(n as f64 * 0.1, n % 2 == 0)).collect();

    let shapes = convert_regions(&layers, &ctx).unwrap();
    assert_eq!(shapes.len(), 16);
    for (n, shape) in shapes.iter().enumerate() {
        assert_eq!(shape.ix, Some(n as u32));
        let seg = shape.ks.k[0].as_segment().unwrap();
        assert_eq!(seg.s[0].c, (n + 1) % 2 == 0);
        assert_eq!(seg.s[0].len(), 4);
    }
}

#[test]
fn test_batch_reports_failing_layer() {
    let ctx = document_ctx();
    let broken = region_layer(vector(0.0, 0.0), Node::new("vector"));
    let layers = vec![square(1.0, true), broken, square(2.0, false)];
    assert!(matches!(
        convert_regions(&layers, &ctx),
        Err(ConvertError::UnexpectedNode { .. })
    ));
}

#[test]
fn test_settings_from_json() {
    let settings = ConversionSettings::from_json_str(r#"{ "decimal_places": 1 }"#).unwrap();
    let canvas =
        canvas(480, 270, 24.0, [-4.0, 2.25, 4.0, -2.25]).with_child(square(0.0123, false));
    let shapes = convert_document(&canvas, settings).unwrap();
    let seg = shapes[0].ks.k[0].as_segment().unwrap();
    // 0.0123 * 60 = 0.738 px, truncated to one decimal.
    assert_eq!(seg.s[0].v[1], [240.7, 135.0]);

    let json = serde_json::to_value(&shapes[0]).unwrap();
    assert_eq!(json["ks"]["a"], 1);
}
