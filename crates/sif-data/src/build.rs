//! Shorthands for assembling Synfig value nodes in code.

use crate::Node;

pub fn vector(x: f64, y: f64) -> Node {
    Node::new("vector")
        .with_child(Node::new("x").with_text(x.to_string()))
        .with_child(Node::new("y").with_text(y.to_string()))
}

pub fn real(value: f64) -> Node {
    Node::new("real").with_attr("value", value.to_string())
}

pub fn angle(degrees: f64) -> Node {
    Node::new("angle").with_attr("value", degrees.to_string())
}

pub fn boolean(value: bool) -> Node {
    Node::new("bool").with_attr("value", value.to_string())
}

pub fn integer(value: i64) -> Node {
    Node::new("integer").with_attr("value", value.to_string())
}

pub fn time(literal: &str) -> Node {
    Node::new("time").with_attr("value", literal)
}

pub fn color(r: f64, g: f64, b: f64, a: f64) -> Node {
    Node::new("color")
        .with_child(Node::new("r").with_text(r.to_string()))
        .with_child(Node::new("g").with_text(g.to_string()))
        .with_child(Node::new("b").with_text(b.to_string()))
        .with_child(Node::new("a").with_text(a.to_string()))
}

pub fn waypoint(time: &str, value: Node) -> Node {
    Node::new("waypoint")
        .with_attr("time", time)
        .with_attr("before", "clamped")
        .with_attr("after", "clamped")
        .with_child(value)
}

/// Same as [`waypoint`] with explicit interpolation on both sides.
pub fn waypoint_with(time: &str, before: &str, after: &str, value: Node) -> Node {
    Node::new("waypoint")
        .with_attr("time", time)
        .with_attr("before", before)
        .with_attr("after", after)
        .with_child(value)
}

pub fn animated(kind: &str, waypoints: impl IntoIterator<Item = Node>) -> Node {
    Node::new("animated")
        .with_attr("type", kind)
        .with_children(waypoints)
}

pub fn param(name: &str, value: Node) -> Node {
    Node::new("param").with_attr("name", name).with_child(value)
}

/// A tangent expressed as radius and angle, each possibly animated.
pub fn radial_composite(radius: Node, theta: Node) -> Node {
    Node::new("radial_composite")
        .with_attr("type", "vector")
        .with_child(Node::new("radius").with_child(radius))
        .with_child(Node::new("theta").with_child(theta))
}

pub fn bline_point(point: Node, t1: Node, t2: Node, split_radius: Node, split_angle: Node) -> Node {
    let composite = Node::new("composite")
        .with_attr("type", "bline_point")
        .with_child(Node::new("point").with_child(point))
        .with_child(Node::new("width").with_child(real(1.0)))
        .with_child(Node::new("origin").with_child(real(0.5)))
        .with_child(Node::new("split").with_child(boolean(false)))
        .with_child(Node::new("t1").with_child(t1))
        .with_child(Node::new("t2").with_child(t2))
        .with_child(Node::new("split_radius").with_child(split_radius))
        .with_child(Node::new("split_angle").with_child(split_angle));
    Node::new("entry").with_child(composite)
}

pub fn bline(looped: bool, entries: impl IntoIterator<Item = Node>) -> Node {
    Node::new("bline")
        .with_attr("type", "bline_point")
        .with_attr("loop", looped.to_string())
        .with_children(entries)
}

pub fn region_layer(origin: Node, bline: Node) -> Node {
    Node::new("layer")
        .with_attr("type", "region")
        .with_attr("active", "true")
        .with_child(param("origin", origin))
        .with_child(param("bline", bline))
}

pub fn canvas(width: u32, height: u32, fps: f64, view_box: [f64; 4]) -> Node {
    let view_box = view_box
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    Node::new("canvas")
        .with_attr("version", "1.0")
        .with_attr("width", width.to_string())
        .with_attr("height", height.to_string())
        .with_attr("fps", fps.to_string())
        .with_attr("begin-time", "0f")
        .with_attr("end-time", "5s")
        .with_attr("view-box", view_box)
}
