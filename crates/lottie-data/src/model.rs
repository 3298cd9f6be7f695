use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub type Vec2 = [f64; 2];

// Shapes

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "ty")]
pub enum Shape {
    #[serde(rename = "sh")]
    Path(PathShape),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PathShape {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ix: Option<u32>,
    pub ks: ShapeProperty,
}

/// Animated outline of a path shape: every keyframe carries every vertex.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShapeProperty {
    #[serde(default)]
    pub a: u8,
    #[serde(default)]
    pub k: Vec<ShapeKeyframe>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ShapeKeyframe {
    Segment(ShapeSegment),
    Terminal(TerminalKeyframe),
}

impl ShapeKeyframe {
    pub fn time(&self) -> f64 {
        match self {
            ShapeKeyframe::Segment(seg) => seg.t,
            ShapeKeyframe::Terminal(end) => end.t,
        }
    }

    pub fn as_segment(&self) -> Option<&ShapeSegment> {
        match self {
            ShapeKeyframe::Segment(seg) => Some(seg),
            ShapeKeyframe::Terminal(_) => None,
        }
    }
}

/// One synchronized keyframe: `s` holds the outline at `t`, `e` the outline
/// at the next keyframe.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShapeSegment {
    pub t: f64,
    pub i: EasingHandle,
    pub o: EasingHandle,
    pub s: Vec<BezierPath>,
    pub e: Vec<BezierPath>,
}

impl ShapeSegment {
    pub fn new(t: f64, closed: bool) -> Self {
        Self {
            t,
            i: EasingHandle::CENTER,
            o: EasingHandle::CENTER,
            s: vec![BezierPath::with_closed(closed)],
            e: vec![BezierPath::with_closed(closed)],
        }
    }

    /// The (start, end) outline blocks.
    pub fn blocks_mut(&mut self) -> (&mut BezierPath, &mut BezierPath) {
        (&mut self.s[0], &mut self.e[0])
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct TerminalKeyframe {
    pub t: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct BezierPath {
    #[serde(default)]
    pub c: bool,
    #[serde(default)]
    pub i: Vec<Vec2>,
    #[serde(default)]
    pub o: Vec<Vec2>,
    #[serde(default)]
    pub v: Vec<Vec2>,
}

impl BezierPath {
    pub fn with_closed(c: bool) -> Self {
        Self {
            c,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.v.len()
    }

    pub fn is_empty(&self) -> bool {
        self.v.is_empty()
    }
}

// Properties

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Property<T> {
    #[serde(default)]
    pub a: u8,
    #[serde(default)]
    #[serde(bound(deserialize = "T: DeserializeOwned", serialize = "T: Serialize"))]
    pub k: Value<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ix: Option<u32>,
}

impl<T> Property<T> {
    pub fn fixed(value: T, ix: Option<u32>) -> Self {
        Property {
            a: 0,
            k: Value::Static(value),
            ix,
        }
    }

    pub fn animated(keyframes: Vec<Keyframe<T>>, ix: Option<u32>) -> Self {
        Property {
            a: 1,
            k: Value::Animated(keyframes),
            ix,
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self.k, Value::Animated(_))
    }
}

impl<T> Default for Property<T> {
    fn default() -> Self {
        Property {
            a: 0,
            k: Value::Default,
            ix: None,
        }
    }
}

/// `k` of a property: absent, a static value, or a keyframe list.
/// Variants are tried in order, so a static value wins over keyframes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
#[serde(bound(deserialize = "T: DeserializeOwned", serialize = "T: Serialize"))]
pub enum Value<T> {
    Default,
    Static(T),
    Animated(Vec<Keyframe<T>>),
}

impl<T> Default for Value<T> {
    fn default() -> Self {
        Value::Default
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(bound(deserialize = "T: DeserializeOwned", serialize = "T: Serialize"))]
pub struct Keyframe<T> {
    pub t: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i: Option<EasingHandle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o: Option<EasingHandle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ti: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<u8>,
}

impl<T> Keyframe<T> {
    pub fn at(t: f64) -> Self {
        Keyframe {
            t,
            s: None,
            e: None,
            i: None,
            o: None,
            to: None,
            ti: None,
            h: None,
        }
    }

    pub fn is_hold(&self) -> bool {
        self.h == Some(1)
    }
}

/// Time-easing control point of a keyframe, in the unit square.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct EasingHandle {
    pub x: f64,
    pub y: f64,
}

impl EasingHandle {
    pub const CENTER: EasingHandle = EasingHandle { x: 0.5, y: 0.5 };
    pub const LINEAR_OUT: EasingHandle = EasingHandle { x: 0.0, y: 0.0 };
    pub const LINEAR_IN: EasingHandle = EasingHandle { x: 1.0, y: 1.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
