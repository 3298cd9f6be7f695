//! # Geometry
//!
//! The small algebra the converter interpolates with.
//!
//! ## Key Types
//! - `Vector`: 2D point, or a (value, frame) pair, tagged with the value kind it carries.
//! - `Color`: linear RGBA; arithmetic keeps the left operand's alpha.
//! - `Matrix2`: 2x2 rotation.
//! - `Hermite`: cubic segment between two points with two tangents.

use crate::error::{ConvertError, Result};
use crate::kind::ValueKind;
use std::fmt;
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

/// Absolute tolerance used by [`approximate_equal`].
pub const PRECISION: f64 = 1e-8;

/// One-sided tolerance test: `b - a` is checked when `a < b`, `a - b` otherwise.
pub fn approximate_equal(a: f64, b: f64) -> bool {
    if a < b {
        return b - a < PRECISION;
    }
    a - b < PRECISION
}

/// A pair of values. For positions `val1`/`val2` are x/y; for animated
/// scalars `val1` is the value and `val2` the frame it occurs at.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub val1: f64,
    pub val2: f64,
    pub kind: Option<ValueKind>,
}

impl Vector {
    pub const ZERO: Vector = Vector {
        val1: 0.0,
        val2: 0.0,
        kind: None,
    };

    pub fn new(val1: f64, val2: f64) -> Self {
        Self {
            val1,
            val2,
            kind: None,
        }
    }

    pub fn tagged(val1: f64, val2: f64, kind: ValueKind) -> Self {
        Self {
            val1,
            val2,
            kind: Some(kind),
        }
    }

    pub fn mag_squared(&self) -> f64 {
        self.val1 * self.val1 + self.val2 * self.val2
    }

    pub fn mag(&self) -> f64 {
        self.mag_squared().sqrt()
    }

    pub fn inv_mag(&self) -> Result<f64> {
        let mag = self.mag();
        if mag == 0.0 {
            return Err(ConvertError::DegenerateVector);
        }
        Ok(1.0 / mag)
    }

    /// Scales to unit length in place.
    pub fn norm(&mut self) -> Result<&mut Self> {
        let inv = self.inv_mag()?;
        *self = *self * inv;
        Ok(self)
    }

    /// Rotated by 90 degrees clockwise: `(x, y) -> (y, -x)`.
    pub fn perp(&self) -> Vector {
        Vector::new(self.val2, -self.val1)
    }

    pub fn dot(&self, other: &Vector) -> Result<f64> {
        if self.kind != other.kind {
            return Err(ConvertError::IncompatibleOperands {
                left: kind_name(self.kind),
                right: kind_name(other.kind),
            });
        }
        Ok(self.val1 * other.val1 + self.val2 * other.val2)
    }

    pub fn is_equal_to(&self, other: &Vector) -> bool {
        approximate_equal((*self - *other).mag_squared(), 0.0)
    }

    pub fn get_list(&self) -> [f64; 2] {
        [self.val1, self.val2]
    }

    /// Value in the layout the target format expects for this vector's kind.
    pub fn get_val(&self) -> Vec<f64> {
        match self.kind {
            Some(ValueKind::Origin) => vec![self.val1, self.val2],
            Some(ValueKind::CircleRadius) => vec![self.val1, self.val1],
            _ => vec![self.val1],
        }
    }
}

fn kind_name(kind: Option<ValueKind>) -> String {
    kind.map(|k| k.to_string()).unwrap_or_else(|| "untyped".to_string())
}

impl From<[f64; 2]> for Vector {
    fn from(v: [f64; 2]) -> Self {
        Vector::new(v[0], v[1])
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{}, {})", self.val1, self.val2, kind_name(self.kind))
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, other: Vector) -> Vector {
        Vector {
            val1: self.val1 + other.val1,
            val2: self.val2 + other.val2,
            kind: self.kind,
        }
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, other: Vector) -> Vector {
        Vector {
            val1: self.val1 - other.val1,
            val2: self.val2 - other.val2,
            kind: self.kind,
        }
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, s: f64) -> Vector {
        Vector {
            val1: self.val1 * s,
            val2: self.val2 * s,
            kind: self.kind,
        }
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;
    fn mul(self, v: Vector) -> Vector {
        v * self
    }
}

impl Div<f64> for Vector {
    type Output = Vector;
    fn div(self, s: f64) -> Vector {
        Vector {
            val1: self.val1 / s,
            val2: self.val2 / s,
            kind: self.kind,
        }
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        self * -1.0
    }
}

impl Index<usize> for Vector {
    type Output = f64;
    fn index(&self, key: usize) -> &f64 {
        if key != 0 {
            &self.val2
        } else {
            &self.val1
        }
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, key: usize) -> &mut f64 {
        if key != 0 {
            &mut self.val2
        } else {
            &mut self.val1
        }
    }
}

/// Linear-space RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
}

impl Color {
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn get_val(&self) -> [f64; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

impl Add for Color {
    type Output = Color;
    fn add(self, other: Color) -> Color {
        Color::new(
            self.red + other.red,
            self.green + other.green,
            self.blue + other.blue,
            self.alpha,
        )
    }
}

impl Sub for Color {
    type Output = Color;
    fn sub(self, other: Color) -> Color {
        Color::new(
            self.red - other.red,
            self.green - other.green,
            self.blue - other.blue,
            self.alpha,
        )
    }
}

impl Mul<f64> for Color {
    type Output = Color;
    fn mul(self, s: f64) -> Color {
        Color::new(self.red * s, self.green * s, self.blue * s, self.alpha)
    }
}

impl Mul<Color> for f64 {
    type Output = Color;
    fn mul(self, c: Color) -> Color {
        c * self
    }
}

impl Div<f64> for Color {
    type Output = Color;
    fn div(self, s: f64) -> Color {
        Color::new(self.red / s, self.green / s, self.blue / s, self.alpha)
    }
}

/// 2x2 matrix, identity by default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2 {
    pub m00: f64,
    pub m01: f64,
    pub m10: f64,
    pub m11: f64,
}

impl Default for Matrix2 {
    fn default() -> Self {
        Self {
            m00: 1.0,
            m01: 0.0,
            m10: 0.0,
            m11: 1.0,
        }
    }
}

impl Matrix2 {
    /// Rotation by `angle` radians, counter-clockwise.
    pub fn rotation(angle: f64) -> Self {
        let mut m = Self::default();
        m.set_rotate(angle);
        m
    }

    pub fn set_rotate(&mut self, angle: f64) {
        let (s, c) = angle.sin_cos();
        self.m00 = c;
        self.m01 = s;
        self.m10 = -s;
        self.m11 = c;
    }

    pub fn get_transformed(&self, v: &Vector) -> Vector {
        let (x, y) = (v[0], v[1]);
        Vector::new(x * self.m00 + y * self.m10, x * self.m01 + y * self.m11)
    }
}

/// Values a `Hermite` curve can be built over.
pub trait CurveValue:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
{
}

impl<T> CurveValue for T where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T> + Div<f64, Output = T>
{
}

/// Cubic segment from `p1` to `p2` leaving with tangent `t1` and arriving with `t2`.
///
/// The Bezier control points `a..d` and polynomial coefficients are cached;
/// call [`Hermite::sync`] after changing any of the four inputs.
#[derive(Debug, Clone, Copy)]
pub struct Hermite<T: CurveValue> {
    pub p1: T,
    pub p2: T,
    pub t1: T,
    pub t2: T,
    a: T,
    b: T,
    c: T,
    d: T,
    coeff0: T,
    coeff1: T,
    coeff2: T,
    coeff3: T,
}

impl<T: CurveValue> Hermite<T> {
    pub fn new(p1: T, p2: T, t1: T, t2: T) -> Self {
        let mut h = Self {
            p1,
            p2,
            t1,
            t2,
            a: p1,
            b: p1,
            c: p2,
            d: p2,
            coeff0: p1,
            coeff1: p1,
            coeff2: p1,
            coeff3: p1,
        };
        h.sync();
        h
    }

    pub fn sync(&mut self) {
        self.a = self.p1;
        self.b = self.p1 + self.t1 / 3.0;
        self.c = self.p2 - self.t2 / 3.0;
        self.d = self.p2;

        self.coeff0 = self.a;
        self.coeff1 = self.b * 3.0 - self.a * 3.0;
        self.coeff2 = self.c * 3.0 - self.b * 6.0 + self.a * 3.0;
        self.coeff3 = self.d - self.c * 3.0 + self.b * 3.0 - self.a;
    }

    /// Bezier control points `[a, b, c, d]` of the segment.
    pub fn control_points(&self) -> [T; 4] {
        [self.a, self.b, self.c, self.d]
    }

    pub fn value(&self, t: f64) -> T {
        self.coeff0 + (self.coeff1 + (self.coeff2 + self.coeff3 * t) * t) * t
    }

    pub fn derivative(&self, x: f64) -> T {
        let y = 1.0 - x;
        let ab = (self.b - self.a) * (y * y);
        let bc = (self.c - self.b) * (x * y * 2.0);
        let cd = (self.d - self.c) * (x * x);
        (ab + bc + cd) * 3.0
    }
}
