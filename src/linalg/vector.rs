//! Fixed-arity vectors for points, directions and colors
//!
//! One generic type covers arity 2, 3 and 4. Mixing arities is a compile
//! error, and `cross` only exists on `Vec3`.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Div, Index, Mul, Neg, Sub};

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// N-component vector of reals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize>(pub [f64; N]);

pub type Vec2 = Vector<2>;
pub type Vec3 = Vector<3>;
pub type Vec4 = Vector<4>;

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> Vector<N> {
    pub const ZERO: Self = Self([0.0; N]);

    pub fn dot(self, other: Self) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> RenderResult<Self> {
        let len = self.norm();
        if len == 0.0 || !len.is_finite() {
            return Err(RenderError::DegenerateGeometry("cannot normalize a zero-length vector"));
        }
        Ok(self / len)
    }

    /// Angle between two vectors in radians
    pub fn angle(self, other: Self) -> RenderResult<f64> {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return Err(RenderError::DegenerateGeometry("angle with a zero-length vector"));
        }
        Ok((self.dot(other) / denom).clamp(-1.0, 1.0).acos())
    }

    pub fn scale(self, s: f64) -> Self {
        self.map(|c| c * s)
    }

    /// Componentwise product
    pub fn hadamard(self, other: Self) -> Self {
        let mut out = self;
        for (a, b) in out.0.iter_mut().zip(other.0.iter()) {
            *a *= b;
        }
        out
    }

    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self(self.0.map(f))
    }

    pub fn is_finite(self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self([x, y])
    }

    pub fn x(self) -> f64 {
        self.0[0]
    }

    pub fn y(self) -> f64 {
        self.0[1]
    }
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }

    pub fn x(self) -> f64 {
        self.0[0]
    }

    pub fn y(self) -> f64 {
        self.0[1]
    }

    pub fn z(self) -> f64 {
        self.0[2]
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        )
    }

    /// Homogeneous point or direction
    pub fn extend(self, w: f64) -> Vec4 {
        Vec4::new(self.x(), self.y(), self.z(), w)
    }

    pub fn xy(self) -> Vec2 {
        Vec2::new(self.x(), self.y())
    }
}

impl Vec4 {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self([x, y, z, w])
    }

    pub fn x(self) -> f64 {
        self.0[0]
    }

    pub fn y(self) -> f64 {
        self.0[1]
    }

    pub fn z(self) -> f64 {
        self.0[2]
    }

    pub fn w(self) -> f64 {
        self.0[3]
    }

    /// Drop the homogeneous coordinate without dividing
    pub fn truncate(self) -> Vec3 {
        Vec3::new(self.x(), self.y(), self.z())
    }

    pub fn perspective_divide(self) -> RenderResult<Vec3> {
        let w = self.w();
        if w == 0.0 {
            return Err(RenderError::DegenerateGeometry("homogeneous w is zero"));
        }
        Ok(self.truncate() / w)
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;
    fn add(mut self, other: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            *a += b;
        }
        self
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;
    fn sub(mut self, other: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            *a -= b;
        }
        self
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;
    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl<const N: usize> Mul<f64> for Vector<N> {
    type Output = Self;
    fn mul(self, s: f64) -> Self {
        self.scale(s)
    }
}

impl<const N: usize> Div<f64> for Vector<N> {
    type Output = Self;
    fn div(self, s: f64) -> Self {
        self.map(|c| c / s)
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl<const N: usize> From<[f64; N]> for Vector<N> {
    fn from(a: [f64; N]) -> Self {
        Self(a)
    }
}

// Plain number lists in scene files: `[1.0, 2.0, 3.0]`
impl<const N: usize> Serialize for Vector<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(N))?;
        for c in &self.0 {
            seq.serialize_element(c)?;
        }
        seq.end()
    }
}

struct VectorVisitor<const N: usize>(PhantomData<[f64; N]>);

impl<'de, const N: usize> Visitor<'de> for VectorVisitor<N> {
    type Value = Vector<N>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a list of {} numbers", N)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vector<N>, A::Error> {
        let mut out = [0.0; N];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(i, &self))?;
        }
        if seq.next_element::<f64>()?.is_some() {
            return Err(de::Error::invalid_length(N + 1, &self));
        }
        Ok(Vector(out))
    }
}

impl<'de, const N: usize> Deserialize<'de> for Vector<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(VectorVisitor::<N>(PhantomData))
    }
}
