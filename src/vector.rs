// src/vector.rs

use crate::error::{SimError, SimResult};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{AddAssign, Div, Mul, Neg, Sub};

#[derive(Serialize, Deserialize)]
struct Xy {
    x: f64,
    y: f64,
}

/// A free 2D quantity: position, velocity, acceleration or force.
///
/// The in-place mutators return `&mut Self` so they can be chained. They
/// always operate on the receiver; take an explicit `clone()` first when the
/// original value is still needed. `Vector` is deliberately not `Copy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Xy", into = "Xy")]
pub struct Vector(Vector2<f64>);

impl Vector {
    pub fn new(x: f64, y: f64) -> Self {
        Vector(Vector2::new(x, y))
    }

    pub fn zeros() -> Self {
        Vector(Vector2::zeros())
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn add(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.0.x += dx;
        self.0.y += dy;
        self
    }

    pub fn subtract(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.0.x -= dx;
        self.0.y -= dy;
        self
    }

    pub fn add_vector(&mut self, other: &Vector) -> &mut Self {
        self.0 += other.0;
        self
    }

    pub fn subtract_vector(&mut self, other: &Vector) -> &mut Self {
        self.0 -= other.0;
        self
    }

    /// Uniform scale.
    pub fn scale(&mut self, k: f64) -> &mut Self {
        self.0 *= k;
        self
    }

    /// Per-axis scale.
    pub fn scale_xy(&mut self, kx: f64, ky: f64) -> &mut Self {
        self.0.x *= kx;
        self.0.y *= ky;
        self
    }

    /// Scales the vector to unit length.
    ///
    /// Fails with [`SimError::DegenerateVector`] when the vector is zero or
    /// has a non-finite component, leaving it untouched instead of filling
    /// it with NaN.
    pub fn normalize(&mut self) -> SimResult<&mut Self> {
        if !self.is_finite() {
            return Err(SimError::DegenerateVector);
        }
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Err(SimError::DegenerateVector);
        }
        if magnitude.is_finite() {
            self.0 /= magnitude;
        } else {
            // both components near f64::MAX
            self.0 /= self.0.x.abs().max(self.0.y.abs());
            let magnitude = self.magnitude();
            self.0 /= magnitude;
        }
        Ok(self)
    }

    /// `sqrt(x² + y²)` without intermediate overflow or underflow.
    pub fn magnitude(&self) -> f64 {
        self.0.x.hypot(self.0.y)
    }

    pub fn distance_to(&self, other: &Vector) -> f64 {
        (self.0.x - other.0.x).hypot(self.0.y - other.0.y)
    }

    /// Unit vector pointing from `self` towards `other`.
    pub fn direction_to(&self, other: &Vector) -> SimResult<Vector> {
        let mut direction = other.clone();
        direction.subtract_vector(self).normalize()?;
        Ok(direction)
    }

    pub fn is_finite(&self) -> bool {
        self.0.x.is_finite() && self.0.y.is_finite()
    }
}

impl Default for Vector {
    fn default() -> Self {
        Vector::zeros()
    }
}

impl From<Xy> for Vector {
    fn from(xy: Xy) -> Self {
        Vector::new(xy.x, xy.y)
    }
}

impl From<Vector> for Xy {
    fn from(v: Vector) -> Self {
        Xy { x: v.0.x, y: v.0.y }
    }
}

impl From<(f64, f64)> for Vector {
    fn from((x, y): (f64, f64)) -> Self {
        Vector::new(x, y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, k: f64) -> Vector {
        Vector(self.0 * k)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, k: f64) -> Vector {
        Vector(self.0 / k)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}

impl AddAssign<&Vector> for Vector {
    fn add_assign(&mut self, rhs: &Vector) {
        self.0 += rhs.0;
    }
}

impl Sum for Vector {
    fn sum<I: Iterator<Item = Vector>>(iter: I) -> Self {
        iter.fold(Vector::zeros(), |mut acc, v| {
            acc.add_vector(&v);
            acc
        })
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}, {:.3}]", self.0.x, self.0.y)
    }
}
