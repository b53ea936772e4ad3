//! Vectors over [`Scalar`] with all functions of a 2-dimensional vector space.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::scalar::Scalar;

/// Vectors over [`Scalar`] ([`f32`]) with all functions of a 2-dimensional vector space.
///
/// Addition of vectors forms an abelian group with the [`ZERO`](Vector::ZERO) vector
/// as neutral element.
///
/// Multiplication with a [`Scalar`] is distributive over the addition of vectors.
///
/// The x-coordinate grows to the right, the y-coordinate grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    /// x-coordinate of the vector.
    pub x: Scalar,
    /// y-coordinate of the vector.
    pub y: Scalar,
}

impl Vector {
    /// Zero vector, the additive neutral element.
    pub const ZERO: Vector = Vector { x: Scalar(0.), y: Scalar(0.) };

    /// Unit vector in x-direction.
    pub const EX: Vector = Vector { x: Scalar(1.), y: Scalar(0.) };

    /// Unit vector in y-direction.
    pub const EY: Vector = Vector { x: Scalar(0.), y: Scalar(1.) };

    /// Create a vector from its raw coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Vector { x: Scalar(x), y: Scalar(y) }
    }

    /// Normalize the vector to length `Scalar(1.)`.
    ///
    /// Creates [NaN](f32::NAN) values if called on a vector with [`length`](Vector::length) `0`.
    pub fn normalize(&mut self) {
        // Like f32: at worst NaN values are created.
        #[allow(clippy::arithmetic_side_effects)]
        {
            *self /= self.length();
        }
    }

    /// Unit vector with identical direction.
    ///
    /// Creates [NaN](f32::NAN) values if called on a vector with [`length`](Vector::length) `0`.
    #[must_use]
    pub fn unit_vector(mut self) -> Self {
        self.normalize();
        self
    }

    /// Dot product of two vectors.
    ///
    /// In particular `self.length() == self.dot(self).sqrt()`.
    #[must_use]
    pub fn dot(&self, other: &Self) -> Scalar {
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self.x * other.x + self.y * other.y
        }
    }

    /// Length of the vector (euclidean metric).
    #[must_use]
    pub fn length(&self) -> Scalar {
        Scalar(self.dot(self).0.sqrt())
    }

    /// Euclidean distance between two positions.
    #[must_use]
    pub fn distance(&self, other: &Self) -> Scalar {
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        {
            (*other - *self).length()
        }
    }

    /// Round both coordinates to whole numbers.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Vector { x: self.x.round(), y: self.y.round() }
    }

    /// Are both coordinates neither infinite nor `NaN`?
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Vector {
    fn default() -> Self {
        Vector::ZERO
    }
}

impl AddAssign<&Self> for Vector {
    fn add_assign(&mut self, rhs: &Self) {
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self.x += rhs.x;
            self.y += rhs.y;
        }
    }
}

impl AddAssign<Self> for Vector {
    fn add_assign(&mut self, rhs: Self) {
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        {
            *self += &rhs;
        }
    }
}

impl<T> Add<T> for Vector
where
    Vector: AddAssign<T>,
{
    type Output = Self;

    fn add(mut self, rhs: T) -> Self::Output {
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self += rhs;
        }
        self
    }
}

// inverse element
impl Neg for Vector {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self.x = -self.x;
            self.y = -self.y;
        }
        self
    }
}

impl SubAssign<Self> for Vector {
    fn sub_assign(&mut self, rhs: Self) {
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        // Addition of the inverse element.
        #[allow(clippy::suspicious_op_assign_impl)]
        {
            *self += rhs.neg();
        }
    }
}

impl SubAssign<&Self> for Vector {
    fn sub_assign(&mut self, rhs: &Self) {
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        {
            *self -= *rhs;
        }
    }
}

impl<T> Sub<T> for Vector
where
    Vector: SubAssign<T>,
{
    type Output = Self;

    fn sub(mut self, rhs: T) -> Self::Output {
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self -= rhs;
        }
        self
    }
}

// Multiplication/Division with a scalar
impl MulAssign<&Scalar> for Vector {
    fn mul_assign(&mut self, rhs: &Scalar) {
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self.x *= rhs;
            self.y *= rhs;
        }
    }
}

impl MulAssign<Scalar> for Vector {
    fn mul_assign(&mut self, rhs: Scalar) {
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        {
            *self *= &rhs;
        }
    }
}

impl<T> Mul<T> for Vector
where
    Vector: MulAssign<T>,
{
    type Output = Self;

    fn mul(mut self, rhs: T) -> Self::Output {
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self *= rhs;
        }
        self
    }
}

impl Mul<Vector> for Scalar {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Self::Output {
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        {
            rhs * self
        }
    }
}

impl DivAssign<&Scalar> for Vector {
    fn div_assign(&mut self, rhs: &Scalar) {
        // Like f32: at worst a NaN value is created.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self.x /= rhs;
            self.y /= rhs;
        }
    }
}

impl DivAssign<Scalar> for Vector {
    fn div_assign(&mut self, rhs: Scalar) {
        // Like f32: at worst a NaN value is created.
        #[allow(clippy::arithmetic_side_effects)]
        {
            *self /= &rhs;
        }
    }
}

impl<T> Div<T> for Vector
where
    Vector: DivAssign<T>,
{
    type Output = Self;

    fn div(mut self, rhs: T) -> Self::Output {
        // Like f32: at worst a NaN value is created.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self /= rhs;
        }
        self
    }
}
