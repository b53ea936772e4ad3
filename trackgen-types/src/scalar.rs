//! Scalar values for lengths and coordinates inside a tile.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Scalar values for lengths and coordinates inside a tile, measured in millimetres.
///
/// The methods form the well known arithmetic field.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Scalar(pub f32);

impl Scalar {
    /// Additive neutral element `Scalar(0.)`.
    pub const ZERO: Scalar = Scalar(0.);

    /// Multiplicative neutral element `Scalar(1.)`.
    pub const ONE: Scalar = Scalar(1.);

    /// Half the value.
    #[must_use]
    pub fn halved(&self) -> Self {
        Scalar(0.5 * self.0)
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Scalar(self.0.abs())
    }

    /// Round to the nearest whole number, half-way cases away from `0.0`.
    #[must_use]
    pub fn round(&self) -> Self {
        Scalar(self.0.round())
    }

    /// Copy of the larger element.
    #[must_use]
    pub fn max(&self, other: &Self) -> Self {
        if self > other {
            *self
        } else {
            *other
        }
    }

    /// Copy of the smaller element.
    #[must_use]
    pub fn min(&self, other: &Self) -> Self {
        if self < other {
            *self
        } else {
            *other
        }
    }

    /// Restrict the value to the closed interval `[lower, upper]`.
    #[must_use]
    pub fn clamp(&self, lower: &Self, upper: &Self) -> Self {
        self.max(lower).min(upper)
    }

    /// Is the value neither infinite nor `NaN`?
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

// A field is an (additive) abelian group
impl AddAssign<&Self> for Scalar {
    fn add_assign(&mut self, rhs: &Self) {
        self.0 += rhs.0;
    }
}

impl AddAssign<Self> for Scalar {
    fn add_assign(&mut self, rhs: Self) {
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        {
            *self += &rhs;
        }
    }
}

impl<T> Add<T> for Scalar
where
    Scalar: AddAssign<T>,
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

impl Neg for Scalar {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        self.0 = -self.0;
        self
    }
}

impl SubAssign<Self> for Scalar {
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

impl SubAssign<&Self> for Scalar {
    fn sub_assign(&mut self, rhs: &Self) {
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        {
            *self -= *rhs;
        }
    }
}

impl<T> Sub<T> for Scalar
where
    Scalar: SubAssign<T>,
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

// Without the additive neutral element, a field is a (multiplicative) abelian group.
impl MulAssign<&Self> for Scalar {
    fn mul_assign(&mut self, rhs: &Self) {
        self.0 *= rhs.0;
    }
}

impl MulAssign<Self> for Scalar {
    fn mul_assign(&mut self, rhs: Self) {
        // Like f32: at worst a NaN value is created.
        #[allow(clippy::arithmetic_side_effects)]
        {
            *self *= &rhs;
        }
    }
}

impl<T> Mul<T> for Scalar
where
    Scalar: MulAssign<T>,
{
    type Output = Self;

    fn mul(mut self, rhs: T) -> Self::Output {
        // Like f32: at worst a NaN value is created.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self *= rhs;
        }
        self
    }
}

impl DivAssign<&Self> for Scalar {
    fn div_assign(&mut self, rhs: &Self) {
        self.0 /= rhs.0;
    }
}

impl DivAssign<Self> for Scalar {
    fn div_assign(&mut self, rhs: Self) {
        // Like f32: at worst a NaN value or infinity is created.
        #[allow(clippy::arithmetic_side_effects)]
        {
            *self /= &rhs;
        }
    }
}

impl<T> Div<T> for Scalar
where
    Scalar: DivAssign<T>,
{
    type Output = Self;

    fn div(mut self, rhs: T) -> Self::Output {
        // Like f32: at worst a NaN value or infinity is created.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self /= rhs;
        }
        self
    }
}
