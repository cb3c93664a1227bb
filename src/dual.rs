//! Forward-mode automatic differentiation.
//!
//! A [`Dual`] carries a real value together with its derivatives with respect
//! to `N` independent inputs. Every gate, circuit and cost routine is generic
//! over [`Real`], so evaluating the cost with `Dual<N>` angles yields the exact
//! gradient alongside the value.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

use num_traits::{Num, NumAssign, One, Zero};

/// Scalar field the circuit code is generic over.
pub trait Real: nalgebra::Scalar + Copy + NumAssign + Neg<Output = Self> {
    fn from_f64(value: f64) -> Self;

    /// The plain value, without derivative information.
    fn value(&self) -> f64;

    fn sin(self) -> Self;

    fn cos(self) -> Self;

    fn is_finite(&self) -> bool;
}

impl Real for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }

    fn value(&self) -> f64 {
        *self
    }

    fn sin(self) -> Self {
        f64::sin(self)
    }

    fn cos(self) -> Self {
        f64::cos(self)
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dual<const N: usize> {
    pub real: f64,
    pub tangent: [f64; N],
}

impl<const N: usize> Dual<N> {
    pub fn constant(real: f64) -> Self {
        Self {
            real,
            tangent: [0.0; N],
        }
    }

    /// Seeds the `index`-th input direction. Panics if `index >= N`.
    pub fn variable(real: f64, index: usize) -> Self {
        let mut tangent = [0.0; N];
        tangent[index] = 1.0;
        Self { real, tangent }
    }

    /// Applies a scalar function whose derivative at `self.real` is `derivative`.
    fn chain(self, real: f64, derivative: f64) -> Self {
        Self {
            real,
            tangent: self.tangent.map(|t| t * derivative),
        }
    }

    fn zip_tangent(self, rhs: Self, f: impl Fn(f64, f64) -> f64) -> [f64; N] {
        std::array::from_fn(|i| f(self.tangent[i], rhs.tangent[i]))
    }
}

impl<const N: usize> Real for Dual<N> {
    fn from_f64(value: f64) -> Self {
        Self::constant(value)
    }

    fn value(&self) -> f64 {
        self.real
    }

    fn sin(self) -> Self {
        self.chain(self.real.sin(), self.real.cos())
    }

    fn cos(self) -> Self {
        self.chain(self.real.cos(), -self.real.sin())
    }

    fn is_finite(&self) -> bool {
        self.real.is_finite() && self.tangent.iter().all(|t| t.is_finite())
    }
}

impl<const N: usize> Add for Dual<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            real: self.real + rhs.real,
            tangent: self.zip_tangent(rhs, |a, b| a + b),
        }
    }
}

impl<const N: usize> Sub for Dual<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            real: self.real - rhs.real,
            tangent: self.zip_tangent(rhs, |a, b| a - b),
        }
    }
}

impl<const N: usize> Mul for Dual<N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            real: self.real * rhs.real,
            tangent: self.zip_tangent(rhs, |a, b| a * rhs.real + self.real * b),
        }
    }
}

impl<const N: usize> Div for Dual<N> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let denominator = rhs.real * rhs.real;
        Self {
            real: self.real / rhs.real,
            tangent: self.zip_tangent(rhs, |a, b| (a * rhs.real - self.real * b) / denominator),
        }
    }
}

impl<const N: usize> Rem for Dual<N> {
    type Output = Self;

    // a % b = a - trunc(a / b) * b, with trunc locally constant
    fn rem(self, rhs: Self) -> Self {
        let quotient = (self.real / rhs.real).trunc();
        Self {
            real: self.real % rhs.real,
            tangent: self.zip_tangent(rhs, |a, b| a - quotient * b),
        }
    }
}

impl<const N: usize> Neg for Dual<N> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            real: -self.real,
            tangent: self.tangent.map(|t| -t),
        }
    }
}

impl<const N: usize> AddAssign for Dual<N> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const N: usize> SubAssign for Dual<N> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const N: usize> MulAssign for Dual<N> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<const N: usize> DivAssign for Dual<N> {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<const N: usize> RemAssign for Dual<N> {
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

impl<const N: usize> Zero for Dual<N> {
    fn zero() -> Self {
        Self::constant(0.0)
    }

    fn is_zero(&self) -> bool {
        self.real == 0.0 && self.tangent.iter().all(|&t| t == 0.0)
    }
}

impl<const N: usize> One for Dual<N> {
    fn one() -> Self {
        Self::constant(1.0)
    }
}

impl<const N: usize> Num for Dual<N> {
    type FromStrRadixErr = <f64 as Num>::FromStrRadixErr;

    fn from_str_radix(str: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        <f64 as Num>::from_str_radix(str, radix).map(Self::constant)
    }
}
