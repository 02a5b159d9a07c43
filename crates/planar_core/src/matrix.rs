use crate::error::{InvalidInput, Result};
use crate::traits::VectorField;
use num_complex::Complex;
use serde::{Deserialize, Serialize};

/// Coefficients of the planar linear system
///
/// ```text
/// x' = a1 x + b1 y
/// y' = a2 x + b2 y
/// ```
///
/// i.e. the matrix `[[a1, b1], [a2, b2]]`. Every coefficient is finite; the
/// only way to build one is through [`Matrix2x2::new`] or
/// [`Matrix2x2::from_options`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Matrix2x2 {
    a1: f64,
    b1: f64,
    a2: f64,
    b2: f64,
}

/// One eigenvalue of a [`Matrix2x2`], split into real and imaginary parts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Eigenvalue {
    pub re: f64,
    pub im: f64,
}

impl Eigenvalue {
    pub fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    pub fn is_real(&self) -> bool {
        self.im == 0.0
    }
}

impl From<Complex<f64>> for Eigenvalue {
    fn from(value: Complex<f64>) -> Self {
        Self {
            re: value.re,
            im: value.im,
        }
    }
}

impl From<Eigenvalue> for Complex<f64> {
    fn from(value: Eigenvalue) -> Self {
        Complex::new(value.re, value.im)
    }
}

const COEFFICIENT_NAMES: [&str; 4] = ["a1", "b1", "a2", "b2"];

impl Matrix2x2 {
    pub fn new(a1: f64, b1: f64, a2: f64, b2: f64) -> Result<Self> {
        for (name, value) in COEFFICIENT_NAMES.into_iter().zip([a1, b1, a2, b2]) {
            if !value.is_finite() {
                return Err(InvalidInput::NonFiniteCoefficient { name, value });
            }
        }
        Ok(Self { a1, b1, a2, b2 })
    }

    /// Builds a matrix from coefficients that may not have been provided.
    pub fn from_options(
        a1: Option<f64>,
        b1: Option<f64>,
        a2: Option<f64>,
        b2: Option<f64>,
    ) -> Result<Self> {
        let mut values = [0.0; 4];
        for ((slot, name), value) in values
            .iter_mut()
            .zip(COEFFICIENT_NAMES)
            .zip([a1, b1, a2, b2])
        {
            *slot = value.ok_or(InvalidInput::MissingCoefficient { name })?;
        }
        Self::new(values[0], values[1], values[2], values[3])
    }

    /// Row-major coefficients `[a1, b1, a2, b2]`.
    pub fn coefficients(&self) -> [f64; 4] {
        [self.a1, self.b1, self.a2, self.b2]
    }

    pub fn trace(&self) -> f64 {
        self.a1 + self.b2
    }

    /// `a1*b2 - b1*a2`. When both products overflow the difference is taken
    /// on the rescaled matrix so a singular matrix still reports exactly zero.
    pub fn determinant(&self) -> f64 {
        let det = self.a1 * self.b2 - self.b1 * self.a2;
        if !det.is_nan() {
            return det;
        }
        let (scale, scaled) = self.rescaled();
        let det = scaled.a1 * scaled.b2 - scaled.b1 * scaled.a2;
        if det == 0.0 {
            0.0
        } else {
            det * scale * scale
        }
    }

    /// `trace² - 4·det`; its sign separates real from complex eigenvalues.
    /// Not finite when the coefficients are large enough to overflow `trace²`.
    pub fn discriminant(&self) -> f64 {
        let trace = self.trace();
        trace * trace - 4.0 * self.determinant()
    }

    /// Both eigenvalues in closed form. Real pairs are ordered
    /// `(T + √Δ)/2, (T - √Δ)/2`; complex pairs put the positive imaginary
    /// part first.
    ///
    /// If `Δ` overflows, the eigenvalues of `A / s` are computed instead and
    /// multiplied back by `s`, a power of two near the largest coefficient,
    /// so the division and the scaling back are exact.
    pub fn eigenvalues(&self) -> [Eigenvalue; 2] {
        if self.discriminant().is_finite() {
            return self.closed_form_eigenvalues();
        }
        let (scale, scaled) = self.rescaled();
        scaled.closed_form_eigenvalues().map(|value| Eigenvalue {
            re: value.re * scale,
            im: value.im * scale,
        })
    }

    fn closed_form_eigenvalues(&self) -> [Eigenvalue; 2] {
        let trace = self.trace();
        let discriminant = self.discriminant();
        if discriminant >= 0.0 {
            let root = discriminant.sqrt();
            [
                Eigenvalue::real((trace + root) / 2.0),
                Eigenvalue::real((trace - root) / 2.0),
            ]
        } else {
            let re = trace / 2.0;
            let im = (-discriminant).sqrt() / 2.0;
            [Eigenvalue { re, im }, Eigenvalue { re, im: -im }]
        }
    }

    /// `(s, A / s)` with `s` the power of two matching the exponent of the
    /// largest coefficient magnitude. Every entry of `A / s` lies in `[-2, 2]`.
    fn rescaled(&self) -> (f64, Self) {
        let largest = self
            .coefficients()
            .iter()
            .fold(0.0_f64, |acc, value| acc.max(value.abs()));
        if largest == 0.0 {
            return (1.0, *self);
        }
        // log2(f64::MAX) rounds up to 1024; 2^1024 itself is not finite.
        let exponent = (largest.log2().floor() as i32).min(f64::MAX_EXP - 1);
        let scale = 2.0_f64.powi(exponent);
        let scaled = Self {
            a1: self.a1 / scale,
            b1: self.b1 / scale,
            a2: self.a2 / scale,
            b2: self.b2 / scale,
        };
        (scale, scaled)
    }

    /// Velocity `(x', y')` at the point `(x, y)`.
    pub fn velocity(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a1 * x + self.b1 * y, self.a2 * x + self.b2 * y)
    }
}

impl VectorField<f64> for Matrix2x2 {
    fn dimension(&self) -> usize {
        2
    }

    fn apply(&self, _t: f64, x: &[f64], out: &mut [f64]) {
        let (dx, dy) = self.velocity(x[0], x[1]);
        out[0] = dx;
        out[1] = dy;
    }
}
