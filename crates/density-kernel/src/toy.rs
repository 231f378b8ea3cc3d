//! Toy density-like types for conformance testing and documentation.
//!
//! - **NegSquaredNorm**: `IsDensity` on `[f64]`, `logdensityof(x) = -‖x‖²`.
//!   Unnormalized; the protocol does not care.
//! - **NegSquaredNormMeasure**: the same formula, but classified
//!   `HasDensity`. Round-trips through construction into a fresh wrapper.
//! - **StdNormal**: `HasDensity` on `f64`, overrides `densityof` with the
//!   closed form instead of going through `exp`.
//! - **UniformPdf**: `IsDensity` on `f64` with a bounded support. Outside
//!   the support the log-density is `-∞` and the density is exactly `0`.

use crate::evaluate::LogDensityOf;

/// `x -> -‖x‖²`, itself a density.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NegSquaredNorm;

/// A measure whose density is `x -> -‖x‖²`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NegSquaredNormMeasure;

/// The standard normal distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StdNormal;

/// The PDF of the uniform distribution on `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformPdf {
    pub lower: f64,
    pub upper: f64,
}

crate::density_kind!(IsDensity: NegSquaredNorm, UniformPdf);
crate::density_kind!(HasDensity: NegSquaredNormMeasure, StdNormal);

fn neg_squared_norm(x: &[f64]) -> f64 {
    -x.iter().map(|v| v * v).sum::<f64>()
}

impl LogDensityOf<[f64]> for NegSquaredNorm {
    fn logdensityof(&self, x: &[f64]) -> f64 {
        neg_squared_norm(x)
    }
}

impl LogDensityOf<[f64]> for NegSquaredNormMeasure {
    fn logdensityof(&self, x: &[f64]) -> f64 {
        neg_squared_norm(x)
    }
}

const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_8;

impl LogDensityOf<f64> for StdNormal {
    fn logdensityof(&self, x: &f64) -> f64 {
        -0.5 * x * x - LN_SQRT_2PI
    }

    fn densityof(&self, x: &f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * std::f64::consts::PI).sqrt()
    }
}

impl UniformPdf {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

impl LogDensityOf<f64> for UniformPdf {
    fn logdensityof(&self, x: &f64) -> f64 {
        if self.contains(*x) {
            -(self.upper - self.lower).ln()
        } else {
            f64::NEG_INFINITY
        }
    }

    fn densityof(&self, x: &f64) -> f64 {
        if self.contains(*x) {
            (self.upper - self.lower).recip()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neg_squared_norm_values() {
        assert_eq!(NegSquaredNorm.logdensityof(&[1.0, 2.0, 3.0][..]), -14.0);
        assert_eq!(NegSquaredNorm.logdensityof(&[][..]), 0.0);
    }

    #[test]
    fn std_normal_override_agrees_with_log_form() {
        for x in [-3.0, -0.5, 0.0, 0.25, 2.0] {
            let direct = StdNormal.densityof(&x);
            let via_log = StdNormal.logdensityof(&x).exp();
            assert!((direct - via_log).abs() <= 1e-15, "x={x}: {direct} vs {via_log}");
        }
    }

    #[test]
    fn uniform_support() {
        let u = UniformPdf::new(0.0, 4.0);
        assert_eq!(u.densityof(&1.0), 0.25);
        assert_eq!(u.logdensityof(&1.0), -(4.0_f64.ln()));
        assert_eq!(u.densityof(&5.0), 0.0);
        assert_eq!(u.logdensityof(&-1.0), f64::NEG_INFINITY);
    }
}
