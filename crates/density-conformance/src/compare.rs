//! Approximate comparison of density values.

use serde::{Deserialize, Serialize};

/// Decides whether an actual value matches an expected one.
///
/// Any `Fn(f64, f64) -> bool` is a comparator, called as
/// `(actual, expected)`.
pub trait Comparator {
    fn approx_eq(&self, actual: f64, expected: f64) -> bool;
}

impl<F> Comparator for F
where
    F: Fn(f64, f64) -> bool,
{
    fn approx_eq(&self, actual: f64, expected: f64) -> bool {
        self(actual, expected)
    }
}

/// Relative and absolute tolerance.
///
/// Two values match when they are equal (this covers equal infinities), or
/// when both are finite and `|a - b| <= max(atol, rtol * max(|a|, |b|))`.
/// NaN never matches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    pub rtol: f64,
    pub atol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            rtol: f64::EPSILON.sqrt(),
            atol: 0.0,
        }
    }
}

impl Tolerance {
    pub fn new(rtol: f64, atol: f64) -> Self {
        Self { rtol, atol }
    }

    /// Bitwise-equal values only (up to `-0.0 == 0.0`).
    pub fn exact() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn absolute(atol: f64) -> Self {
        Self::new(0.0, atol)
    }

    pub fn relative(rtol: f64) -> Self {
        Self::new(rtol, 0.0)
    }

    /// Both tolerances must be finite and non-negative.
    pub fn is_valid(&self) -> bool {
        let ok = |t: f64| t.is_finite() && t >= 0.0;
        ok(self.rtol) && ok(self.atol)
    }
}

impl Comparator for Tolerance {
    fn approx_eq(&self, actual: f64, expected: f64) -> bool {
        if actual == expected {
            return true;
        }
        if !actual.is_finite() || !expected.is_finite() {
            return false;
        }
        let scale = actual.abs().max(expected.abs());
        (actual - expected).abs() <= self.atol.max(self.rtol * scale)
    }
}

impl std::fmt::Display for Tolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rtol={}, atol={}", self.rtol, self.atol)
    }
}

/// Comparison with the default [`Tolerance`].
pub fn approximately_equal(actual: f64, expected: f64) -> bool {
    Tolerance::default().approx_eq(actual, expected)
}
