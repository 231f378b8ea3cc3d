//! Integration tests: the protocol as seen by a downstream crate.
//!
//! The types below register their classification and evaluation from
//! outside the kernel, the way a distribution library would.

use density_kernel::toy::{NegSquaredNorm, NegSquaredNormMeasure, StdNormal};
use density_kernel::{
    Classified, DensityKind, LogDensityOf, NotADensity, density_kind, densityof, densityof_fn,
    densitykind, funcdensity, is_or_has_density, kind, logdensityof, logdensityof_fn,
    logfuncdensity,
};
use proptest::prelude::*;

/// An isotropic Gaussian kernel, registered as a density.
#[derive(Debug, Clone, PartialEq)]
struct GaussianKernel {
    precision: f64,
}

impl Classified for GaussianKernel {
    type Kind = kind::IsDensity;
}

impl LogDensityOf<[f64]> for GaussianKernel {
    fn logdensityof(&self, x: &[f64]) -> f64 {
        -0.5 * self.precision * x.iter().map(|v| v * v).sum::<f64>()
    }
}

/// A Poisson distribution: has a density (w.r.t. counting measure).
#[derive(Debug, Clone, PartialEq)]
struct Poisson {
    rate: f64,
}

density_kind!(HasDensity: Poisson);

impl LogDensityOf<u64> for Poisson {
    fn logdensityof(&self, k: &u64) -> f64 {
        let ln_factorial: f64 = (1..=*k).map(|i| (i as f64).ln()).sum();
        *k as f64 * self.rate.ln() - self.rate - ln_factorial
    }
}

/// A struct with no density semantics.
#[derive(Debug)]
struct Settings;

density_kind!(NoDensity: Settings);

fn neg_sq_norm(x: &[f64]) -> f64 {
    -x.iter().map(|v| v * v).sum::<f64>()
}

#[test]
fn is_density_scenario() {
    let d = NegSquaredNorm;
    let x: &[f64] = &[1.0, 2.0, 3.0];
    assert_eq!(densitykind(&d), DensityKind::IsDensity);
    assert_eq!(logdensityof(&d, x), -14.0);
    assert_eq!(densityof(&d, x), (-14.0_f64).exp());

    let g = logfuncdensity(neg_sq_norm);
    assert_eq!(densitykind(&g), DensityKind::IsDensity);
    assert_eq!(logdensityof(&g, x), -14.0);
}

#[test]
fn has_density_scenario() {
    let m = NegSquaredNormMeasure;
    let x: &[f64] = &[1.0, 2.0, 3.0];
    assert_eq!(densitykind(&m), DensityKind::HasDensity);

    let d = logfuncdensity(logdensityof_fn(&m).unwrap());
    assert_eq!(densitykind(&d), DensityKind::IsDensity);
    assert_eq!(logdensityof(&d, x), logdensityof(&m, x));
    assert_eq!(densityof(&d, x), densityof(&m, x));
}

#[test]
fn invalid_input_scenario() {
    let s = Settings;
    assert_eq!(densitykind(&s), DensityKind::NoDensity);
    assert!(!is_or_has_density(&s));

    let log_err = logdensityof_fn(&s).unwrap_err();
    let err = densityof_fn(&s).unwrap_err();
    assert_eq!(log_err, err);
    assert_eq!(err, NotADensity::of::<&Settings>());
    assert!(err.type_name.ends_with("Settings"));
}

#[test]
fn round_trip_returns_the_same_is_density_object() {
    let d = GaussianKernel { precision: 2.0 };

    let back = logfuncdensity(logdensityof_fn(&d).unwrap());
    assert!(std::ptr::eq(back, &d));

    let back = funcdensity(densityof_fn(&d).unwrap());
    assert!(std::ptr::eq(back, &d));

    let boxed = Box::new(GaussianKernel { precision: 0.5 });
    let addr: *const GaussianKernel = &*boxed;
    let back = logfuncdensity(logdensityof_fn(boxed).unwrap());
    assert!(std::ptr::eq(&*back, addr));
}

#[test]
fn round_trip_wraps_has_density_object() {
    let p = Poisson { rate: 3.0 };

    let d = logfuncdensity(logdensityof_fn(p.clone()).unwrap());
    assert_eq!(densitykind(&d), DensityKind::IsDensity);
    assert_eq!(d.log_f().density(), &p);
    for k in 0..10_u64 {
        assert_eq!(logdensityof(&d, &k), logdensityof(&p, &k));
    }

    let d = funcdensity(densityof_fn(&p).unwrap());
    assert_eq!(densitykind(&d), DensityKind::IsDensity);
    assert_eq!(densityof(&d, &2_u64), densityof(&p, &2_u64));
}

#[test]
fn density_override_is_authoritative() {
    let f = densityof_fn(StdNormal).unwrap();
    assert_eq!(f.call(&1.5_f64), StdNormal.densityof(&1.5));

    let g = funcdensity(f);
    assert_eq!(densityof(&g, &1.5_f64), StdNormal.densityof(&1.5));
}

proptest! {
    /// Property: construction inverts evaluation for HasDensity objects.
    #[test]
    fn logfuncdensity_inverts_logdensityof(
        rate in 0.1f64..20.0,
        k in 0u64..50,
    ) {
        let p = Poisson { rate };
        let d = logfuncdensity(logdensityof_fn(&p).unwrap());
        prop_assert_eq!(logdensityof(&d, &k), logdensityof(&p, &k));

        let d = funcdensity(densityof_fn(&p).unwrap());
        prop_assert_eq!(densityof(&d, &k), densityof(&p, &k));
    }

    /// Property: evaluation inverts construction for plain functions.
    #[test]
    fn logdensityof_inverts_logfuncdensity(
        x in prop::collection::vec(-10.0f64..10.0, 0..8),
    ) {
        let g = logfuncdensity(neg_sq_norm);
        prop_assert_eq!(logdensityof(&g, x.as_slice()), neg_sq_norm(&x));
        prop_assert_eq!(logdensityof_fn(&g).unwrap().call(x.as_slice()), neg_sq_norm(&x));

        let h = funcdensity(neg_sq_norm);
        prop_assert_eq!(densityof(&h, x.as_slice()), neg_sq_norm(&x));
        prop_assert_eq!(densityof_fn(&h).unwrap().call(x.as_slice()), neg_sq_norm(&x));
    }

    /// Property: densityof is exp(logdensityof) unless overridden.
    #[test]
    fn densityof_defaults_to_exp(
        precision in 0.0f64..5.0,
        x in prop::collection::vec(-3.0f64..3.0, 1..6),
    ) {
        let d = GaussianKernel { precision };
        prop_assert_eq!(densityof(&d, x.as_slice()), logdensityof(&d, x.as_slice()).exp());
    }
}
