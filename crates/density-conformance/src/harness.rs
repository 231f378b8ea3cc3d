//! The conformance harness.
//!
//! Given an object, a point `x`, and the expected log-density at `x`, the
//! harness checks three subjects:
//!
//! - `object` itself: it must be or have a density;
//! - `logfuncdensity(logdensityof(object))`: must be `IsDensity`;
//! - `funcdensity(densityof(object))`: must be `IsDensity`.
//!
//! On each subject it compares `logdensityof(s, x)`, `logdensityof(s)(x)`,
//! `densityof(s, x)` and `densityof(s)(x)` with the expected values. Every
//! mismatch becomes a [`ConformanceFailure`]; nothing is mutated.
//!
//! The round trips depend on the object's kind, so they are dispatched
//! through [`RoundTrip`], implemented for each kind marker.

use crate::compare::{Comparator, Tolerance};
use crate::config::{ConformanceConfig, DEFAULT_PROFILE};
use crate::witness::{ConformanceFailure, ConformanceReport, check, failure_class, subject};
use density_kernel::{
    Classified, DensityKind, KindTag, LogDensityOf, NotADensity, densityof, densityof_fn,
    densitykind, funcdensity, kind, logdensityof, logdensityof_fn, logfuncdensity,
};
use serde_json::json;

/// Accumulates failures for one point and one expected value.
pub struct ConformanceCheck<'c, X: ?Sized, C: ?Sized> {
    x: &'c X,
    expected_log_density: f64,
    comparator: &'c C,
    failures: Vec<ConformanceFailure>,
}

impl<'c, X: ?Sized, C: Comparator + ?Sized> ConformanceCheck<'c, X, C> {
    pub fn new(x: &'c X, expected_log_density: f64, comparator: &'c C) -> Self {
        Self {
            x,
            expected_log_density,
            comparator,
            failures: Vec::new(),
        }
    }

    /// Check an object that must be or have a density.
    pub fn object<T>(&mut self, name: &str, object: &T)
    where
        T: LogDensityOf<X> + ?Sized,
    {
        let kind = densitykind(object);
        if !kind.is_or_has() {
            self.fail(
                ConformanceFailure::new(
                    failure_class::NOT_A_DENSITY,
                    name,
                    check::KIND,
                    format!("{name} is classified {kind}"),
                )
                .with_details(json!({ "kind": kind })),
            );
        }
        self.values(name, object);
    }

    /// Check the result of a construction, which must be a density.
    pub fn constructed<T>(&mut self, name: &str, object: &T)
    where
        T: LogDensityOf<X> + ?Sized,
    {
        let kind = densitykind(object);
        if kind != DensityKind::IsDensity {
            self.fail(
                ConformanceFailure::new(
                    failure_class::KIND_MISMATCH,
                    name,
                    check::KIND,
                    format!("{name} is classified {kind}, expected IsDensity"),
                )
                .with_details(json!({ "kind": kind, "expected": DensityKind::IsDensity })),
            );
        }
        self.values(name, object);
    }

    /// Record that a one-argument form refused `name`.
    pub fn not_a_density(&mut self, name: &str, check: &str, err: &NotADensity) {
        self.fail(
            ConformanceFailure::new(failure_class::NOT_A_DENSITY, name, check, err.to_string())
                .with_details(json!({ "typeName": err.type_name })),
        );
    }

    fn values<T>(&mut self, name: &str, object: &T)
    where
        T: LogDensityOf<X> + ?Sized,
    {
        let expected_log = self.expected_log_density;
        let expected = expected_log.exp();

        let actual = logdensityof(object, self.x);
        self.compare(
            name,
            check::LOGDENSITYOF,
            failure_class::LOG_DENSITY_MISMATCH,
            format!("logdensityof({name}, x)"),
            actual,
            expected_log,
        );

        match logdensityof_fn(object) {
            Ok(log_f) => self.compare(
                name,
                check::CURRIED_LOGDENSITYOF,
                failure_class::LOG_DENSITY_MISMATCH,
                format!("logdensityof({name})(x)"),
                log_f.call(self.x),
                expected_log,
            ),
            Err(err) => self.not_a_density(name, check::CURRIED_LOGDENSITYOF, &err),
        }

        let actual = densityof(object, self.x);
        self.compare(
            name,
            check::DENSITYOF,
            failure_class::DENSITY_MISMATCH,
            format!("densityof({name}, x)"),
            actual,
            expected,
        );

        match densityof_fn(object) {
            Ok(f) => self.compare(
                name,
                check::CURRIED_DENSITYOF,
                failure_class::DENSITY_MISMATCH,
                format!("densityof({name})(x)"),
                f.call(self.x),
                expected,
            ),
            Err(err) => self.not_a_density(name, check::CURRIED_DENSITYOF, &err),
        }
    }

    fn compare(
        &mut self,
        name: &str,
        check: &str,
        class: &str,
        expr: String,
        actual: f64,
        expected: f64,
    ) {
        if self.comparator.approx_eq(actual, expected) {
            return;
        }
        self.fail(
            ConformanceFailure::new(
                class,
                name,
                check,
                format!("{expr} = {actual}, expected {expected}"),
            )
            .with_details(json!({ "actual": actual, "expected": expected })),
        );
    }

    fn fail(&mut self, failure: ConformanceFailure) {
        tracing::warn!(
            class = %failure.class,
            subject = %failure.subject,
            check = %failure.check,
            "{}",
            failure.message
        );
        self.failures.push(failure);
    }

    pub fn failures(&self) -> &[ConformanceFailure] {
        &self.failures
    }

    /// Close the check into a report.
    pub fn finish(
        self,
        profile: &str,
        object_type: impl Into<String>,
        kind: DensityKind,
    ) -> ConformanceReport {
        if self.failures.is_empty() {
            ConformanceReport::accepted(profile, object_type, kind)
        } else {
            ConformanceReport::rejected(profile, object_type, kind, self.failures)
        }
    }
}

/// Construction round trips for an object of kind `Self`.
///
/// `IsDensity` and `HasDensity` build both round trips and check them as
/// constructed densities. `NoDensity` has no round trip; both subjects are
/// reported as `not_a_density`.
pub trait RoundTrip<D, X: ?Sized>: KindTag {
    fn check_round_trips<C: Comparator + ?Sized>(
        object: D,
        checker: &mut ConformanceCheck<'_, X, C>,
    );
}

macro_rules! round_trip_for_density {
    ($($marker:ident),+) => {
        $(
            impl<D, X> RoundTrip<D, X> for kind::$marker
            where
                D: LogDensityOf<X> + Classified<Kind = kind::$marker> + Clone,
                X: ?Sized,
            {
                fn check_round_trips<C: Comparator + ?Sized>(
                    object: D,
                    checker: &mut ConformanceCheck<'_, X, C>,
                ) {
                    match logdensityof_fn(object.clone()) {
                        Ok(log_f) => {
                            checker.constructed(subject::LOG_ROUND_TRIP, &logfuncdensity(log_f))
                        }
                        Err(err) => {
                            checker.not_a_density(subject::LOG_ROUND_TRIP, check::KIND, &err)
                        }
                    }
                    match densityof_fn(object) {
                        Ok(f) => checker.constructed(subject::ROUND_TRIP, &funcdensity(f)),
                        Err(err) => checker.not_a_density(subject::ROUND_TRIP, check::KIND, &err),
                    }
                }
            }
        )+
    };
}

round_trip_for_density!(IsDensity, HasDensity);

impl<D, X> RoundTrip<D, X> for kind::NoDensity
where
    D: Classified<Kind = kind::NoDensity>,
    X: ?Sized,
{
    fn check_round_trips<C: Comparator + ?Sized>(
        _object: D,
        checker: &mut ConformanceCheck<'_, X, C>,
    ) {
        let err = NotADensity::of::<D>();
        checker.not_a_density(subject::LOG_ROUND_TRIP, check::KIND, &err);
        checker.not_a_density(subject::ROUND_TRIP, check::KIND, &err);
    }
}

/// Check `object` against the density interface at `x`.
///
/// `expected_log_density` is the reference value of `logdensityof(object, x)`;
/// densities are compared against its exponential.
pub fn check_density_interface<'a, D, X, C>(
    object: &'a D,
    x: &X,
    expected_log_density: f64,
    comparator: &C,
) -> ConformanceReport
where
    D: LogDensityOf<X> + ?Sized,
    X: ?Sized,
    C: Comparator + ?Sized,
    D::Kind: RoundTrip<&'a D, X>,
{
    run_check(DEFAULT_PROFILE, object, x, expected_log_density, comparator)
}

/// [`check_density_interface`] with the profile and tolerance of `config`.
pub fn check_density_interface_with<'a, D, X>(
    config: &ConformanceConfig,
    object: &'a D,
    x: &X,
    expected_log_density: f64,
) -> ConformanceReport
where
    D: LogDensityOf<X> + ?Sized,
    X: ?Sized,
    D::Kind: RoundTrip<&'a D, X>,
{
    run_check(
        &config.profile,
        object,
        x,
        expected_log_density,
        &config.tolerance,
    )
}

fn run_check<'a, D, X, C>(
    profile: &str,
    object: &'a D,
    x: &X,
    expected_log_density: f64,
    comparator: &C,
) -> ConformanceReport
where
    D: LogDensityOf<X> + ?Sized,
    X: ?Sized,
    C: Comparator + ?Sized,
    D::Kind: RoundTrip<&'a D, X>,
{
    let object_type = std::any::type_name::<D>();
    let kind = densitykind(object);
    tracing::debug!(object_type, %kind, profile, "checking density interface");

    let mut check = ConformanceCheck::new(x, expected_log_density, comparator);
    check.object(subject::OBJECT, object);
    <D::Kind as RoundTrip<&'a D, X>>::check_round_trips(object, &mut check);

    let report = check.finish(profile, object_type, kind);
    tracing::debug!(
        object_type,
        result = %report.result,
        failures = report.failures.len(),
        "density interface check finished"
    );
    report
}

/// Assert that `object` implements the density interface consistently at
/// `x`. Panics with the list of failures otherwise.
///
/// ```
/// use density_conformance::{test_density_interface, Tolerance};
/// use density_kernel::toy::NegSquaredNorm;
///
/// test_density_interface(&NegSquaredNorm, &[1.0, 2.0, 3.0][..], -14.0, &Tolerance::default());
/// ```
#[track_caller]
pub fn test_density_interface<'a, D, X, C>(
    object: &'a D,
    x: &X,
    expected_log_density: f64,
    comparator: &C,
) where
    D: LogDensityOf<X> + ?Sized,
    X: ?Sized,
    C: Comparator + ?Sized,
    D::Kind: RoundTrip<&'a D, X>,
{
    let report = check_density_interface(object, x, expected_log_density, comparator);
    assert!(report.is_accepted(), "{report}");
}

/// [`test_density_interface`] with the default tolerance.
#[track_caller]
pub fn test_density_interface_default<'a, D, X>(object: &'a D, x: &X, expected_log_density: f64)
where
    D: LogDensityOf<X> + ?Sized,
    X: ?Sized,
    D::Kind: RoundTrip<&'a D, X>,
{
    test_density_interface(object, x, expected_log_density, &Tolerance::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use density_kernel::toy::{NegSquaredNorm, NegSquaredNormMeasure, StdNormal, UniformPdf};

    const X: &[f64] = &[1.0, 2.0, 3.0];

    #[test]
    fn toy_densities_are_accepted() {
        let tol = Tolerance::default();
        assert!(check_density_interface(&NegSquaredNorm, X, -14.0, &tol).is_accepted());
        assert!(check_density_interface(&NegSquaredNormMeasure, X, -14.0, &tol).is_accepted());

        let expected = StdNormal.logdensityof(&0.7);
        assert!(check_density_interface(&StdNormal, &0.7_f64, expected, &tol).is_accepted());
    }

    #[test]
    fn unsupported_point_is_accepted_with_infinite_log_density() {
        let u = UniformPdf::new(0.0, 1.0);
        let tol = Tolerance::default();
        let report = check_density_interface(&u, &3.0_f64, f64::NEG_INFINITY, &tol);
        assert!(report.is_accepted(), "{report}");
    }

    #[test]
    fn wrong_expectation_fails_every_value_check() {
        let report = check_density_interface(&NegSquaredNorm, X, -13.0, &Tolerance::default());
        assert!(!report.is_accepted());
        // 4 value checks on each of 3 subjects
        assert_eq!(report.failures.len(), 12);
        assert_eq!(
            report
                .failures_of(failure_class::LOG_DENSITY_MISMATCH)
                .count(),
            6
        );
        assert_eq!(report.failures_of(failure_class::DENSITY_MISMATCH).count(), 6);
    }

    #[test]
    fn round_trips_dispatch_on_every_kind() {
        let tol = Tolerance::default();

        let mut check = ConformanceCheck::new(X, -14.0, &tol);
        <kind::IsDensity as RoundTrip<_, [f64]>>::check_round_trips(&NegSquaredNorm, &mut check);
        <kind::HasDensity as RoundTrip<_, [f64]>>::check_round_trips(
            &NegSquaredNormMeasure,
            &mut check,
        );
        assert!(check.failures().is_empty());

        // both subjects of both kinds, four value checks each
        let mut check = ConformanceCheck::new(X, -13.0, &tol);
        <kind::IsDensity as RoundTrip<_, [f64]>>::check_round_trips(&NegSquaredNorm, &mut check);
        <kind::HasDensity as RoundTrip<_, [f64]>>::check_round_trips(
            &NegSquaredNormMeasure,
            &mut check,
        );
        assert_eq!(check.failures().len(), 16);

        let mut check = ConformanceCheck::new(X, -14.0, &tol);
        <kind::NoDensity as RoundTrip<_, [f64]>>::check_round_trips("settings", &mut check);
        let subjects: Vec<_> = check.failures().iter().map(|f| f.subject.as_str()).collect();
        assert_eq!(subjects, [subject::LOG_ROUND_TRIP, subject::ROUND_TRIP]);
    }

    #[test]
    fn check_accumulates_across_subjects() {
        let tol = Tolerance::exact();
        let mut check = ConformanceCheck::new(X, -14.0, &tol);
        check.object("first", &NegSquaredNorm);
        check.constructed("second", &NegSquaredNormMeasure);
        assert_eq!(check.failures().len(), 1);
        assert_eq!(check.failures()[0].class, failure_class::KIND_MISMATCH);
        assert_eq!(check.failures()[0].subject, "second");
    }
}
