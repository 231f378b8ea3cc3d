//! Evaluation surface.
//!
//! Two families with the same shape, one logarithmic and one not:
//!
//! - two-argument form: [`logdensityof`]`(d, x)` / [`densityof`]`(d, x)`,
//!   dispatched to the [`LogDensityOf`] implementation of `d`.
//! - one-argument form: [`logdensityof_fn`]`(d)` / [`densityof_fn`]`(d)`,
//!   returning a curried evaluator. Fails with [`NotADensity`] when `d` is
//!   classified `NoDensity`.
//!
//! The curried evaluators are distinct types so that the construction
//! surface can recognize and unwrap them by type.

use crate::classify::Classified;
use crate::error::NotADensity;
use crate::kind::{self, KindTag};
use std::rc::Rc;
use std::sync::Arc;

/// The evaluation capability of a density-like type at points of type `X`.
///
/// There is no fallback for `logdensityof`: a type that is or has a density
/// must say how to compute it. `densityof` defaults to `exp(logdensityof)`
/// and may be overridden when a direct computation exists.
///
/// ```
/// use density_kernel::{density_kind, densityof, logdensityof, LogDensityOf};
///
/// struct Exponential { rate: f64 }
///
/// density_kind!(HasDensity: Exponential);
///
/// impl LogDensityOf<f64> for Exponential {
///     fn logdensityof(&self, x: &f64) -> f64 {
///         if *x < 0.0 { f64::NEG_INFINITY } else { self.rate.ln() - self.rate * x }
///     }
/// }
///
/// let d = Exponential { rate: 2.0 };
/// assert_eq!(logdensityof(&d, &0.0), 2.0_f64.ln());
/// assert_eq!(densityof(&d, &-1.0_f64), 0.0);
/// ```
pub trait LogDensityOf<X: ?Sized>: Classified {
    /// Log of the density at `x`.
    fn logdensityof(&self, x: &X) -> f64;

    /// The density at `x`.
    fn densityof(&self, x: &X) -> f64 {
        self.logdensityof(x).exp()
    }
}

macro_rules! forward_log_density {
    ($($ptr:ident),+) => {
        $(
            impl<X: ?Sized, T: LogDensityOf<X> + ?Sized> LogDensityOf<X> for $ptr<T> {
                #[inline]
                fn logdensityof(&self, x: &X) -> f64 {
                    (**self).logdensityof(x)
                }

                #[inline]
                fn densityof(&self, x: &X) -> f64 {
                    (**self).densityof(x)
                }
            }
        )+
    };
}

forward_log_density!(Box, Rc, Arc);

impl<X: ?Sized, T: LogDensityOf<X> + ?Sized> LogDensityOf<X> for &T {
    #[inline]
    fn logdensityof(&self, x: &X) -> f64 {
        (**self).logdensityof(x)
    }

    #[inline]
    fn densityof(&self, x: &X) -> f64 {
        (**self).densityof(x)
    }
}

/// Log of the density of `density` at `x`.
#[inline]
pub fn logdensityof<D, X>(density: &D, x: &X) -> f64
where
    D: LogDensityOf<X> + ?Sized,
    X: ?Sized,
{
    density.logdensityof(x)
}

/// The density of `density` at `x`.
#[inline]
pub fn densityof<D, X>(density: &D, x: &X) -> f64
where
    D: LogDensityOf<X> + ?Sized,
    X: ?Sized,
{
    density.densityof(x)
}

/// A plain function from points to reals.
///
/// Implemented by every `Fn(&X) -> f64` and by both curried evaluators.
pub trait Evaluate<X: ?Sized> {
    fn evaluate(&self, x: &X) -> f64;
}

impl<X: ?Sized, F> Evaluate<X> for F
where
    F: Fn(&X) -> f64,
{
    #[inline]
    fn evaluate(&self, x: &X) -> f64 {
        self(x)
    }
}

/// Curried `logdensityof`: `x -> logdensityof(d, x)` for a fixed `d`.
///
/// Only obtainable through [`logdensityof_fn`], so the captured object is
/// always classified `IsDensity` or `HasDensity`. Owns `d`; curry a
/// reference (`logdensityof_fn(&d)`) to borrow instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogDensityOfFn<D> {
    density: D,
}

/// Curried `densityof`: `x -> densityof(d, x)` for a fixed `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DensityOfFn<D> {
    density: D,
}

macro_rules! curried_evaluator {
    ($name:ident, $method:ident) => {
        impl<D> $name<D> {
            /// The captured density-like object.
            pub fn density(&self) -> &D {
                &self.density
            }

            /// Release the captured object.
            pub fn into_inner(self) -> D {
                self.density
            }

            #[inline]
            pub fn call<X: ?Sized>(&self, x: &X) -> f64
            where
                D: LogDensityOf<X>,
            {
                self.density.$method(x)
            }
        }

        // A curried evaluator is a function, not a density.
        impl<D> Classified for $name<D> {
            type Kind = kind::NoDensity;
        }

        impl<X: ?Sized, D: LogDensityOf<X>> Evaluate<X> for $name<D> {
            #[inline]
            fn evaluate(&self, x: &X) -> f64 {
                self.density.$method(x)
            }
        }
    };
}

curried_evaluator!(LogDensityOfFn, logdensityof);
curried_evaluator!(DensityOfFn, densityof);

fn check_is_or_has_density<D: Classified>(operation: &str) -> Result<(), NotADensity> {
    if <D::Kind as KindTag>::KIND.is_or_has() {
        Ok(())
    } else {
        let err = NotADensity::of::<D>();
        tracing::debug!(
            operation,
            type_name = err.type_name,
            "rejected one-argument evaluation of a NoDensity object"
        );
        Err(err)
    }
}

/// One-argument `logdensityof`: the curried evaluator over `density`.
///
/// ```
/// use density_kernel::{logdensityof_fn, toy::NegSquaredNorm};
///
/// let log_f = logdensityof_fn(NegSquaredNorm).unwrap();
/// assert_eq!(log_f.call(&[1.0, 2.0][..]), -5.0);
///
/// assert!(logdensityof_fn("not a density").is_err());
/// ```
pub fn logdensityof_fn<D: Classified>(density: D) -> Result<LogDensityOfFn<D>, NotADensity> {
    check_is_or_has_density::<D>("logdensityof")?;
    Ok(LogDensityOfFn { density })
}

/// One-argument `densityof`: the curried evaluator over `density`.
pub fn densityof_fn<D: Classified>(density: D) -> Result<DensityOfFn<D>, NotADensity> {
    check_is_or_has_density::<D>("densityof")?;
    Ok(DensityOfFn { density })
}
