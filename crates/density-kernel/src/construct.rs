//! Construction surface.
//!
//! [`logfuncdensity`] and [`funcdensity`] lift a plain function into an
//! object classified `IsDensity`. They invert the one-argument forms of the
//! evaluation surface:
//!
//! ```text
//! logfuncdensity(logdensityof_fn(d))  ≡ d            (d: IsDensity, same object)
//!                                     ≡ wrapper      (d: HasDensity, fresh IsDensity)
//! logdensityof(logfuncdensity(f), x)  = f(x)
//! ```
//!
//! and likewise for [`funcdensity`] / [`densityof_fn`](crate::densityof_fn).
//!
//! Which rule applies is decided by type. A plain `Fn(&X) -> f64` goes
//! through the generic rule ([`FromCallable`]) and is wrapped. A curried
//! evaluator of the matching family goes through [`FromCurried`], which hands
//! over to the [`Rewrap`] impl of the captured object's kind marker.

use crate::classify::Classified;
use crate::evaluate::{DensityOfFn, Evaluate, LogDensityOf, LogDensityOfFn};
use crate::kind::{self, KindTag};
use std::fmt;
use std::marker::PhantomData;

/// A density given by its log-density function.
#[derive(Clone, Copy)]
pub struct LogFuncDensity<F> {
    log_f: F,
}

/// A density given by its (non-log) density function.
#[derive(Clone, Copy)]
pub struct FuncDensity<F> {
    f: F,
}

impl<F> LogFuncDensity<F> {
    pub(crate) fn new(log_f: F) -> Self {
        Self { log_f }
    }

    /// The wrapped log-density function.
    pub fn log_f(&self) -> &F {
        &self.log_f
    }

    /// Unwrap into the original log-density function.
    pub fn into_inner(self) -> F {
        self.log_f
    }
}

impl<F> FuncDensity<F> {
    pub(crate) fn new(f: F) -> Self {
        Self { f }
    }

    /// The wrapped density function.
    pub fn f(&self) -> &F {
        &self.f
    }

    /// Unwrap into the original density function.
    pub fn into_inner(self) -> F {
        self.f
    }
}

impl<F> Classified for LogFuncDensity<F> {
    type Kind = kind::IsDensity;
}

impl<F> Classified for FuncDensity<F> {
    type Kind = kind::IsDensity;
}

impl<X: ?Sized, F: Evaluate<X>> LogDensityOf<X> for LogFuncDensity<F> {
    #[inline]
    fn logdensityof(&self, x: &X) -> f64 {
        self.log_f.evaluate(x)
    }

    #[inline]
    fn densityof(&self, x: &X) -> f64 {
        self.log_f.evaluate(x).exp()
    }
}

impl<X: ?Sized, F: Evaluate<X>> LogDensityOf<X> for FuncDensity<F> {
    #[inline]
    fn logdensityof(&self, x: &X) -> f64 {
        self.f.evaluate(x).ln()
    }

    #[inline]
    fn densityof(&self, x: &X) -> f64 {
        self.f.evaluate(x)
    }
}

impl<F> fmt::Debug for LogFuncDensity<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogFuncDensity({})", std::any::type_name::<F>())
    }
}

impl<F> fmt::Display for LogFuncDensity<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl<F> fmt::Debug for FuncDensity<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FuncDensity({})", std::any::type_name::<F>())
    }
}

impl<F> fmt::Display for FuncDensity<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Dispatch marker: the input is a plain function of `&X`.
pub struct FromCallable<X: ?Sized>(PhantomData<fn(&X)>);

/// Dispatch marker: the input is a curried evaluator of the same family.
pub enum FromCurried {}

/// Unwrap rule for a curried evaluator over `D`, selected by `D`'s kind.
///
/// Implemented for [`kind::IsDensity`] (give back `D` itself) and
/// [`kind::HasDensity`] (wrap the evaluator, never return `D`). There is no
/// impl for [`kind::NoDensity`].
pub trait Rewrap<D>: KindTag {
    type LogDensity: Classified<Kind = kind::IsDensity>;
    type Density: Classified<Kind = kind::IsDensity>;

    fn rewrap_log(log_f: LogDensityOfFn<D>) -> Self::LogDensity;

    fn rewrap(f: DensityOfFn<D>) -> Self::Density;
}

impl<D: Classified<Kind = kind::IsDensity>> Rewrap<D> for kind::IsDensity {
    type LogDensity = D;
    type Density = D;

    fn rewrap_log(log_f: LogDensityOfFn<D>) -> D {
        tracing::trace!(
            type_name = std::any::type_name::<D>(),
            "logfuncdensity: unwrapping curried evaluator"
        );
        log_f.into_inner()
    }

    fn rewrap(f: DensityOfFn<D>) -> D {
        tracing::trace!(
            type_name = std::any::type_name::<D>(),
            "funcdensity: unwrapping curried evaluator"
        );
        f.into_inner()
    }
}

impl<D: Classified<Kind = kind::HasDensity>> Rewrap<D> for kind::HasDensity {
    type LogDensity = LogFuncDensity<LogDensityOfFn<D>>;
    type Density = FuncDensity<DensityOfFn<D>>;

    fn rewrap_log(log_f: LogDensityOfFn<D>) -> Self::LogDensity {
        tracing::trace!(
            type_name = std::any::type_name::<D>(),
            "logfuncdensity: wrapping curried evaluator of a HasDensity object"
        );
        LogFuncDensity::new(log_f)
    }

    fn rewrap(f: DensityOfFn<D>) -> Self::Density {
        tracing::trace!(
            type_name = std::any::type_name::<D>(),
            "funcdensity: wrapping curried evaluator of a HasDensity object"
        );
        FuncDensity::new(f)
    }
}

/// Conversion of a log-density function into an `IsDensity` object.
pub trait IntoLogFuncDensity<Marker> {
    type Density: Classified<Kind = kind::IsDensity>;

    fn into_logfuncdensity(self) -> Self::Density;
}

/// Conversion of a density function into an `IsDensity` object.
pub trait IntoFuncDensity<Marker> {
    type Density: Classified<Kind = kind::IsDensity>;

    fn into_funcdensity(self) -> Self::Density;
}

impl<X: ?Sized, F> IntoLogFuncDensity<FromCallable<X>> for F
where
    F: Fn(&X) -> f64,
{
    type Density = LogFuncDensity<F>;

    fn into_logfuncdensity(self) -> Self::Density {
        LogFuncDensity::new(self)
    }
}

impl<X: ?Sized, F> IntoFuncDensity<FromCallable<X>> for F
where
    F: Fn(&X) -> f64,
{
    type Density = FuncDensity<F>;

    fn into_funcdensity(self) -> Self::Density {
        FuncDensity::new(self)
    }
}

impl<D> IntoLogFuncDensity<FromCurried> for LogDensityOfFn<D>
where
    D: Classified,
    D::Kind: Rewrap<D>,
{
    type Density = <D::Kind as Rewrap<D>>::LogDensity;

    fn into_logfuncdensity(self) -> Self::Density {
        <D::Kind as Rewrap<D>>::rewrap_log(self)
    }
}

impl<D> IntoFuncDensity<FromCurried> for DensityOfFn<D>
where
    D: Classified,
    D::Kind: Rewrap<D>,
{
    type Density = <D::Kind as Rewrap<D>>::Density;

    fn into_funcdensity(self) -> Self::Density {
        <D::Kind as Rewrap<D>>::rewrap(self)
    }
}

// A curried evaluator of the other family is just a function.

impl<X: ?Sized, D: LogDensityOf<X>> IntoLogFuncDensity<FromCallable<X>> for DensityOfFn<D> {
    type Density = LogFuncDensity<DensityOfFn<D>>;

    fn into_logfuncdensity(self) -> Self::Density {
        LogFuncDensity::new(self)
    }
}

impl<X: ?Sized, D: LogDensityOf<X>> IntoFuncDensity<FromCallable<X>> for LogDensityOfFn<D> {
    type Density = FuncDensity<LogDensityOfFn<D>>;

    fn into_funcdensity(self) -> Self::Density {
        FuncDensity::new(self)
    }
}

/// Lift a log-density function into an object classified `IsDensity`.
///
/// A curried `logdensityof` evaluator is unwrapped rather than wrapped
/// again; see the module docs.
pub fn logfuncdensity<M, F: IntoLogFuncDensity<M>>(log_f: F) -> F::Density {
    log_f.into_logfuncdensity()
}

/// Lift a density function into an object classified `IsDensity`.
///
/// A curried `densityof` evaluator is unwrapped rather than wrapped again.
pub fn funcdensity<M, F: IntoFuncDensity<M>>(f: F) -> F::Density {
    f.into_funcdensity()
}
