//! # Density Kernel
//!
//! A capability protocol for objects that are, or have, a density function.
//!
//! This crate is **measure-agnostic**: it does not compute, integrate, or
//! normalize anything. It only prescribes how an object declares its
//! relation to a density and how that density is evaluated and rebuilt.
//!
//! ## Architecture
//!
//! ```text
//! DensityKind / Classified   ← IsDensity | HasDensity | NoDensity, per type
//!     │
//! LogDensityOf<X>            ← logdensityof(d, x), densityof(d, x)
//!     │                        logdensityof_fn(d), densityof_fn(d)
//!     │
//! IntoLogFuncDensity<M>      ← logfuncdensity(f), funcdensity(f)
//! IntoFuncDensity<M>           with the curried-evaluator unwrap rule
//!     │
//! DensityOperation           ← inverse-function metadata
//! ```
//!
//! ## Example
//!
//! ```
//! use density_kernel::{densitykind, logdensityof, logdensityof_fn, logfuncdensity, DensityKind};
//! use density_kernel::toy::NegSquaredNorm;
//!
//! let x: &[f64] = &[1.0, 2.0, 3.0];
//! assert_eq!(logdensityof(&NegSquaredNorm, x), -14.0);
//!
//! let g = logfuncdensity(|x: &[f64]| -x.iter().map(|v| v * v).sum::<f64>());
//! assert_eq!(densitykind(&g), DensityKind::IsDensity);
//! assert_eq!(logdensityof(&g, x), -14.0);
//!
//! let d = NegSquaredNorm;
//! let back = logfuncdensity(logdensityof_fn(&d).unwrap());
//! assert!(std::ptr::eq(back, &d));
//! ```

pub mod classify;
pub mod construct;
pub mod error;
pub mod evaluate;
pub mod inverse;
pub mod kind;
pub mod toy;

pub use classify::{Classified, DensityKind, densitykind, is_or_has_density};
pub use construct::{
    FromCallable, FromCurried, FuncDensity, IntoFuncDensity, IntoLogFuncDensity, LogFuncDensity,
    Rewrap, funcdensity, logfuncdensity,
};
pub use error::NotADensity;
pub use evaluate::{
    DensityOfFn, Evaluate, LogDensityOf, LogDensityOfFn, densityof, densityof_fn, logdensityof,
    logdensityof_fn,
};
pub use inverse::DensityOperation;
pub use kind::KindTag;
