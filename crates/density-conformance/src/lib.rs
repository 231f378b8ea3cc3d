//! # Density Conformance
//!
//! A reusable harness that validates an implementation of the density
//! interface. Downstream authors call [`test_density_interface`] from their
//! own tests, or [`check_density_interface`] to get a structured
//! [`ConformanceReport`] instead of a panic.
//!
//! ```text
//! Comparator / Tolerance   ← isapprox-style value comparison
//!     │
//! ConformanceCheck         ← per-subject kind + four value checks
//!     │
//! RoundTrip<D, X>          ← construction round trips, by kind marker
//!     │
//! ConformanceReport        ← accepted / rejected, sorted failures, witness IDs
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod harness;
pub mod witness;

pub use compare::{Comparator, Tolerance, approximately_equal};
pub use config::ConformanceConfig;
pub use error::ConformanceError;
pub use harness::{
    ConformanceCheck, RoundTrip, check_density_interface, check_density_interface_with,
    test_density_interface, test_density_interface_default,
};
pub use witness::{ConformanceFailure, ConformanceReport, compute_witness_id};
