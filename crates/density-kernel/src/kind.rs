//! Type-level classification markers.
//!
//! Each marker mirrors one case of [`DensityKind`]. Types register their
//! classification by naming a marker as [`Classified::Kind`], which lets the
//! construction surface pick its unwrap rule by static dispatch instead of
//! inspecting values.
//!
//! [`Classified::Kind`]: crate::classify::Classified::Kind

use crate::classify::DensityKind;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::IsDensity {}
    impl Sealed for super::HasDensity {}
    impl Sealed for super::NoDensity {}
}

/// A type-level classification tag. Sealed: exactly three implementors.
pub trait KindTag: sealed::Sealed {
    /// The runtime value of this tag.
    const KIND: DensityKind;
}

/// The object itself is a density.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IsDensity;

/// The object has an associated density but is not one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HasDensity;

/// The object carries no density semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NoDensity;

impl KindTag for IsDensity {
    const KIND: DensityKind = DensityKind::IsDensity;
}

impl KindTag for HasDensity {
    const KIND: DensityKind = DensityKind::HasDensity;
}

impl KindTag for NoDensity {
    const KIND: DensityKind = DensityKind::NoDensity;
}
