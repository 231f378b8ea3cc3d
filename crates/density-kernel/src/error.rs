//! Error types for density-interface operations.

/// A one-argument evaluation was requested on an object whose type is
/// classified `NoDensity`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("object of type {type_name} neither is nor has a density")]
pub struct NotADensity {
    /// Fully qualified name of the offending type.
    pub type_name: &'static str,
}

impl NotADensity {
    /// Build the error for an object of type `T`.
    pub fn of<T: ?Sized>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
        }
    }
}
