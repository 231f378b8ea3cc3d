//! Density classification.
//!
//! Every type answers one question: is it a density, does it have one, or
//! neither? The answer is a property of the type, not of a value, so it is
//! declared through an associated type and resolved at compile time.
//!
//! - **IsDensity**: the object is a density (a PDF, a wrapped log-density).
//! - **HasDensity**: the object is associated with a density (a distribution
//!   or measure) but is not itself one.
//! - **NoDensity**: everything else. This is the default for std value types.

use crate::kind::KindTag;
use std::rc::Rc;
use std::sync::Arc;

/// The runtime classification tag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DensityKind {
    /// The object itself is a density.
    IsDensity,

    /// The object has a density but is not one.
    HasDensity,

    /// The object is unrelated to densities.
    NoDensity,
}

impl DensityKind {
    /// Whether this kind is in the `IsOrHasDensity` union.
    pub fn is_or_has(self) -> bool {
        matches!(self, Self::IsDensity | Self::HasDensity)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::IsDensity => "is_density",
            Self::HasDensity => "has_density",
            Self::NoDensity => "no_density",
        }
    }
}

impl Default for DensityKind {
    fn default() -> Self {
        Self::NoDensity
    }
}

impl std::fmt::Display for DensityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IsDensity => write!(f, "IsDensity"),
            Self::HasDensity => write!(f, "HasDensity"),
            Self::NoDensity => write!(f, "NoDensity"),
        }
    }
}

impl std::str::FromStr for DensityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "is_density" | "isdensity" => Ok(Self::IsDensity),
            "has_density" | "hasdensity" => Ok(Self::HasDensity),
            "no_density" | "nodensity" => Ok(Self::NoDensity),
            _ => Err(format!("unknown density kind: {s}")),
        }
    }
}

/// Registration of a type's density classification.
///
/// ```
/// use density_kernel::{densitykind, kind, Classified, DensityKind};
///
/// struct Posterior;
///
/// impl Classified for Posterior {
///     type Kind = kind::HasDensity;
/// }
///
/// assert_eq!(densitykind(&Posterior), DensityKind::HasDensity);
/// ```
pub trait Classified {
    /// One of [`kind::IsDensity`](crate::kind::IsDensity),
    /// [`kind::HasDensity`](crate::kind::HasDensity) or
    /// [`kind::NoDensity`](crate::kind::NoDensity).
    type Kind: KindTag;
}

/// Classify an object. Pure, infallible, and determined by `T` alone.
#[inline]
pub fn densitykind<T: Classified + ?Sized>(_object: &T) -> DensityKind {
    <T::Kind as KindTag>::KIND
}

/// Whether `object` is or has a density.
#[inline]
pub fn is_or_has_density<T: Classified + ?Sized>(object: &T) -> bool {
    densitykind(object).is_or_has()
}

/// Register one or more types under a classification marker.
///
/// ```
/// use density_kernel::{density_kind, densitykind, DensityKind};
///
/// struct Histogram;
/// struct Label;
///
/// density_kind!(IsDensity: Histogram);
/// density_kind!(NoDensity: Label);
///
/// assert_eq!(densitykind(&Histogram), DensityKind::IsDensity);
/// assert_eq!(densitykind(&Label), DensityKind::NoDensity);
/// ```
#[macro_export]
macro_rules! density_kind {
    ($kind:ident: $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::classify::Classified for $ty {
                type Kind = $crate::kind::$kind;
            }
        )+
    };
}

// Pointers classify as their pointee.

impl<T: Classified + ?Sized> Classified for &T {
    type Kind = T::Kind;
}

impl<T: Classified + ?Sized> Classified for Box<T> {
    type Kind = T::Kind;
}

impl<T: Classified + ?Sized> Classified for Rc<T> {
    type Kind = T::Kind;
}

impl<T: Classified + ?Sized> Classified for Arc<T> {
    type Kind = T::Kind;
}

// Plain std values carry no density.

density_kind!(
    NoDensity: (),
    bool,
    char,
    str,
    String,
    f32,
    f64,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
);

impl<T> Classified for [T] {
    type Kind = crate::kind::NoDensity;
}

impl<T, const N: usize> Classified for [T; N] {
    type Kind = crate::kind::NoDensity;
}

impl<T> Classified for Vec<T> {
    type Kind = crate::kind::NoDensity;
}

impl<T> Classified for Option<T> {
    type Kind = crate::kind::NoDensity;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind;

    struct Pdf;
    struct Distribution;

    density_kind!(IsDensity: Pdf);
    density_kind!(HasDensity: Distribution);

    #[test]
    fn std_values_have_no_density() {
        assert_eq!(densitykind("abc"), DensityKind::NoDensity);
        assert_eq!(densitykind(&String::from("abc")), DensityKind::NoDensity);
        assert_eq!(densitykind(&4.2_f64), DensityKind::NoDensity);
        assert_eq!(densitykind(&vec![1.0_f64, 2.0]), DensityKind::NoDensity);
        assert_eq!(densitykind(&[1.0_f64, 2.0][..]), DensityKind::NoDensity);
        assert_eq!(densitykind(&Some(3_u8)), DensityKind::NoDensity);
        assert!(!is_or_has_density(&()));
    }

    #[test]
    fn registered_types_classify_by_marker() {
        assert_eq!(densitykind(&Pdf), DensityKind::IsDensity);
        assert_eq!(densitykind(&Distribution), DensityKind::HasDensity);
        assert!(is_or_has_density(&Pdf));
        assert!(is_or_has_density(&Distribution));
    }

    #[test]
    fn pointers_forward_classification() {
        let pdf = Pdf;
        assert_eq!(densitykind(&&pdf), DensityKind::IsDensity);
        assert_eq!(densitykind(&Box::new(Distribution)), DensityKind::HasDensity);
        assert_eq!(densitykind(&Rc::new(Pdf)), DensityKind::IsDensity);
        assert_eq!(densitykind(&Arc::new(Distribution)), DensityKind::HasDensity);
        assert_eq!(
            <<Box<Pdf> as Classified>::Kind as KindTag>::KIND,
            <kind::IsDensity as KindTag>::KIND
        );
    }

    #[test]
    fn union_membership() {
        assert!(DensityKind::IsDensity.is_or_has());
        assert!(DensityKind::HasDensity.is_or_has());
        assert!(!DensityKind::NoDensity.is_or_has());
        assert_eq!(DensityKind::default(), DensityKind::NoDensity);
    }

    #[test]
    fn kind_parse() {
        assert_eq!(
            "is_density".parse::<DensityKind>().unwrap(),
            DensityKind::IsDensity
        );
        assert_eq!(
            "HasDensity".parse::<DensityKind>().unwrap(),
            DensityKind::HasDensity
        );
        assert_eq!(
            "no_density".parse::<DensityKind>().unwrap(),
            DensityKind::NoDensity
        );
        assert!("maybe_density".parse::<DensityKind>().is_err());
    }

    #[test]
    fn kind_display_parses_back() {
        for kind in [
            DensityKind::IsDensity,
            DensityKind::HasDensity,
            DensityKind::NoDensity,
        ] {
            assert_eq!(kind.to_string().parse::<DensityKind>().unwrap(), kind);
            assert_eq!(kind.as_str().parse::<DensityKind>().unwrap(), kind);
        }
    }

    #[test]
    fn kind_serde_names() {
        let json = serde_json::to_value(DensityKind::HasDensity).unwrap();
        assert_eq!(json, serde_json::json!("has_density"));
        let back: DensityKind = serde_json::from_value(json).unwrap();
        assert_eq!(back, DensityKind::HasDensity);
    }
}
