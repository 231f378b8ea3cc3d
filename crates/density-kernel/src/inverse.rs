//! Inverse-function metadata for the four entry points.
//!
//! `logfuncdensity` and `logdensityof` (one-argument form) are mutual
//! inverses, as are `funcdensity` and `densityof`. The two construction
//! operations are siblings, not inverses of each other. Generic
//! inverse-lookup facilities can query this table; it has no runtime effect
//! on evaluation.

/// One of the four public entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityOperation {
    LogDensityOf,
    DensityOf,
    LogFuncDensity,
    FuncDensity,
}

impl DensityOperation {
    pub const ALL: [Self; 4] = [
        Self::LogDensityOf,
        Self::DensityOf,
        Self::LogFuncDensity,
        Self::FuncDensity,
    ];

    /// The operation that undoes `self`.
    pub fn inverse(self) -> Self {
        match self {
            Self::LogDensityOf => Self::LogFuncDensity,
            Self::LogFuncDensity => Self::LogDensityOf,
            Self::DensityOf => Self::FuncDensity,
            Self::FuncDensity => Self::DensityOf,
        }
    }

    /// The same operation in the other (log / non-log) family.
    pub fn sibling(self) -> Self {
        match self {
            Self::LogDensityOf => Self::DensityOf,
            Self::DensityOf => Self::LogDensityOf,
            Self::LogFuncDensity => Self::FuncDensity,
            Self::FuncDensity => Self::LogFuncDensity,
        }
    }

    /// Whether this operation builds a density from a function.
    pub fn is_construction(self) -> bool {
        matches!(self, Self::LogFuncDensity | Self::FuncDensity)
    }

    /// Whether this operation works on the log scale.
    pub fn is_log(self) -> bool {
        matches!(self, Self::LogDensityOf | Self::LogFuncDensity)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::LogDensityOf => "logdensityof",
            Self::DensityOf => "densityof",
            Self::LogFuncDensity => "logfuncdensity",
            Self::FuncDensity => "funcdensity",
        }
    }
}

impl std::fmt::Display for DensityOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for DensityOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| format!("unknown density operation: {s}"))
    }
}
