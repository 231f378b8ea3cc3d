//! Conformance failures, reports, and their witness IDs.
//!
//! A witness ID names a violation by where it happened, never by the values
//! that were compared. The key is the triple (failure class, subject, check)
//! from the vocabularies at the bottom of this module, tagged with schema 1
//! and written as compact JSON with sorted keys. Its SHA-256 digest, in
//! lowercase unpadded base32hex behind a `w1_` prefix, is the ID.
//!
//! Re-running the harness with another tolerance or another point therefore
//! reproduces the IDs of every violation that persists.

use density_kernel::DensityKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;

/// Compute a witness ID from the canonical key fields.
pub fn compute_witness_id(class: &str, subject: &str, check: &str) -> String {
    let key = canonical_witness_key(class, subject, check);
    let hash = Sha256::digest(key.as_bytes());
    format!("w1_{}", encode_base32hex(&hash))
}

/// Canonical witness key, keys in lexicographic order:
///
/// ```json
/// {"check":"...","class":"...","schema":1,"subject":"..."}
/// ```
fn canonical_witness_key(class: &str, subject: &str, check: &str) -> String {
    let mut fields = [
        ("check", json_string(check)),
        ("class", json_string(class)),
        ("schema", "1".to_string()),
        ("subject", json_string(subject)),
    ];
    fields.sort_by(|a, b| a.0.cmp(b.0));

    let body = fields
        .iter()
        .map(|(key, value)| format!("{}:{value}", json_string(key)))
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{body}}}")
}

/// JSON string literal with standard escaping.
fn json_string(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// Lowercase base32hex (RFC 4648, section 7) without padding.
///
/// Input is taken in 40-bit groups of five bytes; a short final group emits
/// only the symbols its bits reach.
fn encode_base32hex(bytes: &[u8]) -> String {
    const SYMBOLS: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";

    let mut out = String::with_capacity(bytes.len().div_ceil(5) * 8);
    for group in bytes.chunks(5) {
        let mut block = [0u8; 5];
        block[..group.len()].copy_from_slice(group);
        let word = block.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));

        for i in 0..(group.len() * 8).div_ceil(5) {
            let symbol = (word >> (35 - 5 * i)) & 0x1f;
            out.push(char::from(SYMBOLS[symbol as usize]));
        }
    }
    out
}

/// One violated conformance check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConformanceFailure {
    /// Deterministic witness ID.
    pub witness_id: String,

    /// Failure classification (see [`failure_class`]).
    pub class: String,

    /// What was checked (see [`subject`]).
    pub subject: String,

    /// Which equality or property failed (see [`check`]).
    pub check: String,

    /// Human-readable description.
    pub message: String,

    /// Machine-readable details (actual and expected values).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ConformanceFailure {
    /// Create a new failure with computed witness ID.
    pub fn new(
        class: impl Into<String>,
        subject: impl Into<String>,
        check: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let class = class.into();
        let subject = subject.into();
        let check = check.into();
        let witness_id = compute_witness_id(&class, &subject, &check);
        Self {
            witness_id,
            class,
            subject,
            check,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Ordering key: class, subject, check, witnessId.
    fn sort_key(&self) -> (&str, &str, &str, &str) {
        (&self.class, &self.subject, &self.check, &self.witness_id)
    }
}

impl PartialOrd for ConformanceFailure {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ConformanceFailure {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// The outcome of checking one object at one point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConformanceReport {
    /// Schema version (always 1).
    pub witness_schema: u32,

    /// Conformance profile the check ran under.
    pub profile: String,

    /// "accepted" or "rejected".
    pub result: String,

    /// Type name of the checked object.
    pub object_type: String,

    /// Classification of the checked object.
    pub kind: DensityKind,

    /// Failure witnesses (empty if accepted).
    pub failures: Vec<ConformanceFailure>,
}

impl ConformanceReport {
    /// Create an accepted report.
    pub fn accepted(
        profile: impl Into<String>,
        object_type: impl Into<String>,
        kind: DensityKind,
    ) -> Self {
        Self {
            witness_schema: 1,
            profile: profile.into(),
            result: "accepted".to_string(),
            object_type: object_type.into(),
            kind,
            failures: vec![],
        }
    }

    /// Create a rejected report. Failures are sorted.
    pub fn rejected(
        profile: impl Into<String>,
        object_type: impl Into<String>,
        kind: DensityKind,
        mut failures: Vec<ConformanceFailure>,
    ) -> Self {
        failures.sort();
        Self {
            witness_schema: 1,
            profile: profile.into(),
            result: "rejected".to_string(),
            object_type: object_type.into(),
            kind,
            failures,
        }
    }

    /// Whether every check passed.
    pub fn is_accepted(&self) -> bool {
        self.result == "accepted"
    }

    /// Failures of one class.
    pub fn failures_of<'r>(
        &'r self,
        class: &'r str,
    ) -> impl Iterator<Item = &'r ConformanceFailure> {
        self.failures.iter().filter(move |f| f.class == class)
    }
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "density interface {} for {} ({}, profile {})",
            self.result, self.object_type, self.kind, self.profile
        )?;
        for failure in &self.failures {
            write!(
                f,
                "\n  - [{}] {} / {}: {}",
                failure.class, failure.subject, failure.check, failure.message
            )?;
        }
        Ok(())
    }
}

/// Failure class constants.
pub mod failure_class {
    pub const NOT_A_DENSITY: &str = "not_a_density";
    pub const KIND_MISMATCH: &str = "kind_mismatch";
    pub const LOG_DENSITY_MISMATCH: &str = "log_density_mismatch";
    pub const DENSITY_MISMATCH: &str = "density_mismatch";
}

/// Subjects the harness evaluates.
pub mod subject {
    pub const OBJECT: &str = "object";
    pub const LOG_ROUND_TRIP: &str = "logfuncdensity(logdensityof(object))";
    pub const ROUND_TRIP: &str = "funcdensity(densityof(object))";
}

/// Checks run against each subject.
pub mod check {
    pub const KIND: &str = "kind";
    pub const LOGDENSITYOF: &str = "logdensityof";
    pub const CURRIED_LOGDENSITYOF: &str = "curried_logdensityof";
    pub const DENSITYOF: &str = "densityof";
    pub const CURRIED_DENSITYOF: &str = "curried_densityof";
}
