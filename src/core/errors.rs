//! RRH-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::rng::RngError;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Top-level error type for the regression harness.
///
/// Every variant here is fatal: it stops the run immediately with a
/// diagnostic. Value mismatches are not errors — they accumulate in a
/// [`crate::harness::oracle::CheckReport`] and surface as a non-zero exit
/// at run end.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("[RRH-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[RRH-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[RRH-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[RRH-2001] golden artifact parse failure at {path}:{line}: {details}")]
    GoldenParse {
        path: PathBuf,
        line: usize,
        details: String,
    },

    #[error(
        "[RRH-2002] golden regeneration requires a 64-bit native word (this target: {native_bits}-bit); \
         recorded values would not be portable"
    )]
    ArchitectureMismatch { native_bits: u32 },

    #[error("[RRH-2003] generator rejected invocation of {op}({arg}): {source}")]
    Generator {
        op: &'static str,
        arg: String,
        #[source]
        source: RngError,
    },

    #[error("[RRH-2101] cannot find anchor {anchor:?} in {path}")]
    AnchorNotFound { anchor: String, path: PathBuf },

    #[error("[RRH-2102] anchor {anchor:?} occurs more than once in {path}")]
    AnchorAmbiguous { anchor: String, path: PathBuf },

    #[error("[RRH-2103] cannot find closing delimiter {terminator:?} after anchor in {path}")]
    TerminatorNotFound { terminator: String, path: PathBuf },

    #[error("[RRH-2104] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[RRH-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HarnessError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "RRH-1001",
            Self::MissingConfig { .. } => "RRH-1002",
            Self::ConfigParse { .. } => "RRH-1003",
            Self::GoldenParse { .. } => "RRH-2001",
            Self::ArchitectureMismatch { .. } => "RRH-2002",
            Self::Generator { .. } => "RRH-2003",
            Self::AnchorNotFound { .. } => "RRH-2101",
            Self::AnchorAmbiguous { .. } => "RRH-2102",
            Self::TerminatorNotFound { .. } => "RRH-2103",
            Self::Serialization { .. } => "RRH-2104",
            Self::Io { .. } => "RRH-3002",
        }
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for HarnessError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
