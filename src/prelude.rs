//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use rng_regress_harness::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{HarnessError, Result};

// Generator
pub use crate::rng::{REGRESS_SEED, RngError, StreamRng};

// Harness
pub use crate::harness::golden::{GoldenEntry, load as load_golden, regenerate};
pub use crate::harness::invoker::{InvocationRecord, REPEATS, run_pass};
pub use crate::harness::oracle::{CheckReport, Mismatch, check};
pub use crate::harness::registry::{Operation, ParamKind, ResultKind, Value, registry};
