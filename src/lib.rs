#![forbid(unsafe_code)]

//! rng_regress_harness (rrh) — golden-output regression harness for a
//! deterministic stream generator.
//!
//! For a fixed seed and a fixed invocation sequence, every operation's
//! output sequence is pinned bit-for-bit by a persisted golden table, so
//! internal refactors of the generator cannot silently alter observable
//! behavior. Do NOT hand-edit the golden artifact: if a change legitimately
//! alters outputs, regenerate deliberately with `rrh update`.
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use rng_regress_harness::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use rng_regress_harness::harness::invoker::run_pass;
//! use rng_regress_harness::harness::oracle::check;
//! ```

pub mod prelude;

pub mod core;
pub mod harness;
pub mod logger;
pub mod rng;
