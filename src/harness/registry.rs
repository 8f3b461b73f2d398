//! Statically declared registry of the generator's output-producing
//! operations.
//!
//! The registry is the single source of truth for the operation surface:
//! declaration order defines golden-table cursor positions, and the tagged
//! closure variants make an unregistered argument shape unrepresentable. A
//! new generator operation is not exercised until a row is added here — the
//! registry tests below exist to make that omission loud.

#![allow(missing_docs)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rng::{RngError, StreamRng};

/// Argument shape of an operation, mirroring the scenario-table kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Zero-argument operation.
    None,
    /// Native-width signed integer (fed from the 64-bit signed table).
    SmallInt,
    /// Native-width unsigned integer (fed from the 64-bit unsigned table).
    SmallUint,
    /// Fixed 32-bit signed integer.
    Int32,
    /// Fixed 64-bit signed integer.
    Int64,
    /// Fixed 32-bit unsigned integer.
    Uint32,
    /// Fixed 64-bit unsigned integer.
    Uint64,
}

/// Declared result shape of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// `f64` result.
    Float64,
    /// `f32` result.
    Float32,
    /// Fixed 32-bit signed result.
    Int32,
    /// Fixed 32-bit unsigned result.
    Uint32,
    /// Fixed 64-bit signed result.
    Int64,
    /// Fixed 64-bit unsigned result.
    Uint64,
    /// Native-width signed result (widened to `i64` in the output log; the
    /// oracle applies the top-bit truncation rule to this kind only).
    SmallInt,
    /// Native-width unsigned result (widened to `u64` in the output log).
    SmallUint,
    /// Sequence-of-integer result (permutations).
    SequenceOfInt,
}

/// A raw operation result, before invoker normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Raw {
    F64(f64),
    F32(f32),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    Isize(isize),
    Usize(usize),
    Seq(Vec<usize>),
}

impl Raw {
    /// The declared result kind this raw value belongs to.
    #[must_use]
    pub const fn kind(&self) -> ResultKind {
        match self {
            Self::F64(_) => ResultKind::Float64,
            Self::F32(_) => ResultKind::Float32,
            Self::I32(_) => ResultKind::Int32,
            Self::U32(_) => ResultKind::Uint32,
            Self::I64(_) => ResultKind::Int64,
            Self::U64(_) => ResultKind::Uint64,
            Self::Isize(_) => ResultKind::SmallInt,
            Self::Usize(_) => ResultKind::SmallUint,
            Self::Seq(_) => ResultKind::SequenceOfInt,
        }
    }
}

/// A normalized, persistable output value.
///
/// Native-width raw results are widened to the canonical 64-bit variants
/// before they land here, so a golden table recorded on one architecture
/// deserializes identically on another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    F64(f64),
    F32(f32),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    Seq(Vec<u64>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::Seq(v) => write!(f, "{v:?}"),
        }
    }
}

/// Tagged invocation closure for one operation.
///
/// The variant fixes the argument shape at compile time; an operation whose
/// argument shape has no variant here cannot be registered at all, which is
/// what retired the "unexpected argument kind" fatal path.
#[derive(Clone, Copy)]
pub enum Call {
    /// `() -> V`.
    Nullary(fn(&mut StreamRng) -> Raw),
    /// `(i32) -> V`, fed from [`super::scenario::INT32S`].
    Int32(fn(&mut StreamRng, i32) -> Result<Raw, RngError>),
    /// `(u32) -> V`, fed from [`super::scenario::UINT32S`].
    Uint32(fn(&mut StreamRng, u32) -> Result<Raw, RngError>),
    /// `(i64) -> V`, fed from [`super::scenario::INT64S`].
    Int64(fn(&mut StreamRng, i64) -> Result<Raw, RngError>),
    /// `(u64) -> V`, fed from [`super::scenario::UINT64S`].
    Uint64(fn(&mut StreamRng, u64) -> Result<Raw, RngError>),
    /// `(isize) -> V`, fed from the 64-bit signed table. `wide` is the
    /// fixed-64-bit counterpart used to keep generator state advancing when
    /// a table value does not fit the native width.
    SmallInt {
        narrow: fn(&mut StreamRng, isize) -> Result<Raw, RngError>,
        wide: fn(&mut StreamRng, i64) -> Result<(), RngError>,
    },
    /// `(usize) -> V`, fed from the 64-bit unsigned table, with a wide
    /// counterpart as for [`Call::SmallInt`].
    SmallUint {
        narrow: fn(&mut StreamRng, usize) -> Result<Raw, RngError>,
        wide: fn(&mut StreamRng, u64) -> Result<(), RngError>,
    },
    /// `(usize) -> V` fed from [`super::scenario::PERM_SIZES`]: the named
    /// permutation exception. Parameter kind still reports as the generic
    /// small-unsigned kind.
    PermSize(fn(&mut StreamRng, usize) -> Raw),
}

impl Call {
    /// Parameter kind implied by the closure variant.
    #[must_use]
    pub const fn param_kind(&self) -> ParamKind {
        match self {
            Self::Nullary(_) => ParamKind::None,
            Self::Int32(_) => ParamKind::Int32,
            Self::Uint32(_) => ParamKind::Uint32,
            Self::Int64(_) => ParamKind::Int64,
            Self::Uint64(_) => ParamKind::Uint64,
            Self::SmallInt { .. } => ParamKind::SmallInt,
            Self::SmallUint { .. } | Self::PermSize(_) => ParamKind::SmallUint,
        }
    }
}

/// One registered operation: name, declared result kind, invocation closure.
pub struct Operation {
    /// Stable identifier; also the annotation written into golden entries.
    pub name: &'static str,
    /// Declared result kind.
    pub result: ResultKind,
    /// Invocation closure.
    pub call: Call,
}

/// The full operation surface, in alphabetical declaration order.
#[must_use]
pub fn registry() -> &'static [Operation] {
    static REGISTRY: [Operation; 15] = [
        Operation {
            name: "bounded_i32",
            result: ResultKind::Int32,
            call: Call::Int32(|rng, n| rng.bounded_i32(n).map(Raw::I32)),
        },
        Operation {
            name: "bounded_i64",
            result: ResultKind::Int64,
            call: Call::Int64(|rng, n| rng.bounded_i64(n).map(Raw::I64)),
        },
        Operation {
            name: "bounded_isize",
            result: ResultKind::SmallInt,
            call: Call::SmallInt {
                narrow: |rng, n| rng.bounded_isize(n).map(Raw::Isize),
                wide: |rng, n| rng.bounded_i64(n).map(|_| ()),
            },
        },
        Operation {
            name: "bounded_u32",
            result: ResultKind::Uint32,
            call: Call::Uint32(|rng, n| rng.bounded_u32(n).map(Raw::U32)),
        },
        Operation {
            name: "bounded_u64",
            result: ResultKind::Uint64,
            call: Call::Uint64(|rng, n| rng.bounded_u64(n).map(Raw::U64)),
        },
        Operation {
            name: "bounded_usize",
            result: ResultKind::SmallUint,
            call: Call::SmallUint {
                narrow: |rng, n| rng.bounded_usize(n).map(Raw::Usize),
                wide: |rng, n| rng.bounded_u64(n).map(|_| ()),
            },
        },
        Operation {
            name: "next_f32",
            result: ResultKind::Float32,
            call: Call::Nullary(|rng| Raw::F32(rng.next_f32())),
        },
        Operation {
            name: "next_f64",
            result: ResultKind::Float64,
            call: Call::Nullary(|rng| Raw::F64(rng.next_f64())),
        },
        Operation {
            name: "next_i32",
            result: ResultKind::Int32,
            call: Call::Nullary(|rng| Raw::I32(rng.next_i32())),
        },
        Operation {
            name: "next_i64",
            result: ResultKind::Int64,
            call: Call::Nullary(|rng| Raw::I64(rng.next_i64())),
        },
        Operation {
            name: "next_isize",
            result: ResultKind::SmallInt,
            call: Call::Nullary(|rng| Raw::Isize(rng.next_isize())),
        },
        Operation {
            name: "next_u32",
            result: ResultKind::Uint32,
            call: Call::Nullary(|rng| Raw::U32(rng.next_u32())),
        },
        Operation {
            name: "next_u64",
            result: ResultKind::Uint64,
            call: Call::Nullary(|rng| Raw::U64(rng.next_u64())),
        },
        Operation {
            name: "next_usize",
            result: ResultKind::SmallUint,
            call: Call::Nullary(|rng| Raw::Usize(rng.next_usize())),
        },
        Operation {
            name: "permutation",
            result: ResultKind::SequenceOfInt,
            call: Call::PermSize(|rng, n| Raw::Seq(rng.permutation(n))),
        },
    ];
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_sorted() {
        let names: Vec<&str> = registry().iter().map(|op| op.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(
            names, sorted,
            "registry must be alphabetical with unique names; order defines cursor positions"
        );
    }

    #[test]
    fn surface_is_fully_registered() {
        // Deliberate tripwire: adding a generator operation means adding a
        // registry row AND bumping this count in the same change.
        assert_eq!(registry().len(), 15);
    }

    #[test]
    fn declared_result_kinds_match_raw_outputs() {
        let mut rng = StreamRng::from_seed(99);
        for op in registry() {
            let raw = match op.call {
                Call::Nullary(call) => call(&mut rng),
                Call::Int32(call) => call(&mut rng, 7).unwrap(),
                Call::Uint32(call) => call(&mut rng, 7).unwrap(),
                Call::Int64(call) => call(&mut rng, 7).unwrap(),
                Call::Uint64(call) => call(&mut rng, 7).unwrap(),
                Call::SmallInt { narrow, .. } => narrow(&mut rng, 7).unwrap(),
                Call::SmallUint { narrow, .. } => narrow(&mut rng, 7).unwrap(),
                Call::PermSize(call) => call(&mut rng, 7),
            };
            assert_eq!(
                raw.kind(),
                op.result,
                "operation {} declares {:?} but produced {:?}",
                op.name,
                op.result,
                raw.kind()
            );
        }
    }

    #[test]
    fn permutation_reports_generic_small_uint_param() {
        let perm = registry()
            .iter()
            .find(|op| op.name == "permutation")
            .expect("permutation must be registered");
        assert_eq!(perm.call.param_kind(), ParamKind::SmallUint);
    }

    #[test]
    fn wide_counterparts_consume_identical_stream_positions() {
        // The word-size skip substitutes the wide call for the narrow one;
        // both must advance the generator by the same number of words for
        // every scenario argument, or skips would desynchronize the stream.
        for op in registry() {
            match op.call {
                Call::SmallInt { narrow, wide } => {
                    for &n in &crate::harness::scenario::INT64S {
                        let Ok(fits) = isize::try_from(n) else { continue };
                        let mut a = StreamRng::from_seed(5);
                        let mut b = StreamRng::from_seed(5);
                        narrow(&mut a, fits).unwrap();
                        wide(&mut b, n).unwrap();
                        assert_eq!(a.state(), b.state(), "{} diverged at {n}", op.name);
                    }
                }
                Call::SmallUint { narrow, wide } => {
                    for &n in &crate::harness::scenario::UINT64S {
                        let Ok(fits) = usize::try_from(n) else { continue };
                        let mut a = StreamRng::from_seed(5);
                        let mut b = StreamRng::from_seed(5);
                        narrow(&mut a, fits).unwrap();
                        wide(&mut b, n).unwrap();
                        assert_eq!(a.state(), b.state(), "{} diverged at {n}", op.name);
                    }
                }
                _ => {}
            }
        }
    }

    #[test]
    fn value_serde_is_externally_tagged() {
        let v = Value::U64(42);
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"{"u64":42}"#);
        let v = Value::Seq(vec![2, 0, 1]);
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"{"seq":[2,0,1]}"#);
        let back: Value = serde_json::from_str(r#"{"f64":0.5}"#).unwrap();
        assert_eq!(back, Value::F64(0.5));
    }
}
