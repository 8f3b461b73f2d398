//! Single-pass sequential invocation of the full operation surface.
//!
//! One `StreamRng` is constructed from the configured seed and exclusively
//! owned for the duration of the pass; every registered operation runs
//! `REPEATS` times in registry order. The resulting log is what both the
//! oracle and the regenerator consume — they never touch the generator
//! directly.

use crate::core::errors::{HarnessError, Result};
use crate::rng::{RngError, StreamRng};

use super::feeder::{FedArg, argument_for};
use super::registry::{Call, Raw, ResultKind, Value, registry};

/// Fixed repeat count per operation. Changing this shifts every golden
/// cursor position and requires regeneration.
pub const REPEATS: usize = 20;

/// One invocation's outcome in the ordered output log.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRecord {
    /// Producing operation.
    pub op: &'static str,
    /// Argument literal, `None` for nullary operations.
    pub arg: Option<String>,
    /// Declared result kind (drives the oracle's top-bit rule).
    pub result: ResultKind,
    /// Normalized output. `None` marks a word-size skip: the repeat consumed
    /// a cursor position but produced no comparable value on this target.
    pub value: Option<Value>,
}

/// Drive a fresh generator through the whole registry.
///
/// The log length is always `registry().len() * REPEATS`, skips included —
/// that invariant is what keeps cursor positions architecture-independent.
pub fn run_pass(seed: u64) -> Result<Vec<InvocationRecord>> {
    let mut rng = StreamRng::from_seed(seed);
    let mut log = Vec::with_capacity(registry().len() * REPEATS);

    for op in registry() {
        for repeat in 0..REPEATS {
            let record = if let Call::Nullary(call) = op.call {
                InvocationRecord {
                    op: op.name,
                    arg: None,
                    result: op.result,
                    value: Some(normalize(call(&mut rng))),
                }
            } else {
                let Some(fed) = argument_for(&op.call, repeat) else {
                    unreachable!("non-nullary operation {} fed no argument", op.name);
                };
                let raw = match (&op.call, &fed.arg) {
                    (Call::Int32(call), FedArg::I32(n)) => {
                        Some(invoke(op.name, &fed.literal, call(&mut rng, *n))?)
                    }
                    (Call::Uint32(call), FedArg::U32(n)) => {
                        Some(invoke(op.name, &fed.literal, call(&mut rng, *n))?)
                    }
                    (Call::Int64(call), FedArg::I64(n)) => {
                        Some(invoke(op.name, &fed.literal, call(&mut rng, *n))?)
                    }
                    (Call::Uint64(call), FedArg::U64(n)) => {
                        Some(invoke(op.name, &fed.literal, call(&mut rng, *n))?)
                    }
                    (Call::SmallInt { narrow, .. }, FedArg::Isize(n)) => {
                        Some(invoke(op.name, &fed.literal, narrow(&mut rng, *n))?)
                    }
                    (Call::SmallInt { wide, .. }, FedArg::WideSigned(n)) => {
                        // Advance state exactly as a 64-bit target would,
                        // then record the repeat as skipped.
                        wide(&mut rng, *n).map_err(|source| HarnessError::Generator {
                            op: op.name,
                            arg: fed.literal.clone(),
                            source,
                        })?;
                        None
                    }
                    (Call::SmallUint { narrow, .. }, FedArg::Usize(n)) => {
                        Some(invoke(op.name, &fed.literal, narrow(&mut rng, *n))?)
                    }
                    (Call::SmallUint { wide, .. }, FedArg::WideUnsigned(n)) => {
                        wide(&mut rng, *n).map_err(|source| HarnessError::Generator {
                            op: op.name,
                            arg: fed.literal.clone(),
                            source,
                        })?;
                        None
                    }
                    (Call::PermSize(call), FedArg::PermSize(n)) => Some(call(&mut rng, *n)),
                    _ => unreachable!("feeder argument shape drifted from registry for {}", op.name),
                };
                InvocationRecord {
                    op: op.name,
                    arg: Some(fed.literal),
                    result: op.result,
                    value: raw.map(normalize),
                }
            };
            log.push(record);
        }
    }

    Ok(log)
}

/// Widen native-width raw results to their canonical 64-bit form; keep
/// every fixed-width kind as declared.
fn normalize(raw: Raw) -> Value {
    match raw {
        Raw::F64(v) => Value::F64(v),
        Raw::F32(v) => Value::F32(v),
        Raw::I32(v) => Value::I32(v),
        Raw::U32(v) => Value::U32(v),
        Raw::I64(v) => Value::I64(v),
        Raw::U64(v) => Value::U64(v),
        Raw::Isize(v) => Value::I64(v as i64),
        Raw::Usize(v) => Value::U64(v as u64),
        Raw::Seq(v) => Value::Seq(v.into_iter().map(|x| x as u64).collect()),
    }
}

fn invoke(
    op: &'static str,
    arg: &str,
    result: std::result::Result<Raw, RngError>,
) -> Result<Raw> {
    result.map_err(|source| HarnessError::Generator {
        op,
        arg: arg.to_string(),
        source,
    })
}
