//! Deterministic argument selection for parameterized operations.
//!
//! For repeat index `i` the feeder hands back entry `i mod len` of the
//! scenario table matching the operation's argument shape. Native-width
//! arguments get the word-size policy: a table value that does not fit the
//! native width is redirected to the operation's fixed-64-bit counterpart so
//! the generator consumes exactly the stream positions it would on a 64-bit
//! target, and the repeat is recorded as skipped.

use super::registry::Call;
use super::scenario::{INT32S, INT64S, PERM_SIZES, UINT32S, UINT64S};

/// One fed argument, ready for the invoker to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FedArg {
    /// Fixed-width 32-bit signed argument.
    I32(i32),
    /// Fixed-width 32-bit unsigned argument.
    U32(u32),
    /// Fixed-width 64-bit signed argument.
    I64(i64),
    /// Fixed-width 64-bit unsigned argument.
    U64(u64),
    /// Native signed argument that fits this target.
    Isize(isize),
    /// Native unsigned argument that fits this target.
    Usize(usize),
    /// Permutation size (always fits: the size table tops out at 16).
    PermSize(usize),
    /// Native signed value too wide for this target: invoke the wide
    /// counterpart to advance state, then discard.
    WideSigned(i64),
    /// Native unsigned value too wide for this target: as above.
    WideUnsigned(u64),
}

impl FedArg {
    /// Whether this repeat must be recorded as a word-size skip.
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::WideSigned(_) | Self::WideUnsigned(_))
    }
}

/// Argument literal plus dispatch value for one repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FedArgument {
    /// Decimal rendering of the argument, recorded in golden annotations.
    pub literal: String,
    /// The value itself.
    pub arg: FedArg,
}

/// Select the argument for `repeat` on this target's native width.
///
/// Returns `None` for nullary operations.
#[must_use]
pub fn argument_for(call: &Call, repeat: usize) -> Option<FedArgument> {
    argument_for_width(call, repeat, usize::BITS)
}

/// Width-parametric core of [`argument_for`], so narrow-target behavior is
/// testable from a 64-bit host.
#[must_use]
pub fn argument_for_width(call: &Call, repeat: usize, native_bits: u32) -> Option<FedArgument> {
    match call {
        Call::Nullary(_) => None,
        Call::Int32(_) => {
            let n = INT32S[repeat % INT32S.len()];
            Some(FedArgument {
                literal: n.to_string(),
                arg: FedArg::I32(n),
            })
        }
        Call::Uint32(_) => {
            let n = UINT32S[repeat % UINT32S.len()];
            Some(FedArgument {
                literal: n.to_string(),
                arg: FedArg::U32(n),
            })
        }
        Call::Int64(_) => {
            let n = INT64S[repeat % INT64S.len()];
            Some(FedArgument {
                literal: n.to_string(),
                arg: FedArg::I64(n),
            })
        }
        Call::Uint64(_) => {
            let n = UINT64S[repeat % UINT64S.len()];
            Some(FedArgument {
                literal: n.to_string(),
                arg: FedArg::U64(n),
            })
        }
        Call::SmallInt { .. } => {
            let big = INT64S[repeat % INT64S.len()];
            let arg = if fits_signed(big, native_bits) {
                FedArg::Isize(big as isize)
            } else {
                FedArg::WideSigned(big)
            };
            Some(FedArgument {
                literal: big.to_string(),
                arg,
            })
        }
        Call::SmallUint { .. } => {
            let big = UINT64S[repeat % UINT64S.len()];
            let arg = if fits_unsigned(big, native_bits) {
                FedArg::Usize(big as usize)
            } else {
                FedArg::WideUnsigned(big)
            };
            Some(FedArgument {
                literal: big.to_string(),
                arg,
            })
        }
        Call::PermSize(_) => {
            let n = PERM_SIZES[repeat % PERM_SIZES.len()];
            Some(FedArgument {
                literal: n.to_string(),
                arg: FedArg::PermSize(n),
            })
        }
    }
}

/// Whether a 64-bit signed value is losslessly representable in
/// `native_bits`-wide signed form.
fn fits_signed(value: i64, native_bits: u32) -> bool {
    if native_bits >= 64 {
        return true;
    }
    let max = (1_i64 << (native_bits - 1)) - 1;
    let min = -(1_i64 << (native_bits - 1));
    (min..=max).contains(&value)
}

/// Whether a 64-bit unsigned value is losslessly representable in
/// `native_bits`-wide unsigned form.
fn fits_unsigned(value: u64, native_bits: u32) -> bool {
    if native_bits >= 64 {
        return true;
    }
    value >> native_bits == 0
}
