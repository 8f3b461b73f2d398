//! Fixed boundary-value catalogs used to exercise parameterized operations.
//!
//! Each table is ordered and immutable; the feeder indexes them modulo their
//! length, so changing an entry, reordering, or resizing any table shifts
//! every downstream golden-table position and requires a deliberate golden
//! regeneration.

/// Near-32-bit signed boundary values.
pub const INT32S: [i32; 9] = [
    1,
    10,
    32,
    1 << 20,
    (1 << 20) + 1,
    1_000_000_000,
    1 << 30,
    i32::MAX - 1,
    i32::MAX,
];

/// Near-32-bit unsigned boundary values.
pub const UINT32S: [u32; 11] = [
    1,
    10,
    32,
    1 << 20,
    (1 << 20) + 1,
    1_000_000_000,
    1 << 30,
    (1 << 31) - 2,
    (1 << 31) - 1,
    u32::MAX - 1,
    u32::MAX,
];

/// Near-64-bit signed boundary values. Also feeds native signed parameters.
pub const INT64S: [i64; 13] = [
    1,
    10,
    32,
    1 << 20,
    (1 << 20) + 1,
    1_000_000_000,
    1 << 30,
    (1 << 31) - 2,
    (1 << 31) - 1,
    1_000_000_000_000_000_000,
    1 << 60,
    i64::MAX - 1,
    i64::MAX,
];

/// Near-64-bit unsigned boundary values. Also feeds native unsigned parameters.
pub const UINT64S: [u64; 15] = [
    1,
    10,
    32,
    1 << 20,
    (1 << 20) + 1,
    1_000_000_000,
    1 << 30,
    (1 << 31) - 2,
    (1 << 31) - 1,
    1_000_000_000_000_000_000,
    1 << 60,
    (1 << 63) - 2,
    (1 << 63) - 1,
    u64::MAX - 1,
    u64::MAX,
];

/// Permutation sizes: zero, one, odd counts, and a power of two.
pub const PERM_SIZES: [usize; 7] = [0, 1, 5, 8, 9, 10, 16];
