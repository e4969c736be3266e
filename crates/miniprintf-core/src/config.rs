//! Compile-time limits of the formatting engine.
//!
//! Every buffer the engine touches is sized here; nothing grows at run time.
//! Feature switches (`float`, `exponential`, `std`) live in `Cargo.toml`.

/// Integer-to-ASCII scratch capacity. Must hold one converted number
/// including sign, prefix and zero padding; longer output is truncated.
pub const NTOA_BUFFER_SIZE: usize = 32;

/// Float-to-ASCII scratch capacity, same contract as [`NTOA_BUFFER_SIZE`].
pub const FTOA_BUFFER_SIZE: usize = 32;

/// Precision used by `%f`/`%e`/`%g` when none is given (ISO C mandates 6).
pub const DEFAULT_FLOAT_PRECISION: u32 = 6;

/// `%f` values whose integral part needs more digits than this are printed
/// in exponential notation instead.
pub const MAX_INTEGRAL_DIGITS_FOR_DECIMAL: u32 = 9;

/// Magnitude above which `%f` switches to exponential notation.
pub const FLOAT_NOTATION_THRESHOLD: f64 = const_pow10(MAX_INTEGRAL_DIGITS_FOR_DECIMAL);

/// Decimal digits an `i64` fractional part can always hold.
pub const NUM_DECIMAL_DIGITS_IN_INT64: usize = 18;

/// Largest precision rendered with real digits; anything beyond is zeros.
pub const MAX_SUPPORTED_PRECISION: u32 = NUM_DECIMAL_DIGITS_IN_INT64 as u32 - 1;

/// `10^0 ..= 10^17`, exact in `f64`.
pub const POWERS_OF_10: [f64; NUM_DECIMAL_DIGITS_IN_INT64] = [
    1e00, 1e01, 1e02, 1e03, 1e04, 1e05, 1e06, 1e07, 1e08, 1e09, 1e10, 1e11, 1e12, 1e13, 1e14,
    1e15, 1e16, 1e17,
];

const fn const_pow10(exp: u32) -> f64 {
    let mut value = 1.0;
    let mut i = 0;
    while i < exp {
        value *= 10.0;
        i += 1;
    }
    value
}
