//! Positional argument stream.
//!
//! C reads printf arguments with `va_arg`, trusting the format string to name
//! the right type. Here the caller hands over an ordered slice of tagged
//! [`Arg`] values and the interpreter pulls them through an [`ArgCursor`],
//! each conversion stating the C type it expects. A value carrying a
//! different tag is reinterpreted the way `va_arg` would see its bits, so a
//! mismatched format string degrades the output but never panics.

use core::ffi::{CStr, c_long, c_ulong};

/// One formatting argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg<'a> {
    /// Any signed integer, sign-extended.
    Int(i64),
    /// Any unsigned integer, zero-extended.
    Uint(u64),
    /// `float` arguments are promoted to `double`, as in C.
    Double(f64),
    /// A string; `None` plays the role of a null `char *`.
    Str(Option<&'a [u8]>),
    /// An address for `%p`.
    Ptr(usize),
}

impl Arg<'_> {
    /// The raw 64-bit pattern `va_arg` would load for this value.
    #[must_use]
    pub fn bits(self) -> u64 {
        match self {
            Arg::Int(v) => v as u64,
            Arg::Uint(v) => v,
            Arg::Double(v) => v.to_bits(),
            Arg::Str(Some(s)) => s.as_ptr() as usize as u64,
            Arg::Str(None) => 0,
            Arg::Ptr(p) => p as u64,
        }
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg<'_> {
            fn from(v: $t) -> Self {
                Arg::Int(v as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg<'_> {
            fn from(v: $t) -> Self {
                Arg::Uint(v as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<char> for Arg<'_> {
    fn from(c: char) -> Self {
        Arg::Uint(c as u64)
    }
}

impl From<f32> for Arg<'_> {
    fn from(v: f32) -> Self {
        Arg::Double(f64::from(v))
    }
}

impl From<f64> for Arg<'_> {
    fn from(v: f64) -> Self {
        Arg::Double(v)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Str(Some(s.as_bytes()))
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(s: &'a [u8]) -> Self {
        Arg::Str(Some(s))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Arg<'a> {
    fn from(s: &'a [u8; N]) -> Self {
        Arg::Str(Some(s.as_slice()))
    }
}

impl<'a> From<&'a CStr> for Arg<'a> {
    fn from(s: &'a CStr) -> Self {
        Arg::Str(Some(s.to_bytes()))
    }
}

impl<'a> From<Option<&'a str>> for Arg<'a> {
    fn from(s: Option<&'a str>) -> Self {
        Arg::Str(s.map(str::as_bytes))
    }
}

impl<'a> From<Option<&'a [u8]>> for Arg<'a> {
    fn from(s: Option<&'a [u8]>) -> Self {
        Arg::Str(s)
    }
}

impl<T> From<*const T> for Arg<'_> {
    fn from(p: *const T) -> Self {
        Arg::Ptr(p as usize)
    }
}

impl<T> From<*mut T> for Arg<'_> {
    fn from(p: *mut T) -> Self {
        Arg::Ptr(p as usize)
    }
}

/// Build a fixed-size `[Arg; N]` from heterogeneous expressions.
///
/// ```
/// use miniprintf_core::{fmt_args, snprintf};
///
/// let mut buf = [0u8; 32];
/// let n = snprintf(&mut buf, b"%s=%d", &fmt_args!["x", 42]);
/// assert_eq!(&buf[..n], b"x=42");
/// ```
#[macro_export]
macro_rules! fmt_args {
    () => {{
        let args: [$crate::Arg<'static>; 0] = [];
        args
    }};
    ($($arg:expr),+ $(,)?) => {
        [$($crate::Arg::from($arg)),+]
    };
}

/// Reads arguments strictly in format-string order.
///
/// Reads past the end of the list yield zero (or a null string/pointer).
#[derive(Debug, Clone)]
pub struct ArgCursor<'a> {
    args: &'a [Arg<'a>],
    pos: usize,
}

impl<'a> ArgCursor<'a> {
    #[must_use]
    pub fn new(args: &'a [Arg<'a>]) -> Self {
        Self { args, pos: 0 }
    }

    /// Number of arguments read so far (including reads past the end).
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Arguments not yet read.
    #[must_use]
    pub fn remaining(&self) -> &'a [Arg<'a>] {
        self.args.get(self.pos..).unwrap_or(&[])
    }

    fn next_arg(&mut self) -> Option<Arg<'a>> {
        let arg = self.args.get(self.pos).copied();
        self.pos += 1;
        arg
    }

    fn next_bits(&mut self) -> u64 {
        self.next_arg().map_or(0, Arg::bits)
    }

    /// C `int`.
    pub fn next_int(&mut self) -> i32 {
        self.next_bits() as i32
    }

    /// C `unsigned int`.
    pub fn next_uint(&mut self) -> u32 {
        self.next_bits() as u32
    }

    /// C `long`, at the platform's width.
    pub fn next_long(&mut self) -> i64 {
        self.next_bits() as c_long as i64
    }

    /// C `unsigned long`, at the platform's width.
    pub fn next_ulong(&mut self) -> u64 {
        self.next_bits() as c_ulong as u64
    }

    /// C `long long`.
    pub fn next_long_long(&mut self) -> i64 {
        self.next_bits() as i64
    }

    /// C `unsigned long long`.
    pub fn next_ulong_long(&mut self) -> u64 {
        self.next_bits()
    }

    /// C `double`. Integer values convert numerically.
    pub fn next_double(&mut self) -> f64 {
        match self.next_arg() {
            Some(Arg::Double(v)) => v,
            Some(Arg::Int(v)) => v as f64,
            Some(Arg::Uint(v)) => v as f64,
            Some(Arg::Ptr(p)) => p as f64,
            Some(arg @ Arg::Str(_)) => f64::from_bits(arg.bits()),
            None => 0.0,
        }
    }

    /// C `const char *`. Only string arguments can be dereferenced; anything
    /// else reads as a null pointer.
    pub fn next_str(&mut self) -> Option<&'a [u8]> {
        match self.next_arg() {
            Some(Arg::Str(s)) => s,
            _ => None,
        }
    }

    /// C `void *`, as an address.
    pub fn next_ptr(&mut self) -> usize {
        self.next_bits() as usize
    }
}
