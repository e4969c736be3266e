//! Conversion specification: `%[flags][width|*][.precision|.*][length]conv`.

use core::ffi::c_long;

use bitflags::bitflags;

use crate::args::ArgCursor;

bitflags! {
    /// Per-conversion state: the user-visible flags plus what the scanner
    /// and dispatcher derive (case, length class, precision presence,
    /// `%g` mode, pointer mode).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FormatFlags: u16 {
        /// `0`
        const ZEROPAD   = 1 << 0;
        /// `-`
        const LEFT      = 1 << 1;
        /// `+`
        const PLUS      = 1 << 2;
        /// ` `
        const SPACE     = 1 << 3;
        /// `#`
        const HASH      = 1 << 4;
        const UPPERCASE = 1 << 5;
        /// `hh`
        const CHAR      = 1 << 6;
        /// `h`
        const SHORT     = 1 << 7;
        /// `l`
        const LONG      = 1 << 8;
        /// `ll`
        const LONG_LONG = 1 << 9;
        /// A `.precision` was present.
        const PRECISION = 1 << 10;
        /// `%g`/`%G`: choose between fixed and exponential notation.
        const ADAPT_EXP = 1 << 11;
        /// `%p`: prefix like `#` but with its own zero-value rules.
        const POINTER   = 1 << 12;
    }
}

/// Numeric base of an integer conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    Binary = 2,
    Octal = 8,
    Decimal = 10,
    Hex = 16,
}

impl Base {
    #[inline]
    #[must_use]
    pub const fn radix(self) -> u64 {
        self as u64
    }

    #[must_use]
    pub const fn for_conversion(conversion: u8) -> Self {
        match conversion {
            b'x' | b'X' | b'p' => Base::Hex,
            b'o' => Base::Octal,
            b'b' => Base::Binary,
            _ => Base::Decimal,
        }
    }
}

/// One parsed `%...` token, with `*` width/precision already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSpec {
    pub flags: FormatFlags,
    pub width: u32,
    pub precision: u32,
    pub base: Base,
    /// Conversion letter, or 0 when the format ended before one.
    pub conversion: u8,
}

/// Scan a conversion specification. `fmt` starts right after the `%`.
///
/// Returns the spec and the number of bytes consumed, conversion letter
/// included. `*` fields read one `int` each from `args`, in order. A NUL
/// byte or the end of `fmt` stops the scan; the returned conversion is then
/// 0 and any `*` reads already made stay made.
pub fn parse_spec(fmt: &[u8], args: &mut ArgCursor<'_>) -> (ConversionSpec, usize) {
    let at = |pos: usize| fmt.get(pos).copied().unwrap_or(0);
    let mut pos = 0;

    let mut flags = FormatFlags::empty();
    loop {
        let flag = match at(pos) {
            b'0' => FormatFlags::ZEROPAD,
            b'-' => FormatFlags::LEFT,
            b'+' => FormatFlags::PLUS,
            b' ' => FormatFlags::SPACE,
            b'#' => FormatFlags::HASH,
            _ => break,
        };
        flags |= flag;
        pos += 1;
    }

    let mut width = 0;
    if at(pos).is_ascii_digit() {
        width = parse_decimal(fmt, &mut pos);
    } else if at(pos) == b'*' {
        let w = args.next_int();
        if w < 0 {
            flags |= FormatFlags::LEFT;
            width = w.unsigned_abs();
        } else {
            width = w as u32;
        }
        pos += 1;
    }

    let mut precision = 0;
    if at(pos) == b'.' {
        flags |= FormatFlags::PRECISION;
        pos += 1;
        if at(pos).is_ascii_digit() {
            precision = parse_decimal(fmt, &mut pos);
        } else if at(pos) == b'*' {
            let p = args.next_int();
            precision = if p > 0 { p as u32 } else { 0 };
            pos += 1;
        }
    }

    match at(pos) {
        b'l' => {
            flags |= FormatFlags::LONG;
            pos += 1;
            if at(pos) == b'l' {
                flags |= FormatFlags::LONG_LONG;
                pos += 1;
            }
        }
        b'h' => {
            flags |= FormatFlags::SHORT;
            pos += 1;
            if at(pos) == b'h' {
                flags |= FormatFlags::CHAR;
                pos += 1;
            }
        }
        b't' => {
            flags |= length_class_of(core::mem::size_of::<isize>());
            pos += 1;
        }
        b'j' => {
            flags |= length_class_of(core::mem::size_of::<i64>());
            pos += 1;
        }
        b'z' => {
            flags |= length_class_of(core::mem::size_of::<usize>());
            pos += 1;
        }
        _ => {}
    }

    let conversion = at(pos);
    if conversion != 0 {
        pos += 1;
    }

    let spec = ConversionSpec {
        flags,
        width,
        precision,
        base: Base::for_conversion(conversion),
        conversion,
    };
    (spec, pos)
}

/// `long` when the type is as wide as C `long`, `long long` otherwise.
const fn length_class_of(size: usize) -> FormatFlags {
    if size == core::mem::size_of::<c_long>() {
        FormatFlags::LONG
    } else {
        FormatFlags::LONG_LONG
    }
}

fn parse_decimal(fmt: &[u8], pos: &mut usize) -> u32 {
    let mut value = 0u32;
    while let Some(&d) = fmt.get(*pos) {
        if !d.is_ascii_digit() {
            break;
        }
        value = value.saturating_mul(10).saturating_add(u32::from(d - b'0'));
        *pos += 1;
    }
    value
}
