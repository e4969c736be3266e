//! Integer to ASCII.

use crate::config::NTOA_BUFFER_SIZE;
use crate::scratch::Scratch;
use crate::sink::{Output, Sink};
use crate::spec::{Base, FormatFlags};

/// Render the magnitude `value` in `base` with the sign given by `negative`.
///
/// Handles precision (minimum digit count), zero padding, the `#` prefixes
/// (`0x`, `0X`, `0b`, leading `0` for octal) and the sign column, then emits
/// the result space-justified to `width`. Output longer than
/// [`NTOA_BUFFER_SIZE`] is truncated.
pub(crate) fn format_integer<S: Sink + ?Sized>(
    out: &mut Output<'_, S>,
    mut value: u64,
    negative: bool,
    base: Base,
    precision: u32,
    width: u32,
    mut flags: FormatFlags,
) {
    let mut digits = Scratch::<NTOA_BUFFER_SIZE>::new();

    if value == 0 {
        // Zero reads the same with or without `#`, except octal, which
        // already gets its leading zero here.
        if !flags.contains(FormatFlags::PRECISION) {
            digits.push(b'0');
            flags.remove(FormatFlags::HASH);
        } else if base == Base::Hex {
            flags.remove(FormatFlags::HASH);
        }
    } else {
        let radix = base.radix();
        let alpha = if flags.contains(FormatFlags::UPPERCASE) {
            b'A'
        } else {
            b'a'
        };
        while value != 0 && !digits.is_full() {
            let digit = (value % radix) as u8;
            digits.push(if digit < 10 {
                b'0' + digit
            } else {
                alpha + digit - 10
            });
            value /= radix;
        }
    }

    pad_and_emit(out, digits, negative, base, precision, width, flags);
}

fn pad_and_emit<S: Sink + ?Sized>(
    out: &mut Output<'_, S>,
    mut digits: Scratch<NTOA_BUFFER_SIZE>,
    negative: bool,
    base: Base,
    precision: u32,
    mut width: u32,
    mut flags: FormatFlags,
) {
    let unpadded_len = digits.len();
    let precision = precision as usize;

    if !flags.contains(FormatFlags::LEFT) {
        let has_sign_column =
            negative || flags.intersects(FormatFlags::PLUS | FormatFlags::SPACE);
        if width > 0 && flags.contains(FormatFlags::ZEROPAD) && has_sign_column {
            width -= 1;
        }
        if flags.contains(FormatFlags::ZEROPAD) {
            while digits.len() < width as usize && !digits.is_full() {
                digits.push(b'0');
            }
        }
    }

    while digits.len() < precision && !digits.is_full() {
        digits.push(b'0');
    }

    if base == Base::Octal && digits.len() > unpadded_len {
        flags.remove(FormatFlags::HASH);
    }

    if flags.intersects(FormatFlags::HASH | FormatFlags::POINTER) {
        let len = digits.len();
        if !flags.contains(FormatFlags::PRECISION)
            && len > 0
            && (len == precision || len == width as usize)
        {
            // Give back padding zeros to make room for the prefix.
            if unpadded_len < digits.len() {
                digits.pop();
            }
            if digits.len() > 0
                && matches!(base, Base::Hex | Base::Binary)
                && unpadded_len < digits.len()
            {
                digits.pop();
            }
        }
        match base {
            Base::Hex if flags.contains(FormatFlags::UPPERCASE) => digits.push(b'X'),
            Base::Hex => digits.push(b'x'),
            Base::Binary => digits.push(b'b'),
            Base::Octal | Base::Decimal => {}
        }
        digits.push(b'0');
    }

    if negative {
        digits.push(b'-');
    } else if flags.contains(FormatFlags::PLUS) {
        digits.push(b'+');
    } else if flags.contains(FormatFlags::SPACE) {
        digits.push(b' ');
    }

    out.put_reversed(digits.as_slice(), width, flags);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::BufferSink;

    fn render(
        value: u64,
        negative: bool,
        base: Base,
        precision: u32,
        width: u32,
        flags: FormatFlags,
    ) -> ([u8; 64], usize) {
        let mut buf = [0u8; 64];
        let mut sink = BufferSink::new(&mut buf);
        let mut out = Output::new(&mut sink, 64);
        format_integer(&mut out, value, negative, base, precision, width, flags);
        let n = out.position();
        (buf, n)
    }

    fn assert_renders(
        expected: &[u8],
        value: u64,
        negative: bool,
        base: Base,
        precision: u32,
        width: u32,
        flags: FormatFlags,
    ) {
        let (buf, n) = render(value, negative, base, precision, width, flags);
        assert_eq!(
            &buf[..n],
            expected,
            "got {:?}",
            core::str::from_utf8(&buf[..n])
        );
    }

    #[test]
    fn decimal_plain_and_negative() {
        assert_renders(b"42", 42, false, Base::Decimal, 0, 0, FormatFlags::empty());
        assert_renders(b"-42", 42, true, Base::Decimal, 0, 0, FormatFlags::empty());
        assert_renders(b"0", 0, false, Base::Decimal, 0, 0, FormatFlags::empty());
    }

    #[test]
    fn zero_padding_reserves_sign_column() {
        assert_renders(b"-0042", 42, true, Base::Decimal, 0, 5, FormatFlags::ZEROPAD);
        assert_renders(b"00042", 42, false, Base::Decimal, 0, 5, FormatFlags::ZEROPAD);
        assert_renders(
            b"+0042",
            42,
            false,
            Base::Decimal,
            0,
            5,
            FormatFlags::ZEROPAD | FormatFlags::PLUS,
        );
    }

    #[test]
    fn precision_sets_minimum_digits() {
        assert_renders(
            b"  007",
            7,
            false,
            Base::Decimal,
            3,
            5,
            FormatFlags::PRECISION,
        );
        assert_renders(b"", 0, false, Base::Decimal, 0, 0, FormatFlags::PRECISION);
    }

    #[test]
    fn hex_prefix_and_case() {
        assert_renders(b"ff", 255, false, Base::Hex, 0, 0, FormatFlags::empty());
        assert_renders(b"0xff", 255, false, Base::Hex, 0, 0, FormatFlags::HASH);
        assert_renders(
            b"0XFF",
            255,
            false,
            Base::Hex,
            0,
            0,
            FormatFlags::HASH | FormatFlags::UPPERCASE,
        );
        assert_renders(b"0", 0, false, Base::Hex, 0, 0, FormatFlags::HASH);
    }

    #[test]
    fn hash_prefix_takes_back_zero_padding() {
        assert_renders(
            b"0x00ff",
            255,
            false,
            Base::Hex,
            0,
            6,
            FormatFlags::HASH | FormatFlags::ZEROPAD,
        );
        assert_renders(
            b"0b00000101",
            5,
            false,
            Base::Binary,
            0,
            10,
            FormatFlags::HASH | FormatFlags::ZEROPAD,
        );
    }

    #[test]
    fn octal_and_binary_alternate_forms() {
        assert_renders(b"010", 8, false, Base::Octal, 0, 0, FormatFlags::HASH);
        assert_renders(
            b"010",
            8,
            false,
            Base::Octal,
            3,
            0,
            FormatFlags::HASH | FormatFlags::PRECISION,
        );
        assert_renders(b"0b101", 5, false, Base::Binary, 0, 0, FormatFlags::HASH);
    }

    #[test]
    fn left_justified_pads_right() {
        assert_renders(b"-7   ", 7, true, Base::Decimal, 0, 5, FormatFlags::LEFT);
    }

    #[test]
    fn oversized_precision_is_capped_by_scratch() {
        let (_, n) = render(1, false, Base::Decimal, 100, 0, FormatFlags::PRECISION);
        assert_eq!(n, NTOA_BUFFER_SIZE);
    }

    #[test]
    fn u64_max_in_every_base() {
        assert_renders(
            b"18446744073709551615",
            u64::MAX,
            false,
            Base::Decimal,
            0,
            0,
            FormatFlags::empty(),
        );
        assert_renders(
            b"ffffffffffffffff",
            u64::MAX,
            false,
            Base::Hex,
            0,
            0,
            FormatFlags::empty(),
        );
        assert_renders(
            b"1777777777777777777777",
            u64::MAX,
            false,
            Base::Octal,
            0,
            0,
            FormatFlags::empty(),
        );
    }
}
