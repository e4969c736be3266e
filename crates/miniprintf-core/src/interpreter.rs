//! Format-string interpreter.

use crate::args::ArgCursor;
use crate::ntoa::format_integer;
use crate::sink::{Output, Sink};
use crate::spec::{Base, ConversionSpec, FormatFlags, parse_spec};

/// Interpret `format` against `args`, emitting through `sink`.
///
/// Scanning stops at the first NUL byte or the end of the slice. `maxlen`
/// is handed to the sink with every character; [`BufferSink`] uses it as
/// the truncation limit, the other sinks ignore it. Unless `maxlen` is 0 a
/// NUL terminator is emitted at the final position (or at `maxlen - 1` when
/// truncated).
///
/// Returns the number of characters the complete output has, terminator
/// excluded, regardless of how many the sink kept.
///
/// [`BufferSink`]: crate::BufferSink
pub fn vsnprintf<S: Sink + ?Sized>(
    sink: &mut S,
    maxlen: usize,
    format: &[u8],
    args: &mut ArgCursor<'_>,
) -> usize {
    let mut out = Output::new(sink, maxlen);
    let mut pos = 0;

    while let Some(&ch) = format.get(pos) {
        if ch == 0 {
            break;
        }
        pos += 1;
        if ch != b'%' {
            out.put(ch);
            continue;
        }

        let (spec, consumed) = parse_spec(&format[pos..], args);
        pos += consumed;
        if spec.conversion == 0 {
            break;
        }
        format_conversion(&mut out, spec, args);
    }

    out.terminate();
    out.position()
}

fn format_conversion<S: Sink + ?Sized>(
    out: &mut Output<'_, S>,
    spec: ConversionSpec,
    args: &mut ArgCursor<'_>,
) {
    let ConversionSpec {
        mut flags,
        width,
        precision,
        base,
        conversion,
    } = spec;

    match conversion {
        b'd' | b'i' | b'u' | b'x' | b'X' | b'o' | b'b' => {
            if base == Base::Decimal {
                flags.remove(FormatFlags::HASH);
            }
            if conversion == b'X' {
                flags |= FormatFlags::UPPERCASE;
            }
            let signed = matches!(conversion, b'd' | b'i');
            if !signed {
                flags.remove(FormatFlags::PLUS | FormatFlags::SPACE);
            }
            if flags.contains(FormatFlags::PRECISION) {
                flags.remove(FormatFlags::ZEROPAD);
            }

            if signed {
                let value = read_signed(args, flags);
                format_integer(
                    out,
                    value.unsigned_abs(),
                    value < 0,
                    base,
                    precision,
                    width,
                    flags,
                );
            } else {
                let value = read_unsigned(args, flags);
                format_integer(out, value, false, base, precision, width, flags);
            }
        }
        #[cfg(feature = "float")]
        b'f' | b'F' => {
            if conversion == b'F' {
                flags |= FormatFlags::UPPERCASE;
            }
            let value = args.next_double();
            crate::ftoa::format_float(out, value, precision, width, flags, false);
        }
        #[cfg(feature = "exponential")]
        b'e' | b'E' | b'g' | b'G' => {
            if matches!(conversion, b'g' | b'G') {
                flags |= FormatFlags::ADAPT_EXP;
            }
            if matches!(conversion, b'E' | b'G') {
                flags |= FormatFlags::UPPERCASE;
            }
            let value = args.next_double();
            crate::ftoa::format_float(out, value, precision, width, flags, true);
        }
        b'c' => {
            let ch = args.next_int() as u8;
            out.put_justified(core::iter::once(ch), width, flags & FormatFlags::LEFT);
        }
        b's' => match args.next_str() {
            None => out.put_justified(b"(null)".iter().copied(), width, flags),
            Some(text) => {
                let mut len = text.iter().position(|&b| b == 0).unwrap_or(text.len());
                if flags.contains(FormatFlags::PRECISION) {
                    len = len.min(precision as usize);
                }
                out.put_justified(
                    text[..len].iter().copied(),
                    width,
                    flags & FormatFlags::LEFT,
                );
            }
        },
        b'p' => {
            let width = (core::mem::size_of::<usize>() * 2 + 2) as u32;
            flags |= FormatFlags::ZEROPAD | FormatFlags::POINTER;
            let address = args.next_ptr();
            if address == 0 {
                out.put_justified(b"(nil)".iter().copied(), width, flags);
            } else {
                format_integer(out, address as u64, false, Base::Hex, precision, width, flags);
            }
        }
        b'%' => out.put(b'%'),
        other => {
            out.put(b'%');
            out.put(other);
        }
    }
}

/// `int`, `long` or `long long` by length class; `h`/`hh` narrow an `int`.
fn read_signed(args: &mut ArgCursor<'_>, flags: FormatFlags) -> i64 {
    if flags.contains(FormatFlags::LONG_LONG) {
        args.next_long_long()
    } else if flags.contains(FormatFlags::LONG) {
        args.next_long()
    } else {
        let value = args.next_int();
        if flags.contains(FormatFlags::CHAR) {
            i64::from(value as i8)
        } else if flags.contains(FormatFlags::SHORT) {
            i64::from(value as i16)
        } else {
            i64::from(value)
        }
    }
}

fn read_unsigned(args: &mut ArgCursor<'_>, flags: FormatFlags) -> u64 {
    if flags.contains(FormatFlags::LONG_LONG) {
        args.next_ulong_long()
    } else if flags.contains(FormatFlags::LONG) {
        args.next_ulong()
    } else {
        let value = args.next_uint();
        if flags.contains(FormatFlags::CHAR) {
            u64::from(value as u8)
        } else if flags.contains(FormatFlags::SHORT) {
            u64::from(value as u16)
        } else {
            u64::from(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmt_args;
    use crate::sink::{BufferSink, NullSink};

    fn run(format: &[u8], args: &[crate::Arg<'_>]) -> (Vec<u8>, usize) {
        let mut buf = [0u8; 128];
        let mut sink = BufferSink::new(&mut buf);
        let n = vsnprintf(&mut sink, 128, format, &mut ArgCursor::new(args));
        (buf[..n.min(127)].to_vec(), n)
    }

    fn check(format: &[u8], args: &[crate::Arg<'_>], expected: &str) {
        let (out, n) = run(format, args);
        assert_eq!(
            String::from_utf8_lossy(&out),
            expected,
            "format {:?}",
            String::from_utf8_lossy(format)
        );
        assert_eq!(n, expected.len());
    }

    #[test]
    fn literal_text_passes_through() {
        check(b"hello, world", &fmt_args![], "hello, world");
        check(b"100%%", &fmt_args![], "100%");
    }

    #[test]
    fn signed_conversions() {
        check(b"%d %i", &fmt_args![-5, 7], "-5 7");
        check(b"%+d % d", &fmt_args![3, 3], "+3  3");
        check(b"%05d|%-5d|%5d", &fmt_args![-42, 42, 42], "-0042|42   |   42");
        check(b"[%.0d]", &fmt_args![0], "[]");
    }

    #[test]
    fn length_modifiers_narrow_and_widen() {
        check(b"%hhd", &fmt_args![300], "44");
        check(b"%hd", &fmt_args![70_000], "4464");
        check(b"%hhu", &fmt_args![-1], "255");
        check(b"%lld", &fmt_args![i64::MIN], "-9223372036854775808");
        check(b"%llu", &fmt_args![u64::MAX], "18446744073709551615");
        check(b"%zu", &fmt_args![usize::MAX], &usize::MAX.to_string());
    }

    #[test]
    fn unsigned_conversions_drop_sign_flags() {
        check(b"%+u % x", &fmt_args![5_u32, 255_u32], "5 ff");
        check(b"%u", &fmt_args![-1], "4294967295");
    }

    #[test]
    fn alternate_forms() {
        check(b"%#x %#X %#o %#b", &fmt_args![255, 255, 8, 5], "0xff 0XFF 010 0b101");
        check(b"%#x", &fmt_args![0], "0");
        check(b"%#d", &fmt_args![12], "12");
        check(b"%#010x|%#010b", &fmt_args![5, 5], "0x00000005|0b00000101");
    }

    #[test]
    fn precision_disables_zero_flag() {
        check(b"%08.3d", &fmt_args![7], "     007");
    }

    #[test]
    fn star_width_and_precision() {
        check(b"%*d|%-*d", &fmt_args![4, 1, 3, 2], "   1|2  ");
        check(b"%*d", &fmt_args![-4, 1], "1   ");
        check(b"%.*s", &fmt_args![2, "abc"], "ab");
    }

    #[test]
    fn characters() {
        check(b"%c%c", &fmt_args!['o', 'k'], "ok");
        check(b"%3c|%-3c|", &fmt_args!['a', 'b'], "  a|b  |");
    }

    #[test]
    fn strings() {
        check(b"%s", &fmt_args!["abc"], "abc");
        check(b"%5s|%-5s|", &fmt_args!["ab", "cd"], "   ab|cd   |");
        check(b"%.2s", &fmt_args!["abcdef"], "ab");
        check(b"%.0s|", &fmt_args!["abcdef"], "|");
        check(b"%s", &fmt_args![b"ab\0cd"], "ab");
        check(b"%s", &fmt_args![Option::<&str>::None], "(null)");
        check(b"%8s", &fmt_args![Option::<&str>::None], "  (null)");
        check(b"%05s", &fmt_args!["ab"], "   ab");
    }

    #[test]
    fn pointers() {
        let nil: *const u8 = core::ptr::null();
        check(b"%p", &fmt_args![nil], "(nil)");
        let width = core::mem::size_of::<usize>() * 2;
        let expected = format!("0x{:0width$x}", 0x1234, width = width);
        check(b"%p", &fmt_args![0x1234 as *const u8], &expected);
    }

    #[cfg(feature = "exponential")]
    #[test]
    fn float_conversions() {
        check(b"%f %.2f", &fmt_args![3.14159, 0.005], "3.141590 0.01");
        check(b"%F", &fmt_args![1.5], "1.500000");
        check(b"%e %E", &fmt_args![12345.678, 12345.678], "1.234568e+04 1.234568E+04");
        check(b"%g %g %G", &fmt_args![100_000.0, 1e6, 1e-10], "100000 1e+06 1E-10");
        check(b"%f", &fmt_args![2], "2.000000");
        check(b"%.18g|%.0g|%.2g", &fmt_args![1e6, 0.05, 99.5], "1000000|0.05|1e+02");
        check(b"%.30f", &fmt_args![-1.5], "-1.500000000000000000000000000000");
    }

    #[test]
    fn unknown_conversion_is_echoed() {
        check(b"%y|%5k", &fmt_args![], "%y|%k");
    }

    #[test]
    fn truncated_spec_stops_output() {
        check(b"abc%", &fmt_args![], "abc");
        check(b"abc%-5", &fmt_args![], "abc");
        check(b"abc%l", &fmt_args![1], "abc");
    }

    #[test]
    fn nul_in_format_stops_output() {
        check(b"ab\0cd", &fmt_args![], "ab");
    }

    #[test]
    fn missing_arguments_read_as_zero() {
        check(b"%d %s %x", &fmt_args![], "0 (null) 0");
    }

    #[test]
    fn returns_full_length_when_truncated() {
        let mut buf = [b'.'; 4];
        let mut sink = BufferSink::new(&mut buf);
        let args = fmt_args!["hello"];
        let n = vsnprintf(&mut sink, 4, b"%s", &mut ArgCursor::new(&args));
        assert_eq!(n, 5);
        assert_eq!(&buf, b"hel\0");
    }

    #[test]
    fn zero_maxlen_writes_nothing() {
        let mut buf = [b'.'; 4];
        let mut sink = BufferSink::new(&mut buf);
        let n = vsnprintf(&mut sink, 0, b"abc", &mut ArgCursor::new(&[]));
        assert_eq!(n, 3);
        assert_eq!(&buf, b"....");
    }

    #[test]
    fn null_sink_counts() {
        let args = fmt_args![12345];
        let n = vsnprintf(&mut NullSink, usize::MAX, b"n=%d", &mut ArgCursor::new(&args));
        assert_eq!(n, 7);
    }

    #[test]
    fn cursor_ends_after_last_read() {
        let args = fmt_args![1, 2, 3];
        let mut cursor = ArgCursor::new(&args);
        vsnprintf(&mut NullSink, usize::MAX, b"%d %d", &mut cursor);
        assert_eq!(cursor.consumed(), 2);
        assert_eq!(cursor.remaining().len(), 1);
    }
}
