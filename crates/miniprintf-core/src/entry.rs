//! The printf family. Each wrapper picks a sink and runs the interpreter.
//!
//! All of them return the length the complete output has, terminator
//! excluded, even when the destination kept less.

use crate::args::{Arg, ArgCursor};
use crate::interpreter::vsnprintf;
use crate::sink::{BufferSink, CallbackSink, ConsoleSink, NullSink, Putchar};

/// Write to a platform console, one character at a time.
pub fn printf_to<P: Putchar>(console: P, format: &[u8], args: &[Arg<'_>]) -> usize {
    let mut sink = ConsoleSink::new(console);
    vsnprintf(&mut sink, usize::MAX, format, &mut ArgCursor::new(args))
}

/// Write to the process stdout.
#[cfg(feature = "std")]
pub fn printf(format: &[u8], args: &[Arg<'_>]) -> usize {
    printf_to(crate::sink::StdoutConsole, format, args)
}

/// Write into `buf` with no explicit limit, NUL-terminated.
///
/// Output that does not fit in the slice is dropped, and then the
/// terminator is dropped as well; use [`snprintf`] when `buf` may be too
/// small.
pub fn sprintf(buf: &mut [u8], format: &[u8], args: &[Arg<'_>]) -> usize {
    let mut sink = BufferSink::new(buf);
    vsnprintf(&mut sink, usize::MAX, format, &mut ArgCursor::new(args))
}

/// Write at most `buf.len()` bytes into `buf`, always NUL-terminated unless
/// `buf` is empty.
///
/// A return value `>= buf.len()` means the output was truncated.
pub fn snprintf(buf: &mut [u8], format: &[u8], args: &[Arg<'_>]) -> usize {
    let maxlen = buf.len();
    let mut sink = BufferSink::new(buf);
    vsnprintf(&mut sink, maxlen, format, &mut ArgCursor::new(args))
}

/// Call `out(ch, arg)` for every output character.
pub fn fctprintf<A: ?Sized>(
    out: fn(u8, &mut A),
    arg: &mut A,
    format: &[u8],
    args: &[Arg<'_>],
) -> usize {
    let mut sink = CallbackSink::new(out, arg);
    vsnprintf(&mut sink, usize::MAX, format, &mut ArgCursor::new(args))
}

/// Length the output would have, without producing it.
pub fn measure(format: &[u8], args: &[Arg<'_>]) -> usize {
    vsnprintf(&mut NullSink, usize::MAX, format, &mut ArgCursor::new(args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmt_args;

    #[test]
    fn snprintf_truncates_and_terminates() {
        let mut buf = [b'.'; 4];
        let n = snprintf(&mut buf, b"%s", &fmt_args!["hello"]);
        assert_eq!(n, 5);
        assert_eq!(&buf, b"hel\0");
    }

    #[test]
    fn snprintf_into_empty_buffer_only_measures() {
        let mut buf = [0u8; 0];
        assert_eq!(snprintf(&mut buf, b"%d", &fmt_args![1234]), 4);
    }

    #[test]
    fn sprintf_never_writes_past_slice() {
        let mut buf = [b'.'; 3];
        let n = sprintf(&mut buf, b"abcdef", &fmt_args![]);
        assert_eq!(n, 6);
        assert_eq!(&buf, b"abc");
    }

    #[test]
    fn sprintf_terminates_when_room() {
        let mut buf = [b'.'; 8];
        let n = sprintf(&mut buf, b"%x", &fmt_args![255]);
        assert_eq!(n, 2);
        assert_eq!(&buf[..3], b"ff\0");
    }

    #[test]
    fn printf_to_forwards_without_terminator() {
        let mut seen = Vec::new();
        let n = printf_to(|ch: u8| seen.push(ch), b"[%3d]", &fmt_args![7]);
        assert_eq!(n, 5);
        assert_eq!(seen, b"[  7]");
    }

    #[test]
    fn fctprintf_threads_opaque_argument() {
        fn collect(ch: u8, acc: &mut Vec<u8>) {
            acc.push(ch);
        }
        let mut acc = Vec::new();
        let n = fctprintf(collect, &mut acc, b"%s-%d", &fmt_args!["id", 9]);
        assert_eq!(n, 4);
        assert_eq!(acc, b"id-9");
    }

    #[test]
    fn measure_matches_snprintf() {
        let args = fmt_args!["x", 3.5, -12];
        let mut buf = [0u8; 64];
        let written = snprintf(&mut buf, b"%s %.3f %05d", &args);
        assert_eq!(measure(b"%s %.3f %05d", &args), written);
    }
}
