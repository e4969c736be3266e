//! Character sinks.
//!
//! Every byte the engine produces goes through [`Sink::emit`] with the
//! position it would occupy and the caller's limit. The four sinks cover
//! the printf family: a bounded buffer (`sprintf`/`snprintf`), a discard
//! sink (length measurement), a platform console (`printf`) and a user
//! callback (`fctprintf`). The interpreter is generic over the sink, so the
//! choice is made once per call.

use crate::spec::FormatFlags;

/// Destination of formatted output, one character at a time.
pub trait Sink {
    /// Deliver `ch`, the `idx`-th output character. `maxlen` is the limit the
    /// top-level call was given; sinks without storage ignore both.
    fn emit(&mut self, ch: u8, idx: usize, maxlen: usize);
}

impl<S: Sink + ?Sized> Sink for &mut S {
    #[inline]
    fn emit(&mut self, ch: u8, idx: usize, maxlen: usize) {
        (**self).emit(ch, idx, maxlen);
    }
}

/// Writes into a borrowed byte buffer. Characters at or past `maxlen`, or
/// past the end of the slice, are dropped without error.
#[derive(Debug)]
pub struct BufferSink<'a> {
    buf: &'a mut [u8],
}

impl<'a> BufferSink<'a> {
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf }
    }
}

impl Sink for BufferSink<'_> {
    #[inline]
    fn emit(&mut self, ch: u8, idx: usize, maxlen: usize) {
        if idx >= maxlen {
            return;
        }
        if let Some(slot) = self.buf.get_mut(idx) {
            *slot = ch;
        }
    }
}

/// Discards everything; used to compute the length output would have.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl Sink for NullSink {
    #[inline]
    fn emit(&mut self, _ch: u8, _idx: usize, _maxlen: usize) {}
}

/// Platform single-character output primitive (a UART register, a
/// semihosting call, a terminal).
pub trait Putchar {
    fn putchar(&mut self, ch: u8);
}

impl<F: FnMut(u8)> Putchar for F {
    #[inline]
    fn putchar(&mut self, ch: u8) {
        self(ch);
    }
}

/// Process stdout as a console. Write errors are ignored, like the return
/// value of a C `putchar`.
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutConsole;

#[cfg(feature = "std")]
impl Putchar for StdoutConsole {
    fn putchar(&mut self, ch: u8) {
        use std::io::Write;
        let _ = std::io::stdout().write_all(&[ch]);
    }
}

/// Forwards each character to a [`Putchar`]. The NUL terminator is not sent.
#[derive(Debug)]
pub struct ConsoleSink<P> {
    console: P,
}

impl<P: Putchar> ConsoleSink<P> {
    #[must_use]
    pub fn new(console: P) -> Self {
        Self { console }
    }

    pub fn into_inner(self) -> P {
        self.console
    }
}

impl<P: Putchar> Sink for ConsoleSink<P> {
    #[inline]
    fn emit(&mut self, ch: u8, _idx: usize, _maxlen: usize) {
        if ch != 0 {
            self.console.putchar(ch);
        }
    }
}

/// Calls `out(ch, arg)` per character, `arg` being opaque caller state.
/// The NUL terminator is not sent.
pub struct CallbackSink<'a, A: ?Sized> {
    out: fn(u8, &mut A),
    arg: &'a mut A,
}

impl<'a, A: ?Sized> CallbackSink<'a, A> {
    #[must_use]
    pub fn new(out: fn(u8, &mut A), arg: &'a mut A) -> Self {
        Self { out, arg }
    }
}

impl<A: ?Sized> Sink for CallbackSink<'_, A> {
    #[inline]
    fn emit(&mut self, ch: u8, _idx: usize, _maxlen: usize) {
        if ch != 0 {
            (self.out)(ch, self.arg);
        }
    }
}

/// Write position over a sink. All formatters emit through this, so the
/// running index doubles as the character count a call returns.
pub struct Output<'s, S: Sink + ?Sized> {
    sink: &'s mut S,
    idx: usize,
    maxlen: usize,
}

impl<'s, S: Sink + ?Sized> Output<'s, S> {
    pub fn new(sink: &'s mut S, maxlen: usize) -> Self {
        Self {
            sink,
            idx: 0,
            maxlen,
        }
    }

    /// Characters produced so far, whether or not the sink kept them.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.idx
    }

    #[inline]
    pub fn put(&mut self, ch: u8) {
        self.sink.emit(ch, self.idx, self.maxlen);
        self.idx += 1;
    }

    pub fn pad(&mut self, ch: u8, count: usize) {
        for _ in 0..count {
            self.put(ch);
        }
    }

    /// Emit `chars` space-justified to `width`: left padding unless `LEFT`
    /// or `ZEROPAD` is set (zero padding is already inside `chars`), right
    /// padding when `LEFT` is set.
    pub fn put_justified<I>(&mut self, chars: I, width: u32, flags: FormatFlags)
    where
        I: ExactSizeIterator<Item = u8>,
    {
        let start = self.idx;
        let width = width as usize;
        if !flags.intersects(FormatFlags::LEFT | FormatFlags::ZEROPAD) {
            self.pad(b' ', width.saturating_sub(chars.len()));
        }
        for ch in chars {
            self.put(ch);
        }
        if flags.contains(FormatFlags::LEFT) {
            self.pad(b' ', width.saturating_sub(self.idx - start));
        }
    }

    /// [`put_justified`](Self::put_justified) for a scratch buffer filled
    /// least-significant character first.
    #[inline]
    pub fn put_reversed(&mut self, reversed: &[u8], width: u32, flags: FormatFlags) {
        self.put_justified(reversed.iter().rev().copied(), width, flags);
    }

    /// Write the NUL terminator at the current position, or over the last
    /// slot when the output was truncated. Does not count as output.
    pub fn terminate(&mut self) {
        if self.maxlen > 0 {
            let at = self.idx.min(self.maxlen - 1);
            self.sink.emit(0, at, self.maxlen);
        }
    }
}
