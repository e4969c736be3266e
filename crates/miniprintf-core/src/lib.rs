//! # miniprintf-core
//!
//! An allocation-free implementation of the C `printf` family for targets
//! with little memory: a format-string interpreter, integer and
//! floating-point conversion with fixed scratch buffers, and a small set of
//! character sinks (bounded buffer, discard, console, callback).
//!
//! Arguments are passed as a slice of tagged [`Arg`] values, usually built
//! with [`fmt_args!`], and read in format-string order.
//!
//! ```
//! use miniprintf_core::{fmt_args, snprintf};
//!
//! let mut buf = [0u8; 16];
//! let n = snprintf(&mut buf, b"%05d|%#x", &fmt_args![-42, 255]);
//! assert_eq!(&buf[..n], b"-0042|0xff");
//! ```
//!
//! No `unsafe` code is permitted at the crate level.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod args;
pub mod config;
mod entry;
#[cfg(feature = "float")]
mod ftoa;
pub mod interpreter;
mod ntoa;
mod scratch;
pub mod sink;
pub mod spec;

pub use args::{Arg, ArgCursor};
#[cfg(feature = "std")]
pub use entry::printf;
pub use entry::{fctprintf, measure, printf_to, snprintf, sprintf};
pub use interpreter::vsnprintf;
#[cfg(feature = "std")]
pub use sink::StdoutConsole;
pub use sink::{BufferSink, CallbackSink, ConsoleSink, NullSink, Output, Putchar, Sink};
pub use spec::{Base, ConversionSpec, FormatFlags, parse_spec};
