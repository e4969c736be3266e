//! Host libc fixture capture.
//!
//! Replays fixture cases through the host `snprintf` and records what it
//! stores and returns as the expected values. C varargs are typed at the
//! call site, so the format is scanned first to learn the C type of every
//! argument; the call itself is expanded from a closed set of type
//! combinations of up to [`CAPTURE_MAX_ARGS`] arguments.

use std::ffi::{CString, c_char, c_double, c_int, c_long, c_longlong, c_void};

use miniprintf_core::{ArgCursor, FormatFlags, parse_spec};

use crate::error::HarnessError;
use crate::fixtures::{FixtureArg, FixtureCase, FixtureSet};

/// Most varargs a captured case may pass.
pub const CAPTURE_MAX_ARGS: usize = 3;

/// C type a conversion (or a `*` field) reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CType {
    Int,
    Long,
    LongLong,
    Double,
    Str,
    Ptr,
}

/// The C argument types `format` reads, in order.
pub fn c_signature(format: &[u8]) -> Result<Vec<CType>, String> {
    let mut signature = Vec::new();
    let mut cursor = ArgCursor::new(&[]);
    let mut pos = 0;

    while let Some(&ch) = format.get(pos) {
        if ch == 0 {
            break;
        }
        pos += 1;
        if ch != b'%' {
            continue;
        }

        let stars_before = cursor.consumed();
        let (spec, consumed) = parse_spec(&format[pos..], &mut cursor);
        pos += consumed;
        signature.extend((stars_before..cursor.consumed()).map(|_| CType::Int));

        let ty = match spec.conversion {
            0 => break,
            b'%' => continue,
            b'c' => CType::Int,
            b'd' | b'i' | b'u' | b'x' | b'X' | b'o' | b'b' => {
                if spec.flags.contains(FormatFlags::LONG_LONG) {
                    CType::LongLong
                } else if spec.flags.contains(FormatFlags::LONG) {
                    CType::Long
                } else {
                    CType::Int
                }
            }
            b'f' | b'F' | b'e' | b'E' | b'g' | b'G' => CType::Double,
            b's' => CType::Str,
            b'p' => CType::Ptr,
            other => return Err(format!("conversion '%{}' is not portable", other as char)),
        };
        signature.push(ty);
    }
    Ok(signature)
}

#[derive(Debug, Clone, Copy)]
enum CArg {
    Int(c_int),
    Long(c_long),
    LongLong(c_longlong),
    Double(c_double),
    Str(*const c_char),
    Ptr(*const c_void),
}

fn nul_terminated(bytes: &[u8]) -> CString {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let mut owned = bytes[..end].to_vec();
    owned.push(0);
    CString::from_vec_with_nul(owned).unwrap_or_default()
}

/// Pair every fixture argument with the C type the format reads it as.
/// String storage is pushed onto `strings`, which must outlive the call.
fn lower_args(
    case: &FixtureCase,
    signature: &[CType],
    strings: &mut Vec<CString>,
) -> Result<Vec<CArg>, String> {
    if signature.len() != case.args.len() {
        return Err(format!(
            "format reads {} arguments but the case supplies {}",
            signature.len(),
            case.args.len()
        ));
    }
    if signature.len() > CAPTURE_MAX_ARGS {
        return Err(format!("more than {CAPTURE_MAX_ARGS} arguments"));
    }

    signature
        .iter()
        .zip(&case.args)
        .map(|(ty, arg)| {
            let lowered = match (ty, arg) {
                (CType::Int, FixtureArg::Int(v)) => CArg::Int(*v as c_int),
                (CType::Int, FixtureArg::Uint(v)) => CArg::Int(*v as c_int),
                (CType::Long, FixtureArg::Int(v)) => CArg::Long(*v as c_long),
                (CType::Long, FixtureArg::Uint(v)) => CArg::Long(*v as c_long),
                (CType::LongLong, FixtureArg::Int(v)) => CArg::LongLong(*v as c_longlong),
                (CType::LongLong, FixtureArg::Uint(v)) => CArg::LongLong(*v as c_longlong),
                (CType::Double, FixtureArg::Double(v)) => CArg::Double(*v),
                (CType::Str, FixtureArg::Str(s)) => {
                    let owned = nul_terminated(s.as_bytes());
                    let ptr = owned.as_ptr();
                    strings.push(owned);
                    CArg::Str(ptr)
                }
                (CType::Str, FixtureArg::NullStr) => CArg::Str(std::ptr::null()),
                (CType::Ptr, FixtureArg::Ptr(p)) => CArg::Ptr(*p as usize as *const c_void),
                (CType::Ptr, FixtureArg::NullStr) => CArg::Ptr(std::ptr::null()),
                (ty, arg) => return Err(format!("argument {arg} cannot be passed as {ty:?}")),
            };
            Ok(lowered)
        })
        .collect()
}

/// Expand a variadic `snprintf` call over the runtime type of each
/// argument, binding each one to the caller-supplied name.
macro_rules! host_snprintf {
    ($buf:expr, $cap:expr, $fmt:expr; [$($bound:expr),*];) => {
        libc::snprintf($buf, $cap, $fmt $(, $bound)*)
    };
    ($buf:expr, $cap:expr, $fmt:expr; [$($bound:expr),*]; $name:ident = $head:expr $(, $rest_name:ident = $rest:expr)*) => {
        match $head {
            CArg::Int($name) => host_snprintf!($buf, $cap, $fmt; [$($bound,)* $name]; $($rest_name = $rest),*),
            CArg::Long($name) => host_snprintf!($buf, $cap, $fmt; [$($bound,)* $name]; $($rest_name = $rest),*),
            CArg::LongLong($name) => host_snprintf!($buf, $cap, $fmt; [$($bound,)* $name]; $($rest_name = $rest),*),
            CArg::Double($name) => host_snprintf!($buf, $cap, $fmt; [$($bound,)* $name]; $($rest_name = $rest),*),
            CArg::Str($name) => host_snprintf!($buf, $cap, $fmt; [$($bound,)* $name]; $($rest_name = $rest),*),
            CArg::Ptr($name) => host_snprintf!($buf, $cap, $fmt; [$($bound,)* $name]; $($rest_name = $rest),*),
        }
    };
}

fn call_host(format: &CString, args: &[CArg], capacity: usize) -> Result<(Vec<u8>, usize), String> {
    let mut buf = vec![0 as c_char; capacity];
    let ptr = buf.as_mut_ptr();
    let fmt = format.as_ptr();

    // SAFETY: `buf` holds `capacity` bytes, `fmt` is NUL-terminated, every
    // string pointer in `args` refers to a live `CString` (or is null, which
    // glibc prints as "(null)"), and the vararg types come from the format.
    let returned = unsafe {
        match *args {
            [] => libc::snprintf(ptr, capacity, fmt),
            [a] => host_snprintf!(ptr, capacity, fmt; []; x = a),
            [a, b] => host_snprintf!(ptr, capacity, fmt; []; x = a, y = b),
            [a, b, c] => host_snprintf!(ptr, capacity, fmt; []; x = a, y = b, z = c),
            _ => return Err(format!("more than {CAPTURE_MAX_ARGS} arguments")),
        }
    };

    let returned = usize::try_from(returned).map_err(|_| "host snprintf failed".to_string())?;
    let stored = returned.min(capacity.saturating_sub(1));
    Ok((buf[..stored].iter().map(|&c| c as u8).collect(), returned))
}

/// Run one case against the host and return it with the host's output and
/// return value as the expectations.
pub fn capture_case(case: &FixtureCase) -> Result<FixtureCase, HarnessError> {
    let unsupported = |reason: String| HarnessError::UnsupportedCase {
        case: case.name.clone(),
        reason,
    };

    let format = nul_terminated(case.format.as_bytes());
    let signature = c_signature(format.as_bytes()).map_err(unsupported)?;
    let mut strings = Vec::new();
    let args = lower_args(case, &signature, &mut strings).map_err(unsupported)?;
    let (stored, returned) = call_host(&format, &args, case.capacity()).map_err(unsupported)?;
    drop(strings);

    let expected_output = String::from_utf8(stored)
        .map_err(|_| unsupported("host output is not UTF-8".to_string()))?;
    Ok(FixtureCase {
        expected_output,
        expected_return: returned,
        ..case.clone()
    })
}

/// Capture every case of `set`, stamping the result with `captured_at`.
pub fn capture_set(set: &FixtureSet, captured_at: &str) -> Result<FixtureSet, HarnessError> {
    let cases = set
        .cases
        .iter()
        .map(capture_case)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FixtureSet {
        version: set.version.clone(),
        family: set.family.clone(),
        captured_at: captured_at.to_string(),
        cases,
    })
}
