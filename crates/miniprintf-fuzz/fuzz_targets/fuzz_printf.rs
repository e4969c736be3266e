#![no_main]
use libfuzzer_sys::fuzz_target;
use miniprintf_core::{Arg, measure, snprintf};

const SMALL: usize = 16;
const LARGE: usize = 4096;

fuzz_target!(|data: &[u8]| {
    // First byte: how many 8-byte argument words follow; the rest is the format.
    let Some((&count, rest)) = data.split_first() else {
        return;
    };
    let count = usize::from(count % 8).min(rest.len() / 8);
    let (words, format) = rest.split_at(count * 8);

    let args: Vec<Arg<'_>> = words
        .chunks_exact(8)
        .enumerate()
        .map(|(i, chunk)| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            let bits = u64::from_le_bytes(raw);
            match i % 4 {
                0 => Arg::Int(bits as i64),
                1 => Arg::Double(f64::from_bits(bits)),
                2 => Arg::Str(Some(chunk)),
                _ => Arg::Uint(bits),
            }
        })
        .collect();

    let total = measure(format, &args);

    let mut large = vec![0u8; LARGE];
    let n = snprintf(&mut large, format, &args);
    assert_eq!(n, total);

    let mut small = [0xAAu8; SMALL];
    let m = snprintf(&mut small, format, &args);
    assert_eq!(m, total);

    let kept = total.min(SMALL - 1);
    assert_eq!(small[kept], 0);
    if total < LARGE {
        assert_eq!(&small[..kept], &large[..kept]);
    }
});
