#![no_main]
use libfuzzer_sys::fuzz_target;
use miniprintf_core::{Arg, ArgCursor, FormatFlags, parse_spec};

fuzz_target!(|data: &[u8]| {
    let args = [Arg::Int(-3), Arg::Int(i64::from(i32::MIN))];
    let mut cursor = ArgCursor::new(&args);
    let (spec, consumed) = parse_spec(data, &mut cursor);

    assert!(consumed <= data.len());
    assert!(cursor.consumed() <= 2);
    if spec.conversion != 0 {
        assert_eq!(data[consumed - 1], spec.conversion);
    }
    if !spec.flags.contains(FormatFlags::PRECISION) {
        assert_eq!(spec.precision, 0);
    }
});
