//! Floating point to ASCII: `%f`, and with the `exponential` feature `%e`
//! and `%g`.
//!
//! A finite value is split into an integral and a fractional part, both
//! held in `i64`, with the fractional part scaled by `10^precision`. That is
//! why precision is capped at [`MAX_SUPPORTED_PRECISION`] (excess digits are
//! emitted as zeros) and why `%f` hands values beyond
//! [`FLOAT_NOTATION_THRESHOLD`] to exponential notation.

use crate::config::{
    DEFAULT_FLOAT_PRECISION, FLOAT_NOTATION_THRESHOLD, FTOA_BUFFER_SIZE, MAX_SUPPORTED_PRECISION,
    POWERS_OF_10,
};
use crate::scratch::Scratch;
use crate::sink::{Output, Sink};
use crate::spec::FormatFlags;

type Digits = Scratch<FTOA_BUFFER_SIZE>;

/// A finite value broken into base-10 parts, rounded to some precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DoubleComponents {
    integral: i64,
    /// Digits after the point, scaled by `10^precision`.
    fractional: i64,
    is_negative: bool,
}

#[inline]
fn pow10(exp: u32) -> f64 {
    POWERS_OF_10[(exp as usize).min(POWERS_OF_10.len() - 1)]
}

/// Split `number` at the decimal point, rounding the fractional part to
/// `precision` digits half-to-even.
fn get_components(number: f64, precision: u32) -> DoubleComponents {
    let is_negative = number.is_sign_negative();
    let abs = if is_negative { -number } else { number };
    let mut integral = abs as i64;

    if precision == 0 {
        let remainder = abs - integral as f64;
        if remainder > 0.5 || (remainder == 0.5 && integral & 1 == 1) {
            integral += 1;
        }
        return DoubleComponents {
            integral,
            fractional: 0,
            is_negative,
        };
    }

    let scale = pow10(precision);
    let mut remainder = (abs - integral as f64) * scale;
    let mut fractional = remainder as i64;
    remainder -= fractional as f64;

    let round_up = remainder > 0.5 || (remainder == 0.5 && (fractional == 0 || fractional & 1 == 1));
    if round_up {
        fractional += 1;
        // 0.99 at precision 1 is 1.0
        if fractional as f64 >= scale {
            fractional = 0;
            integral += 1;
        }
    }

    DoubleComponents {
        integral,
        fractional,
        is_negative,
    }
}

fn push_sign(digits: &mut Digits, negative: bool, flags: FormatFlags) {
    if negative {
        digits.push(b'-');
    } else if flags.contains(FormatFlags::PLUS) {
        digits.push(b'+');
    } else if flags.contains(FormatFlags::SPACE) {
        digits.push(b' ');
    }
}

/// Split a requested precision into the fraction digits an `i64` can carry
/// and the zeros written after them.
fn split_precision(precision: u32) -> (u32, u32) {
    (
        precision.min(MAX_SUPPORTED_PRECISION),
        precision.saturating_sub(MAX_SUPPORTED_PRECISION),
    )
}

/// Emit `[sign]integral[.fraction]` followed by `trailing_zeros` zeros for
/// precision beyond what `fractional` carries. `width` covers all of it.
fn print_broken_up_decimal<S: Sink + ?Sized>(
    out: &mut Output<'_, S>,
    number: DoubleComponents,
    precision: u32,
    full_width: u32,
    flags: FormatFlags,
    trailing_zeros: u32,
) {
    let mut digits = Digits::new();
    let mut width = full_width.saturating_sub(trailing_zeros);
    let mut integral = number.integral;
    let mut fractional = number.fractional;
    let trim_zeros =
        flags.contains(FormatFlags::ADAPT_EXP) && !flags.contains(FormatFlags::HASH);

    if precision != 0 {
        let mut count = precision;
        if trim_zeros && fractional > 0 {
            while fractional % 10 == 0 {
                count -= 1;
                fractional /= 10;
            }
        }
        // `%g` drops the point too when nothing non-zero follows it.
        if fractional > 0 || !trim_zeros {
            while !digits.is_full() {
                count = count.saturating_sub(1);
                digits.push(b'0' + (fractional % 10) as u8);
                fractional /= 10;
                if fractional == 0 {
                    break;
                }
            }
            while !digits.is_full() && count > 0 {
                count -= 1;
                digits.push(b'0');
            }
            digits.push(b'.');
        }
    } else if flags.contains(FormatFlags::HASH) {
        digits.push(b'.');
    }

    while !digits.is_full() {
        digits.push(b'0' + (integral % 10) as u8);
        integral /= 10;
        if integral == 0 {
            break;
        }
    }

    if !flags.contains(FormatFlags::LEFT) && flags.contains(FormatFlags::ZEROPAD) {
        let has_sign_column =
            number.is_negative || flags.intersects(FormatFlags::PLUS | FormatFlags::SPACE);
        if width > 0 && has_sign_column {
            width -= 1;
        }
        while digits.len() < width as usize && !digits.is_full() {
            digits.push(b'0');
        }
    }

    push_sign(&mut digits, number.is_negative, flags);

    if flags.contains(FormatFlags::LEFT) {
        let start = out.position();
        out.put_reversed(digits.as_slice(), 0, flags);
        out.pad(b'0', trailing_zeros as usize);
        out.pad(b' ', (full_width as usize).saturating_sub(out.position() - start));
    } else {
        out.put_reversed(digits.as_slice(), width, flags);
        out.pad(b'0', trailing_zeros as usize);
    }
}

/// Render `value` as `%f` (or `%e`/`%g` when `prefer_exponential`).
///
/// Without the `exponential` feature, a `%f` value beyond
/// [`FLOAT_NOTATION_THRESHOLD`] produces no output.
pub(crate) fn format_float<S: Sink + ?Sized>(
    out: &mut Output<'_, S>,
    value: f64,
    precision: u32,
    width: u32,
    flags: FormatFlags,
    prefer_exponential: bool,
) {
    if value.is_nan() {
        out.put_justified(b"nan".iter().copied(), width, flags);
        return;
    }
    if value < -f64::MAX {
        out.put_justified(b"-inf".iter().copied(), width, flags);
        return;
    }
    if value > f64::MAX {
        let text: &[u8] = if flags.contains(FormatFlags::PLUS) {
            b"+inf"
        } else {
            b"inf"
        };
        out.put_justified(text.iter().copied(), width, flags);
        return;
    }

    let precision = if flags.contains(FormatFlags::PRECISION) {
        precision
    } else {
        DEFAULT_FLOAT_PRECISION
    };

    let beyond_threshold = value > FLOAT_NOTATION_THRESHOLD || value < -FLOAT_NOTATION_THRESHOLD;

    #[cfg(feature = "exponential")]
    {
        if prefer_exponential || beyond_threshold {
            exponential::print_exponential(out, value, precision, width, flags);
            return;
        }
    }
    #[cfg(not(feature = "exponential"))]
    {
        let _ = prefer_exponential;
        if beyond_threshold {
            return;
        }
    }

    let (precision, trailing_zeros) = split_precision(precision);
    let components = get_components(value, precision);
    print_broken_up_decimal(out, components, precision, width, flags, trailing_zeros);
}

#[cfg(feature = "exponential")]
mod exponential {
    use super::{
        DoubleComponents, get_components, pow10, print_broken_up_decimal, split_precision,
    };
    use crate::config::POWERS_OF_10;
    use crate::ntoa::format_integer;
    use crate::sink::{Output, Sink};
    use crate::spec::{Base, FormatFlags};

    const MANTISSA_MASK: u64 = (1 << 52) - 1;
    const EXPONENT_BIAS: i32 = 1023;

    /// Unbiased binary exponent.
    fn exp2_of(value: f64) -> i32 {
        ((value.to_bits() >> 52) & 0x7ff) as i32 - EXPONENT_BIAS
    }

    fn covered_by_table(exp10: i32) -> bool {
        (exp10.unsigned_abs() as usize) < POWERS_OF_10.len()
    }

    /// `x >= 10^exp10`, exact for exponents in the table.
    fn at_least_pow10(x: f64, exp10: i32) -> bool {
        if exp10 >= 0 {
            x >= pow10(exp10 as u32)
        } else {
            x * pow10(exp10.unsigned_abs()) >= 1.0
        }
    }

    /// How to bring a value into `[1, 10)`: multiply by `raw_factor`, or
    /// divide by it.
    #[derive(Debug, Clone, Copy)]
    struct ScalingFactor {
        raw_factor: f64,
        multiply: bool,
    }

    impl ScalingFactor {
        fn apply(self, num: f64) -> f64 {
            if self.multiply {
                num * self.raw_factor
            } else {
                num / self.raw_factor
            }
        }

        fn unapply(self, normalized: f64) -> f64 {
            if self.multiply {
                normalized / self.raw_factor
            } else {
                normalized * self.raw_factor
            }
        }

        /// Fold an extra multiplicative factor in, dividing the larger of
        /// the two magnitudes by the smaller to stay in range.
        fn update(self, extra: f64) -> Self {
            if self.multiply {
                return Self {
                    raw_factor: self.raw_factor * extra,
                    multiply: true,
                };
            }
            if exp2_of(self.raw_factor).abs() > exp2_of(extra).abs() {
                Self {
                    raw_factor: self.raw_factor / extra,
                    multiply: false,
                }
            } else {
                Self {
                    raw_factor: extra / self.raw_factor,
                    multiply: true,
                }
            }
        }
    }

    /// Components of `non_normalized` scaled into `[1, 10)`, fraction
    /// rounded half-to-even.
    fn get_normalized_components(
        negative: bool,
        precision: u32,
        non_normalized: f64,
        normalization: ScalingFactor,
    ) -> DoubleComponents {
        let mut integral = normalization.apply(non_normalized) as i64;
        let remainder = non_normalized - normalization.unapply(integral as f64);
        let precision_scale = pow10(precision);
        let mut scaled_remainder = normalization.update(precision_scale).apply(remainder);

        let fractional = if precision == 0 {
            if scaled_remainder >= 0.5 {
                integral += 1;
            }
            if scaled_remainder == 0.5 {
                integral &= !1;
            }
            0
        } else {
            let mut fractional = scaled_remainder as i64;
            scaled_remainder -= fractional as f64;
            if scaled_remainder >= 0.5 {
                fractional += 1;
            }
            if scaled_remainder == 0.5 {
                fractional &= !1;
            }
            if fractional as f64 >= precision_scale {
                fractional = 0;
                integral += 1;
            }
            fractional
        };

        DoubleComponents {
            integral,
            fractional,
            is_negative: negative,
        }
    }

    /// Approximate `floor(log10(abs))` and `10^exp10` for a finite non-zero
    /// `abs`, from its binary exponent and a series around 1.5 (after
    /// David Gay's dtoa).
    fn estimate_exp10(abs: f64) -> (i32, f64) {
        let bits = abs.to_bits();
        let exp2 = exp2_of(abs);
        let mantissa = f64::from_bits((bits & MANTISSA_MASK) | ((EXPONENT_BIAS as u64) << 52));

        let mut exp10 = (0.1760912590558
            + f64::from(exp2) * 0.301029995663981
            + (mantissa - 1.5) * 0.289529654602168) as i32;

        // 10^exp10 = 2^exp2 * e^z, with e^z from a continued fraction.
        let exp2 = (f64::from(exp10) * 3.321928094887362 + 0.5) as i32;
        let z = f64::from(exp10) * 2.302585092994046 - f64::from(exp2) * 0.6931471805599453;
        let z2 = z * z;
        let biased = (exp2 + EXPONENT_BIAS).max(0) as u64;
        let mut power = f64::from_bits(biased << 52);
        power *= 1.0 + 2.0 * z / (2.0 - z + (z2 / (6.0 + (z2 / (10.0 + z2 / 14.0)))));

        if abs < power {
            exp10 -= 1;
            power /= 10.0;
        }
        (exp10, power)
    }

    /// `%e`, and `%g` when `ADAPT_EXP` is set (which may fall back to plain
    /// decimal notation). `precision` is as requested, before any cap.
    pub(super) fn print_exponential<S: Sink + ?Sized>(
        out: &mut Output<'_, S>,
        number: f64,
        precision: u32,
        width: u32,
        mut flags: FormatFlags,
    ) {
        let negative = number.is_sign_negative();
        let abs = if negative { -number } else { number };

        let mut exp10 = 0;
        let mut normalization = ScalingFactor {
            raw_factor: 1.0,
            multiply: false,
        };
        let mut covered = true;
        if abs != 0.0 {
            let (estimate, power) = estimate_exp10(abs);
            exp10 = estimate;
            // The estimate can be off by one near exact powers of ten.
            if covered_by_table(exp10)
                && covered_by_table(exp10 + 1)
                && at_least_pow10(abs, exp10 + 1)
            {
                exp10 += 1;
            } else if covered_by_table(exp10)
                && covered_by_table(exp10 - 1)
                && !at_least_pow10(abs, exp10)
            {
                exp10 -= 1;
            }
            covered = covered_by_table(exp10);
            normalization.raw_factor = if covered {
                pow10(exp10.unsigned_abs())
            } else {
                power
            };
        }

        let adaptive = flags.contains(FormatFlags::ADAPT_EXP);
        // `%g` precision counts significant digits, at least one.
        let significant = precision.max(1);
        let keep_zeros = flags.contains(FormatFlags::HASH);
        // Fraction digits for `%g`: one significant digit sits before the
        // point in exponential form, `exp10 + 1` of them in decimal form.
        let adaptive_precision = move |decimal_only: bool, exp10: i32| {
            let fraction = if decimal_only {
                i64::from(significant) - 1 - i64::from(exp10)
            } else {
                i64::from(significant) - 1
            };
            let (capped, excess) = split_precision(fraction.max(0) as u32);
            // Without `#` the zeros past the cap would be trimmed anyway.
            if keep_zeros {
                (capped, excess)
            } else {
                (capped, 0)
            }
        };

        let mut decimal_only = false;
        let (mut precision, mut trailing_zeros) = if adaptive {
            decimal_only = exp10 >= -4 && i64::from(exp10) < i64::from(significant);
            flags |= FormatFlags::PRECISION;
            adaptive_precision(decimal_only, exp10)
        } else {
            split_precision(precision)
        };

        normalization.multiply = exp10 < 0 && covered;
        let mut components = if decimal_only || exp10 == 0 {
            get_components(number, precision)
        } else {
            get_normalized_components(negative, precision, abs, normalization)
        };

        // Rounding can carry into a new digit: 9.99 -> 10.0. For `%g` the
        // new exponent may also move the value to the other notation.
        if decimal_only {
            if exp10 >= -1 && components.integral as f64 == pow10((exp10 + 1) as u32) {
                exp10 += 1;
                if i64::from(exp10) >= i64::from(significant) {
                    decimal_only = false;
                    (precision, trailing_zeros) = adaptive_precision(false, exp10);
                    components.integral = 1;
                    components.fractional = 0;
                } else {
                    (precision, trailing_zeros) = adaptive_precision(true, exp10);
                }
            }
        } else if components.integral >= 10 {
            exp10 += 1;
            if adaptive && exp10 == -4 {
                decimal_only = true;
                (precision, trailing_zeros) = adaptive_precision(true, exp10);
                components = get_components(number, precision);
            } else {
                components.integral = 1;
                components.fractional = 0;
            }
        }

        // "e+dd", or "e+ddd" for three-digit exponents.
        let exp_width: u32 = if decimal_only {
            0
        } else if exp10 > -100 && exp10 < 100 {
            4
        } else {
            5
        };

        let decimal_width = if flags.contains(FormatFlags::LEFT) && exp_width != 0 {
            0
        } else if width > exp_width {
            width - exp_width
        } else {
            0
        };

        let start = out.position();
        print_broken_up_decimal(
            out,
            components,
            precision,
            decimal_width,
            flags,
            trailing_zeros,
        );

        if !decimal_only {
            out.put(if flags.contains(FormatFlags::UPPERCASE) {
                b'E'
            } else {
                b'e'
            });
            format_integer(
                out,
                u64::from(exp10.unsigned_abs()),
                exp10 < 0,
                Base::Decimal,
                0,
                exp_width - 1,
                FormatFlags::ZEROPAD | FormatFlags::PLUS,
            );
            if flags.contains(FormatFlags::LEFT) {
                let used = out.position() - start;
                out.pad(b' ', (width as usize).saturating_sub(used));
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::BufferSink;

    fn render(
        value: f64,
        precision: Option<u32>,
        width: u32,
        mut flags: FormatFlags,
        exponential: bool,
    ) -> ([u8; 80], usize) {
        let mut buf = [0u8; 80];
        let mut sink = BufferSink::new(&mut buf);
        let mut out = Output::new(&mut sink, 80);
        if precision.is_some() {
            flags |= FormatFlags::PRECISION;
        }
        format_float(
            &mut out,
            value,
            precision.unwrap_or(0),
            width,
            flags,
            exponential,
        );
        let n = out.position();
        (buf, n)
    }

    fn fixed(value: f64, precision: Option<u32>, width: u32, flags: FormatFlags) -> String {
        let (buf, n) = render(value, precision, width, flags, false);
        String::from_utf8_lossy(&buf[..n]).into_owned()
    }

    #[test]
    fn components_round_half_to_even_at_zero_precision() {
        assert_eq!(get_components(2.5, 0).integral, 2);
        assert_eq!(get_components(3.5, 0).integral, 4);
        assert_eq!(get_components(0.5, 0).integral, 0);
        assert_eq!(get_components(0.7, 0).integral, 1);
    }

    #[test]
    fn components_carry_fraction_into_integral() {
        let c = get_components(0.95, 1);
        assert_eq!((c.integral, c.fractional), (1, 0));
        let c = get_components(-3.14159, 3);
        assert_eq!((c.integral, c.fractional, c.is_negative), (3, 142, true));
    }

    #[test]
    fn default_precision_is_six() {
        assert_eq!(fixed(3.14159, None, 0, FormatFlags::empty()), "3.141590");
        assert_eq!(fixed(1.0 / 3.0, None, 0, FormatFlags::empty()), "0.333333");
    }

    #[test]
    fn rounds_to_requested_precision() {
        assert_eq!(fixed(0.005, Some(2), 0, FormatFlags::empty()), "0.01");
        assert_eq!(fixed(0.25, Some(1), 0, FormatFlags::empty()), "0.2");
        assert_eq!(fixed(0.95, Some(1), 0, FormatFlags::empty()), "1.0");
        assert_eq!(fixed(1.5, Some(0), 0, FormatFlags::empty()), "2");
    }

    #[test]
    fn sign_and_padding() {
        assert_eq!(fixed(-3.14159, Some(3), 10, FormatFlags::empty()), "    -3.142");
        assert_eq!(fixed(3.14159, Some(2), 10, FormatFlags::LEFT), "3.14      ");
        assert_eq!(fixed(-3.5, Some(2), 10, FormatFlags::ZEROPAD), "-000003.50");
        assert_eq!(fixed(1.0, None, 0, FormatFlags::PLUS), "+1.000000");
        assert_eq!(fixed(1.0, None, 0, FormatFlags::SPACE), " 1.000000");
        assert_eq!(fixed(-0.0, None, 0, FormatFlags::empty()), "-0.000000");
    }

    #[test]
    fn hash_keeps_point_at_zero_precision() {
        assert_eq!(fixed(3.0, Some(0), 0, FormatFlags::HASH), "3.");
    }

    #[test]
    fn special_values() {
        assert_eq!(fixed(f64::NAN, None, 0, FormatFlags::empty()), "nan");
        assert_eq!(fixed(f64::NAN, None, 5, FormatFlags::empty()), "  nan");
        assert_eq!(fixed(f64::INFINITY, None, 0, FormatFlags::empty()), "inf");
        assert_eq!(fixed(f64::INFINITY, None, 0, FormatFlags::PLUS), "+inf");
        assert_eq!(fixed(f64::NEG_INFINITY, None, 0, FormatFlags::empty()), "-inf");
        assert_eq!(fixed(f64::INFINITY, None, 6, FormatFlags::LEFT), "inf   ");
    }

    #[test]
    fn excess_precision_becomes_trailing_zeros() {
        let none = FormatFlags::empty();
        assert_eq!(fixed(0.5, Some(20), 0, none), "0.50000000000000000000");
        assert_eq!(fixed(1.5, Some(40), 0, none), format!("1.5{}", "0".repeat(39)));
        assert_eq!(fixed(-1.5, Some(30), 0, none), format!("-1.5{}", "0".repeat(29)));
        assert_eq!(fixed(1.0, Some(60), 0, none), format!("1.{}", "0".repeat(60)));
    }

    #[test]
    fn excess_precision_counts_toward_width() {
        assert_eq!(
            fixed(1.5, Some(20), 25, FormatFlags::empty()),
            "   1.50000000000000000000"
        );
        assert_eq!(
            fixed(1.5, Some(20), 25, FormatFlags::LEFT),
            "1.50000000000000000000   "
        );
        assert_eq!(
            fixed(-1.5, Some(20), 25, FormatFlags::ZEROPAD),
            "-001.50000000000000000000"
        );
    }

    #[test]
    fn large_values_below_threshold_stay_decimal() {
        assert_eq!(
            fixed(999_999_999.5, None, 0, FormatFlags::empty()),
            "999999999.500000"
        );
    }

    #[cfg(feature = "exponential")]
    #[test]
    fn values_past_threshold_switch_to_exponential() {
        assert_eq!(fixed(1e10, None, 0, FormatFlags::empty()), "1.000000e+10");
        assert_eq!(fixed(-1e10, Some(3), 0, FormatFlags::empty()), "-1.000e+10");
        assert_eq!(
            fixed(-1e9, Some(3), 0, FormatFlags::empty()),
            "-1000000000.000"
        );
    }

    #[cfg(not(feature = "exponential"))]
    #[test]
    fn values_past_threshold_render_nothing() {
        assert_eq!(fixed(1e10, None, 0, FormatFlags::empty()), "");
    }

    #[cfg(feature = "exponential")]
    fn exp(value: f64, precision: Option<u32>, width: u32, flags: FormatFlags) -> String {
        let (buf, n) = render(value, precision, width, flags, true);
        String::from_utf8_lossy(&buf[..n]).into_owned()
    }

    #[cfg(feature = "exponential")]
    #[test]
    fn exponential_notation() {
        let none = FormatFlags::empty();
        assert_eq!(exp(12345.678, None, 0, none), "1.234568e+04");
        assert_eq!(exp(0.0, None, 0, none), "0.000000e+00");
        assert_eq!(exp(1e-10, None, 0, none), "1.000000e-10");
        assert_eq!(exp(1.5e300, None, 0, FormatFlags::UPPERCASE), "1.500000E+300");
        assert_eq!(exp(9.9999999, None, 0, none), "1.000000e+01");
        assert_eq!(exp(9.999, Some(2), 0, none), "1.00e+01");
        assert_eq!(exp(2.5, Some(0), 0, none), "2e+00");
        assert_eq!(exp(1e17, None, 0, none), "1.000000e+17");
        assert_eq!(exp(1e18, None, 0, none), "1.000000e+18");
        assert_eq!(exp(123e-20, None, 0, none), "1.230000e-18");
        assert_eq!(exp(1.5, Some(20), 0, none), "1.50000000000000000000e+00");
    }

    #[cfg(feature = "exponential")]
    #[test]
    fn exponential_width_applies_to_whole_field() {
        assert_eq!(exp(3.14159, Some(4), 12, FormatFlags::empty()), "  3.1416e+00");
        assert_eq!(exp(3.14159, Some(4), 12, FormatFlags::LEFT), "3.1416e+00  ");
        assert_eq!(exp(3.14159, Some(4), 12, FormatFlags::ZEROPAD), "003.1416e+00");
        assert_eq!(exp(-12.5, Some(2), 15, FormatFlags::empty()), "      -1.25e+01");
    }

    #[cfg(feature = "exponential")]
    #[test]
    fn adaptive_notation() {
        let g = FormatFlags::ADAPT_EXP;
        assert_eq!(exp(100_000.0, None, 0, g), "100000");
        assert_eq!(exp(1e6, None, 0, g), "1e+06");
        assert_eq!(exp(0.0001, None, 0, g), "0.0001");
        assert_eq!(exp(0.00001, None, 0, g), "1e-05");
        assert_eq!(exp(1_234_567.0, None, 0, g), "1.23457e+06");
        assert_eq!(exp(9.9999999, None, 0, g), "10");
        assert_eq!(exp(0.0, None, 0, g), "0");
        assert_eq!(exp(0.5, None, 0, g), "0.5");
        assert_eq!(exp(1e100, None, 0, g), "1e+100");
        assert_eq!(exp(0.0001234, Some(3), 0, g), "0.000123");
        assert_eq!(exp(1234.5, Some(3), 0, g), "1.23e+03");
        assert_eq!(exp(1.0 / 3.0, Some(10), 0, g), "0.3333333333");
        assert_eq!(exp(1e-10, None, 0, g | FormatFlags::UPPERCASE), "1E-10");
    }

    #[cfg(feature = "exponential")]
    #[test]
    fn adaptive_zero_precision_means_one_significant_digit() {
        let g = FormatFlags::ADAPT_EXP;
        assert_eq!(exp(0.5, Some(0), 0, g), "0.5");
        assert_eq!(exp(0.05, Some(0), 0, g), "0.05");
        assert_eq!(exp(9.5, Some(0), 0, g), "1e+01");
    }

    #[cfg(feature = "exponential")]
    #[test]
    fn adaptive_precision_beyond_cap_counts_significant_digits() {
        let g = FormatFlags::ADAPT_EXP;
        assert_eq!(exp(1e6, Some(18), 0, g), "1000000");
        assert_eq!(exp(0.5, Some(20), 0, g), "0.5");
        assert_eq!(exp(0.5, Some(20), 0, g | FormatFlags::HASH), "0.50000000000000000000");
    }

    #[cfg(feature = "exponential")]
    #[test]
    fn adaptive_rounding_carry_rechecks_notation() {
        let g = FormatFlags::ADAPT_EXP;
        assert_eq!(exp(999_999.5, None, 0, g), "1e+06");
        assert_eq!(exp(99.5, Some(2), 0, g), "1e+02");
        assert_eq!(exp(99.5, Some(2), 0, g | FormatFlags::HASH), "1.0e+02");
        assert_eq!(exp(9.9999999e-5, None, 0, g), "0.0001");
    }

    #[cfg(feature = "exponential")]
    #[test]
    fn adaptive_notation_with_hash_keeps_zeros() {
        assert_eq!(exp(1.0, None, 0, FormatFlags::ADAPT_EXP | FormatFlags::HASH), "1.00000");
    }
}
