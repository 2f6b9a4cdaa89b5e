//! Numeric and boolean to text conversion.
//!
//! Integer conversion extracts digits back to front into a stack buffer.
//! Real conversion emulates C's `%.*g` / `%.*f` pair, then canonicalizes:
//! locale decimal commas become periods, a bare integral rendering gains a
//! trailing `.0` so the text re-parses as a real, and fixed-point output is
//! trimmed of trailing zeros without ever producing a bare `"1."`.

use core::fmt::Write as _;

/// Significant digits used by the default real conversion.
///
/// 17 round-trips every finite `f64`.
pub const DEFAULT_REAL_PRECISION: u32 = 17;

/// How the `precision` argument of [`real_to_string_with`] is interpreted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PrecisionType {
    /// Total significant digits, like C's `%g`.
    SignificantDigits,
    /// Digits after the decimal point, like C's `%f`.
    DecimalPlaces,
}

// Enough for a sign plus 20 digits (u64::MAX has 20).
const INT_BUF_LEN: usize = 24;

fn digits(mut value: u64, buf: &mut [u8; INT_BUF_LEN]) -> usize {
    let mut pos = INT_BUF_LEN;
    loop {
        pos -= 1;
        buf[pos] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    pos
}

/// Converts an unsigned integer to decimal text.
#[must_use]
pub fn unsigned_to_string(value: u64) -> String {
    let mut buf = [0u8; INT_BUF_LEN];
    let pos = digits(value, &mut buf);
    // digits are ASCII
    String::from_utf8_lossy(&buf[pos..]).into_owned()
}

/// Converts a signed integer to decimal text.
///
/// `i64::MIN` is handled by negating in unsigned space, where its magnitude
/// is representable.
#[must_use]
pub fn integer_to_string(value: i64) -> String {
    let mut buf = [0u8; INT_BUF_LEN];
    if value >= 0 {
        let pos = digits(value as u64, &mut buf);
        String::from_utf8_lossy(&buf[pos..]).into_owned()
    } else {
        let magnitude = (value as u64).wrapping_neg();
        let mut pos = digits(magnitude, &mut buf);
        pos -= 1;
        buf[pos] = b'-';
        String::from_utf8_lossy(&buf[pos..]).into_owned()
    }
}

/// Converts a boolean to `"true"` / `"false"`.
#[must_use]
pub fn bool_to_string(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Converts a real to text with the defaults: strict special-float tokens
/// and [`DEFAULT_REAL_PRECISION`] significant digits.
#[must_use]
pub fn real_to_string(value: f64) -> String {
    real_to_string_with(
        value,
        false,
        DEFAULT_REAL_PRECISION,
        PrecisionType::SignificantDigits,
    )
}

/// Converts a real to text.
///
/// Non-finite values map to fixed tokens: `"NaN"` / `"-Infinity"` /
/// `"Infinity"` when `use_special_floats` is set, otherwise the
/// JSON-compatible `"null"` / `"-1e+9999"` / `"1e+9999"`.
#[must_use]
pub fn real_to_string_with(
    value: f64,
    use_special_floats: bool,
    precision: u32,
    precision_type: PrecisionType,
) -> String {
    if value.is_nan() {
        return if use_special_floats { "NaN" } else { "null" }.to_string();
    }
    if value.is_infinite() {
        return match (use_special_floats, value < 0.0) {
            (true, true) => "-Infinity",
            (true, false) => "Infinity",
            (false, true) => "-1e+9999",
            (false, false) => "1e+9999",
        }
        .to_string();
    }

    let mut buffer = match precision_type {
        PrecisionType::SignificantDigits => format_significant(value, precision),
        PrecisionType::DecimalPlaces => format!("{:.*}", precision as usize, value),
    };
    buffer = fix_numeric_locale(buffer);
    if !buffer.contains('.') && !buffer.contains('e') {
        buffer.push_str(".0");
    }
    if precision_type == PrecisionType::DecimalPlaces {
        fix_zeros_in_the_end(&mut buffer, precision);
    }
    buffer
}

/// `%.*g`: round to `precision` significant digits, drop trailing fraction
/// zeros, pick fixed or scientific notation by decimal exponent.
fn format_significant(value: f64, precision: u32) -> String {
    let precision = precision.max(1);
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let rendered = format!("{:.*e}", precision as usize - 1, value);
    let (mantissa, exponent) = rendered
        .split_once('e')
        .unwrap_or((rendered.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');

    if exponent < -4 || exponent >= precision as i32 {
        // C-style exponent: explicit sign, at least two digits.
        let mut out = String::with_capacity(mantissa.len() + 5);
        out.push_str(mantissa);
        out.push('e');
        out.push(if exponent < 0 { '-' } else { '+' });
        let _ = write!(out, "{:02}", exponent.abs());
        out
    } else {
        expand_fixed(mantissa, exponent)
    }
}

/// Rewrites a `d.ddd` mantissa with decimal exponent `exponent` in plain
/// fixed notation.
fn expand_fixed(mantissa: &str, exponent: i32) -> String {
    let negative = mantissa.starts_with('-');
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let point = exponent + 1;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if point <= 0 {
        out.push_str("0.");
        for _ in 0..-point {
            out.push('0');
        }
        out.push_str(&digits);
    } else if point as usize >= digits.len() {
        out.push_str(&digits);
        for _ in digits.len()..point as usize {
            out.push('0');
        }
    } else {
        out.push_str(&digits[..point as usize]);
        out.push('.');
        out.push_str(&digits[point as usize..]);
    }
    out
}

/// Undoes a comma decimal separator left by locale-sensitive formatting.
fn fix_numeric_locale(buffer: String) -> String {
    if buffer.contains(',') {
        buffer.replace(',', ".")
    } else {
        buffer
    }
}

/// Trims trailing zeros from fixed-point output.
///
/// A zero directly after the decimal point is kept (`"1.00"` becomes
/// `"1.0"`, never `"1."`), unless the requested precision was zero, in
/// which case the whole `".0"` tail goes (`"1.0"` becomes `"1"`).
fn fix_zeros_in_the_end(buffer: &mut String, precision: u32) {
    let bytes = buffer.as_bytes();
    let mut end = bytes.len();
    while end > 0 {
        if bytes[end - 1] != b'0' {
            break;
        }
        if end >= 2 && bytes[end - 2] == b'.' {
            if precision == 0 {
                end -= 2;
            }
            break;
        }
        end -= 1;
    }
    buffer.truncate(end);
}
