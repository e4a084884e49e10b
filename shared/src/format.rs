use std::fmt::Write;

/// Placeholder for values that are absent or zero.
pub const MISSING: &str = "N/A";

/// en-US grouping with at most three fraction digits (e.g. `36605.6` -> `36,605.6`).
/// Zero and non-finite values render as [`MISSING`].
pub fn format_number(value: f64) -> String {
    let mut out = String::new();
    write_number(&mut out, value);
    out
}

pub fn write_number(buf: &mut String, value: f64) {
    buf.clear();
    if value == 0.0 || !value.is_finite() {
        buf.push_str(MISSING);
        return;
    }

    let thousandths = (value.abs() * 1000.0).round() as u64;
    let whole = thousandths / 1000;
    let frac = thousandths % 1000;

    if value < 0.0 {
        buf.push('-');
    }
    let digits = whole.to_string();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            buf.push(',');
        }
        buf.push(ch);
    }
    if frac > 0 {
        let mut fraction = String::with_capacity(3);
        let _ = write!(fraction, "{frac:03}");
        buf.push('.');
        buf.push_str(fraction.trim_end_matches('0'));
    }
}
