//! Lenient number parsing for hand-edited CSV cells.
//!
//! Bank exports and mapping sheets carry values like `"$1,234.50"`,
//! `" 12.5 USD"` or `"85%"`. Both parsers read the leading number and ignore
//! whatever trails it; anything without a leading number is `None`.

use regex::Regex;
use std::sync::OnceLock;

fn float_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("invalid float regex")
    })
}

fn int_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?\d+").expect("invalid int regex"))
}

/// Parse the leading decimal number of `raw`.
///
/// Currency symbols and thousands separators are stripped first.
pub fn lenient_float(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '€' | '£'))
        .collect();
    let m = float_re().find(cleaned.trim_start())?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse the leading integer of `raw` (`"85%"` → 85).
pub fn lenient_int(raw: &str) -> Option<i64> {
    let m = int_re().find(raw.trim())?;
    m.as_str().parse().ok()
}
