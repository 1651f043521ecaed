use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Leading numeric prefix, as accepted by a JavaScript-style `parseFloat`.
static NUMERIC_PREFIX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").ok()
});

/// Truncate to whole cents toward negative infinity: `floor(v * 100) / 100`.
pub fn floor_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity)
}

/// Round a percentage to two places, half away from zero.
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse user input the way the amount field always has: skip leading
/// whitespace, read the longest numeric prefix, ignore the rest.
/// `"12abc"` is 12, `"1e2"` is 100, `"abc"` and `""` are `None`.
pub fn parse_delta(raw: &str) -> Option<Decimal> {
    let re = NUMERIC_PREFIX.as_ref()?;
    let m = re.find(raw.trim_start())?;
    parse_number(m.as_str())
}

/// Parse a complete decimal literal, with or without an exponent.
pub fn parse_number(text: &str) -> Option<Decimal> {
    let text = text.trim();
    let text = text.strip_prefix('+').unwrap_or(text);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(i) => (&unsigned[..i], Some(&unsigned[i + 1..])),
        None => (unsigned, None),
    };
    // "5." and ".5" are valid JSON-ish input but not valid Decimal literals
    let mantissa = mantissa.strip_suffix('.').unwrap_or(mantissa);
    if mantissa.is_empty() || mantissa.starts_with(['-', '+']) {
        return None;
    }
    let lead = if mantissa.starts_with('.') { "0" } else { "" };
    let literal = format!("{sign}{lead}{mantissa}");
    match exponent {
        Some(exp) => {
            let exp = exp.strip_prefix('+').unwrap_or(exp);
            Decimal::from_scientific(&format!("{literal}e{exp}")).ok()
        }
        None => Decimal::from_str(&literal).ok(),
    }
}
