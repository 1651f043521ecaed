use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ledger::ApplyOutcome;

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page - 1);
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

/// Jump cursor to the top of a list.
pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

/// Jump cursor to the bottom of a list.
pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}

/// Split `width` cells between `values` in proportion, largest remainder
/// first. Zero and negative values get no cells; the result always sums to
/// `width` unless every value is zero or they cannot be totalled.
pub(crate) fn segment_widths(values: &[Decimal], width: usize) -> Vec<usize> {
    let total = values
        .iter()
        .filter(|v| **v > Decimal::ZERO)
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v));
    let Some(total) = total.filter(|t| !t.is_zero()) else {
        return vec![0; values.len()];
    };
    if width == 0 {
        return vec![0; values.len()];
    }

    let width_dec = Decimal::from(width as u64);
    let mut cells = Vec::with_capacity(values.len());
    let mut remainders = Vec::with_capacity(values.len());
    for (i, v) in values.iter().enumerate() {
        let exact = if *v > Decimal::ZERO {
            *v / total * width_dec
        } else {
            Decimal::ZERO
        };
        let whole = exact.trunc();
        cells.push(whole.to_usize().unwrap_or(0));
        remainders.push((exact - whole, i));
    }

    let used: usize = cells.iter().sum();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for (_, i) in remainders.into_iter().take(width.saturating_sub(used)) {
        cells[i] += 1;
    }
    cells
}

/// Status line text for a submitted amount. Invalid input gets none.
pub(crate) fn outcome_message(subcategory: &str, outcome: &ApplyOutcome) -> Option<String> {
    match outcome {
        ApplyOutcome::Applied { amount, .. } => {
            Some(format!("{subcategory} is now {}", format_amount(*amount)))
        }
        ApplyOutcome::InvalidInput => None,
        ApplyOutcome::UnknownSubcategory => Some(format!(
            "No subcategory named '{subcategory}', nothing changed"
        )),
        ApplyOutcome::Ambiguous(categories) => Some(format!(
            "'{subcategory}' exists in {}, nothing changed",
            categories.join(", ")
        )),
        ApplyOutcome::Overflow => Some("Amount too large, nothing changed".to_string()),
    }
}
