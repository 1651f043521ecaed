//! Applies signed deltas to one subcategory, keeping every amount at or
//! above zero and truncated to cents.

use rust_decimal::Decimal;

use crate::models::{floor_cents, parse_delta, State};
use crate::rollup;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The delta landed; `amount` is the new balance.
    Applied { category: String, amount: Decimal },
    /// Input had no numeric prefix.
    InvalidInput,
    UnknownSubcategory,
    /// The name exists in more than one category. Nothing was changed.
    Ambiguous(Vec<String>),
    /// The new balance, or the grand total it leads to, did not fit in a
    /// `Decimal`. Nothing was changed.
    Overflow,
}

impl ApplyOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Add `delta` to the subcategory called `name`, clamping at zero.
pub fn apply_delta(state: &mut State, name: &str, delta: Decimal) -> ApplyOutcome {
    let delta = floor_cents(delta);
    let total = rollup::checked_grand_total(state);

    let owners: Vec<String> = state
        .categories
        .iter()
        .filter(|c| c.entry(name).is_some())
        .map(|c| c.name.clone())
        .collect();
    if owners.len() > 1 {
        tracing::warn!(subcategory = name, categories = ?owners, "ambiguous subcategory, nothing changed");
        return ApplyOutcome::Ambiguous(owners);
    }

    let Some(category) = state
        .categories
        .iter_mut()
        .find(|c| c.entry(name).is_some())
    else {
        tracing::debug!(subcategory = name, "unknown subcategory");
        return ApplyOutcome::UnknownSubcategory;
    };
    let Some(entry) = category.entry_mut(name) else {
        return ApplyOutcome::UnknownSubcategory;
    };

    let Some(sum) = entry.amount.checked_add(delta) else {
        tracing::warn!(subcategory = name, %delta, "amount overflow, nothing changed");
        return ApplyOutcome::Overflow;
    };
    let amount = sum.max(Decimal::ZERO);
    // every amount is non-negative, so `total - entry.amount` cannot overflow
    let next_total = total.and_then(|t| (t - entry.amount).checked_add(amount));
    if next_total.is_none() {
        tracing::warn!(subcategory = name, %delta, "grand total overflow, nothing changed");
        return ApplyOutcome::Overflow;
    }
    entry.amount = amount;
    tracing::debug!(subcategory = name, %delta, %amount, "delta applied");

    ApplyOutcome::Applied {
        category: category.name.clone(),
        amount,
    }
}

/// Parse raw form input and apply it. Unparseable input changes nothing.
pub fn apply_input(state: &mut State, name: &str, raw: &str) -> ApplyOutcome {
    match parse_delta(raw) {
        Some(delta) => apply_delta(state, name, delta),
        None => ApplyOutcome::InvalidInput,
    }
}

#[cfg(test)]
mod tests;
