//! The JSON document shared by the stored blob, the export file and the
//! import file:
//!
//! ```json
//! { "Essentials": { "subCategory": { "Housing": { "amount": 0, "color": "#374E70" } },
//!                   "color": "#1D3557" } }
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::models::{floor_cents, parse_number, CategoryAmounts, Entry, Schema, State};
use crate::rollup;
use crate::validate::{AMOUNT_KEY, COLOR_KEY, SUB_CATEGORY_KEY};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("document root is not a JSON object")]
    NotAnObject,

    #[error("{path}: missing or not an object")]
    Missing { path: String },

    #[error("amounts add up to more than a decimal can hold")]
    TotalOverflow,
}

/// What to do when a node the schema requires is absent or not an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingNodes {
    Reject,
    /// Fall back to a zero amount for every entry below the node.
    Zero,
}

/// Build the document for `state`, keys in schema order. Colors come from
/// the schema.
pub fn encode(schema: &Schema, state: &State) -> Value {
    let mut root = Map::new();
    for spec in schema.categories {
        let mut subs = Map::new();
        for entry in spec.entries {
            let amount = state.amount(spec.name, entry.name).unwrap_or_default();
            let mut node = Map::new();
            node.insert(AMOUNT_KEY.into(), amount_value(amount));
            node.insert(COLOR_KEY.into(), Value::from(entry.color.as_str()));
            subs.insert(entry.name.into(), Value::Object(node));
        }
        let mut category = Map::new();
        category.insert(SUB_CATEGORY_KEY.into(), Value::Object(subs));
        category.insert(COLOR_KEY.into(), Value::from(spec.color.as_str()));
        root.insert(spec.name.into(), Value::Object(category));
    }
    Value::Object(root)
}

/// Compact form, used for the stored blob.
pub fn to_compact(schema: &Schema, state: &State) -> serde_json::Result<String> {
    serde_json::to_string(&encode(schema, state))
}

/// Two-space indented form, used for export files.
pub fn to_pretty(schema: &Schema, state: &State) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&encode(schema, state))
}

/// The exact decimal text, trailing zeros dropped: `1200`, `42.5`.
/// Relies on serde_json's `arbitrary_precision` so no digit goes through
/// an `f64`.
fn amount_value(amount: Decimal) -> Value {
    Number::from_str(&amount.normalize().to_string()).map_or(Value::from(0), Value::Number)
}

/// Read an amount without type-checking it: numbers and numeric strings
/// are accepted, anything else is `None`.
pub fn coerce_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_number(&n.to_string()),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Read a state back out of a document, walking the schema. Amounts are
/// coerced with [`coerce_amount`], clamped at zero and truncated to cents;
/// unreadable amounts become zero. Keys not in the schema are ignored.
///
/// Amounts whose sum would not fit in a `Decimal` are refused under either
/// policy, so every decoded state can be totalled.
pub fn decode(value: &Value, schema: &Schema, missing: MissingNodes) -> Result<State, DocumentError> {
    let Value::Object(root) = value else {
        return Err(DocumentError::NotAnObject);
    };

    let mut categories = Vec::with_capacity(schema.categories.len());
    for spec in schema.categories {
        let path = format!("$.{}", spec.name);
        let subs = root
            .get(spec.name)
            .and_then(Value::as_object)
            .and_then(|c| c.get(SUB_CATEGORY_KEY))
            .and_then(Value::as_object);
        if subs.is_none() {
            node_missing(&format!("{path}.{SUB_CATEGORY_KEY}"), missing)?;
        }

        let mut entries = Vec::with_capacity(spec.entries.len());
        for entry in spec.entries {
            let entry_path = format!("{path}.{SUB_CATEGORY_KEY}.{}", entry.name);
            let node = subs
                .and_then(|s| s.get(entry.name))
                .and_then(Value::as_object);
            let amount = match node {
                Some(node) => read_amount(node.get(AMOUNT_KEY), &entry_path),
                None => {
                    if subs.is_some() {
                        node_missing(&entry_path, missing)?;
                    }
                    Decimal::ZERO
                }
            };
            entries.push(Entry {
                name: entry.name.to_string(),
                amount,
            });
        }
        categories.push(CategoryAmounts {
            name: spec.name.to_string(),
            entries,
        });
    }
    let state = State { categories };
    if rollup::checked_grand_total(&state).is_none() {
        return Err(DocumentError::TotalOverflow);
    }
    Ok(state)
}

fn node_missing(path: &str, missing: MissingNodes) -> Result<(), DocumentError> {
    match missing {
        MissingNodes::Reject => Err(DocumentError::Missing {
            path: path.to_string(),
        }),
        MissingNodes::Zero => {
            tracing::warn!(path, "node missing from document, using zero amounts");
            Ok(())
        }
    }
}

fn read_amount(value: Option<&Value>, path: &str) -> Decimal {
    match value.and_then(coerce_amount) {
        Some(amount) if amount > Decimal::ZERO => floor_cents(amount),
        Some(_) => Decimal::ZERO,
        None => {
            tracing::warn!(path, "unreadable amount, using zero");
            Decimal::ZERO
        }
    }
}
