//! Structural validation of documents against the schema.
//!
//! The walk compares key sets level by level (root, category, subCategory,
//! entry) and never looks at amounts: a number or string where the schema
//! has an object is accepted as a leaf, and an `amount` of `"12"`, `null`
//! or `{}` passes [`ValidationMode::Structural`]. That is a known gap kept
//! for compatibility with files written by older versions;
//! [`ValidationMode::Strict`] closes it. Arrays and `null` in place of a
//! category or entry are refused in both modes.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{parse_number, CategorySpec, Schema};

pub const COLOR_KEY: &str = "color";
pub const SUB_CATEGORY_KEY: &str = "subCategory";
pub const AMOUNT_KEY: &str = "amount";

const CATEGORY_KEYS: [&str; 2] = [COLOR_KEY, SUB_CATEGORY_KEY];
const ENTRY_KEYS: [&str; 2] = [AMOUNT_KEY, COLOR_KEY];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Key sets only. Values are never inspected.
    #[default]
    Structural,
    /// Key sets, plus every node the schema nests must be an object and
    /// every amount a non-negative JSON number.
    Strict,
}

impl ValidationMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Structural
        }
    }
}

impl std::fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structural => write!(f, "structural"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("document root is not a JSON object")]
    NotAnObject,

    #[error("{path}: expected an object")]
    NotAMapping { path: String },

    #[error(
        "{path}: key mismatch (missing: [{}], unexpected: [{}])",
        .missing.join(", "),
        .unexpected.join(", ")
    )]
    KeyMismatch {
        path: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("{path}: amount must be a non-negative number")]
    BadAmount { path: String },

    #[error("amounts add up to more than a decimal can hold")]
    TotalOverflow,
}

/// True iff `candidate` has exactly the schema's keys at every level.
pub fn is_structurally_valid(candidate: &Value, schema: &Schema) -> bool {
    check(candidate, schema, ValidationMode::Structural).is_ok()
}

/// Walk `candidate` against `schema`, stopping at the first mismatch.
pub fn check(candidate: &Value, schema: &Schema, mode: ValidationMode) -> Result<(), ShapeError> {
    let Value::Object(root) = candidate else {
        return Err(ShapeError::NotAnObject);
    };
    compare_keys("$", root, schema.categories.iter().map(|c| c.name))?;

    for spec in schema.categories {
        if let Some(node) = root.get(spec.name) {
            check_category(node, spec, &format!("$.{}", spec.name), mode)?;
        }
    }
    Ok(())
}

fn check_category(
    node: &Value,
    spec: &CategorySpec,
    path: &str,
    mode: ValidationMode,
) -> Result<(), ShapeError> {
    let Value::Object(map) = node else {
        return leaf(node, path, mode);
    };
    compare_keys(path, map, CATEGORY_KEYS)?;

    let sub_path = format!("{path}.{SUB_CATEGORY_KEY}");
    let subs = match map.get(SUB_CATEGORY_KEY) {
        Some(Value::Object(subs)) => subs,
        Some(node) => return leaf(node, &sub_path, mode),
        None => return Ok(()),
    };
    compare_keys(&sub_path, subs, spec.entries.iter().map(|e| e.name))?;

    for entry in spec.entries {
        if let Some(node) = subs.get(entry.name) {
            check_entry(node, &format!("{sub_path}.{}", entry.name), mode)?;
        }
    }
    Ok(())
}

fn check_entry(node: &Value, path: &str, mode: ValidationMode) -> Result<(), ShapeError> {
    let Value::Object(map) = node else {
        return leaf(node, path, mode);
    };
    compare_keys(path, map, ENTRY_KEYS)?;

    if mode == ValidationMode::Strict {
        let valid = match map.get(AMOUNT_KEY) {
            Some(Value::Number(n)) => {
                parse_number(&n.to_string()).is_some_and(|d| d >= Decimal::ZERO)
            }
            _ => false,
        };
        if !valid {
            return Err(ShapeError::BadAmount {
                path: format!("{path}.{AMOUNT_KEY}"),
            });
        }
    }
    Ok(())
}

/// A non-object where the schema nests further.
fn leaf(node: &Value, path: &str, mode: ValidationMode) -> Result<(), ShapeError> {
    match (node, mode) {
        (Value::Bool(_) | Value::Number(_) | Value::String(_), ValidationMode::Structural) => Ok(()),
        _ => Err(ShapeError::NotAMapping {
            path: path.to_string(),
        }),
    }
}

fn compare_keys<'a>(
    path: &str,
    actual: &Map<String, Value>,
    expected: impl IntoIterator<Item = &'a str>,
) -> Result<(), ShapeError> {
    let actual: BTreeSet<&str> = actual.keys().map(String::as_str).collect();
    let expected: BTreeSet<&str> = expected.into_iter().collect();
    if actual == expected {
        return Ok(());
    }
    Err(ShapeError::KeyMismatch {
        path: path.to_string(),
        missing: expected.difference(&actual).map(|k| k.to_string()).collect(),
        unexpected: actual.difference(&expected).map(|k| k.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests;
