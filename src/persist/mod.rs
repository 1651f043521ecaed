//! Saves and restores the whole state as one JSON blob.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::db::BlobStore;
use crate::document::{self, MissingNodes};
use crate::models::{Schema, State};
use crate::validate;

pub(crate) const STORAGE_KEY: &str = "userFinanceData";

pub(crate) fn save(store: &mut dyn BlobStore, schema: &Schema, state: &State) -> Result<()> {
    let blob = document::to_compact(schema, state).context("Failed to serialize state")?;
    store.set(STORAGE_KEY, &blob)
}

/// Restore the saved state, falling back to schema defaults for anything
/// missing, unreadable or too large to total. Only a failing store is an
/// error.
pub(crate) fn load(store: &dyn BlobStore, schema: &Schema) -> Result<State> {
    let Some(blob) = store.get(STORAGE_KEY)? else {
        return Ok(State::new(schema));
    };

    let value = match serde_json::from_str::<Value>(&blob) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "stored data is malformed, starting from defaults");
            return Ok(State::new(schema));
        }
    };
    if !validate::is_structurally_valid(&value, schema) {
        tracing::info!("stored data differs from the category layout, merging known categories");
    }
    let Value::Object(saved) = value else {
        tracing::warn!("stored data is not an object, starting from defaults");
        return Ok(State::new(schema));
    };

    // Shallow overlay: saved categories replace default ones wholesale.
    let mut merged = document::encode(schema, &State::new(schema));
    let Value::Object(defaults) = &mut merged else {
        return Ok(State::new(schema));
    };
    for (key, value) in saved {
        if schema.category(&key).is_some() {
            defaults.insert(key, value);
        } else {
            tracing::warn!(key = %key, "ignoring unknown category in stored data");
        }
    }

    match document::decode(&merged, schema, MissingNodes::Zero) {
        Ok(state) => Ok(state),
        Err(e) => {
            tracing::warn!(error = %e, "stored data is unusable, starting from defaults");
            Ok(State::new(schema))
        }
    }
}

pub(crate) fn clear(store: &mut dyn BlobStore) -> Result<()> {
    store.clear()
}
