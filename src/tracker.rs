//! The single owner of the in-memory state.
//!
//! Every change is computed on a copy, persisted, and only then swapped
//! in, so a failed parse, validation or store write leaves the previous
//! state untouched.

use anyhow::{Context, Result};
use std::path::Path;

use crate::db::BlobStore;
use crate::document::{self, MissingNodes};
use crate::error::ImportError;
use crate::ledger::{self, ApplyOutcome};
use crate::models::{Schema, State};
use crate::persist;
use crate::rollup::{self, CategoryShare, ChartData};
use crate::validate::{self, ValidationMode};

pub(crate) struct Tracker<S: BlobStore> {
    schema: &'static Schema,
    state: State,
    store: S,
    mode: ValidationMode,
}

impl<S: BlobStore> Tracker<S> {
    /// Restore the saved state from `store`, or start from zero.
    pub(crate) fn open(store: S, schema: &'static Schema) -> Result<Self> {
        for name in schema.duplicate_entry_names() {
            let owners: Vec<&str> = schema.locate(name).iter().map(|c| c.name).collect();
            tracing::warn!(subcategory = name, categories = ?owners, "subcategory appears in several categories and cannot be edited");
        }
        let state = persist::load(&store, schema).context("Failed to load saved data")?;
        Ok(Self {
            schema,
            state,
            store,
            mode: ValidationMode::default(),
        })
    }

    pub(crate) fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub(crate) fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub(crate) fn state(&self) -> &State {
        &self.state
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: ValidationMode) {
        self.mode = mode;
    }

    /// Apply raw form input to one subcategory and save.
    pub(crate) fn submit(&mut self, subcategory: &str, raw: &str) -> Result<ApplyOutcome> {
        let mut next = self.state.clone();
        let outcome = ledger::apply_input(&mut next, subcategory, raw);
        if outcome.changed() {
            self.commit(next)?;
        }
        Ok(outcome)
    }

    pub(crate) fn rollup(&self) -> Vec<CategoryShare> {
        rollup::rollup(&self.state)
    }

    pub(crate) fn chart(&self) -> ChartData {
        rollup::chart(self.schema, &self.state)
    }

    /// The export file contents: pretty JSON with a trailing newline.
    pub(crate) fn export_bytes(&self) -> Result<Vec<u8>> {
        let mut text =
            document::to_pretty(self.schema, &self.state).context("Failed to serialize state")?;
        text.push('\n');
        Ok(text.into_bytes())
    }

    pub(crate) fn export_to(&self, path: &Path) -> Result<()> {
        let bytes = self.export_bytes()?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write export file: {}", path.display()))?;
        tracing::info!(path = %path.display(), "data exported");
        Ok(())
    }

    /// Replace the whole state with an imported document.
    pub(crate) fn import_bytes(&mut self, bytes: &[u8]) -> Result<(), ImportError> {
        let result = self.try_import(bytes);
        match &result {
            Ok(()) => tracing::info!(mode = %self.mode, "import accepted"),
            Err(e) => tracing::warn!(mode = %self.mode, error = %e, "import rejected"),
        }
        result
    }

    fn try_import(&mut self, bytes: &[u8]) -> Result<(), ImportError> {
        let candidate: serde_json::Value = serde_json::from_slice(bytes)?;
        validate::check(&candidate, self.schema, self.mode)?;
        let next = document::decode(&candidate, self.schema, MissingNodes::Reject)?;
        self.commit(next).map_err(ImportError::Store)
    }

    pub(crate) fn import_from(&mut self, path: &Path) -> Result<(), ImportError> {
        let bytes = std::fs::read(path).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "import file unreadable");
            ImportError::Read(e)
        })?;
        self.import_bytes(&bytes)
    }

    /// Erase saved data and go back to all zeros.
    pub(crate) fn clear(&mut self) -> Result<()> {
        persist::clear(&mut self.store).context("Failed to clear saved data")?;
        self.state = State::new(self.schema);
        tracing::info!("data cleared");
        Ok(())
    }

    fn commit(&mut self, next: State) -> Result<()> {
        debug_assert!(next.has_shape_of(self.schema));
        persist::save(&mut self.store, self.schema, &next).context("Failed to save data")?;
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
