use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::db::BlobStore;
use crate::models::{HexColor, PLACEHOLDER_COLOR};
use crate::rollup::{self, CategoryShare, ChartData};
use crate::tracker::Tracker;
use crate::validate::ValidationMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Entries,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Entries]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Entries => write!(f, "Entries"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    /// Typing an amount for the selected subcategory.
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "AMOUNT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    Clear,
}

/// One line of the entries table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EntryRow {
    pub(crate) category: String,
    pub(crate) name: String,
    pub(crate) amount: Decimal,
    pub(crate) color: HexColor,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) visible_rows: usize,

    // Snapshot of the tracker, rebuilt by `refresh`
    pub(crate) shares: Vec<CategoryShare>,
    /// Parallel to `shares`.
    pub(crate) category_colors: Vec<HexColor>,
    pub(crate) grand_total: Decimal,
    pub(crate) chart: ChartData,
    pub(crate) rows: Vec<EntryRow>,
    pub(crate) mode: ValidationMode,

    // Entries
    pub(crate) entry_index: usize,
    pub(crate) entry_scroll: usize,

    pub(crate) export_path: PathBuf,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,
}

impl App {
    pub(crate) fn new(export_path: PathBuf) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            visible_rows: 20,

            shares: Vec::new(),
            category_colors: Vec::new(),
            grand_total: Decimal::ZERO,
            chart: ChartData::Placeholder(rollup::placeholder_series()),
            rows: Vec::new(),
            mode: ValidationMode::default(),

            entry_index: 0,
            entry_scroll: 0,

            export_path,

            pending_action: None,
            confirm_message: String::new(),
        }
    }

    /// Re-derive everything the screens draw from the tracker's state.
    pub(crate) fn refresh<S: BlobStore>(&mut self, tracker: &Tracker<S>) {
        let schema = tracker.schema();
        self.shares = tracker.rollup();
        self.category_colors = self
            .shares
            .iter()
            .map(|s| schema.category(&s.category).map_or(PLACEHOLDER_COLOR, |c| c.color))
            .collect();
        self.grand_total = rollup::grand_total(tracker.state());
        self.chart = tracker.chart();
        self.mode = tracker.mode();
        self.rows = tracker
            .state()
            .entries()
            .map(|(category, entry)| EntryRow {
                category: category.to_string(),
                name: entry.name.clone(),
                amount: entry.amount,
                color: schema
                    .category(category)
                    .and_then(|c| c.entry(&entry.name))
                    .map_or(PLACEHOLDER_COLOR, |e| e.color),
            })
            .collect();
        if self.entry_index >= self.rows.len() {
            self.entry_index = self.rows.len().saturating_sub(1);
        }
    }

    pub(crate) fn selected_row(&self) -> Option<&EntryRow> {
        self.rows.get(self.entry_index)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Ask before running `action`; the answer is handled by the Confirm
    /// input mode.
    pub(crate) fn confirm(&mut self, action: PendingAction, message: impl Into<String>) {
        self.pending_action = Some(action);
        self.confirm_message = message.into();
        self.input_mode = InputMode::Confirm;
    }
}
