use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::app::{App, PendingAction, Screen};
use super::util::outcome_message;
use crate::db::{BlobStore, Database};
use crate::tracker::Tracker;
use crate::validate::ValidationMode;

pub(crate) type Session = Tracker<Database>;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Session) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit fintrack", cmd_quit, r);
    register_command!("quit", "Quit fintrack", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Entries", cmd_entries, r);
    register_command!("entries", "Go to Entries", cmd_entries, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add to a subcategory (e.g. :add Groceries 42.50)",
        cmd_add,
        r
    );
    register_command!(
        "export",
        "Export data as JSON (e.g. :export ~/budget.json)",
        cmd_export,
        r
    );
    register_command!(
        "import",
        "Replace data from a JSON export (e.g. :import ~/budget.json)",
        cmd_import,
        r
    );
    register_command!("i", "Replace data from a JSON export", cmd_import, r);
    register_command!("clear", "Reset every amount to zero", cmd_clear, r);
    register_command!(
        "strict",
        "Toggle strict import checks (e.g. :strict on)",
        cmd_strict,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, session)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

pub(crate) fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Apply raw input to `subcategory` and report the result on the status
/// line. Unparseable input is ignored without a message; a failed save is
/// reported and leaves the previous amounts in place.
pub(crate) fn submit_amount<S: BlobStore>(
    subcategory: &str,
    raw: &str,
    app: &mut App,
    session: &mut Tracker<S>,
) -> anyhow::Result<()> {
    match session.submit(subcategory, raw) {
        Ok(outcome) => {
            if let Some(msg) = outcome_message(subcategory, &outcome) {
                app.set_status(msg);
            }
        }
        Err(e) => {
            tracing::warn!(subcategory, error = %format!("{e:#}"), "saving amount failed");
            app.set_status(format!("Could not save {subcategory}, nothing changed"));
        }
    }
    app.refresh(session);
    Ok(())
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh(session);
    Ok(())
}

fn cmd_entries(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Entries;
    app.refresh(session);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let Some((name, amount)) = args.rsplit_once(' ') else {
        app.set_status("Usage: :add <subcategory> <amount>");
        return Ok(());
    };
    submit_amount(name.trim(), amount, app, session)
}

fn cmd_export(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        app.export_path.clone()
    } else {
        PathBuf::from(crate::run::shellexpand(args))
    };

    match session.export_to(&path) {
        Ok(()) => app.set_status(format!("Exported to {}", path.display())),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "export failed");
            app.set_status(format!("Export failed: {e}"));
        }
    }
    Ok(())
}

fn cmd_import(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :import <file.json>");
        return Ok(());
    }
    let path = PathBuf::from(crate::run::shellexpand(args));

    match session.import_from(&path) {
        Ok(()) => {
            app.refresh(session);
            app.set_status(format!("Imported {}", path.display()));
        }
        Err(e) => app.set_status(e.user_message()),
    }
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.confirm(PendingAction::Clear, "Reset every amount to zero?");
    Ok(())
}

fn cmd_strict(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let strict = match args {
        "" => session.mode() != ValidationMode::Strict,
        "on" | "true" | "yes" => true,
        "off" | "false" | "no" => false,
        other => {
            app.set_status(format!("Expected on or off, got '{other}'"));
            return Ok(());
        }
    };
    session.set_mode(ValidationMode::from_strict(strict));
    app.refresh(session);
    app.set_status(format!("Import checks: {}", session.mode()));
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
