use anyhow::{bail, Result};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::config::Config;
use crate::persist::STORAGE_KEY;
use crate::rollup::{self, ChartData};
use crate::ui::commands::Session;
use crate::ui::util::{format_amount, outcome_message};
use crate::validate::ValidationMode;

pub(crate) fn as_cli(args: &[String], session: &mut Session, config: &Config) -> Result<()> {
    match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], session),
        "summary" | "s" => cli_summary(session),
        "categories" | "c" => cli_categories(session),
        "export" => cli_export(&args[2..], session, config),
        "import" => cli_import(&args[2..], session),
        "clear" => cli_clear(&args[2..], session),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("fintrack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("fintrack - local-only proportional budget tracker");
    println!();
    println!("Usage: fintrack [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive dashboard");
    println!("  add <subcategory> <amount>    Add to a subcategory (negative subtracts)");
    println!("  summary                       Print category totals and shares");
    println!("  categories                    List categories and subcategories");
    println!("  export [path]                 Write all data as JSON");
    println!("  import <file.json>            Replace all data from a JSON export");
    println!("    --strict                    Also require numeric, non-negative amounts");
    println!("  clear                         Reset every amount to zero");
    println!("    --yes                       Skip the confirmation prompt");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_add(args: &[String], session: &mut Session) -> Result<()> {
    let [name, amount] = args else {
        bail!("Usage: fintrack add <subcategory> <amount>");
    };

    let outcome = session.submit(name, amount)?;
    if let Some(msg) = outcome_message(name, &outcome) {
        println!("{msg}");
    }
    Ok(())
}

fn cli_summary(session: &Session) -> Result<()> {
    let shares = session.rollup();
    let total = rollup::grand_total(session.state());

    println!("fintrack summary");
    println!("{}", "─".repeat(44));
    for share in &shares {
        println!(
            "  {:<14} {:>16} {:>9}%",
            share.category,
            format_amount(share.total),
            format!("{:.2}", share.percentage)
        );
    }
    println!("{}", "─".repeat(44));
    println!("  {:<14} {:>16}", "Total", format_amount(total));

    println!();
    match session.chart() {
        ChartData::Placeholder(_) => println!("No data yet. Add an amount with: fintrack add <subcategory> <amount>"),
        ChartData::Breakdown(series) => {
            println!("Subcategories:");
            for (label, value, color) in series.subcategories.segments() {
                println!("  {color}  {label:<14} {:>16}", format_amount(value));
            }
        }
    }

    if let Some(ts) = session.store().updated_at(STORAGE_KEY)? {
        println!();
        println!("Last saved: {ts}");
    }
    Ok(())
}

fn cli_categories(session: &Session) -> Result<()> {
    for category in session.schema().categories {
        println!("{} ({})", category.name, category.color);
        for entry in category.entries {
            println!("  {:<14} {}", entry.name, entry.color);
        }
    }
    Ok(())
}

fn cli_export(args: &[String], session: &Session, config: &Config) -> Result<()> {
    let path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| PathBuf::from(shellexpand(a)))
        .unwrap_or_else(|| config.default_export_path());

    session.export_to(&path)?;
    println!("Exported to {}", path.display());
    Ok(())
}

fn cli_import(args: &[String], session: &mut Session) -> Result<()> {
    let Some(file_path) = args.iter().find(|a| !a.starts_with("--")) else {
        bail!("Usage: fintrack import <file.json> [--strict]");
    };
    if args.iter().any(|a| a == "--strict") {
        session.set_mode(ValidationMode::Strict);
    }

    let path = PathBuf::from(shellexpand(file_path));
    if let Err(e) = session.import_from(&path) {
        eprintln!("{e}");
        bail!(e.user_message());
    }
    println!("Imported {}", path.display());
    Ok(())
}

fn cli_clear(args: &[String], session: &mut Session) -> Result<()> {
    if !args.iter().any(|a| a == "--yes" || a == "-y") {
        print!("Reset every amount to zero? [y/N] ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Cancelled");
            return Ok(());
        }
    }
    session.clear()?;
    println!("All amounts reset to zero");
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
