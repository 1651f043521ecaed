mod config;
mod db;
mod document;
mod error;
mod ledger;
mod logging;
mod models;
mod persist;
mod rollup;
mod run;
mod tracker;
mod ui;
mod validate;

use anyhow::Result;

use crate::config::Config;
use crate::logging::LogTarget;
use crate::validate::ValidationMode;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::from_env()?;

    let target = if args.len() > 1 {
        LogTarget::Stderr
    } else {
        LogTarget::File
    };
    logging::init(&config, target)?;

    let db_path = config.db_path()?;
    let db = db::Database::open(&db_path)?;
    let mut session = tracker::Tracker::open(db, &models::DEFAULT_SCHEMA)?
        .with_mode(ValidationMode::from_strict(config.settings.strict_import));

    match args.len() {
        1 => run::as_tui(&mut session, config.default_export_path()),
        _ => run::as_cli(&args, &mut session, &config),
    }
}
