//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `roster_core` linkage against the configured database.
//! - Start file logging before any storage access.
//! - Print the first roster page in a stable, greppable format.

use roster_core::db::open_db;
use roster_core::{RosterConfig, RosterService, SqliteKeyValueStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("roster_cli error={err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = RosterConfig::from_env()?;
    config.init_logging()?;
    println!("roster_core version={}", roster_core::core_version());

    let conn = open_db(&config.db_path)?;
    let service = RosterService::open(SqliteKeyValueStore::new(&conn), &config)?;
    let view = service.current_view();

    println!(
        "roster records={} page={}/{}",
        service.store().len(),
        view.current_page,
        view.total_pages
    );
    if view.is_empty() {
        println!("No employees found.");
    }
    for employee in &view.items {
        println!(
            "{}\t{} {}\t{}\t{}\t{}",
            employee.id,
            employee.first_name,
            employee.last_name,
            employee.email,
            employee.department,
            employee.role
        );
    }
    Ok(())
}
