//! CLI `doctor` command: Run database diagnostics and print a health report.

use anyhow::{Context, Result};

use chatsensei::config::SenseiConfig;
use chatsensei::db;

/// Run database diagnostics and print a health report.
pub fn doctor(config: &SenseiConfig) -> Result<()> {
    let api_key = match config.sensei.api_key {
        Some(_) => "set",
        None => "NOT SET (chat disabled)",
    };
    let gate = match config.gate_enabled() {
        true => "enabled",
        false => "disabled",
    };

    println!("Storage backend:   {}", config.storage.backend);
    println!("API key:           {api_key}");
    println!("Access gate:       {gate}");

    if config.storage.backend != "sqlite" {
        println!("Data directory:    {}", config.resolved_data_dir().display());
        println!("No database checks for the {} backend.", config.storage.backend);
        return Ok(());
    }

    let db_path = config.resolved_db_path();

    if !db_path.exists() {
        println!("Database: not found at {}", db_path.display());
        println!("Run `chatsensei chat` to create it.");
        return Ok(());
    }

    let file_size = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

    let conn = db::open_database(&db_path)
        .context("failed to open database (may be corrupt)")?;

    let report = db::check_database_health(&conn)
        .context("failed to run health check")?;

    println!();
    println!("Database Health Report");
    println!("======================");
    println!();
    println!("Database:          {}", db_path.display());
    println!("File size:         {}", format_bytes(file_size));
    println!("Schema version:    {}", report.schema_version);
    println!("SQLite:            v{}", report.sqlite_version);
    println!();
    println!("Row counts:");
    println!("  Vocabulary:      {}", report.vocab_count);
    println!("  Chat history:    {}", report.history_count);
    println!("  Flashcards:      {}", report.flashcard_count);
    println!();
    if report.integrity_ok {
        println!("Integrity check:   PASSED");
    } else {
        println!("Integrity check:   FAILED ({})", report.integrity_details);
        println!();
        println!("Recovery steps:");
        println!("  1. Restore from a backup: cp backup.db ~/.chatsensei/sensei.db");
        println!("  2. Or move the database aside and re-import the original JSON files:");
        println!("     chatsensei import <dir-with-vocab.json>");
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
