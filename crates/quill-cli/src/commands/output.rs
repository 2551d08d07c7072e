//! Status rendering shared by the migration and seed status commands.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use quill_migrate::{MigrationStatus, SeedStatus};
use serde::Serialize;

use crate::cli::StatusOutput;

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    widths
}

/// Left-aligned table: header, dash separator, one line per row, columns
/// separated by two spaces. Trailing padding is trimmed.
pub(crate) fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths = column_widths(headers, rows);
    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(headers.iter().map(|h| h.to_string()).collect()));
    out.push(line(widths.iter().map(|&w| "-".repeat(w)).collect()));
    for row in rows {
        out.push(line(row.clone()));
    }
    out.join("\n")
}

fn applied_at(at: Option<NaiveDateTime>) -> String {
    at.map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
    println!("{json}");
    Ok(())
}

pub(crate) fn migration_rows(status: &[MigrationStatus]) -> Vec<Vec<String>> {
    status
        .iter()
        .map(|s| {
            vec![
                s.version.clone(),
                s.name.clone(),
                s.state.to_string(),
                applied_at(s.applied_at),
            ]
        })
        .collect()
}

pub(crate) fn seed_rows(status: &[SeedStatus]) -> Vec<Vec<String>> {
    status
        .iter()
        .map(|s| {
            vec![
                s.file_name.clone(),
                s.state.to_string(),
                applied_at(s.applied_at),
            ]
        })
        .collect()
}

pub(crate) fn print_migrations(status: &[MigrationStatus], output: StatusOutput) -> Result<()> {
    match output {
        StatusOutput::Json => print_json(&status),
        StatusOutput::Table if status.is_empty() => {
            println!("No migrations found.");
            Ok(())
        }
        StatusOutput::Table => {
            println!(
                "{}",
                render_table(
                    &["VERSION", "NAME", "STATE", "APPLIED_AT"],
                    &migration_rows(status)
                )
            );
            Ok(())
        }
    }
}

pub(crate) fn print_seeds(status: &[SeedStatus], output: StatusOutput) -> Result<()> {
    match output {
        StatusOutput::Json => print_json(&status),
        StatusOutput::Table if status.is_empty() => {
            println!("No seeds found.");
            Ok(())
        }
        StatusOutput::Table => {
            println!(
                "{}",
                render_table(&["SEED", "STATE", "APPLIED_AT"], &seed_rows(status))
            );
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "output_test.rs"]
mod tests;
