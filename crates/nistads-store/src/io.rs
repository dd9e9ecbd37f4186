//! Delimited table I/O, JSONL run log and atomic file operations

use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Field delimiter for every persisted table
const DELIMITER: u8 = b';';

/// Write rows as a `;`-delimited table with a header row, atomically
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> std::io::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .from_writer(Vec::new());

    for row in rows {
        writer.serialize(row)?;
    }

    let data = writer.into_inner().map_err(|e| e.into_error())?;
    atomic_write(path, &data)
}

/// Read all rows of a table written by [`write_table`]
pub fn read_table<T: for<'de> Deserialize<'de>>(path: &Path) -> std::io::Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Collect the non-empty values of the named columns, column by column.
/// Missing files and missing columns yield nothing.
pub fn read_column_values(path: &Path, columns: &[&str]) -> std::io::Result<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let indices: Vec<usize> = columns
        .iter()
        .filter_map(|column| headers.iter().position(|h| h == *column))
        .collect();

    let mut per_column: Vec<Vec<String>> = vec![Vec::new(); indices.len()];
    for record in reader.records() {
        let record = record?;
        for (slot, &idx) in indices.iter().enumerate() {
            if let Some(value) = record.get(idx).map(str::trim) {
                if !value.is_empty() {
                    per_column[slot].push(value.to_string());
                }
            }
        }
    }

    Ok(per_column.into_iter().flatten().collect())
}

/// Append a JSON record to a JSONL file
pub fn append_jsonl<T: Serialize>(path: &Path, record: &T) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    let json = serde_json::to_string(record)?;
    writeln!(file, "{}", json)?;
    Ok(())
}

/// Read all records from a JSONL file
pub fn read_jsonl<T: for<'de> Deserialize<'de>>(path: &Path) -> std::io::Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(record) => records.push(record),
            Err(_) => continue, // Skip malformed lines
        }
    }

    Ok(records)
}

/// Write data atomically using temp file + rename
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}
