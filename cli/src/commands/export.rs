use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;

use karada_core::csv_io::to_csv;
use karada_core::store::RecordStore;

use super::helpers::json_error;

pub(crate) fn cmd_export(store: &RecordStore, output: Option<PathBuf>, json: bool) -> Result<()> {
    let records = store.get_sorted_by_date()?;

    if records.is_empty() {
        if json {
            println!("{}", json_error("No records to export"));
        } else {
            eprintln!("No records to export.");
        }
        return Ok(());
    }

    let path = output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "weight_fat_records_{}.csv",
            Local::now().date_naive().format("%Y-%m-%d")
        ))
    });

    let csv = to_csv(&records)?;
    std::fs::write(&path, csv).with_context(|| format!("Failed to write {}", path.display()))?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "exported": records.len(), "path": path.display().to_string() })
        );
    } else {
        println!("Exported {} records to {}", records.len(), path.display());
    }

    Ok(())
}
