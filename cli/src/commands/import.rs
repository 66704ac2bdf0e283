use std::path::Path;

use anyhow::{Context, Result};

use karada_core::csv_io::parse_csv;
use karada_core::store::RecordStore;

use super::helpers::json_error;

pub(crate) fn cmd_import(
    store: &RecordStore,
    path: &Path,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let rows = parse_csv(&text)?;

    if rows.is_empty() {
        if json {
            println!("{}", json_error("No valid rows found in CSV file"));
        } else {
            eprintln!("No valid rows found in CSV file.");
        }
        return Ok(());
    }

    let summary = store.import(&rows, dry_run)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "dry_run": dry_run,
                "rows_parsed": summary.rows_parsed,
                "records_added": summary.records_added,
                "records_updated": summary.records_updated,
                "total_records": summary.total_records,
            })
        );
    } else if dry_run {
        println!("Dry run — no changes made.\n");
        println!("  Rows parsed:       {}", summary.rows_parsed);
        println!("  Records to add:    {}", summary.records_added);
        println!("  Records to update: {}", summary.records_updated);
        println!("  Total records:     {}", summary.total_records);
    } else {
        println!("Import complete.\n");
        println!("  Rows parsed:     {}", summary.rows_parsed);
        println!("  Records added:   {}", summary.records_added);
        println!("  Records updated: {}", summary.records_updated);
        println!("  Total records:   {}", summary.total_records);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use karada_core::csv_io::to_csv;
    use karada_core::models::Record;

    fn record(date: &str, weight_kg: f64, fat_pct: f64) -> Record {
        Record {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            weight_kg,
            fat_pct,
        }
    }

    #[test]
    fn test_import_round_trip_from_exported_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = vec![
            record("2024-01-01", 70.5, 18.2),
            record("2024-01-08", 69.8, 17.9),
        ];
        let path = dir.path().join("export.csv");
        std::fs::write(&path, to_csv(&source).unwrap()).unwrap();

        let store = RecordStore::open_in_memory();
        cmd_import(&store, &path, false, false).unwrap();

        let records = store.get_sorted_by_date().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date.to_string(), "2024-01-01");
        assert!((records[1].weight_kg - 69.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_import_dry_run_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        std::fs::write(&path, to_csv(&[record("2024-01-01", 70.5, 18.2)]).unwrap()).unwrap();

        let store = RecordStore::open_in_memory();
        cmd_import(&store, &path, true, false).unwrap();

        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_import_missing_file_is_error() {
        let store = RecordStore::open_in_memory();
        let result = cmd_import(&store, Path::new("/nonexistent/input.csv"), false, false);
        assert!(result.is_err());
    }
}
