use anyhow::Result;

use karada_core::store::RecordStore;

use super::helpers::{confirm, json_error, parse_date};

pub(crate) fn cmd_delete(store: &RecordStore, date: &str, json: bool) -> Result<()> {
    let date = parse_date(Some(date.to_string()))?;
    let date_str = date.format("%Y-%m-%d").to_string();

    if store.get_record(date)?.is_none() {
        if json {
            println!("{}", json_error(&format!("No record for {date_str}")));
        } else {
            eprintln!("No record for {date_str}");
        }
        return Ok(());
    }

    store.delete(date)?;

    if json {
        println!("{}", serde_json::json!({ "deleted": date_str }));
    } else {
        println!("Deleted record for {date_str}");
    }

    Ok(())
}

pub(crate) fn cmd_clear(store: &RecordStore, yes: bool, json: bool) -> Result<()> {
    let count = store.get_all()?.len();

    if count == 0 {
        if json {
            println!("{}", serde_json::json!({ "cleared": 0 }));
        } else {
            eprintln!("No records to clear.");
        }
        return Ok(());
    }

    if !yes && !confirm(&format!("Delete all {count} records? This cannot be undone."))? {
        eprintln!("Aborted.");
        return Ok(());
    }

    store.clear()?;

    if json {
        println!("{}", serde_json::json!({ "cleared": count }));
    } else {
        println!("Deleted {count} records");
    }

    Ok(())
}
