use anyhow::{Result, bail};

use karada_core::models::{Record, validate_measurements};
use karada_core::store::RecordStore;

use super::helpers::{KG_PER_LB, LBS_PER_KG, json_error, parse_date};

pub(crate) fn cmd_log(
    store: &RecordStore,
    weight: f64,
    fat: f64,
    unit: &str,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    validate_measurements(weight, fat)?;

    let weight_kg = match unit.to_lowercase().as_str() {
        "kg" => weight,
        "lbs" | "lb" => {
            let kg = weight * KG_PER_LB;
            eprintln!("Converting {weight:.1} lbs → {kg:.2} kg");
            kg
        }
        _ => bail!("Invalid unit '{unit}'. Use 'kg' or 'lbs'"),
    };

    let date = parse_date(date)?;
    let replaced = store.get_record(date)?.is_some();
    let record = Record {
        date,
        weight_kg,
        fat_pct: fat,
    };
    store.upsert(record.clone())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        let lbs = record.weight_kg * LBS_PER_KG;
        let verb = if replaced { "Updated" } else { "Logged" };
        println!(
            "{} {:.1} kg ({:.1} lbs), {:.1}% body fat for {}",
            verb,
            record.weight_kg,
            lbs,
            record.fat_pct,
            record.date.format("%Y-%m-%d")
        );
    }

    Ok(())
}

pub(crate) fn cmd_show(store: &RecordStore, date: Option<String>, json: bool) -> Result<()> {
    let date = parse_date(date)?;
    let record = store.get_record(date)?;

    if let Some(r) = record {
        if json {
            println!("{}", serde_json::to_string_pretty(&r)?);
        } else {
            let lbs = r.weight_kg * LBS_PER_KG;
            println!(
                "{}: {:.1} kg ({:.1} lbs), {:.1}% body fat",
                r.date.format("%Y-%m-%d"),
                r.weight_kg,
                lbs,
                r.fat_pct
            );
        }
    } else {
        let date_str = date.format("%Y-%m-%d");
        if json {
            println!("{}", json_error(&format!("No record for {date_str}")));
        } else {
            eprintln!("No record for {date_str}");
        }
    }

    Ok(())
}
