use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;

use crate::models::Record;

/// Header fields written by [`to_csv`] and recognized by [`parse_csv`].
pub const CSV_HEADER: [&str; 3] = ["日付", "体重 (kg)", "体脂肪率 (%)"];

/// Render records as CSV text.
///
/// Output header: `日付,体重 (kg),体脂肪率 (%)`. One row per record in the
/// given order, dates as `YYYY-MM-DD`, numbers with one decimal place.
pub fn to_csv(records: &[Record]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)
        .context("Failed to write CSV header")?;
    for record in records {
        wtr.write_record([
            record.date.format("%Y-%m-%d").to_string(),
            format!("{:.1}", record.weight_kg),
            format!("{:.1}", record.fat_pct),
        ])
        .context("Failed to write CSV row")?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV output: {e}"))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Parse records from CSV text.
///
/// The header row is optional and detected by content: a first line with
/// `日付` or `date` (case-insensitive) in any field is skipped. Rows that
/// cannot be parsed are skipped rather than failing the whole file: short
/// rows, unparseable dates, and non-numeric or non-finite values. Duplicate
/// dates are kept as-is; merging is the store's job.
pub fn parse_csv(text: &str) -> Result<Vec<Record>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.lines().all(|line| line.trim().is_empty()) {
        bail!("CSV file is empty");
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let Ok(row) = result else { continue };
        if i == 0 && is_header(&row) {
            continue;
        }
        if row.len() < 3 {
            continue;
        }
        let Ok(date) = NaiveDate::parse_from_str(row.get(0).unwrap_or(""), "%Y-%m-%d") else {
            continue;
        };
        let Some(weight_kg) = row.get(1).and_then(|v| v.parse::<f64>().ok()) else {
            continue;
        };
        let Some(fat_pct) = row.get(2).and_then(|v| v.parse::<f64>().ok()) else {
            continue;
        };
        if !weight_kg.is_finite() || !fat_pct.is_finite() {
            continue;
        }
        records.push(Record {
            date,
            weight_kg,
            fat_pct,
        });
    }

    Ok(records)
}

fn is_header(row: &csv::StringRecord) -> bool {
    row.iter()
        .any(|field| field.to_lowercase().contains("date") || field.contains("日付"))
}
