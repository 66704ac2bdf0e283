use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One measurement: weight and body fat for a calendar date.
///
/// The date is the record's identity. A collection holds at most one
/// record per date; logging the same date again replaces the whole
/// record.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub date: NaiveDate,
    pub weight_kg: f64,
    pub fat_pct: f64,
}

/// Storage wire shape for a `Record`.
///
/// Matches the persisted JSON: string `id` and `date` (always written
/// equal, `id` tolerated when absent) plus plain `weight` and `fat`
/// numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(default)]
    pub id: String,
    pub date: String,
    pub weight: f64,
    pub fat: f64,
}

impl Record {
    #[must_use]
    pub fn to_stored(&self) -> StoredRecord {
        let date = self.date.format("%Y-%m-%d").to_string();
        StoredRecord {
            id: date.clone(),
            date,
            weight: self.weight_kg,
            fat: self.fat_pct,
        }
    }
}

impl StoredRecord {
    /// Convert to the domain shape. Returns `None` when the date is not
    /// YYYY-MM-DD or either measurement is non-finite.
    #[must_use]
    pub fn into_record(self) -> Option<Record> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()?;
        if !self.weight.is_finite() || !self.fat.is_finite() {
            return None;
        }
        Some(Record {
            date,
            weight_kg: self.weight,
            fat_pct: self.fat,
        })
    }
}

/// Validate measurements before logging: weight must be positive, body
/// fat between 0 and 100.
pub fn validate_measurements(weight_kg: f64, fat_pct: f64) -> Result<()> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        bail!("Weight must be greater than 0");
    }
    if !fat_pct.is_finite() || !(0.0..=100.0).contains(&fat_pct) {
        bail!("Body fat percentage must be between 0 and 100");
    }
    Ok(())
}
