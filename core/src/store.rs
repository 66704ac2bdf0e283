use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::models::{Record, StoredRecord};
use crate::slot::{FileSlot, MemorySlot, StorageSlot};

/// Key under which the full record collection is stored.
pub const STORAGE_KEY: &str = "weight_fat_records";

/// Insert `candidate` into `records`, replacing any existing record with the
/// same date in place. New dates are appended.
#[must_use]
pub fn upsert_record(mut records: Vec<Record>, candidate: Record) -> Vec<Record> {
    if let Some(idx) = records.iter().position(|r| r.date == candidate.date) {
        records[idx] = candidate;
    } else {
        records.push(candidate);
    }
    records
}

/// Drop the record for `date`, if present.
#[must_use]
pub fn remove_record(records: Vec<Record>, date: NaiveDate) -> Vec<Record> {
    records.into_iter().filter(|r| r.date != date).collect()
}

/// The records ordered by date ascending. The input order is left untouched.
#[must_use]
pub fn sorted_by_date(records: &[Record]) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.date);
    sorted
}

/// Summary of what a CSV import would do (or did).
#[derive(Debug, Clone, Copy)]
pub struct CsvImportSummary {
    pub rows_parsed: usize,
    pub records_added: usize,
    pub records_updated: usize,
    pub total_records: usize,
}

/// Dated weight and body fat measurements behind a [`StorageSlot`].
///
/// The whole collection is stored as one JSON array under [`STORAGE_KEY`].
/// Every mutation loads the collection, applies the change, and writes the
/// result back, so the slot always holds a complete snapshot.
pub struct RecordStore {
    slot: Box<dyn StorageSlot>,
}

impl RecordStore {
    /// Open a store backed by files in `data_dir`, creating it if needed.
    pub fn open(data_dir: &Path) -> Result<Self> {
        Ok(RecordStore {
            slot: Box::new(FileSlot::new(data_dir)?),
        })
    }

    /// Open an ephemeral store that forgets everything on drop.
    #[must_use]
    pub fn open_in_memory() -> Self {
        RecordStore {
            slot: Box::new(MemorySlot::new()),
        }
    }

    /// Open a store over any slot implementation.
    #[must_use]
    pub fn with_slot(slot: impl StorageSlot + 'static) -> Self {
        RecordStore {
            slot: Box::new(slot),
        }
    }

    /// All records in storage order.
    ///
    /// An absent or undecodable value yields an empty collection rather than
    /// an error; entries with unparseable dates or non-finite numbers are
    /// dropped individually.
    pub fn get_all(&self) -> Result<Vec<Record>> {
        let Some(raw) = self.slot.get(STORAGE_KEY)? else {
            return Ok(Vec::new());
        };
        let stored: Vec<StoredRecord> = serde_json::from_str(&raw).unwrap_or_default();
        Ok(stored.into_iter().filter_map(StoredRecord::into_record).collect())
    }

    /// All records ordered by date ascending.
    pub fn get_sorted_by_date(&self) -> Result<Vec<Record>> {
        Ok(sorted_by_date(&self.get_all()?))
    }

    /// The record for `date`, if one exists.
    pub fn get_record(&self, date: NaiveDate) -> Result<Option<Record>> {
        Ok(self.get_all()?.into_iter().find(|r| r.date == date))
    }

    /// Write `records` to the slot, replacing whatever was stored.
    pub fn save(&self, records: &[Record]) -> Result<()> {
        let stored: Vec<StoredRecord> = records.iter().map(Record::to_stored).collect();
        let encoded = serde_json::to_string(&stored).context("Failed to encode records")?;
        self.slot.set(STORAGE_KEY, &encoded)
    }

    /// Add or replace the record for `record.date`. Returns the collection
    /// after the change.
    pub fn upsert(&self, record: Record) -> Result<Vec<Record>> {
        let records = upsert_record(self.get_all()?, record);
        self.save(&records)?;
        Ok(records)
    }

    /// Delete the record for `date`, if present. Returns the collection
    /// after the change.
    pub fn delete(&self, date: NaiveDate) -> Result<Vec<Record>> {
        let records = remove_record(self.get_all()?, date);
        self.save(&records)?;
        Ok(records)
    }

    /// Remove the whole collection from storage.
    pub fn clear(&self) -> Result<()> {
        self.slot.remove(STORAGE_KEY)
    }

    /// Merge `rows` into the collection, last occurrence of a date winning.
    /// With `dry_run` the merged result is computed but not saved.
    pub fn import(&self, rows: &[Record], dry_run: bool) -> Result<CsvImportSummary> {
        let mut records = self.get_all()?;
        let mut records_added = 0;
        let mut records_updated = 0;

        for row in rows {
            if records.iter().any(|r| r.date == row.date) {
                records_updated += 1;
            } else {
                records_added += 1;
            }
            records = upsert_record(records, row.clone());
        }

        if !dry_run {
            self.save(&records)?;
        }

        Ok(CsvImportSummary {
            rows_parsed: rows.len(),
            records_added,
            records_updated,
            total_records: records.len(),
        })
    }
}
