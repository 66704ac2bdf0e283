use anyhow::Result;
use chrono::{Local, NaiveDate};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use karada_core::models::Record;
use karada_core::store::RecordStore;

use super::helpers::LBS_PER_KG;

/// Records dated within the `days` days ending at `today`. A window too
/// large to represent covers the whole collection.
fn within_last_days(records: Vec<Record>, today: NaiveDate, days: u32) -> Vec<Record> {
    match today.checked_sub_signed(chrono::Duration::days(i64::from(days))) {
        Some(cutoff) => records.into_iter().filter(|r| r.date > cutoff).collect(),
        None => records,
    }
}

pub(crate) fn cmd_history(store: &RecordStore, days: Option<u32>, json: bool) -> Result<()> {
    let mut records = store.get_sorted_by_date()?;
    if let Some(days) = days {
        records = within_last_days(records, Local::now().date_naive(), days);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        eprintln!("No records found. Use `karada log` to record a measurement.");
    } else {
        #[derive(Tabled)]
        struct HistoryRow {
            #[tabled(rename = "Date")]
            date: String,
            #[tabled(rename = "Weight (kg)")]
            kg: String,
            #[tabled(rename = "Weight (lbs)")]
            lbs: String,
            #[tabled(rename = "Body Fat (%)")]
            fat: String,
        }

        let rows: Vec<HistoryRow> = records
            .iter()
            .map(|r| HistoryRow {
                date: r.date.format("%Y-%m-%d").to_string(),
                kg: format!("{:.1}", r.weight_kg),
                lbs: format!("{:.1}", r.weight_kg * LBS_PER_KG),
                fat: format!("{:.1}", r.fat_pct),
            })
            .collect();

        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..4)).with(Alignment::right()))
            .to_string();
        println!("{table}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: NaiveDate, weight_kg: f64, fat_pct: f64) -> Record {
        Record {
            date,
            weight_kg,
            fat_pct,
        }
    }

    #[test]
    fn test_within_last_days_keeps_recent_records() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let records = vec![
            record(today - chrono::Duration::days(10), 71.0, 18.5),
            record(today - chrono::Duration::days(1), 70.5, 18.2),
            record(today, 70.2, 18.0),
        ];

        let recent = within_last_days(records, today, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date, today - chrono::Duration::days(1));
        assert_eq!(recent[1].date, today);
    }

    #[test]
    fn test_within_last_days_one_day_keeps_today_only() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let records = vec![
            record(today - chrono::Duration::days(1), 70.5, 18.2),
            record(today, 70.2, 18.0),
        ];

        let recent = within_last_days(records, today, 1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].date, today);
    }

    #[test]
    fn test_within_last_days_huge_window_keeps_everything() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let records = vec![
            record(today - chrono::Duration::days(10), 71.0, 18.5),
            record(today, 70.2, 18.0),
        ];

        let all = within_last_days(records, today, u32::MAX);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_history_huge_days_does_not_panic() {
        let store = RecordStore::open_in_memory();
        assert!(cmd_history(&store, Some(100_000_000), true).is_ok());
        assert!(cmd_history(&store, Some(u32::MAX), true).is_ok());
    }
}
