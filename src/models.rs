use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub count: u64,
}

/// The persisted counter. Serialized as `{"count", "lastDate", "history"}`
/// with history ordered newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterRecord {
    pub count: u64,
    pub last_date: NaiveDate,
    pub history: Vec<HistoryEntry>,
}

/// What happened when a record was brought forward to a new day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rollover {
    SameDay,
    DateOnly,
    Archived,
}

impl CounterRecord {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            count: 0,
            last_date: today,
            history: Vec::new(),
        }
    }

    /// Moves the record to `today`. A non-zero count is archived as a single
    /// entry no matter how many days were skipped.
    pub fn roll_over(&mut self, today: NaiveDate) -> Rollover {
        if self.last_date == today {
            return Rollover::SameDay;
        }

        let outcome = if self.count > 0 {
            self.history.insert(
                0,
                HistoryEntry {
                    date: self.last_date,
                    count: self.count,
                },
            );
            self.count = 0;
            Rollover::Archived
        } else {
            Rollover::DateOnly
        };
        self.last_date = today;
        outcome
    }
}

#[derive(Debug, Deserialize)]
pub struct SetCountRequest {
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(date: NaiveDate, count: u64) -> HistoryEntry {
        HistoryEntry { date, count }
    }

    #[test]
    fn serializes_with_camel_case_last_date() {
        let record = CounterRecord {
            count: 4,
            last_date: date(2026, 1, 5),
            history: vec![entry(date(2026, 1, 4), 12)],
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "count": 4,
                "lastDate": "2026-01-05",
                "history": [{ "date": "2026-01-04", "count": 12 }]
            })
        );
    }

    #[test]
    fn round_trips_empty_and_populated_history() {
        let empty = CounterRecord::new(date(2026, 3, 1));
        let populated = CounterRecord {
            count: 9,
            last_date: date(2026, 3, 3),
            history: vec![entry(date(2026, 3, 2), 40), entry(date(2026, 2, 27), 1)],
        };

        for record in [empty, populated] {
            let json = serde_json::to_string(&record).unwrap();
            let back: CounterRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(back, record);
        }
    }

    #[test]
    fn rejects_negative_count() {
        let raw = r#"{"count":-1,"lastDate":"2026-01-05","history":[]}"#;
        assert!(serde_json::from_str::<CounterRecord>(raw).is_err());
    }

    #[test]
    fn roll_over_collapses_multi_day_gap_into_one_entry() {
        let mut record = CounterRecord {
            count: 7,
            last_date: date(2026, 1, 1),
            history: vec![entry(date(2025, 12, 30), 2)],
        };

        let outcome = record.roll_over(date(2026, 1, 9));

        assert_eq!(outcome, Rollover::Archived);
        assert_eq!(record.count, 0);
        assert_eq!(record.last_date, date(2026, 1, 9));
        assert_eq!(
            record.history,
            vec![entry(date(2026, 1, 1), 7), entry(date(2025, 12, 30), 2)]
        );
    }

    #[test]
    fn roll_over_with_zero_count_only_moves_date() {
        let mut record = CounterRecord::new(date(2026, 1, 1));
        assert_eq!(record.roll_over(date(2026, 1, 2)), Rollover::DateOnly);
        assert_eq!(record.last_date, date(2026, 1, 2));
        assert!(record.history.is_empty());
    }

    #[test]
    fn roll_over_on_same_day_changes_nothing() {
        let mut record = CounterRecord {
            count: 3,
            last_date: date(2026, 1, 2),
            history: Vec::new(),
        };
        let before = record.clone();
        assert_eq!(record.roll_over(date(2026, 1, 2)), Rollover::SameDay);
        assert_eq!(record, before);
    }
}
