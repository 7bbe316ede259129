//! The persistent counter store.
//!
//! Holds the single [`CounterRecord`] in memory, rolls it over to the current
//! day when loaded, and hands a snapshot to the [`DebouncedWriter`] after every
//! mutation. Reads always see the in-memory record, whether or not the last
//! write reached storage.

use crate::clock::Clock;
use crate::errors::StoreError;
use crate::models::{CounterRecord, HistoryEntry, Rollover};
use crate::storage::{STORAGE_KEY, Storage};
use crate::writer::DebouncedWriter;
use chrono::NaiveDate;
use std::{sync::Arc, time::Duration};
use tracing::{debug, error, info, warn};

#[derive(Debug)]
pub struct CounterStore {
    record: CounterRecord,
    writer: DebouncedWriter,
}

impl CounterStore {
    /// Reads the stored record (or starts a fresh one) and rolls it over to
    /// today. Loading never writes.
    pub async fn load(
        storage: Arc<dyn Storage>,
        clock: &dyn Clock,
        debounce: Duration,
    ) -> Result<Self, StoreError> {
        let today = clock.today();
        let mut record = read_record(storage.as_ref(), today).await;

        match record.roll_over(today) {
            Rollover::Archived => {
                let archived = &record.history[0];
                info!("archived {} taps from {}", archived.count, archived.date);
            }
            Rollover::DateOnly => debug!("moved empty counter forward to {today}"),
            Rollover::SameDay => {}
        }

        let writer = DebouncedWriter::spawn(storage, STORAGE_KEY, debounce)?;
        Ok(Self { record, writer })
    }

    pub fn record(&self) -> &CounterRecord {
        &self.record
    }

    pub fn count(&self) -> u64 {
        self.record.count
    }

    pub fn last_date(&self) -> NaiveDate {
        self.record.last_date
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.record.history
    }

    pub fn increment(&mut self) -> u64 {
        self.record.count = self.record.count.saturating_add(1);
        self.persist();
        self.record.count
    }

    pub fn reset_count(&mut self) {
        self.record.count = 0;
        self.persist();
    }

    pub fn set_count(&mut self, count: u64) {
        self.record.count = count;
        self.persist();
    }

    /// Removes the history entry at `index`. Out of range is a no-op and
    /// returns `None` without scheduling a write.
    pub fn delete_history_item(&mut self, index: usize) -> Option<HistoryEntry> {
        if index >= self.record.history.len() {
            debug!("ignoring delete of history item {index}");
            return None;
        }
        let removed = self.record.history.remove(index);
        self.persist();
        Some(removed)
    }

    pub fn clear_all_history(&mut self) {
        self.record.history.clear();
        self.persist();
    }

    /// Writes a pending change immediately.
    pub async fn flush(&self) -> Result<(), StoreError> {
        self.writer.flush().await
    }

    fn persist(&self) {
        match serde_json::to_string_pretty(&self.record) {
            Ok(payload) => self.writer.schedule(payload),
            Err(err) => error!("failed to serialize counter record: {err}"),
        }
    }
}

async fn read_record(storage: &dyn Storage, today: NaiveDate) -> CounterRecord {
    match storage.get(STORAGE_KEY).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(err) => {
                warn!("stored counter record is malformed, starting fresh: {err}");
                CounterRecord::new(today)
            }
        },
        Ok(None) => CounterRecord::new(today),
        Err(err) => {
            error!("failed to read counter record: {err}");
            CounterRecord::new(today)
        }
    }
}
