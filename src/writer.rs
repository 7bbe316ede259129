//! Debounced write-back of the counter record.
//!
//! A single background task owns the pending write. Every scheduled snapshot
//! replaces the previous one and pushes the deadline out, so a burst of
//! mutations reaches storage as one write of the final state.

use crate::errors::StoreError;
use crate::storage::Storage;
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::{mpsc, oneshot},
    time::{Instant, sleep_until},
};
use tracing::{debug, error, warn};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

enum Command {
    Persist { payload: String, deadline: Instant },
    Flush(oneshot::Sender<()>),
}

enum WriteState {
    Idle,
    PendingWrite { payload: String, deadline: Instant },
}

#[derive(Debug)]
pub struct DebouncedWriter {
    tx: mpsc::UnboundedSender<Command>,
    delay: Duration,
}

impl DebouncedWriter {
    /// Starts the writer task on the current tokio runtime.
    pub fn spawn(
        storage: Arc<dyn Storage>,
        key: impl Into<String>,
        delay: Duration,
    ) -> Result<Self, StoreError> {
        let handle = tokio::runtime::Handle::try_current()?;
        let (tx, rx) = mpsc::unbounded_channel();
        handle.spawn(run(rx, storage, key.into()));
        Ok(Self { tx, delay })
    }

    /// Arms (or re-arms) the quiet-period timer with `payload` as the value to
    /// write when it fires.
    pub fn schedule(&self, payload: String) {
        let deadline = Instant::now() + self.delay;
        if self.tx.send(Command::Persist { payload, deadline }).is_err() {
            warn!("counter writer has stopped; change will not be persisted");
        }
    }

    /// Writes any pending snapshot now instead of waiting for the timer.
    pub async fn flush(&self) -> Result<(), StoreError> {
        let (done_tx, done_rx) = oneshot::channel();
        self.tx
            .send(Command::Flush(done_tx))
            .map_err(|_| StoreError::WriterClosed)?;
        done_rx.await.map_err(|_| StoreError::WriterClosed)
    }
}

async fn run(mut rx: mpsc::UnboundedReceiver<Command>, storage: Arc<dyn Storage>, key: String) {
    let mut state = WriteState::Idle;

    loop {
        state = match state {
            WriteState::Idle => match rx.recv().await {
                Some(Command::Persist { payload, deadline }) => {
                    WriteState::PendingWrite { payload, deadline }
                }
                Some(Command::Flush(done)) => {
                    let _ = done.send(());
                    WriteState::Idle
                }
                None => break,
            },
            WriteState::PendingWrite { payload, deadline } => {
                tokio::select! {
                    command = rx.recv() => match command {
                        Some(Command::Persist { payload, deadline }) => {
                            WriteState::PendingWrite { payload, deadline }
                        }
                        Some(Command::Flush(done)) => {
                            write(storage.as_ref(), &key, &payload).await;
                            let _ = done.send(());
                            WriteState::Idle
                        }
                        None => {
                            debug!("counter writer closed with a pending write");
                            break;
                        }
                    },
                    () = sleep_until(deadline) => {
                        write(storage.as_ref(), &key, &payload).await;
                        WriteState::Idle
                    }
                }
            }
        };
    }
}

async fn write(storage: &dyn Storage, key: &str, payload: &str) {
    match storage.set(key, payload).await {
        Ok(()) => debug!("persisted {key}"),
        Err(err) => error!("failed to persist {key}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use tokio::time::sleep;

    fn writer(storage: &Arc<MemoryStorage>) -> DebouncedWriter {
        DebouncedWriter::spawn(storage.clone(), "key", DEFAULT_DEBOUNCE).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_schedules_produces_one_write_of_last_payload() {
        let storage = Arc::new(MemoryStorage::new());
        let writer = writer(&storage);

        for n in 1..=5 {
            writer.schedule(format!("payload-{n}"));
            sleep(Duration::from_millis(200)).await;
        }
        assert_eq!(storage.write_count(), 0);

        sleep(Duration::from_millis(999)).await;
        assert_eq!(storage.write_count(), 1);
        assert_eq!(storage.raw("key").as_deref(), Some("payload-5"));
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_is_written_before_the_quiet_period_elapses() {
        let storage = Arc::new(MemoryStorage::new());
        let writer = writer(&storage);

        writer.schedule("a".to_string());
        sleep(Duration::from_millis(999)).await;
        assert_eq!(storage.write_count(), 0);

        sleep(Duration::from_millis(2)).await;
        assert_eq!(storage.write_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn separated_bursts_write_separately() {
        let storage = Arc::new(MemoryStorage::new());
        let writer = writer(&storage);

        writer.schedule("first".to_string());
        sleep(Duration::from_millis(1500)).await;
        writer.schedule("second".to_string());
        sleep(Duration::from_millis(1500)).await;

        assert_eq!(storage.write_count(), 2);
        assert_eq!(storage.raw("key").as_deref(), Some("second"));
    }

    #[tokio::test(start_paused = true)]
    async fn flush_writes_pending_payload_immediately() {
        let storage = Arc::new(MemoryStorage::new());
        let writer = writer(&storage);

        writer.schedule("pending".to_string());
        writer.flush().await.unwrap();
        assert_eq!(storage.write_count(), 1);
        assert_eq!(storage.raw("key").as_deref(), Some("pending"));

        // The timer was consumed by the flush.
        sleep(Duration::from_millis(2000)).await;
        assert_eq!(storage.write_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn flush_when_idle_writes_nothing() {
        let storage = Arc::new(MemoryStorage::new());
        let writer = writer(&storage);

        writer.flush().await.unwrap();
        assert_eq!(storage.write_count(), 0);
    }

    #[tokio::test]
    async fn writes_through_file_storage_off_the_timer() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(FileStorage::new(dir.path().join("data")));
        let writer =
            DebouncedWriter::spawn(storage.clone(), "key", Duration::from_millis(10)).unwrap();

        writer.schedule("stale".to_string());
        writer.schedule("fresh".to_string());
        sleep(Duration::from_millis(200)).await;
        writer.flush().await.unwrap();

        let saved = tokio::fs::read_to_string(storage.path_for("key")).await.unwrap();
        assert_eq!(saved, "fresh");
    }

    #[test]
    fn spawn_outside_runtime_is_an_error() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let err = DebouncedWriter::spawn(storage, "key", DEFAULT_DEBOUNCE).unwrap_err();
        assert!(matches!(err, StoreError::NoRuntime(_)));
    }
}
