mod store;


/// Return the current wall clock time in milliseconds since the epoch
pub fn current_time_ms() -> i64 {
    match std::time::SystemTime::now().duration_since(std::time::SystemTime::UNIX_EPOCH) {
        Ok(n) => n.as_millis() as i64,
        Err(e) => {
            tracing::error!("invalid system time: {}", e);
            0
        }
    }
}

pub use crate::store::HistoryLog;
pub use crate::store::HistoryRecord;
pub use crate::store::HistoryRecordSerializer;
pub use crate::store::STORAGE_SLOT;
