/// All timestamps are stored and compared in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Identifier of the client whose orders the dashboard tracks.
pub type ClientId = uuid::Uuid;

/// Batch label assigned by [`crate::batching::assign_batches`]. Starts at 1.
pub type BatchNumber = u32;
