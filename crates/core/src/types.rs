/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are wall-clock local date-times without an offset,
/// matching the `yyyy-MM-dd HH:mm:ss` wire format.
pub type Timestamp = chrono::NaiveDateTime;
