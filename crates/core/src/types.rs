/// User identifiers are UUID v7 strings, so they sort by creation time and
/// stay opaque inside token subjects.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh, time-ordered user identifier.
pub fn new_user_id() -> UserId {
    uuid::Uuid::now_v7().to_string()
}
