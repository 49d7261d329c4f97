//! SQL DDL for initializing the shelter storage.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT, so ids only grow and are never reused;
///   insertion order and id order are the same thing
/// - `name` optional display string
/// - `picture` image URL, never empty
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS dogs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NULL,
    picture TEXT NOT NULL CHECK (length(picture) > 0)
);
"#;
