//! SQL statements for the fingerprint table.

pub(crate) const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS fingerprints (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL,
    minutiae TEXT NOT NULL,
    image BLOB NOT NULL
)
"#;

// One statement: the old row for `name` is deleted and a new id assigned.
pub(crate) const UPSERT: &str =
    "INSERT OR REPLACE INTO fingerprints (name, minutiae, image) VALUES (?, ?, ?)";

pub(crate) const SELECT_ALL: &str =
    "SELECT id, name, minutiae, image FROM fingerprints ORDER BY id ASC";

pub(crate) const SELECT_BY_NAME: &str =
    "SELECT id, name, minutiae, image FROM fingerprints WHERE name = ?";

pub(crate) const COUNT: &str = "SELECT COUNT(*) FROM fingerprints";
