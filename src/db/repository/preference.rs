use rusqlite::{params, Connection};

use crate::db::DatabaseError;

/// Get a user preference by key. Returns None if not set.
pub fn get_user_preference(
    conn: &Connection,
    key: &str,
) -> Result<Option<String>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT value FROM user_preferences WHERE key = ?1")?;
    match stmt.query_row([key], |row| row.get::<_, String>(0)) {
        Ok(val) => Ok(Some(val)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::from(e)),
    }
}

/// Set a user preference (upsert).
pub fn set_user_preference(
    conn: &Connection,
    key: &str,
    value: &str,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO user_preferences (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    #[test]
    fn missing_preference_is_none() {
        let conn = open_memory_database().unwrap();
        assert_eq!(get_user_preference(&conn, "nope").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let conn = open_memory_database().unwrap();
        set_user_preference(&conn, "diagnosisResultsKey", "[]").unwrap();
        assert_eq!(
            get_user_preference(&conn, "diagnosisResultsKey").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn set_overwrites_existing_value() {
        let conn = open_memory_database().unwrap();
        set_user_preference(&conn, "k", "first").unwrap();
        set_user_preference(&conn, "k", "second").unwrap();
        assert_eq!(get_user_preference(&conn, "k").unwrap().as_deref(), Some("second"));

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM user_preferences", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
