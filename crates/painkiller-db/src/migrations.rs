use rusqlite::Connection;
use tracing::info;

use crate::Result;

/// Create the schema if it is missing. Safe to run on every startup.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (users, pains, votes)");
        conn.execute_batch(
            "
            BEGIN;

            CREATE TABLE users (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                username        TEXT NOT NULL UNIQUE,
                email           TEXT NOT NULL UNIQUE,
                password_hash   TEXT NOT NULL,
                created_at      TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE pains (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                title           TEXT NOT NULL,
                description     TEXT NOT NULL,
                created_at      TEXT NOT NULL DEFAULT (datetime('now')),
                user_id         INTEGER NOT NULL REFERENCES users(id)
            );

            CREATE INDEX idx_pains_title ON pains(title);
            CREATE INDEX idx_pains_user ON pains(user_id);

            -- At most one vote per (pain, user). Enforced here, not by callers.
            CREATE TABLE votes (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                pain_id         INTEGER NOT NULL REFERENCES pains(id),
                user_id         INTEGER NOT NULL REFERENCES users(id),
                created_at      TEXT NOT NULL DEFAULT (datetime('now')),
                UNIQUE(pain_id, user_id)
            );

            CREATE INDEX idx_votes_user ON votes(user_id);

            INSERT INTO schema_version (version) VALUES (1);

            COMMIT;
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rerunning_is_a_no_op() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();

        let versions: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(versions, 1);
    }
}
