use rusqlite::{Connection, OptionalExtension};
use tracing::info;

use painkiller_types::models::User;

use crate::error::{Constraint, DbError, violated_constraint};
use crate::models::UserRow;
use crate::{Database, Result};

impl Database {
    /// Register a user. Username is checked before email, so a request that
    /// collides on both reports the username.
    pub fn create_user(&self, username: &str, email: &str, password_hash: &str) -> Result<User> {
        self.with_conn(|conn| {
            if username_exists(conn, username)? {
                return Err(DbError::UsernameTaken);
            }
            if email_exists(conn, email)? {
                return Err(DbError::EmailTaken);
            }

            let sql = format!(
                "INSERT INTO users (username, email, password_hash) VALUES (?1, ?2, ?3)
                 RETURNING {}",
                UserRow::COLUMNS
            );
            let row = conn
                .query_row(&sql, (username, email, password_hash), UserRow::from_row)
                .map_err(|e| match violated_constraint(&e) {
                    Some(Constraint::Unique(msg)) if msg.contains("users.email") => {
                        DbError::EmailTaken
                    }
                    Some(Constraint::Unique(_)) => DbError::UsernameTaken,
                    _ => e.into(),
                })?;

            info!("Registered user {} (id {})", row.username, row.id);
            Ok(row.to_user())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {} FROM users WHERE username = ?1", UserRow::COLUMNS);
            let row = conn
                .query_row(&sql, [username], UserRow::from_row)
                .optional()?;
            Ok(row)
        })
    }
}

fn username_exists(conn: &Connection, username: &str) -> Result<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1)",
        [username],
        |r| r.get(0),
    )?;
    Ok(exists)
}

fn email_exists(conn: &Connection, email: &str) -> Result<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)",
        [email],
        |r| r.get(0),
    )?;
    Ok(exists)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_look_up() {
        let db = Database::open_in_memory().unwrap();
        let user = db.create_user("alice", "a@x.com", "$hash").unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.username, "alice");

        let row = db.get_user_by_username("alice").unwrap().unwrap();
        assert_eq!(row.id, user.id);
        assert_eq!(row.password_hash, "$hash");
        assert_eq!(row.to_user(), user);

        assert!(db.get_user_by_username("bob").unwrap().is_none());
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("alice", "a@x.com", "h").unwrap();

        let err = db.create_user("alice", "b@y.com", "h").unwrap_err();
        assert!(matches!(err, DbError::UsernameTaken));
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("alice", "a@x.com", "h").unwrap();

        let err = db.create_user("bob", "a@x.com", "h").unwrap_err();
        assert!(matches!(err, DbError::EmailTaken));
    }

    #[test]
    fn username_is_checked_before_email() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("alice", "a@x.com", "h").unwrap();

        let err = db.create_user("alice", "a@x.com", "h").unwrap_err();
        assert!(matches!(err, DbError::UsernameTaken));
    }

    #[test]
    fn schema_rejects_duplicate_email_directly() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("alice", "a@x.com", "h").unwrap();

        let result = db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, email, password_hash) VALUES ('bob', 'a@x.com', 'h')",
                [],
            )?;
            Ok(())
        });
        match result {
            Err(DbError::Sqlite(e)) => {
                assert!(matches!(violated_constraint(&e), Some(Constraint::Unique(_))))
            }
            other => panic!("expected a unique violation, got {:?}", other),
        }
    }
}
