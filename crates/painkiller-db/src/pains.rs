use tracing::info;

use painkiller_types::models::{Creator, Pain, PainListing};

use crate::error::{Constraint, DbError, violated_constraint};
use crate::models::parse_timestamp;
use crate::{Database, Result};

impl Database {
    /// Store a new pain owned by `user_id`. No deduplication: the same title
    /// may be submitted any number of times.
    pub fn create_pain(&self, user_id: i64, title: &str, description: &str) -> Result<Pain> {
        self.with_conn(|conn| {
            let pain = conn
                .query_row(
                    "INSERT INTO pains (title, description, user_id) VALUES (?1, ?2, ?3)
                     RETURNING id, title, description, created_at, user_id",
                    rusqlite::params![title, description, user_id],
                    |row| {
                        let created_at: String = row.get(3)?;
                        Ok(Pain {
                            id: row.get(0)?,
                            title: row.get(1)?,
                            description: row.get(2)?,
                            created_at: parse_timestamp(&created_at),
                            user_id: row.get(4)?,
                            votes_count: 0,
                        })
                    },
                )
                .map_err(|e| match violated_constraint(&e) {
                    Some(Constraint::ForeignKey) => DbError::UserNotFound,
                    _ => e.into(),
                })?;

            info!("User {} created pain {}", user_id, pain.id);
            Ok(pain)
        })
    }

    /// Pains with their creator and vote count, most-voted first.
    /// Equal counts are ordered by pain id, oldest first.
    pub fn list_pains(&self, skip: u32, limit: u32) -> Result<Vec<PainListing>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT p.id, p.title, p.description, p.created_at, p.user_id,
                        u.username, u.email, COUNT(v.id) AS votes_count
                 FROM pains p
                 JOIN users u ON u.id = p.user_id
                 LEFT JOIN votes v ON v.pain_id = p.id
                 GROUP BY p.id, u.id
                 ORDER BY votes_count DESC, p.id ASC
                 LIMIT ?1 OFFSET ?2",
            )?;

            let rows = stmt
                .query_map(rusqlite::params![limit, skip], |row| {
                    let created_at: String = row.get(3)?;
                    let user_id: i64 = row.get(4)?;
                    Ok(PainListing {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        description: row.get(2)?,
                        created_at: parse_timestamp(&created_at),
                        user_id,
                        votes_count: row.get(7)?,
                        creator: Creator {
                            id: user_id,
                            username: row.get(5)?,
                            email: row.get(6)?,
                        },
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}
