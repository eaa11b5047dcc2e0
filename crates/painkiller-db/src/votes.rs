use tracing::info;

use painkiller_types::models::Vote;

use crate::error::{Constraint, DbError, violated_constraint};
use crate::models::parse_timestamp;
use crate::{Database, Result};

impl Database {
    /// Record `user_id`'s vote for `pain_id`.
    ///
    /// There is no existence check before the insert: the UNIQUE(pain_id,
    /// user_id) constraint decides, so two racing calls for the same pair can
    /// never both succeed. A missing pain trips the foreign key instead.
    pub fn cast_vote(&self, pain_id: i64, user_id: i64) -> Result<Vote> {
        self.with_conn(|conn| {
            let vote = conn
                .query_row(
                    "INSERT INTO votes (pain_id, user_id) VALUES (?1, ?2)
                     RETURNING id, pain_id, user_id, created_at",
                    rusqlite::params![pain_id, user_id],
                    |row| {
                        let created_at: String = row.get(3)?;
                        Ok(Vote {
                            id: row.get(0)?,
                            pain_id: row.get(1)?,
                            user_id: row.get(2)?,
                            created_at: parse_timestamp(&created_at),
                        })
                    },
                )
                .map_err(|e| match violated_constraint(&e) {
                    Some(Constraint::Unique(_)) => DbError::AlreadyVoted,
                    Some(Constraint::ForeignKey) => DbError::PainNotFound,
                    None => e.into(),
                })?;

            info!("User {} voted for pain {}", user_id, pain_id);
            Ok(vote)
        })
    }

    pub fn has_voted(&self, pain_id: i64, user_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let voted = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM votes WHERE pain_id = ?1 AND user_id = ?2)",
                rusqlite::params![pain_id, user_id],
                |r| r.get(0),
            )?;
            Ok(voted)
        })
    }
}
