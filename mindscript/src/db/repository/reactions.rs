use libsql::{params, Connection};

use super::entries::format_timestamp;
use crate::error::Result;
use crate::models::{Reaction, ReactionType};

pub struct ReactionRepository;

impl ReactionRepository {
    pub async fn create(conn: &Connection, reaction: &Reaction) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO reactions (id, entry_id, reaction_type, user_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                reaction.id.clone(),
                reaction.entry_id.clone(),
                reaction.reaction_type.to_string(),
                reaction.user_id.clone(),
                format_timestamp(&reaction.created_at),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn count_by_entry(
        conn: &Connection,
        entry_id: &str,
    ) -> Result<Vec<(ReactionType, u64)>> {
        let mut rows = conn
            .query(
                r#"
                SELECT reaction_type, COUNT(*)
                FROM reactions
                WHERE entry_id = ?1
                GROUP BY reaction_type
                "#,
                params![entry_id],
            )
            .await?;

        let mut counts = Vec::new();
        while let Some(row) = rows.next().await? {
            let raw_type: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            match raw_type.parse::<ReactionType>() {
                Ok(reaction_type) => counts.push((reaction_type, count.max(0) as u64)),
                Err(e) => tracing::warn!(entry_id, "Skipping stored reaction: {e}"),
            }
        }

        Ok(counts)
    }
}
