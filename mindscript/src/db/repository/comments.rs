use libsql::{params, Connection};

use super::entries::{format_timestamp, parse_timestamp};
use crate::error::Result;
use crate::models::Comment;

pub struct CommentRepository;

impl CommentRepository {
    pub async fn create(conn: &Connection, comment: &Comment) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO comments (id, entry_id, author, content, timestamp, likes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                comment.id.clone(),
                comment.entry_id.clone(),
                comment.author.clone(),
                comment.content.clone(),
                format_timestamp(&comment.timestamp),
                comment.likes,
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<Comment>> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, entry_id, author, content, timestamp, likes
                FROM comments
                WHERE id = ?1
                "#,
                params![id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_comment(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn list_by_entry(conn: &Connection, entry_id: &str) -> Result<Vec<Comment>> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, entry_id, author, content, timestamp, likes
                FROM comments
                WHERE entry_id = ?1
                ORDER BY timestamp ASC, rowid ASC
                "#,
                params![entry_id],
            )
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(Self::row_to_comment(&row)?);
        }

        Ok(results)
    }

    pub async fn increment_likes(conn: &Connection, id: &str) -> Result<Option<Comment>> {
        let affected = conn
            .execute(
                "UPDATE comments SET likes = likes + 1 WHERE id = ?1",
                params![id],
            )
            .await?;

        if affected == 0 {
            return Ok(None);
        }
        Self::get_by_id(conn, id).await
    }

    fn row_to_comment(row: &libsql::Row) -> Result<Comment> {
        Ok(Comment {
            id: row.get(0)?,
            entry_id: row.get(1)?,
            author: row.get(2)?,
            content: row.get(3)?,
            timestamp: parse_timestamp(&row.get::<String>(4)?)?,
            likes: row.get(5)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;
    use chrono::{Duration, Utc};

    async fn setup_test_db() -> Connection {
        let conn = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .unwrap()
            .connect()
            .unwrap();
        schema::init_schema(&conn).await.unwrap();
        conn
    }

    fn comment(id: &str, entry_id: &str, content: &str) -> Comment {
        Comment {
            id: id.to_string(),
            entry_id: entry_id.to_string(),
            author: "You".to_string(),
            content: content.to_string(),
            timestamp: Utc::now(),
            likes: 0,
        }
    }

    #[tokio::test]
    async fn test_list_by_entry_oldest_first() {
        let conn = setup_test_db().await;
        let mut first = comment("c1", "e1", "first");
        first.timestamp = Utc::now() - Duration::minutes(5);

        CommentRepository::create(&conn, &comment("c2", "e1", "second"))
            .await
            .unwrap();
        CommentRepository::create(&conn, &first).await.unwrap();
        CommentRepository::create(&conn, &comment("c3", "e2", "elsewhere"))
            .await
            .unwrap();

        let comments = CommentRepository::list_by_entry(&conn, "e1").await.unwrap();
        let contents: Vec<&str> = comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_increment_likes() {
        let conn = setup_test_db().await;
        CommentRepository::create(&conn, &comment("c1", "e1", "nice"))
            .await
            .unwrap();

        CommentRepository::increment_likes(&conn, "c1").await.unwrap();
        let liked = CommentRepository::increment_likes(&conn, "c1")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(liked.likes, 2);
    }

    #[tokio::test]
    async fn test_increment_likes_missing_comment() {
        let conn = setup_test_db().await;
        let result = CommentRepository::increment_likes(&conn, "ghost").await.unwrap();
        assert!(result.is_none());
    }
}
