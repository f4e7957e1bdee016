use libsql::Connection;

use crate::error::Result;

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Journal entries
        CREATE TABLE IF NOT EXISTS journal_entries (
            id TEXT PRIMARY KEY,
            content TEXT NOT NULL,
            mood TEXT,
            ai_summary TEXT,
            themes TEXT NOT NULL DEFAULT '[]',
            shared INTEGER NOT NULL DEFAULT 0,
            user_id TEXT,
            date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_journal_entries_date ON journal_entries(date);
        CREATE INDEX IF NOT EXISTS idx_journal_entries_shared ON journal_entries(shared);

        -- Community reactions on shared entries
        CREATE TABLE IF NOT EXISTS reactions (
            id TEXT PRIMARY KEY,
            entry_id TEXT NOT NULL,
            reaction_type TEXT NOT NULL,
            user_id TEXT,
            created_at TEXT NOT NULL,
            FOREIGN KEY (entry_id) REFERENCES journal_entries(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_reactions_entry_id ON reactions(entry_id);

        -- Community comments on shared entries
        CREATE TABLE IF NOT EXISTS comments (
            id TEXT PRIMARY KEY,
            entry_id TEXT NOT NULL,
            author TEXT NOT NULL,
            content TEXT NOT NULL,
            timestamp TEXT NOT NULL,
            likes INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (entry_id) REFERENCES journal_entries(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_comments_entry_id ON comments(entry_id);
        "#,
    )
    .await?;

    Ok(())
}

/// Reject a second entry with the same content and timestamp. Fails when the
/// table already holds such duplicates.
pub async fn enable_unique_entries(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_journal_entries_content_date ON journal_entries(content, date)",
        (),
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use libsql::Builder;

    async fn column_names(conn: &Connection, table: &str) -> Vec<String> {
        let mut rows = conn
            .query(&format!("SELECT name FROM pragma_table_info('{table}')"), ())
            .await
            .unwrap();
        let mut names = Vec::new();
        while let Some(row) = rows.next().await.unwrap() {
            names.push(row.get::<String>(0).unwrap());
        }
        names
    }

    #[tokio::test]
    async fn test_init_schema_creates_tables() {
        let db = Builder::new_local(":memory:").build().await.unwrap();
        let conn = db.connect().unwrap();

        init_schema(&conn).await.unwrap();
        // Idempotent
        init_schema(&conn).await.unwrap();

        let entry_columns = column_names(&conn, "journal_entries").await;
        for column in ["id", "content", "mood", "ai_summary", "themes", "shared", "date"] {
            assert!(
                entry_columns.contains(&column.to_string()),
                "journal_entries should have column {column}"
            );
        }
        assert_eq!(column_names(&conn, "reactions").await.len(), 5);
        assert_eq!(column_names(&conn, "comments").await.len(), 6);
    }

    #[tokio::test]
    async fn test_unique_index_rejects_duplicate_content_and_date() {
        let db = Builder::new_local(":memory:").build().await.unwrap();
        let conn = db.connect().unwrap();
        init_schema(&conn).await.unwrap();
        enable_unique_entries(&conn).await.unwrap();

        let insert = "INSERT INTO journal_entries (id, content, date) VALUES (?1, 'same', '2024-01-01T00:00:00.000000Z')";
        conn.execute(insert, libsql::params!["a"]).await.unwrap();
        let err = conn.execute(insert, libsql::params!["b"]).await.unwrap_err();
        assert!(err.to_string().contains("UNIQUE constraint failed"));
    }

    #[tokio::test]
    async fn test_unique_index_over_existing_duplicates_fails() {
        let db = Builder::new_local(":memory:").build().await.unwrap();
        let conn = db.connect().unwrap();
        init_schema(&conn).await.unwrap();

        let insert = "INSERT INTO journal_entries (id, content, date) VALUES (?1, 'same', '2024-01-01T00:00:00.000000Z')";
        conn.execute(insert, libsql::params!["a"]).await.unwrap();
        conn.execute(insert, libsql::params!["b"]).await.unwrap();

        let err = enable_unique_entries(&conn).await.unwrap_err();
        assert!(matches!(err, crate::error::JournalError::Database(_)), "{err:?}");
    }
}
