use chrono::{DateTime, SecondsFormat, Utc};
use libsql::{params, Connection};

use crate::error::{JournalError, Result};
use crate::models::{JournalEntry, JournalEntryPatch};

const ENTRY_COLUMNS: &str = "id, content, mood, ai_summary, themes, shared, user_id, date";

/// Fixed-width UTC timestamp so that `ORDER BY date` sorts chronologically.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| JournalError::Internal(format!("Corrupt stored timestamp '{value}': {e}")))
}

pub struct EntryRepository;

impl EntryRepository {
    pub async fn create(conn: &Connection, entry: &JournalEntry) -> Result<()> {
        let result = conn
            .execute(
                r#"
                INSERT INTO journal_entries (
                    id, content, mood, ai_summary, themes, shared, user_id, date
                ) VALUES (
                    ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8
                )
                "#,
                params![
                    entry.id.clone(),
                    entry.content.clone(),
                    entry.mood.clone(),
                    entry.ai_summary.clone(),
                    serde_json::to_string(&entry.themes)?,
                    entry.shared as i32,
                    entry.user_id.clone(),
                    format_timestamp(&entry.date),
                ],
            )
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.to_string().contains("UNIQUE constraint failed") => Err(
                JournalError::Conflict("An entry with this content and date already exists".into()),
            ),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<JournalEntry>> {
        let mut rows = conn
            .query(
                &format!("SELECT {ENTRY_COLUMNS} FROM journal_entries WHERE id = ?1"),
                params![id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_entry(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn list(conn: &Connection) -> Result<Vec<JournalEntry>> {
        Self::query_many(
            conn,
            &format!("SELECT {ENTRY_COLUMNS} FROM journal_entries ORDER BY date DESC, rowid DESC"),
        )
        .await
    }

    pub async fn list_shared(conn: &Connection) -> Result<Vec<JournalEntry>> {
        Self::query_many(
            conn,
            &format!(
                "SELECT {ENTRY_COLUMNS} FROM journal_entries WHERE shared = 1 ORDER BY date DESC, rowid DESC"
            ),
        )
        .await
    }

    pub async fn update(
        conn: &Connection,
        id: &str,
        patch: &JournalEntryPatch,
    ) -> Result<Option<JournalEntry>> {
        let Some(mut entry) = Self::get_by_id(conn, id).await? else {
            return Ok(None);
        };
        entry.apply(patch.clone());

        conn.execute(
            r#"
            UPDATE journal_entries SET
                content = ?2,
                mood = ?3,
                ai_summary = ?4,
                themes = ?5,
                shared = ?6,
                user_id = ?7
            WHERE id = ?1
            "#,
            params![
                entry.id.clone(),
                entry.content.clone(),
                entry.mood.clone(),
                entry.ai_summary.clone(),
                serde_json::to_string(&entry.themes)?,
                entry.shared as i32,
                entry.user_id.clone(),
            ],
        )
        .await?;

        Ok(Some(entry))
    }

    async fn query_many(conn: &Connection, sql: &str) -> Result<Vec<JournalEntry>> {
        let mut rows = conn.query(sql, ()).await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(Self::row_to_entry(&row)?);
        }

        Ok(entries)
    }

    fn row_to_entry(row: &libsql::Row) -> Result<JournalEntry> {
        Ok(JournalEntry {
            id: row.get(0)?,
            content: row.get(1)?,
            mood: row.get(2)?,
            ai_summary: row.get(3)?,
            themes: serde_json::from_str(&row.get::<String>(4)?).unwrap_or_default(),
            shared: row.get::<i32>(5)? != 0,
            user_id: row.get(6)?,
            date: parse_timestamp(&row.get::<String>(7)?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;
    use chrono::{Duration, TimeZone};

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

    fn entry_at(id: &str, content: &str, date: DateTime<Utc>) -> JournalEntry {
        let mut entry = JournalEntry::new(id.to_string(), content.to_string());
        entry.date = date;
        entry
    }

    #[tokio::test]
    async fn test_create_and_get_by_id() {
        let conn = setup_test_db().await;
        let mut entry = entry_at(
            "e1",
            "A good day at the park",
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
        );
        entry.mood = Some("positive".to_string());
        entry.ai_summary = Some("Park day".to_string());
        entry.themes = vec!["outdoors".to_string(), "family".to_string()];
        entry.shared = true;

        EntryRepository::create(&conn, &entry).await.unwrap();
        let fetched = EntryRepository::get_by_id(&conn, "e1").await.unwrap().unwrap();

        assert_eq!(fetched, entry);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let conn = setup_test_db().await;
        assert!(EntryRepository::get_by_id(&conn, "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let conn = setup_test_db().await;
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();

        EntryRepository::create(&conn, &entry_at("mid", "b", base + Duration::days(1)))
            .await
            .unwrap();
        EntryRepository::create(&conn, &entry_at("old", "a", base))
            .await
            .unwrap();
        EntryRepository::create(&conn, &entry_at("new", "c", base + Duration::days(10)))
            .await
            .unwrap();

        let ids: Vec<String> = EntryRepository::list(&conn)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_list_shared_filters_private_entries() {
        let conn = setup_test_db().await;
        let now = Utc::now();
        let mut shared = entry_at("s", "shared", now);
        shared.shared = true;
        EntryRepository::create(&conn, &shared).await.unwrap();
        EntryRepository::create(&conn, &entry_at("p", "private", now))
            .await
            .unwrap();

        let entries = EntryRepository::list_shared(&conn).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "s");
    }

    #[tokio::test]
    async fn test_update_applies_patch() {
        let conn = setup_test_db().await;
        EntryRepository::create(&conn, &entry_at("e1", "draft", Utc::now()))
            .await
            .unwrap();

        let patch = JournalEntryPatch {
            shared: Some(true),
            themes: Some(vec!["work".to_string()]),
            ..Default::default()
        };
        let updated = EntryRepository::update(&conn, "e1", &patch)
            .await
            .unwrap()
            .unwrap();
        assert!(updated.shared);

        let fetched = EntryRepository::get_by_id(&conn, "e1").await.unwrap().unwrap();
        assert_eq!(fetched.content, "draft");
        assert_eq!(fetched.themes, vec!["work".to_string()]);
        assert!(fetched.shared);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let conn = setup_test_db().await;
        let result = EntryRepository::update(&conn, "ghost", &JournalEntryPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_maps_to_conflict_when_unique() {
        let conn = setup_test_db().await;
        schema::enable_unique_entries(&conn).await.unwrap();
        let date = Utc.with_ymd_and_hms(2024, 2, 2, 2, 2, 2).unwrap();

        EntryRepository::create(&conn, &entry_at("a", "same words", date))
            .await
            .unwrap();
        let err = EntryRepository::create(&conn, &entry_at("b", "same words", date))
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::Conflict(_)));
    }

    #[test]
    fn test_timestamp_format_is_fixed_width() {
        let a = format_timestamp(&Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let b = format_timestamp(
            &(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::microseconds(5)),
        );
        assert_eq!(a.len(), b.len());
        assert!(a < b);
        assert_eq!(
            parse_timestamp(&b).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::microseconds(5)
        );
    }

    #[test]
    fn test_corrupt_timestamp_is_an_error() {
        let err = parse_timestamp("yesterday-ish").unwrap_err();
        assert!(matches!(err, JournalError::Internal(_)));
    }

    #[tokio::test]
    async fn test_unrecognised_mood_round_trips() {
        let conn = setup_test_db().await;
        let mut entry = entry_at("e1", "restless", Utc::now());
        entry.mood = Some("anxious".to_string());
        EntryRepository::create(&conn, &entry).await.unwrap();

        let fetched = EntryRepository::get_by_id(&conn, "e1").await.unwrap().unwrap();
        assert_eq!(fetched.mood.as_deref(), Some("anxious"));
    }

    #[tokio::test]
    async fn test_corrupt_stored_date_surfaces_error() {
        let conn = setup_test_db().await;
        EntryRepository::create(&conn, &entry_at("e1", "fine", Utc::now()))
            .await
            .unwrap();
        conn.execute("UPDATE journal_entries SET date = 'garbage' WHERE id = 'e1'", ())
            .await
            .unwrap();

        let err = EntryRepository::list(&conn).await.unwrap_err();
        assert!(matches!(err, JournalError::Internal(_)));
    }
}
