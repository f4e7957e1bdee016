use std::sync::Arc;

use libsql::{Builder, Connection};

use crate::config::DatabaseConfig;
use crate::error::Result;

use super::schema;

/// Where the journal lives, derived from `DATABASE_URL`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    /// Turso/libSQL server, optionally mirrored into a local replica file.
    Remote {
        url: String,
        replica: Option<String>,
    },
    Memory,
    File(String),
}

impl Location {
    fn parse(config: &DatabaseConfig) -> Self {
        let url = config.url.trim();
        if url.starts_with("libsql://") || url.starts_with("https://") {
            Location::Remote {
                url: url.to_string(),
                replica: config.local_path.clone(),
            }
        } else if url == ":memory:" {
            Location::Memory
        } else {
            Location::File(url.strip_prefix("file:").unwrap_or(url).to_string())
        }
    }
}

/// SQLite settings applied once at startup. Values outside the accepted
/// set fall back to the defaults.
#[derive(Debug, Clone)]
struct Pragmas {
    busy_timeout_ms: u64,
    journal_mode: &'static str,
    synchronous: &'static str,
}

impl Pragmas {
    fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            busy_timeout_ms: config.busy_timeout_ms,
            journal_mode: pick(
                &config.journal_mode,
                &["DELETE", "TRUNCATE", "PERSIST", "MEMORY", "WAL", "OFF"],
                "WAL",
            ),
            synchronous: pick(
                &config.synchronous,
                &["OFF", "NORMAL", "FULL", "EXTRA"],
                "NORMAL",
            ),
        }
    }

    fn statements(&self) -> [(&'static str, String); 3] {
        [
            ("busy_timeout", self.busy_timeout_ms.to_string()),
            ("journal_mode", self.journal_mode.to_string()),
            ("synchronous", self.synchronous.to_string()),
        ]
    }
}

fn pick(value: &str, allowed: &[&'static str], default: &'static str) -> &'static str {
    let wanted = value.trim().to_uppercase();
    allowed
        .iter()
        .copied()
        .find(|candidate| *candidate == wanted)
        .unwrap_or(default)
}

/// Handle to the journal database. Cheap to clone.
#[derive(Clone)]
pub struct Database {
    db: Arc<libsql::Database>,
}

impl Database {
    /// Open the database, apply pragmas and make sure the schema exists.
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let location = Location::parse(config);
        tracing::debug!(?location, "Opening journal database");

        let db = match location {
            Location::Remote { url, replica } => {
                let token = config.auth_token.clone().unwrap_or_default();
                match replica {
                    Some(path) => Builder::new_remote_replica(path, url, token).build().await?,
                    None => Builder::new_remote(url, token).build().await?,
                }
            }
            Location::Memory => Builder::new_local(":memory:").build().await?,
            Location::File(path) => Builder::new_local(path).build().await?,
        };

        let database = Self { db: Arc::new(db) };
        let conn = database.connect()?;

        apply_pragmas(&conn, &Pragmas::from_config(config)).await;
        schema::init_schema(&conn).await?;
        if config.unique_entries {
            schema::enable_unique_entries(&conn).await?;
            tracing::info!("Unique (content, date) index enabled for journal entries");
        }

        Ok(database)
    }

    pub fn connect(&self) -> Result<Connection> {
        Ok(self.db.connect()?)
    }

    /// Pull changes from the primary when running as an embedded replica.
    /// Local databases have nothing to sync and succeed trivially.
    pub async fn sync(&self) -> Result<()> {
        if let Ok(replicated) = self.db.sync().await {
            tracing::debug!(?replicated, "Database synced");
        }
        Ok(())
    }
}

async fn apply_pragmas(conn: &Connection, pragmas: &Pragmas) {
    for (name, value) in pragmas.statements() {
        if let Err(error) = conn.execute_batch(&format!("PRAGMA {name} = {value}")).await {
            tracing::warn!(pragma = name, value = %value, error = %error, "Failed to set SQLite pragma");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_pragma_values_are_normalized() {
        assert_eq!(pick("wal", &["DELETE", "WAL"], "WAL"), "WAL");
        assert_eq!(pick("bogus", &["DELETE", "WAL"], "WAL"), "WAL");

        let config = DatabaseConfig {
            synchronous: " full ".to_string(),
            journal_mode: String::new(),
            ..Default::default()
        };
        let pragmas = Pragmas::from_config(&config);
        assert_eq!(pragmas.synchronous, "FULL");
        assert_eq!(pragmas.journal_mode, "WAL");
    }

    #[test]
    fn test_location_parsing() {
        let mut config = DatabaseConfig::default();
        assert_eq!(
            Location::parse(&config),
            Location::File("mindscript.db".to_string())
        );

        config.url = ":memory:".to_string();
        assert_eq!(Location::parse(&config), Location::Memory);

        config.url = "libsql://journal.turso.io".to_string();
        config.local_path = Some("replica.db".to_string());
        assert_eq!(
            Location::parse(&config),
            Location::Remote {
                url: "libsql://journal.turso.io".to_string(),
                replica: Some("replica.db".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_opens_local_file_and_creates_schema() {
        let tmp = NamedTempFile::new().unwrap();
        let config = DatabaseConfig {
            url: format!("file:{}", tmp.path().display()),
            ..Default::default()
        };

        let db = Database::new(&config).await.unwrap();
        let conn = db.connect().unwrap();
        let mut rows = conn
            .query(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'journal_entries'",
                (),
            )
            .await
            .unwrap();
        assert!(rows.next().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unique_entries_with_existing_duplicates_fails_to_open() {
        let tmp = NamedTempFile::new().unwrap();
        let mut config = DatabaseConfig {
            url: format!("file:{}", tmp.path().display()),
            ..Default::default()
        };

        let db = Database::new(&config).await.unwrap();
        let conn = db.connect().unwrap();
        let insert = "INSERT INTO journal_entries (id, content, date) VALUES (?1, 'twice', '2024-01-01T00:00:00.000000Z')";
        conn.execute(insert, libsql::params!["a"]).await.unwrap();
        conn.execute(insert, libsql::params!["b"]).await.unwrap();
        drop(conn);
        drop(db);

        config.unique_entries = true;
        assert!(Database::new(&config).await.is_err());
    }
}
