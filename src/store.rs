//! SQLite booking store
//!
//! Append-only: bookings are inserted once and listed newest first. There is
//! no update or delete path.
//!
//! The store is a cheap-to-clone handle around a connection pool and is passed
//! explicitly to whoever needs it.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::models::{BookingRecord, NewBooking};
use crate::pricing::Plan;

const CREATE_BOOKINGS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS bookings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT,
        email TEXT,
        phone TEXT,
        plan TEXT,
        hours INTEGER,
        price INTEGER,
        notes TEXT,
        created_at TEXT
    )
"#;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("booking {id} has an unreadable timestamp: {value}")]
    InvalidTimestamp { id: i64, value: String },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i64,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    plan: Option<String>,
    hours: i64,
    price: i64,
    notes: Option<String>,
    created_at: String,
}

impl TryFrom<BookingRow> for BookingRecord {
    type Error = StoreError;

    fn try_from(row: BookingRow) -> StoreResult<Self> {
        let created_at = parse_timestamp(&row.created_at).ok_or_else(|| {
            StoreError::InvalidTimestamp {
                id: row.id,
                value: row.created_at.clone(),
            }
        })?;

        Ok(BookingRecord {
            id: row.id,
            name: row.name.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            phone: row.phone,
            plan: Plan::from_form(row.plan.as_deref()),
            hours: row.hours,
            price: row.price,
            notes: row.notes,
            created_at,
        })
    }
}

/// Booking store handle
#[derive(Debug, Clone)]
pub struct BookingStore {
    pool: SqlitePool,
}

impl BookingStore {
    /// Open the store described by the `[database]` section
    pub async fn from_config(config: &DatabaseConfig) -> StoreResult<Self> {
        Self::open(&config.path, config.max_connections).await
    }

    /// Open (creating if missing) a file-backed store and make sure the schema exists
    pub async fn open(path: impl AsRef<Path>, max_connections: u32) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Database(sqlx::Error::Io(e)))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;

        tracing::info!(path = %path.display(), "Booking store opened");
        Ok(store)
    }

    /// In-memory store on a single pinned connection
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the bookings table if it does not exist.
    ///
    /// Safe to run on every start and from several processes at once.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_BOOKINGS_TABLE).execute(&self.pool).await?;
        tracing::debug!("Bookings schema ensured");
        Ok(())
    }

    /// Persist a booking and return its identifier.
    ///
    /// The identifier and the UTC creation time are assigned here.
    pub async fn insert(&self, booking: &NewBooking) -> StoreResult<i64> {
        let created_at = format_timestamp(Utc::now());

        let result = sqlx::query(
            "INSERT INTO bookings (name, email, phone, plan, hours, price, notes, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&booking.name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(booking.plan.as_str())
        .bind(booking.hours)
        .bind(booking.price)
        .bind(&booking.notes)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// All bookings, newest first.
    ///
    /// Rows whose `created_at` cannot be read are logged and left out.
    pub async fn list_all(&self) -> StoreResult<Vec<BookingRecord>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            "SELECT id, name, email, phone, plan, hours, price, notes, created_at
             FROM bookings
             ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match BookingRecord::try_from(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable booking row");
                    None
                }
            })
            .collect())
    }

    pub async fn count(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Naive forms read as UTC: ISO (`2024-05-01T09:30:00.123456`) and SQLite's
/// `CURRENT_TIMESTAMP` (`2024-05-01 09:30:00`)
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_round_trip() {
        let ts = DateTime::parse_from_rfc3339("2025-03-01T10:15:30.250000Z")
            .unwrap()
            .with_timezone(&Utc);
        let formatted = format_timestamp(ts);
        assert_eq!(formatted, "2025-03-01T10:15:30.250000Z");
        assert_eq!(parse_timestamp(&formatted), Some(ts));
    }

    #[test]
    fn test_parse_naive_timestamp() {
        let ts = parse_timestamp("2024-05-01T09:30:00.123456").unwrap();
        assert_eq!(format_timestamp(ts), "2024-05-01T09:30:00.123456Z");
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_parse_sqlite_current_timestamp() {
        let ts = parse_timestamp("2024-05-01 09:30:00").unwrap();
        assert_eq!(format_timestamp(ts), "2024-05-01T09:30:00.000000Z");
    }

    #[tokio::test]
    async fn test_insert_and_list_newest_first() {
        let store = BookingStore::in_memory().await.unwrap();

        let first = store
            .insert(&NewBooking::new("Anna", "a@x.com", Plan::Group, 2))
            .await
            .unwrap();
        let second = store
            .insert(&NewBooking::new("Boris", "b@x.com", Plan::Individual, 3))
            .await
            .unwrap();
        assert!(second > first);

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second);
        assert_eq!(all[0].price, 2370);
        assert_eq!(all[1].id, first);
        assert_eq!(all[1].price, 1180);
    }

    #[tokio::test]
    async fn test_unreadable_timestamp_row_is_skipped() {
        let store = BookingStore::in_memory().await.unwrap();
        let id = store
            .insert(&NewBooking::new("Anna", "a@x.com", Plan::Group, 2))
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO bookings (name, email, plan, hours, price, created_at)
             VALUES ('x', 'x@x.com', 'group', 1, 590, 'not a date')",
        )
        .execute(store.pool())
        .await
        .unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[test]
    fn test_unreadable_timestamp_conversion_error() {
        let row = BookingRow {
            id: 7,
            name: None,
            email: None,
            phone: None,
            plan: None,
            hours: 1,
            price: 590,
            notes: None,
            created_at: "not a date".to_string(),
        };
        let err = BookingRecord::try_from(row).unwrap_err();
        assert!(matches!(err, StoreError::InvalidTimestamp { id: 7, .. }));
    }

    #[tokio::test]
    async fn test_count() {
        let store = BookingStore::in_memory().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
        store
            .insert(&NewBooking::new("Anna", "a@x.com", Plan::Group, 1))
            .await
            .unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
