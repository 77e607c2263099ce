use async_trait::async_trait;
use chrono::{DateTime, Utc};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::debug;
use uuid::Uuid;

use super::errors::StoreError;
use super::{BloodPressureStore, UserStore};
use crate::models::{BloodPressureRecord, User};
use crate::page::{Page, PageRequest, Sort, SortField};

/// Shared SQLite connection pool
pub type SqlitePool = r2d2::Pool<SqliteConnectionManager>;

/// Open a pooled SQLite database and create the schema if needed
pub fn open_pool(path: &str) -> Result<SqlitePool, StoreError> {
    let manager = SqliteConnectionManager::file(path);
    let pool = r2d2::Pool::new(manager)?;

    let conn = pool.get()?;
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS blood_pressures (
             id        TEXT PRIMARY KEY,
             systolic  INTEGER NOT NULL,
             diastolic INTEGER NOT NULL,
             timestamp TEXT NOT NULL,
             owner_id  TEXT
         );
         CREATE TABLE IF NOT EXISTS users (
             id    TEXT PRIMARY KEY,
             login TEXT
         );",
    )?;

    Ok(pool)
}

/// Raw row shape before id/timestamp parsing
struct RawRecordRow {
    id: String,
    systolic: i64,
    diastolic: i64,
    timestamp: String,
    owner_id: Option<String>,
}

impl RawRecordRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            systolic: row.get(1)?,
            diastolic: row.get(2)?,
            timestamp: row.get(3)?,
            owner_id: row.get(4)?,
        })
    }

    fn into_record(self) -> Result<BloodPressureRecord, StoreError> {
        let id = Uuid::parse_str(&self.id).map_err(|_| StoreError::InvalidId(self.id))?;
        let systolic =
            u16::try_from(self.systolic).map_err(|_| StoreError::InvalidReading(self.systolic))?;
        let diastolic = u16::try_from(self.diastolic)
            .map_err(|_| StoreError::InvalidReading(self.diastolic))?;
        let timestamp = DateTime::parse_from_rfc3339(&self.timestamp)
            .map_err(|_| StoreError::DateParse(self.timestamp))?
            .with_timezone(&Utc);
        let owner = self
            .owner_id
            .map(|raw| {
                Uuid::parse_str(&raw)
                    .map(BloodPressureRecord::owner_stub)
                    .map_err(|_| StoreError::InvalidId(raw))
            })
            .transpose()?;

        Ok(BloodPressureRecord {
            id: Some(id),
            systolic,
            diastolic,
            timestamp,
            owner,
        })
    }
}

/// SQLite-backed store for blood pressure records
#[derive(Clone)]
pub struct SqliteBloodPressureStore {
    pool: SqlitePool,
}

impl SqliteBloodPressureStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn write(&self, id: Uuid, record: &BloodPressureRecord) -> Result<(), StoreError> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT OR REPLACE INTO blood_pressures
             (id, systolic, diastolic, timestamp, owner_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                id.to_string(),
                record.systolic as i64,
                record.diastolic as i64,
                record.timestamp.to_rfc3339(),
                record.owner.as_ref().map(|owner| owner.id.to_string()),
            ),
        )?;
        Ok(())
    }
}

#[async_trait]
impl BloodPressureStore for SqliteBloodPressureStore {
    async fn insert(
        &self,
        mut record: BloodPressureRecord,
    ) -> Result<BloodPressureRecord, StoreError> {
        let id = Uuid::new_v4();
        debug!("Inserting blood pressure record: id={}", id);

        self.write(id, &record)?;
        record.id = Some(id);
        record.owner = record
            .owner
            .map(|owner| BloodPressureRecord::owner_stub(owner.id));
        Ok(record)
    }

    async fn update(
        &self,
        record: BloodPressureRecord,
    ) -> Result<BloodPressureRecord, StoreError> {
        let id = record.id.ok_or(StoreError::MissingId)?;
        debug!("Updating blood pressure record: id={}", id);

        self.write(id, &record)?;
        let mut record = record;
        record.owner = record
            .owner
            .map(|owner| BloodPressureRecord::owner_stub(owner.id));
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<BloodPressureRecord>, StoreError> {
        let conn = self.pool.get()?;
        let row = conn.query_row(
            "SELECT id, systolic, diastolic, timestamp, owner_id
             FROM blood_pressures WHERE id = ?1",
            [id.to_string()],
            RawRecordRow::from_row,
        );

        match row {
            Ok(raw) => Ok(Some(raw.into_record()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::Sqlite(e)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let conn = self.pool.get()?;
        conn.execute(
            "DELETE FROM blood_pressures WHERE id = ?1",
            [id.to_string()],
        )?;
        Ok(())
    }

    async fn find_page(
        &self,
        request: &PageRequest,
    ) -> Result<Page<BloodPressureRecord>, StoreError> {
        let conn = self.pool.get()?;
        let sort = request
            .sort
            .unwrap_or_else(|| Sort::descending(SortField::Timestamp));
        let direction = if sort.ascending { "ASC" } else { "DESC" };

        // Sort columns come from the whitelisted SortField set, never from
        // raw client input.
        let query = format!(
            "SELECT id, systolic, diastolic, timestamp, owner_id
             FROM blood_pressures
             ORDER BY {} {}, id ASC
             LIMIT ?1 OFFSET ?2",
            sort.field.column(),
            direction,
        );

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(
            (request.size as i64, request.offset() as i64),
            RawRecordRow::from_row,
        )?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?.into_record()?);
        }

        let total: i64 =
            conn.query_row("SELECT COUNT(*) FROM blood_pressures", [], |row| row.get(0))?;

        Ok(Page::new(items, total as usize, request))
    }
}

/// SQLite-backed store for user records
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn get(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let conn = self.pool.get()?;
        let row = conn.query_row(
            "SELECT id, login FROM users WHERE id = ?1",
            [id.to_string()],
            |row| {
                let id: String = row.get(0)?;
                let login: Option<String> = row.get(1)?;
                Ok((id, login))
            },
        );

        match row {
            Ok((raw_id, login)) => {
                let id = Uuid::parse_str(&raw_id).map_err(|_| StoreError::InvalidId(raw_id))?;
                Ok(Some(User { id, login }))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::Sqlite(e)),
        }
    }

    async fn upsert(&self, user: User) -> Result<User, StoreError> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT OR REPLACE INTO users (id, login) VALUES (?1, ?2)",
            (user.id.to_string(), user.login.clone()),
        )?;
        Ok(user)
    }
}
