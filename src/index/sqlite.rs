//! SQLite-backed similarity index.
//!
//! Vectors live as little-endian f32 BLOBs; nearest-neighbor queries
//! brute-force cosine distance over the collection and sort ascending.
//! That keeps the index dependency-free and is fast enough for the
//! thousands-of-records scale an agent memory sees.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, ToSql};
use serde_json::{Map, Value};

use super::{vector, Error, Record, Result, SimilarityIndex};

/// Maximum allowed k for nearest-neighbor queries and listings.
pub const MAX_QUERY_LIMIT: usize = 10_000;

/// Validate a query limit is within acceptable bounds.
pub fn validate_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(Error::InvalidLimit(
            "Limit must be greater than 0".to_string(),
        ));
    }
    if limit > i64::MAX as usize || limit > MAX_QUERY_LIMIT {
        return Err(Error::InvalidLimit(format!(
            "Limit {} exceeds maximum allowed ({})",
            limit, MAX_QUERY_LIMIT
        )));
    }
    Ok(())
}

/// One collection in a SQLite database, opened at a fixed dimensionality.
pub struct SqliteIndex {
    conn: Connection,
    collection: String,
    dim: usize,
}

fn create_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS collections (
            name TEXT PRIMARY KEY,
            dim INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS memories (
            id TEXT PRIMARY KEY,
            collection TEXT NOT NULL,
            key TEXT NOT NULL,
            embedding BLOB NOT NULL,
            metadata TEXT,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_memories_collection ON memories(collection);
        "#,
    )?;
    Ok(())
}

impl SqliteIndex {
    /// Open or create a collection at the given dimensionality.
    ///
    /// `None` path keeps the whole index in memory (ephemeral). Collections
    /// within one database file are isolated namespaces; each remembers the
    /// dimension it was created with.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unavailable` if the database cannot be opened, the
    /// collection name is empty, `dim` is zero, or an existing collection
    /// was created with a different dimension.
    pub fn open(path: Option<&Path>, collection: &str, dim: usize) -> Result<Self> {
        if collection.trim().is_empty() {
            return Err(Error::Unavailable(
                "collection name cannot be empty".to_string(),
            ));
        }
        if dim == 0 {
            return Err(Error::Unavailable(
                "embedding dimension must be greater than 0".to_string(),
            ));
        }

        let mut conn = match path {
            Some(p) => Connection::open(p).map_err(|e| {
                Error::Unavailable(format!("cannot open database {}: {e}", p.display()))
            })?,
            None => Connection::open_in_memory()
                .map_err(|e| Error::Unavailable(format!("cannot open in-memory database: {e}")))?,
        };

        create_schema(&mut conn).map_err(|e| Error::Unavailable(e.to_string()))?;

        let existing: Option<i64> = conn
            .query_row(
                "SELECT dim FROM collections WHERE name = ?1",
                [collection],
                |row| row.get(0),
            )
            .optional()?;

        match existing {
            Some(d) if d as usize != dim => {
                return Err(Error::Unavailable(format!(
                    "collection '{collection}' was created with dimension {d}, requested {dim}"
                )));
            }
            Some(_) => {}
            None => {
                conn.execute(
                    "INSERT INTO collections (name, dim) VALUES (?1, ?2)",
                    params![collection, dim as i64],
                )?;
            }
        }

        Ok(Self {
            conn,
            collection: collection.to_string(),
            dim,
        })
    }

    /// Name of the collection this handle is scoped to.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn parse_metadata(raw: Option<String>) -> Map<String, Value> {
        raw.and_then(|s| serde_json::from_str::<Value>(&s).ok())
            .and_then(|v| v.as_object().cloned())
            .unwrap_or_default()
    }
}

impl SimilarityIndex for SqliteIndex {
    fn dimensions(&self) -> usize {
        self.dim
    }

    fn insert(
        &self,
        id: &str,
        vector: &[f32],
        key: &str,
        metadata: &Map<String, Value>,
    ) -> Result<()> {
        let blob = vector::vec_to_blob(vector, self.dim)?;
        let meta = serde_json::to_string(metadata).map_err(|e| Error::Metadata(e.to_string()))?;
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            r#"
            INSERT INTO memories (id, collection, key, embedding, metadata, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![id, &self.collection, key, &blob, &meta, &now],
        )?;

        Ok(())
    }

    fn query(&self, query_vector: &[f32], k: usize) -> Result<Vec<Record>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        if k > MAX_QUERY_LIMIT {
            return Err(Error::InvalidLimit(format!(
                "Limit {} exceeds maximum allowed ({})",
                k, MAX_QUERY_LIMIT
            )));
        }

        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, key, metadata, created_at, embedding
            FROM memories
            WHERE collection = ?1
            "#,
        )?;

        let rows = stmt.query_map([&self.collection], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Vec<u8>>(4)?,
            ))
        })?;

        let mut records: Vec<Record> = Vec::new();
        for row_result in rows {
            let (id, key, metadata, created_at, blob) = row_result?;
            let stored = vector::blob_to_vec(&blob, self.dim)?;
            let distance = vector::cosine_distance(query_vector, &stored)?;

            records.push(Record {
                id,
                key,
                metadata: Self::parse_metadata(metadata),
                distance: Some(distance),
                created_at,
            });
        }

        records.sort_by(|a, b| {
            a.distance
                .unwrap_or(f64::MAX)
                .partial_cmp(&b.distance.unwrap_or(f64::MAX))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        records.truncate(k);
        Ok(records)
    }

    fn delete(&self, ids: &[String]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        // One statement so the whole set goes or nothing does.
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql =
            format!("DELETE FROM memories WHERE collection = ? AND id IN ({placeholders})");

        let mut bound: Vec<&dyn ToSql> = Vec::with_capacity(ids.len() + 1);
        bound.push(&self.collection);
        for id in ids {
            bound.push(id);
        }

        let removed = self.conn.execute(&sql, bound.as_slice())?;
        Ok(removed)
    }

    fn list(&self, limit: usize) -> Result<Vec<Record>> {
        validate_limit(limit)?;

        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, key, metadata, created_at
            FROM memories
            WHERE collection = ?1
            ORDER BY created_at DESC
            LIMIT ?2
            "#,
        )?;

        let records: rusqlite::Result<Vec<Record>> = stmt
            .query_map(params![&self.collection, limit as i64], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .map(|row| {
                row.map(|(id, key, metadata, created_at)| Record {
                    id,
                    key,
                    metadata: Self::parse_metadata(metadata),
                    distance: None,
                    created_at,
                })
            })
            .collect();

        Ok(records?)
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM memories WHERE collection = ?1",
            [&self.collection],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
