//! Similarity index backing the memory store.
//!
//! The index stores (id, vector, key text, metadata) tuples and answers
//! k-nearest-neighbor queries by cosine distance. [`SimilarityIndex`] is the
//! capability the memory backend consumes; [`SqliteIndex`] is the bundled
//! implementation.

pub mod sqlite;
pub mod vector;

use serde_json::{Map, Value};

pub use self::sqlite::SqliteIndex;

/// A single indexed record.
#[derive(Clone, Debug)]
pub struct Record {
    pub id: String,
    /// Text the record was indexed under (what got embedded).
    pub key: String,
    /// Stored metadata object, `key`/`value` entries included.
    pub metadata: Map<String, Value>,

    /// Cosine distance to the query vector (lower = more similar).
    /// `None` for records produced by `list`, which has no query.
    pub distance: Option<f64>,
    pub created_at: String,
}

/// Error types for index operations.
#[derive(Debug)]
pub enum Error {
    /// The index cannot be created, opened, or reached.
    Unavailable(String),
    Sqlite(String),
    Metadata(String),
    InvalidBlobSize { expected: usize, actual: usize },
    MismatchedDimensions { expected: usize, actual: usize },
    EmptyVector,
    InvalidVector(String),
    InvalidLimit(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Unavailable(msg) => write!(f, "Similarity index unavailable: {}", msg),
            Error::Sqlite(msg) => write!(f, "Database error: {}", msg),
            Error::Metadata(msg) => write!(f, "Invalid metadata: {}", msg),
            Error::InvalidBlobSize { expected, actual } => {
                write!(
                    f,
                    "Invalid BLOB size: expected {} bytes, got {} bytes",
                    expected, actual
                )
            }
            Error::MismatchedDimensions { expected, actual } => {
                write!(
                    f,
                    "Mismatched dimensions: expected {} dimensions, got {} dimensions",
                    expected, actual
                )
            }
            Error::EmptyVector => write!(f, "Cannot compute distance with empty vector"),
            Error::InvalidVector(msg) => write!(f, "Invalid vector: {}", msg),
            Error::InvalidLimit(msg) => write!(f, "Invalid limit: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Sqlite(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Capability surface the memory backend consumes.
///
/// Implementations answer nearest-neighbor queries closest-first and treat
/// absent rows as empty results, never as errors.
pub trait SimilarityIndex {
    /// Vector dimensionality this index was opened with.
    fn dimensions(&self) -> usize;

    /// Insert one record.
    ///
    /// # Errors
    ///
    /// Returns error if the vector has the wrong dimensionality or the
    /// write fails.
    fn insert(
        &self,
        id: &str,
        vector: &[f32],
        key: &str,
        metadata: &Map<String, Value>,
    ) -> Result<()>;

    /// The `k` nearest records by cosine distance, closest first.
    ///
    /// Fewer than `k` stored records return all of them; an empty index
    /// returns an empty vec.
    ///
    /// # Errors
    ///
    /// Returns error if `k` exceeds the query limit or the scan fails.
    fn query(&self, vector: &[f32], k: usize) -> Result<Vec<Record>>;

    /// Delete the given ids, returning how many rows existed.
    ///
    /// Unknown ids are skipped silently.
    ///
    /// # Errors
    ///
    /// Returns error if a delete statement fails.
    fn delete(&self, ids: &[String]) -> Result<usize>;

    /// Records ordered by creation time, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the limit is invalid or the query fails.
    fn list(&self, limit: usize) -> Result<Vec<Record>>;

    /// Total count of records in this collection.
    ///
    /// # Errors
    ///
    /// Returns error if the count query fails.
    fn count(&self) -> Result<usize>;
}
