//! Store, recall, and forget operations.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::Error;
use crate::memory_types::RecordView;

use super::backend::{MemoryBackend, MAX_INPUT_LENGTH};

impl MemoryBackend {
    #[must_use = "handle the error or the record id is lost"]
    /// Store a (key, value) pair.
    ///
    /// The key is what gets embedded and indexed for similarity; the value
    /// rides along in metadata and comes back on recall. Caller-supplied
    /// `"key"`/`"value"` metadata entries are kept as-is, never overwritten.
    ///
    /// Every call creates a fresh record under a new id: duplicate keys are
    /// legal and each stays independently recallable.
    ///
    /// # Arguments
    ///
    /// * `key` - Text to index (1 to 100,000 characters after trimming)
    /// * `value` - Payload returned on recall
    /// * `metadata` - Optional extra fields stored with the record
    ///
    /// # Returns
    ///
    /// The generated record id.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Key is empty or whitespace-only
    /// - Key or value exceeds 100,000 characters
    /// - Embedding generation fails
    /// - The index write fails
    pub fn store(
        &mut self,
        key: &str,
        value: &str,
        metadata: Option<Map<String, Value>>,
    ) -> Result<String, Error> {
        let key = Self::validate_key(key)?;
        if value.len() > MAX_INPUT_LENGTH {
            return Err(Error::InvalidArgument(format!(
                "value exceeds maximum length ({} > {})",
                value.len(),
                MAX_INPUT_LENGTH
            )));
        }

        let mut meta = metadata.unwrap_or_default();
        meta.entry("key".to_string())
            .or_insert_with(|| Value::String(key.to_string()));
        meta.entry("value".to_string())
            .or_insert_with(|| Value::String(value.to_string()));

        let embedding = self.embedder.embed(key)?;
        let id = Uuid::new_v4().to_string();
        self.index.insert(&id, &embedding, key, &meta)?;

        Ok(id)
    }

    #[must_use = "handle the error or results may be lost"]
    /// Recall the `top_k` nearest memories to `key`, closest first.
    ///
    /// Distances are non-decreasing across the result and exposed raw
    /// (cosine distance, lower = more similar). Fewer stored records than
    /// `top_k` returns all of them; an empty collection returns an empty
    /// vec. Neither is an error.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Key is empty or oversized
    /// - `top_k` exceeds 10,000
    /// - Embedding generation or the index query fails
    pub fn recall(&mut self, key: &str, top_k: usize) -> Result<Vec<RecordView>, Error> {
        if top_k == 0 {
            return Ok(Vec::new());
        }
        Self::validate_top_k(top_k)?;
        let key = Self::validate_key(key)?;

        let embedding = self.embedder.embed(key)?;
        let records = self.index.query(&embedding, top_k)?;

        Ok(records.into_iter().map(RecordView::from).collect())
    }

    #[must_use = "handle the error or deleted ids are lost"]
    /// Forget (delete) the `top_k` nearest memories to `key`.
    ///
    /// Runs the same nearest-neighbor query as [`MemoryBackend::recall`],
    /// then deletes every returned record unconditionally; there is no
    /// distance threshold gate. Returns exactly the deleted ids in the
    /// query's closest-first order. No matches means an empty vec and no
    /// deletion, not an error.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Key is empty or oversized
    /// - `top_k` exceeds 10,000
    /// - Embedding generation, the query, or the deletion fails
    pub fn forget(&mut self, key: &str, top_k: usize) -> Result<Vec<String>, Error> {
        if top_k == 0 {
            return Ok(Vec::new());
        }
        Self::validate_top_k(top_k)?;
        let key = Self::validate_key(key)?;

        let embedding = self.embedder.embed(key)?;
        let records = self.index.query(&embedding, top_k)?;
        let ids: Vec<String> = records.into_iter().map(|r| r.id).collect();

        if !ids.is_empty() {
            self.index.delete(&ids)?;
        }

        Ok(ids)
    }

    #[must_use = "handle the error or results may be lost"]
    /// List stored memories, newest first.
    ///
    /// Inspection helper for humans; the returned views carry no distance.
    ///
    /// # Errors
    ///
    /// Returns error if the limit is 0 or exceeds 10,000.
    pub fn list(&self, limit: usize) -> Result<Vec<RecordView>, Error> {
        if limit == 0 {
            return Err(Error::InvalidArgument(
                "limit must be greater than 0".to_string(),
            ));
        }
        Self::validate_top_k(limit)?;

        let records = self.index.list(limit)?;
        Ok(records.into_iter().map(RecordView::from).collect())
    }

    #[must_use = "handle the error or the count is lost"]
    /// Total count of stored memories in this collection.
    ///
    /// # Errors
    ///
    /// Returns error if the index count fails.
    pub fn count(&self) -> Result<usize, Error> {
        Ok(self.index.count()?)
    }
}
