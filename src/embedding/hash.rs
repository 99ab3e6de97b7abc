//! Deterministic hash-based embedding engine.
//!
//! Reads SHA-256 output as pseudo-random coordinates, so the same text always
//! maps to the same unit vector and unrelated texts land near-orthogonal.
//! Only near-identical strings score high cosine similarity; there is no
//! semantic clustering. The trade is full offline operation and
//! bit-reproducible results, which is what tests and model-less deployments
//! need.

use sha2::{Digest, Sha256};

use super::Embedder;
use crate::errors::Error;

/// Default dimensionality for hash-based embeddings.
pub const HASH_EMBEDDING_DIMS: usize = 128;

/// Deterministic embedding engine requiring no model files.
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    /// Create an embedder producing vectors of length `dim`.
    #[must_use]
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn hash_to_vector(&self, text: &str) -> Vec<f32> {
        // Accumulate digest output of text || counter until dim * 4 bytes.
        let mut stream = Vec::with_capacity(self.dim * 4 + 32);
        let mut counter: u32 = 0;
        while stream.len() < self.dim * 4 {
            let mut hasher = Sha256::new();
            hasher.update(text.as_bytes());
            hasher.update(counter.to_be_bytes());
            stream.extend_from_slice(&hasher.finalize());
            counter += 1;
        }

        // Each 4-byte big-endian chunk becomes one coordinate in [-1, 1].
        let mut raw = Vec::with_capacity(self.dim);
        for chunk in stream.chunks_exact(4).take(self.dim) {
            let as_int = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            let val = (f64::from(as_int) / f64::from(u32::MAX)) * 2.0 - 1.0;
            raw.push(val);
        }

        // Unit length for cosine similarity. A norm of exactly zero divides
        // by 1 instead, leaving the vector unchanged rather than NaN.
        let norm: f64 = raw.iter().map(|&x| x * x).sum::<f64>().sqrt();
        let norm = if norm == 0.0 { 1.0 } else { norm };
        raw.iter().map(|&x| (x / norm) as f32).collect()
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(HASH_EMBEDDING_DIMS)
    }
}

impl Embedder for HashEmbedder {
    fn dimensions(&self) -> usize {
        self.dim
    }

    fn embed(&mut self, text: &str) -> Result<Vec<f32>, Error> {
        Ok(self.hash_to_vector(text))
    }
}
