//! Embedding engines for text-to-vector conversion.
//!
//! Two interchangeable engines implement the [`Embedder`] trait: a
//! deterministic SHA-256 hash embedder that needs no model files, and an
//! ONNX model engine (bge-small-en-v1.5 by default). Which one a backend
//! uses is fixed at construction time via `Config`; backend logic never
//! branches on the engine.

mod hash;
mod onnx;

pub use hash::{HashEmbedder, HASH_EMBEDDING_DIMS};
pub use onnx::{OnnxEmbedder, ONNX_EMBEDDING_DIMS};

use crate::errors::Error;

/// Capability for turning key text into fixed-length unit vectors.
///
/// # Mutability Requirements
///
/// `embed` takes `&mut self` because the ONNX engine internally mutates
/// state for tensor allocations; the hash engine is stateless.
pub trait Embedder {
    /// Length of every vector this embedder produces.
    fn dimensions(&self) -> usize;

    /// Generate an embedding for a single text.
    ///
    /// # Errors
    ///
    /// Returns an error if embedding generation fails. The hash engine is
    /// total over any UTF-8 string and never fails.
    fn embed(&mut self, text: &str) -> Result<Vec<f32>, Error>;

    /// Generate embeddings for multiple texts.
    ///
    /// Each element is embedded independently; no state is shared between
    /// calls, so the result equals mapping [`Embedder::embed`] over `texts`.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered, if any.
    fn embed_many(&mut self, texts: &[&str]) -> Result<Vec<Vec<f32>>, Error> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Scale a vector to unit Euclidean length.
///
/// A zero vector is returned unchanged (the divisor is clamped) rather than
/// producing NaN.
pub(crate) fn l2_normalize(vec: &[f32]) -> Vec<f32> {
    let norm: f32 = vec.iter().map(|&x| x * x).sum::<f32>().sqrt();
    let norm = norm.max(1e-9);

    vec.iter().map(|&x| x / norm).collect()
}
