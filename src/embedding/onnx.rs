//! ONNX embedding engine for learned text embeddings.
//!
//! Uses bge-small-en-v1.5 (384 dimensions) with mean pooling and L2
//! normalization. Fully synchronous: model files come from the HF Hub cache
//! via blocking I/O and are downloaded once.

use hf_hub::api::sync::Api;
use ort::inputs;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::{Tokenizer, TruncationParams};

use super::{l2_normalize, Embedder};
use crate::errors::Error;

/// Embedding dimensions for bge-small-en-v1.5.
pub const ONNX_EMBEDDING_DIMS: usize = 384;

/// Learned embedding engine backed by an ONNX session.
pub struct OnnxEmbedder {
    session: Session,
    tokenizer: Tokenizer,
    requires_token_type_ids: bool,
}

impl OnnxEmbedder {
    /// Load model and tokenizer from the HF Hub cache, downloading on first use.
    ///
    /// # Errors
    ///
    /// Returns error if the model cannot be downloaded, the tokenizer is
    /// malformed, or the ONNX session fails to build.
    pub fn new(model_id: &str) -> Result<Self, Error> {
        let api = Api::new()?;
        let repo = api.model(model_id.to_string());

        let model_path = repo
            .get("onnx/model.onnx")
            .or_else(|_| repo.get("model.onnx"))?;
        let tokenizer_path = repo.get("tokenizer.json")?;

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)?;
        tokenizer
            .with_padding(None)
            .with_truncation(Some(TruncationParams {
                max_length: 512,
                ..Default::default()
            }))?;

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level1)?
            .commit_from_file(&model_path)?;

        // Some exports take a third token_type_ids input, some don't.
        let requires_token_type_ids = session
            .inputs()
            .iter()
            .any(|input| input.name() == "token_type_ids");

        Ok(OnnxEmbedder {
            session,
            tokenizer,
            requires_token_type_ids,
        })
    }

    fn run_model(&mut self, text: &str) -> Result<Vec<f32>, Error> {
        let encoding = self.tokenizer.encode(text, true)?;
        let input_ids = encoding.get_ids();
        let attention_mask = encoding.get_attention_mask();

        if input_ids.is_empty() {
            return Ok(vec![0.0f32; ONNX_EMBEDDING_DIMS]);
        }

        let seq_len = input_ids.len();

        let input_ids_vec: Vec<i64> = input_ids.iter().map(|&id| id as i64).collect();
        let attention_mask_vec: Vec<i64> = attention_mask.iter().map(|&m| m as i64).collect();

        let input_ids_tensor = Tensor::from_array(([1usize, seq_len], input_ids_vec))?;
        let attention_mask_tensor = Tensor::from_array(([1usize, seq_len], attention_mask_vec))?;

        let outputs = if self.requires_token_type_ids {
            // Single sentence, all zeros
            let token_type_ids_vec: Vec<i64> = vec![0i64; seq_len];
            let token_type_ids_tensor =
                Tensor::from_array(([1usize, seq_len], token_type_ids_vec))?;
            self.session.run(inputs![
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor,
                "token_type_ids" => token_type_ids_tensor
            ])?
        } else {
            self.session.run(inputs![
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor
            ])?
        };

        let last_hidden_state = outputs
            .get("last_hidden_state")
            .or_else(|| outputs.get("token_embeddings"))
            .ok_or_else(|| {
                Error::Inference(
                    "Output tensor 'last_hidden_state' or 'token_embeddings' not found".to_string(),
                )
            })?
            .try_extract_tensor::<f32>()?;

        let (shape, data) = last_hidden_state;
        if shape.len() != 3 {
            return Err(Error::Inference(format!(
                "Expected 3D output (batch, seq_len, hidden), got {:?}",
                shape
            )));
        }

        let batch_size = shape[0] as usize;
        let hidden_dim = shape[2] as usize;

        if batch_size != 1 || hidden_dim != ONNX_EMBEDDING_DIMS {
            return Err(Error::Inference(format!(
                "Unexpected output shape: {:?}, batch=1, hidden={} expected",
                shape, ONNX_EMBEDDING_DIMS
            )));
        }

        let pooled = mean_pool(data, attention_mask, seq_len, hidden_dim);
        Ok(l2_normalize(&pooled))
    }
}

/// Average token embeddings weighted by the attention mask.
fn mean_pool(data: &[f32], attention_mask: &[u32], seq_len: usize, hidden_dim: usize) -> Vec<f32> {
    let mut pooled = vec![0.0f32; hidden_dim];

    for (token_idx, chunk) in data.chunks(hidden_dim).take(seq_len).enumerate() {
        let mask_value = attention_mask.get(token_idx).copied().unwrap_or(0) as f32;

        for (dim, pooled_value) in pooled.iter_mut().enumerate() {
            *pooled_value += chunk[dim] * mask_value;
        }
    }

    let mask_sum: f32 = attention_mask
        .iter()
        .take(seq_len)
        .map(|&m| m as f32)
        .sum::<f32>()
        .max(1e-9);

    for value in pooled.iter_mut() {
        *value /= mask_sum;
    }

    pooled
}

impl Embedder for OnnxEmbedder {
    fn dimensions(&self) -> usize {
        ONNX_EMBEDDING_DIMS
    }

    /// Generate an embedding for a single text.
    ///
    /// Returns exactly 384-dimensional f32 vector, L2-normalized. Empty
    /// strings return a zero vector; texts exceeding 512 tokens are silently
    /// truncated by the tokenizer.
    fn embed(&mut self, text: &str) -> Result<Vec<f32>, Error> {
        if text.is_empty() {
            return Ok(vec![0.0f32; ONNX_EMBEDDING_DIMS]);
        }

        self.run_model(text)
    }
}
