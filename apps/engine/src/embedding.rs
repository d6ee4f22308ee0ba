//! Pluggable embedding capability and the process-wide embedding cache.
//!
//! The default `HashEmbedder` is a deterministic pseudo-embedding (a hash of
//! the lowercased text expanded to a fixed-length ±1 vector), not a learned
//! model. Callers only see the `Embedder` trait, so a real model can be
//! substituted without touching the enrichment or matching stages.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use sha2::{Digest, Sha256};

/// Fixed embedding width. Matches the all-MiniLM-L6-v2 footprint the
/// placeholder stands in for.
pub const EMBEDDING_DIM: usize = 384;

/// A pure, deterministic text-to-vector capability. Implementations must
/// return the same `EMBEDDING_DIM`-length vector for the same input, every
/// time, with no side effects.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Vec<f32>;
}

/// Hash-based pseudo-embedding: SHA-256 of the lowercased text, expanded
/// bit-by-bit into a ±1.0 vector. Stable across processes and platforms.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashEmbedder;

impl Embedder for HashEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        let lowered = text.to_lowercase();
        let mut out = Vec::with_capacity(EMBEDDING_DIM);
        let mut block: u8 = 0;
        while out.len() < EMBEDDING_DIM {
            let mut hasher = Sha256::new();
            hasher.update(lowered.as_bytes());
            hasher.update([block]);
            let digest = hasher.finalize();
            'digest: for byte in digest {
                for bit in 0..8 {
                    if out.len() == EMBEDDING_DIM {
                        break 'digest;
                    }
                    out.push(((byte >> bit) & 1) as f32 * 2.0 - 1.0);
                }
            }
            block = block.wrapping_add(1);
        }
        out
    }
}

/// Shared embedding cache: skill string → vector, keyed by the *exact*
/// string (not lowercased). Insert-only, never evicted. Concurrent callers
/// may race on a miss; the embedder is pure, so a lost race only costs a
/// redundant computation.
#[derive(Default)]
pub struct EmbeddingCache {
    inner: RwLock<HashMap<String, Arc<Vec<f32>>>>,
}

impl EmbeddingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the cached vector or computes and inserts it.
    pub fn get_or_compute(&self, skill: &str, embedder: &dyn Embedder) -> Arc<Vec<f32>> {
        if let Some(v) = self.inner.read().get(skill) {
            return Arc::clone(v);
        }
        let computed = Arc::new(embedder.embed(skill));
        let mut guard = self.inner.write();
        // Another caller may have inserted while we computed; keep theirs.
        Arc::clone(
            guard
                .entry(skill.to_string())
                .or_insert_with(|| Arc::clone(&computed)),
        )
    }

    /// Read-only lookup, no computation on miss.
    pub fn get(&self, skill: &str) -> Option<Arc<Vec<f32>>> {
        self.inner.read().get(skill).map(Arc::clone)
    }

    /// Precomputes vectors for a closed vocabulary (the taxonomy) so
    /// steady-state lookups never write.
    pub fn warm<'a>(&self, skills: impl Iterator<Item = &'a str>, embedder: &dyn Embedder) {
        for skill in skills {
            self.get_or_compute(skill, embedder);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

/// Cosine similarity of two vectors; 0.0 when either norm is zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| (*x as f64) * (*y as f64)).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|y| (*y as f64).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
