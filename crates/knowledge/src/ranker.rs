//! Similarity ranking of chunk vectors against a query vector.

use std::cmp::Ordering;

/// A chunk position and its similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredChunk {
    /// Position of the chunk in its document
    pub index: usize,

    /// Dot product with the query
    pub score: f32,
}

/// Dot product over the shared prefix of two vectors.
///
/// With unit-length inputs this is the cosine similarity.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Indices of the `k` vectors most similar to `query`, best first.
///
/// Equal scores keep their original order, so earlier chunks win ties.
/// Returns `min(k, vectors.len())` entries; `k == 0` yields none.
pub fn top_k(query: &[f32], vectors: &[Vec<f32>], k: usize) -> Vec<ScoredChunk> {
    let mut scored: Vec<ScoredChunk> = vectors
        .iter()
        .enumerate()
        .map(|(index, vector)| {
            let score = dot(query, vector);
            ScoredChunk {
                index,
                score: if score.is_nan() { f32::NEG_INFINITY } else { score },
            }
        })
        .collect();

    // Stable sort: ties stay in index order.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(k);
    scored
}
