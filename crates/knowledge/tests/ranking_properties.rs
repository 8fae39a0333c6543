//! Property tests for ranking and vector normalization.

use docqa_knowledge::embeddings::normalize;
use docqa_knowledge::top_k;
use proptest::prelude::*;

fn vectors(dim: usize) -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(prop::collection::vec(-1.0f32..1.0, dim), 0..40)
}

proptest! {
    #[test]
    fn ranking_is_sorted_and_bounded(
        query in prop::collection::vec(-1.0f32..1.0, 8),
        candidates in vectors(8),
        k in 0usize..50,
    ) {
        let ranked = top_k(&query, &candidates, k);

        prop_assert_eq!(ranked.len(), k.min(candidates.len()));
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].index < pair[1].index);
            }
        }
    }

    #[test]
    fn ties_resolve_by_index(copies in 1usize..20, k in 1usize..20) {
        let candidates = vec![vec![0.5f32, 0.5]; copies];
        let ranked = top_k(&[1.0, 0.0], &candidates, k);

        let indices: Vec<usize> = ranked.iter().map(|r| r.index).collect();
        let expected: Vec<usize> = (0..k.min(copies)).collect();
        prop_assert_eq!(indices, expected);
    }

    #[test]
    fn normalized_vectors_have_unit_norm(raw in prop::collection::vec(-100.0f32..100.0, 1..64)) {
        prop_assume!(raw.iter().any(|v| v.abs() > 1e-3));

        let unit = normalize(raw);
        let norm: f32 = unit.iter().map(|x| x * x).sum::<f32>().sqrt();
        prop_assert!((norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn zero_vector_unchanged(dim in 1usize..64) {
        prop_assert_eq!(normalize(vec![0.0; dim]), vec![0.0; dim]);
    }
}
