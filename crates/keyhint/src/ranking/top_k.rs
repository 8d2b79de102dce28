//! # Top-K Selection

use core::cmp::Ordering;

use crate::types::{TokenId, token_id_from_usize};

/// Ranking order: higher score first, NaN last, lower index on ties.
fn rank_order(
    (a_idx, a): (usize, f32),
    (b_idx, b): (usize, f32),
) -> Ordering {
    let by_score = match (a.is_nan(), b.is_nan()) {
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    };
    by_score.then(a_idx.cmp(&b_idx))
}

/// Select the `k` best-scoring positions of `distribution`.
///
/// ## Returns
/// ``(id, score)`` pairs sorted by descending score, with lower ids first
/// on equal scores. NaN scores rank below every number. Returns all
/// positions when `k` exceeds the distribution width; never fails.
pub fn select_top_k(
    distribution: &[f32],
    k: usize,
) -> Vec<(TokenId, f32)> {
    let k = k.min(distribution.len());
    if k == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(usize, f32)> = distribution.iter().copied().enumerate().collect();
    if k < ranked.len() {
        ranked.select_nth_unstable_by(k - 1, |&a, &b| rank_order(a, b));
        ranked.truncate(k);
    }
    ranked.sort_unstable_by(|&a, &b| rank_order(a, b));

    ranked
        .into_iter()
        .map_while(|(idx, score)| token_id_from_usize(idx).map(|id| (id, score)))
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_top_k() {
        let scores = [0.1, 0.05, 0.6, 0.25];
        assert_eq!(select_top_k(&scores, 2), vec![(2, 0.6), (3, 0.25)]);
        assert_eq!(
            select_top_k(&scores, 10),
            vec![(2, 0.6), (3, 0.25), (0, 0.1), (1, 0.05)]
        );
    }

    #[test]
    fn test_degenerate() {
        assert!(select_top_k(&[], 4).is_empty());
        assert!(select_top_k(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn test_ties_prefer_lower_index() {
        let scores = [0.5, 0.9, 0.5, 0.9, 0.5];
        assert_eq!(
            select_top_k(&scores, 4),
            vec![(1, 0.9), (3, 0.9), (0, 0.5), (2, 0.5)]
        );
    }

    #[test]
    fn test_nan_ranks_last() {
        let scores = [f32::NAN, 0.1, f32::NAN, -1.0];
        let top = select_top_k(&scores, 4);
        assert_eq!(&top[..2], &[(1, 0.1), (3, -1.0)]);
        assert_eq!(top[2].0, 0);
        assert_eq!(top[3].0, 2);
    }

    #[test]
    fn test_infinities() {
        let scores = [f32::NEG_INFINITY, f32::INFINITY, 0.0];
        assert_eq!(
            select_top_k(&scores, 3),
            vec![(1, f32::INFINITY), (2, 0.0), (0, f32::NEG_INFINITY)]
        );
    }

    proptest! {
        #[test]
        fn top_k_matches_full_sort(
            scores in proptest::collection::vec(0u8..8, 0..64),
            k in 0usize..80,
        ) {
            // Small integer scores force plenty of ties.
            let scores: Vec<f32> = scores.into_iter().map(f32::from).collect();

            let top = select_top_k(&scores, k);
            prop_assert_eq!(top.len(), k.min(scores.len()));
            prop_assert_eq!(&top, &select_top_k(&scores, k));

            let mut expected: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
            expected.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap().then(a.0.cmp(&b.0)));
            let expected: Vec<(TokenId, f32)> = expected
                .into_iter()
                .take(k)
                .map(|(i, s)| (i as TokenId, s))
                .collect();
            prop_assert_eq!(top, expected);
        }
    }
}
