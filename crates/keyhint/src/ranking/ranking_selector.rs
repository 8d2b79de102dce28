//! # Ranking Selector

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    models::Distribution,
    ranking::select_top_k,
    types::TokenId,
    vocab::VocabIndex,
};

/// The default number of candidates.
pub const DEFAULT_TOP_K: usize = 4;

/// Options for a [`RankingSelector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingOptions {
    /// The maximum number of candidates.
    pub top_k: usize,

    /// Pass over ids with no word, rather than showing the unknown sentinel.
    pub skip_unknown: bool,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            skip_unknown: false,
        }
    }
}

impl RankingOptions {
    /// Set the candidate count.
    pub fn with_top_k(
        mut self,
        top_k: usize,
    ) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set whether ids with no word are passed over.
    pub fn with_skip_unknown(
        mut self,
        skip_unknown: bool,
    ) -> Self {
        self.skip_unknown = skip_unknown;
        self
    }
}

/// A ranked next-word candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The vocabulary id.
    pub id: TokenId,

    /// The display string.
    pub token: String,

    /// The model score.
    pub score: f32,
}

/// Resolves the best-scoring ids of a [`Distribution`] to display strings.
#[derive(Debug, Clone)]
pub struct RankingSelector {
    index: Arc<VocabIndex>,
    options: RankingOptions,
}

impl RankingSelector {
    /// Build a new selector.
    pub fn new(
        index: Arc<VocabIndex>,
        options: RankingOptions,
    ) -> Self {
        Self { index, options }
    }

    /// The selector options.
    pub fn options(&self) -> &RankingOptions {
        &self.options
    }

    /// Rank `distribution` into at most `top_k` candidates.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, distribution)))]
    pub fn candidates(
        &self,
        distribution: &Distribution,
    ) -> Vec<Candidate> {
        let k = self.options.top_k;
        let scores = distribution.as_slice();

        if !self.options.skip_unknown {
            return select_top_k(scores, k)
                .into_iter()
                .map(|(id, score)| Candidate {
                    id,
                    token: self.index.lookup_token(id).to_string(),
                    score,
                })
                .collect();
        }

        // Widen the window until enough known words fill it.
        let mut window = k;
        loop {
            let ranked = select_top_k(scores, window);
            let exhausted = ranked.len() < window;

            let known: Vec<Candidate> = ranked
                .into_iter()
                .filter_map(|(id, score)| {
                    self.index.get_token(id).map(|token| Candidate {
                        id,
                        token: token.to_string(),
                        score,
                    })
                })
                .take(k)
                .collect();

            if known.len() == k || exhausted || window >= scores.len() {
                return known;
            }
            window = window.saturating_mul(2);
        }
    }

    /// Rank `distribution` into at most `top_k` display strings.
    pub fn select(
        &self,
        distribution: &Distribution,
    ) -> Vec<String> {
        self.candidates(distribution)
            .into_iter()
            .map(|c| c.token)
            .collect()
    }
}
