//! # Recommender
//!
//! The handle a keyboard UI holds. Artifact problems at startup disable
//! prediction instead of failing the host; the UI keeps typing either way.

use std::path::Path;

use crate::{
    errors::KHResult,
    predictor::{NextWordPredictor, PredictorOptions},
};

/// A next-word recommender that may be disabled.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    predictor: Option<NextWordPredictor>,
}

impl From<NextWordPredictor> for Recommender {
    fn from(predictor: NextWordPredictor) -> Self {
        Self {
            predictor: Some(predictor),
        }
    }
}

impl Recommender {
    /// Load the artifacts; on any failure, log it and return a disabled recommender.
    pub fn load<M: AsRef<Path>, V: AsRef<Path>>(
        model_path: M,
        vocab_path: V,
        options: PredictorOptions,
    ) -> Self {
        Self::from_result(NextWordPredictor::from_paths(
            model_path, vocab_path, options,
        ))
    }

    /// Wrap a predictor build; on failure, log it and return a disabled recommender.
    pub fn from_result(result: KHResult<NextWordPredictor>) -> Self {
        match result {
            Ok(predictor) => predictor.into(),
            Err(e) => {
                log::error!("next-word prediction disabled: {e}");
                Self::disabled()
            }
        }
    }

    /// A recommender that never recommends.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Is prediction enabled?
    pub fn is_enabled(&self) -> bool {
        self.predictor.is_some()
    }

    /// The underlying predictor, when enabled.
    pub fn predictor(&self) -> Option<&NextWordPredictor> {
        self.predictor.as_ref()
    }

    /// Recommend up to `top_k` next words for `text`; `[]` when disabled.
    pub fn get_recommendations(
        &self,
        text: &str,
    ) -> Vec<String> {
        self.predictor
            .as_ref()
            .map(|p| p.get_recommendations(text))
            .unwrap_or_default()
    }
}
