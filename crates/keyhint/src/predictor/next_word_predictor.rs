//! # Next-Word Predictor

use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    path::Path,
    sync::Arc,
};

use crate::{
    encoding::{EncodedSequence, SequenceEncoder},
    errors::{ArtifactLoadError, KHResult, KeyhintError, ModelInferenceError},
    models::{ModelFormat, NextWordModel, TimeoutModel, check_input, check_output, load_model_path},
    predictor::PredictorOptions,
    ranking::{Candidate, RankingSelector},
    vocab::{VocabArtifact, VocabIndex, io::VocabFormat, io::load_vocab_path},
};

/// The recommendation pipeline: ``text -> encode -> score -> rank``.
///
/// Immutable after construction; share it behind an `Arc` across threads.
#[derive(Clone)]
pub struct NextWordPredictor {
    options: PredictorOptions,
    encoder: SequenceEncoder,
    model: Arc<dyn NextWordModel>,
    selector: RankingSelector,
}

impl core::fmt::Debug for NextWordPredictor {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("NextWordPredictor")
            .field("options", &self.options)
            .field("vocab_size", &self.encoder.index().len())
            .field("output_width", &self.model.output_width())
            .finish()
    }
}

impl NextWordPredictor {
    /// Pair a vocabulary with a model.
    ///
    /// ## Arguments
    /// * `vocab` - the fitted vocabulary.
    /// * `model` - the scoring model.
    /// * `options` - the pipeline options.
    ///
    /// ## Errors
    /// * [`ModelInferenceError::InputShape`] - the model input length is not `max_len`.
    /// * [`KeyhintError::Config`] - the pad id is a vocabulary word, or the
    ///   scoring timeout is zero.
    /// * [`ArtifactLoadError::Incompatible`] - the fingerprints differ; or,
    ///   under `strict_pairing`, the model is too narrow for the vocabulary.
    pub fn new(
        vocab: VocabArtifact,
        model: Arc<dyn NextWordModel>,
        options: PredictorOptions,
    ) -> KHResult<Self> {
        if options.timeout().is_some_and(|t| t.is_zero()) {
            return Err(KeyhintError::Config(
                "scoring timeout must be at least 1ms".to_string(),
            ));
        }

        if model.input_len() != options.max_len {
            return Err(ModelInferenceError::InputShape {
                expected: model.input_len(),
                actual: options.max_len,
            }
            .into());
        }

        let VocabArtifact {
            index,
            conventions,
            fingerprint,
        } = vocab;

        if let Some(word) = index.get_token(options.pad_id) {
            return Err(KeyhintError::Config(format!(
                "pad id {} is assigned to word {word:?}",
                options.pad_id
            )));
        }

        if let (Some(vocab_fp), Some(model_fp)) = (fingerprint.as_deref(), model.fingerprint())
            && vocab_fp != model_fp
        {
            return Err(ArtifactLoadError::Incompatible(format!(
                "vocabulary fingerprint {vocab_fp:?} does not match model fingerprint {model_fp:?}"
            ))
            .into());
        }

        if let Some(max_id) = index.max_id()
            && model.output_width() <= max_id as usize
        {
            let msg = format!(
                "model output width {} cannot score vocabulary id {max_id}",
                model.output_width()
            );
            if options.strict_pairing {
                return Err(ArtifactLoadError::Incompatible(msg).into());
            }
            log::warn!("{msg}; the artifacts may not have been fitted together");
        }

        let model: Arc<dyn NextWordModel> = match options.timeout() {
            Some(timeout) => Arc::new(TimeoutModel::new(model, timeout)),
            None => model,
        };

        let index = Arc::new(index.with_unk_token(options.unk_token.clone()));
        let encoder = SequenceEncoder::new(
            index.clone(),
            conventions,
            options.max_len,
            options.pad_id,
        );
        let selector = RankingSelector::new(index, options.ranking());

        Ok(Self {
            options,
            encoder,
            model,
            selector,
        })
    }

    /// Load and pair the artifacts at `model_path` and `vocab_path`.
    ///
    /// Both formats are detected from the files.
    pub fn from_paths<M: AsRef<Path>, V: AsRef<Path>>(
        model_path: M,
        vocab_path: V,
        options: PredictorOptions,
    ) -> KHResult<Self> {
        let vocab = load_vocab_path(vocab_path, VocabFormat::Auto)?;
        let model = load_model_path(model_path, ModelFormat::Auto)?;
        Self::new(vocab, model, options)
    }

    /// The pipeline options.
    pub fn options(&self) -> &PredictorOptions {
        &self.options
    }

    /// The vocabulary index.
    pub fn index(&self) -> &Arc<VocabIndex> {
        self.encoder.index()
    }

    /// The sequence encoder.
    pub fn encoder(&self) -> &SequenceEncoder {
        &self.encoder
    }

    /// The scoring model.
    pub fn model(&self) -> &Arc<dyn NextWordModel> {
        &self.model
    }

    /// Encode `text` as model input.
    pub fn encode(
        &self,
        text: &str,
    ) -> EncodedSequence {
        self.encoder.encode(text)
    }

    /// Rank the next-word candidates for `text`.
    ///
    /// Empty (or all-whitespace) input yields no candidates, without
    /// consulting the model. A panic while scoring is reported as
    /// [`ModelInferenceError::Backend`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    pub fn try_recommend(
        &self,
        text: &str,
    ) -> KHResult<Vec<Candidate>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let encoded = self.encoder.encode(text);
        check_input(&*self.model, &encoded)?;

        let distribution = catch_unwind(AssertUnwindSafe(|| self.model.score(&encoded)))
            .map_err(|_| ModelInferenceError::Backend("model scoring panicked".to_string()))??;
        check_output(&*self.model, &distribution)?;

        let candidates = self.selector.candidates(&distribution);
        log::debug!(
            "{} known words in context; recommending {:?}",
            encoded.content_len(),
            candidates.iter().map(|c| c.token.as_str()).collect::<Vec<_>>()
        );

        Ok(candidates)
    }

    /// Recommend up to `top_k` next words for `text`.
    ///
    /// Never fails: errors are logged and yield an empty list.
    pub fn get_recommendations(
        &self,
        text: &str,
    ) -> Vec<String> {
        match self.try_recommend(text) {
            Ok(candidates) => candidates.into_iter().map(|c| c.token).collect(),
            Err(e) => {
                log::warn!("no recommendations: {e}");
                Vec::new()
            }
        }
    }
}
