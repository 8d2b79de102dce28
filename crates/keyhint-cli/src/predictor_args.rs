use std::{path::PathBuf, sync::Arc, time::Duration};

use keyhint::{
    KHResult,
    NextWordPredictor,
    PredictorOptions,
    models::{ModelFormat, NextWordModel, load_model_path},
    vocab::{
        VocabArtifact,
        io::{VocabFormat, load_vocab_path},
    },
};

/// Vocabulary artifact arg group.
#[derive(clap::Args, Debug)]
pub struct VocabArgs {
    /// Vocabulary artifact (Keras tokenizer JSON, word-index JSON, or word list).
    #[arg(long)]
    pub vocab: PathBuf,

    /// Vocabulary format: auto, keras, word-index, word-list.
    #[arg(long, default_value = "auto")]
    pub vocab_format: VocabFormat,
}

impl VocabArgs {
    /// Load the vocabulary.
    pub fn load_vocab(&self) -> KHResult<VocabArtifact> {
        Ok(load_vocab_path(&self.vocab, self.vocab_format)?)
    }
}

/// Model artifact arg group.
#[derive(clap::Args, Debug)]
pub struct ModelArgs {
    /// Model artifact.
    #[arg(long)]
    pub model: PathBuf,

    /// Model format: auto, bigram-table.
    #[arg(long, default_value = "auto")]
    pub model_format: ModelFormat,
}

impl ModelArgs {
    /// Load the model.
    pub fn load_model(&self) -> KHResult<Arc<dyn NextWordModel>> {
        Ok(load_model_path(&self.model, self.model_format)?)
    }
}

/// Pipeline option arg group.
///
/// Flags override values read from `--config`.
#[derive(clap::Args, Debug, Default)]
pub struct OptionsArgs {
    /// JSON options file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Model input length.
    #[arg(long)]
    pub max_len: Option<usize>,

    /// Number of recommendations.
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Per-request scoring deadline, in milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Skip ids with no word instead of showing "<UNK>".
    #[arg(long)]
    pub skip_unknown: bool,

    /// Reject suspicious model/vocabulary pairings.
    #[arg(long)]
    pub strict_pairing: bool,
}

impl OptionsArgs {
    /// Build the pipeline options.
    pub fn options(&self) -> KHResult<PredictorOptions> {
        let mut options = match &self.config {
            Some(path) => PredictorOptions::load_path(path)?,
            None => PredictorOptions::default(),
        };

        if let Some(max_len) = self.max_len {
            options.set_max_len(max_len);
        }
        if let Some(top_k) = self.top_k {
            options.set_top_k(top_k);
        }
        if let Some(ms) = self.timeout_ms {
            options.set_timeout(Some(Duration::from_millis(ms)));
        }
        if self.skip_unknown {
            options.set_skip_unknown(true);
        }
        if self.strict_pairing {
            options.set_strict_pairing(true);
        }

        log::debug!("{options:?}");
        Ok(options)
    }
}

/// Predictor arg group: both artifacts plus options.
#[derive(clap::Args, Debug)]
pub struct PredictorArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    #[command(flatten)]
    pub vocab: VocabArgs,

    #[command(flatten)]
    pub options: OptionsArgs,
}

impl PredictorArgs {
    /// Load and pair the artifacts.
    pub fn load_predictor(&self) -> KHResult<NextWordPredictor> {
        let vocab = self.vocab.load_vocab()?;
        let model = self.model.load_model()?;
        NextWordPredictor::new(vocab, model, self.options.options()?)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs::File, io::Write};

    use super::*;

    #[test]
    fn test_flags_override_config() {
        tempdir::TempDir::new("options_args_test")
            .and_then(|dir| {
                let config = dir.path().join("keyhint.json");
                File::create(&config)?.write_all(br#"{"max_len": 20, "top_k": 6}"#)?;

                let args = OptionsArgs {
                    config: Some(config),
                    top_k: Some(2),
                    skip_unknown: true,
                    ..Default::default()
                };
                let options = args.options().unwrap();

                assert_eq!(options.max_len, 20);
                assert_eq!(options.top_k, 2);
                assert!(options.skip_unknown);
                assert!(!options.strict_pairing);
                assert_eq!(options.timeout(), None);

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_failed_load_disables_recommender() {
        tempdir::TempDir::new("predictor_args_test")
            .and_then(|dir| {
                let vocab = dir.path().join("vocab.json");
                File::create(&vocab)?.write_all(br#"{"the": 1, "cat": 2}"#)?;

                let args = PredictorArgs {
                    model: ModelArgs {
                        model: dir.path().join("missing.json"),
                        model_format: ModelFormat::Auto,
                    },
                    vocab: VocabArgs {
                        vocab,
                        vocab_format: VocabFormat::Auto,
                    },
                    options: OptionsArgs::default(),
                };

                let recommender = keyhint::Recommender::from_result(args.load_predictor());
                assert!(!recommender.is_enabled());
                assert!(recommender.get_recommendations("the").is_empty());

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_defaults_without_config() {
        let options = OptionsArgs::default().options().unwrap();
        assert_eq!(options, PredictorOptions::default());
    }
}
