//! Predictor Options
//!
//! Options for building a [`NextWordPredictor`](crate::NextWordPredictor).

use std::{fs::File, io::BufReader, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    errors::{KHResult, KeyhintError},
    ranking::{DEFAULT_TOP_K, RankingOptions},
    types::{DEFAULT_PAD_ID, DEFAULT_UNK_TOKEN, TokenId},
};

/// The default model input length.
pub const DEFAULT_MAX_LEN: usize = 107;

/// Options for configuring a [`NextWordPredictor`](crate::NextWordPredictor).
///
/// Serializable, so a JSON config file can supply any subset of the fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorOptions {
    /// The model input length.
    ///
    /// Must equal the sequence length the model was trained with.
    pub max_len: usize,

    /// The maximum number of recommendations.
    pub top_k: usize,

    /// The pad value used for left-padding.
    pub pad_id: TokenId,

    /// The display string for ids with no word.
    pub unk_token: String,

    /// Pass over ids with no word, rather than showing [`Self::unk_token`].
    pub skip_unknown: bool,

    /// Optional deadline for each model scoring call, in milliseconds.
    pub timeout_ms: Option<u64>,

    /// Reject, rather than warn about, suspicious model/vocabulary pairings.
    pub strict_pairing: bool,
}

impl Default for PredictorOptions {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
            top_k: DEFAULT_TOP_K,
            pad_id: DEFAULT_PAD_ID,
            unk_token: DEFAULT_UNK_TOKEN.to_string(),
            skip_unknown: false,
            timeout_ms: None,
            strict_pairing: false,
        }
    }
}

impl PredictorOptions {
    /// Load options from a JSON file; missing fields take their defaults.
    pub fn load_path<P: AsRef<Path>>(path: P) -> KHResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| KeyhintError::Config(format!("cannot read {path:?}: {e}")))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| KeyhintError::Config(format!("cannot parse {path:?}: {e}")))
    }

    /// The ranking options.
    pub fn ranking(&self) -> RankingOptions {
        RankingOptions::default()
            .with_top_k(self.top_k)
            .with_skip_unknown(self.skip_unknown)
    }

    /// The scoring deadline, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Set the model input length.
    pub fn set_max_len(
        &mut self,
        max_len: usize,
    ) {
        self.max_len = max_len;
    }

    /// Set the model input length.
    pub fn with_max_len(
        mut self,
        max_len: usize,
    ) -> Self {
        self.set_max_len(max_len);
        self
    }

    /// Set the recommendation count.
    pub fn set_top_k(
        &mut self,
        top_k: usize,
    ) {
        self.top_k = top_k;
    }

    /// Set the recommendation count.
    pub fn with_top_k(
        mut self,
        top_k: usize,
    ) -> Self {
        self.set_top_k(top_k);
        self
    }

    /// Set the pad value.
    pub fn with_pad_id(
        mut self,
        pad_id: TokenId,
    ) -> Self {
        self.pad_id = pad_id;
        self
    }

    /// Set the unknown sentinel.
    pub fn with_unk_token(
        mut self,
        unk_token: impl Into<String>,
    ) -> Self {
        self.unk_token = unk_token.into();
        self
    }

    /// Set whether ids with no word are passed over.
    pub fn set_skip_unknown(
        &mut self,
        skip_unknown: bool,
    ) {
        self.skip_unknown = skip_unknown;
    }

    /// Set whether ids with no word are passed over.
    pub fn with_skip_unknown(
        mut self,
        skip_unknown: bool,
    ) -> Self {
        self.set_skip_unknown(skip_unknown);
        self
    }

    /// Set the scoring deadline.
    ///
    /// Rounded up to whole milliseconds.
    pub fn set_timeout(
        &mut self,
        timeout: Option<Duration>,
    ) {
        self.timeout_ms =
            timeout.map(|t| u64::try_from(t.as_nanos().div_ceil(1_000_000)).unwrap_or(u64::MAX));
    }

    /// Set the scoring deadline.
    pub fn with_timeout(
        mut self,
        timeout: Option<Duration>,
    ) -> Self {
        self.set_timeout(timeout);
        self
    }

    /// Set whether suspicious pairings are rejected.
    pub fn set_strict_pairing(
        &mut self,
        strict_pairing: bool,
    ) {
        self.strict_pairing = strict_pairing;
    }

    /// Set whether suspicious pairings are rejected.
    pub fn with_strict_pairing(
        mut self,
        strict_pairing: bool,
    ) -> Self {
        self.set_strict_pairing(strict_pairing);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let options = PredictorOptions::default();
        assert_eq!(options.max_len, 107);
        assert_eq!(options.top_k, 4);
        assert_eq!(options.pad_id, 0);
        assert_eq!(options.unk_token, "<UNK>");
        assert_eq!(options.timeout(), None);
        assert_eq!(options.ranking(), RankingOptions::default());
    }

    #[test]
    fn test_builders() {
        let options = PredictorOptions::default()
            .with_max_len(8)
            .with_top_k(2)
            .with_skip_unknown(true)
            .with_timeout(Some(Duration::from_millis(250)))
            .with_strict_pairing(true)
            .with_unk_token("?")
            .with_pad_id(0);

        assert_eq!(options.max_len, 8);
        assert_eq!(
            options.ranking(),
            RankingOptions::default()
                .with_top_k(2)
                .with_skip_unknown(true)
        );
        assert_eq!(options.timeout(), Some(Duration::from_millis(250)));
        assert!(options.strict_pairing);
        assert_eq!(options.unk_token, "?");
    }

    #[test]
    fn test_timeout_rounds_up() {
        let options = PredictorOptions::default().with_timeout(Some(Duration::from_micros(500)));
        assert_eq!(options.timeout_ms, Some(1));

        let options = options.with_timeout(Some(Duration::from_micros(2_001)));
        assert_eq!(options.timeout(), Some(Duration::from_millis(3)));

        let options = options.with_timeout(Some(Duration::MAX));
        assert_eq!(options.timeout_ms, Some(u64::MAX));

        assert_eq!(options.with_timeout(None).timeout(), None);
    }

    #[test]
    fn test_load_path() {
        tempdir::TempDir::new("options_test")
            .and_then(|dir| {
                let path = dir.path().join("keyhint.json");
                File::create(&path)?.write_all(br#"{"max_len": 20, "timeout_ms": 50}"#)?;

                let options = PredictorOptions::load_path(&path).unwrap();
                assert_eq!(
                    options,
                    PredictorOptions::default()
                        .with_max_len(20)
                        .with_timeout(Some(Duration::from_millis(50)))
                );

                let bad = dir.path().join("bad.json");
                File::create(&bad)?.write_all(br#"{"max_len": "long"}"#)?;
                assert!(matches!(
                    PredictorOptions::load_path(&bad),
                    Err(KeyhintError::Config(_))
                ));

                assert!(PredictorOptions::load_path(dir.path().join("nope.json")).is_err());

                Ok(())
            })
            .unwrap();
    }
}
