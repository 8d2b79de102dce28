//! # `keyhint` Next-Word Prediction
//!
//! Suggests the most likely next words for the sentence being typed on an
//! on-screen keyboard, using a pre-trained sequence model and the
//! vocabulary it was fitted with.
//!
//! See:
//! * [`vocab`] to load vocabularies (Keras tokenizer JSON, word-index JSON, word lists).
//! * [`encoding`] to encode text into fixed-length model input.
//! * [`models`] for the [`models::NextWordModel`] contract and its backends.
//! * [`ranking`] to turn a score distribution into display strings.
//! * [`predictor`] for the assembled pipeline.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap implementations for ``ahash``; which is a performance
//! win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::KHHashMap`` type alias machinery.
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points
//! on the encode / score / select path.
//!
//! ## Recommending
//!
//! ```rust,no_run
//! use keyhint::{PredictorOptions, Recommender};
//!
//! let recommender = Recommender::load(
//!     "model.json",
//!     "tokenizer.json",
//!     PredictorOptions::default(),
//! );
//!
//! // Never fails; empty when the artifacts could not be loaded.
//! let words: Vec<String> = recommender.get_recommendations("the cat");
//! ```
//!
//! Hosts that want the errors call [`NextWordPredictor::try_recommend`].
#![warn(missing_docs, unused)]

pub mod encoding;
pub mod errors;
pub mod models;
pub mod predictor;
pub mod ranking;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use errors::*;
#[doc(inline)]
pub use predictor::{NextWordPredictor, PredictorOptions, Recommender};
#[doc(inline)]
pub use types::TokenId;
