//! # Prediction Pipeline
//!
//! [`NextWordPredictor`] pairs a vocabulary with a model and turns the
//! current sentence into a shortlist of next words. [`Recommender`] wraps it
//! for UI hosts that must keep running when the artifacts are unusable.

mod next_word_predictor;
mod predictor_options;
mod recommender;

#[doc(inline)]
pub use next_word_predictor::*;
#[doc(inline)]
pub use predictor_options::*;
#[doc(inline)]
pub use recommender::*;
