//! # Prediction Models
//!
//! The [`NextWordModel`] trait is the calling contract for a pre-trained
//! sequence model: ``score(sequence) -> distribution over the vocabulary``.
//!
//! Backends:
//! * [`BigramTableModel`] - a bigram table loaded from a JSON artifact.
//! * [`FnModel`] - a closure adapter, for external inference engines.
//! * [`TimeoutModel`] - bounds another model's scoring call by a deadline.

mod bigram_table;
mod fn_model;
mod model_io;
mod next_word_model;
mod timeout_model;

#[doc(inline)]
pub use bigram_table::*;
#[doc(inline)]
pub use fn_model::*;
#[doc(inline)]
pub use model_io::*;
#[doc(inline)]
pub use next_word_model::*;
#[doc(inline)]
pub use timeout_model::*;
