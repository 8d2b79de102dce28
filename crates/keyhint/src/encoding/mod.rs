//! # Text Encoding
//!
//! Turns free-form text into the fixed-length id sequences a
//! [`NextWordModel`](crate::models::NextWordModel) consumes.
//!
//! * [`TextConventions`] splits text into words.
//! * [`SequenceEncoder`] maps words to ids and pads/truncates.
//! * [`EncodedSequence`] is the result.

mod encoded_sequence;
mod sequence_encoder;
mod text_conventions;

#[doc(inline)]
pub use encoded_sequence::*;
#[doc(inline)]
pub use sequence_encoder::*;
#[doc(inline)]
pub use text_conventions::*;
