//! # Vocabulary
//!
//! This module provides the vocabulary index and its io mechanisms.
//!
//! The primary type is [`VocabIndex`], an immutable ``{ word <-> id }``
//! mapping. Loaders in [`io`] produce a [`VocabArtifact`], which pairs the
//! index with the [`TextConventions`](crate::encoding::TextConventions)
//! it was fitted with.
pub mod io;

mod vocab_artifact;
mod vocab_index;

#[doc(inline)]
pub use vocab_artifact::VocabArtifact;
#[doc(inline)]
pub use vocab_index::VocabIndex;
