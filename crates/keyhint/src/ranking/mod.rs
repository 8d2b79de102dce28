//! # Ranking
//!
//! Turns a model [`Distribution`](crate::models::Distribution) into an
//! ordered shortlist of display strings.

mod ranking_selector;
mod top_k;

#[doc(inline)]
pub use ranking_selector::*;
#[doc(inline)]
pub use top_k::*;
