//! # Closure Model Adapter

use core::fmt::{Debug, Formatter};

use crate::{
    encoding::EncodedSequence,
    errors::ModelInferenceError,
    models::{Distribution, NextWordModel},
    types::TokenId,
};

/// A [`NextWordModel`] backed by a closure over the padded id slice.
///
/// This is the seam for external inference engines.
pub struct FnModel<F> {
    input_len: usize,
    output_width: usize,
    fingerprint: Option<String>,
    func: F,
}

impl<F> Debug for FnModel<F> {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("FnModel")
            .field("input_len", &self.input_len)
            .field("output_width", &self.output_width)
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}

impl<F> FnModel<F>
where
    F: Fn(&[TokenId]) -> Result<Vec<f32>, ModelInferenceError> + Send + Sync,
{
    /// Wrap `func` as a model with the given shapes.
    pub fn new(
        input_len: usize,
        output_width: usize,
        func: F,
    ) -> Self {
        Self {
            input_len,
            output_width,
            fingerprint: None,
            func,
        }
    }

    /// Set the pairing signature.
    pub fn with_fingerprint(
        mut self,
        fingerprint: impl Into<String>,
    ) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }
}

impl<F> NextWordModel for FnModel<F>
where
    F: Fn(&[TokenId]) -> Result<Vec<f32>, ModelInferenceError> + Send + Sync,
{
    fn input_len(&self) -> usize {
        self.input_len
    }

    fn output_width(&self) -> usize {
        self.output_width
    }

    fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    fn score(
        &self,
        input: &EncodedSequence,
    ) -> Result<Distribution, ModelInferenceError> {
        (self.func)(input.as_slice()).map(Distribution::from)
    }
}
