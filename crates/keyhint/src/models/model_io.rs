//! # Model Artifact IO

use std::{fs::File, io::BufReader, path::Path, str::FromStr, sync::Arc};

use crate::{
    errors::{ArtifactLoadError, ArtifactParseError},
    models::{BIGRAM_TABLE_FORMAT, BigramTableModel, BigramTableSpec, NextWordModel},
    vocab::io::read_json_value,
};

/// Supported model artifact formats.
///
/// Other inference engines plug in through [`NextWordModel`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// Detect the format from the artifact's `format` tag.
    Auto,

    /// A [`BigramTableModel`] JSON artifact.
    BigramTable,
}

impl FromStr for ModelFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            BIGRAM_TABLE_FORMAT => Ok(Self::BigramTable),
            _ => Err(format!("unknown model format: {s:?}")),
        }
    }
}

/// Parse a model artifact from a JSON value.
pub fn model_from_value(
    value: serde_json::Value,
    format: ModelFormat,
) -> Result<Arc<dyn NextWordModel>, ArtifactParseError> {
    let format = match format {
        ModelFormat::Auto => match value.get("format").and_then(|f| f.as_str()) {
            Some(tag) => tag.parse::<ModelFormat>().map_err(ArtifactParseError::Schema)?,
            None => {
                return Err(ArtifactParseError::Schema(
                    "model artifact has no \"format\" tag".to_string(),
                ));
            }
        },
        other => other,
    };

    match format {
        ModelFormat::BigramTable | ModelFormat::Auto => {
            let spec: BigramTableSpec = serde_json::from_value(value)
                .map_err(|e| ArtifactParseError::Schema(e.to_string()))?;
            Ok(Arc::new(BigramTableModel::try_from_spec(spec)?))
        }
    }
}

/// Load a model artifact from a file.
///
/// ## Arguments
/// * `path` - the artifact path.
/// * `format` - the artifact format, or [`ModelFormat::Auto`].
pub fn load_model_path<P: AsRef<Path>>(
    path: P,
    format: ModelFormat,
) -> Result<Arc<dyn NextWordModel>, ArtifactLoadError> {
    let path = path.as_ref();

    let model = File::open(path)
        .map_err(ArtifactParseError::from)
        .and_then(|file| read_json_value(BufReader::new(file)))
        .and_then(|value| model_from_value(value, format))
        .map_err(|e| e.at(path))?;

    log::info!(
        "loaded model {:?}: input length {}, output width {}",
        path,
        model.input_len(),
        model.output_width()
    );

    Ok(model)
}
