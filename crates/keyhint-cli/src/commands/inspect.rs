use std::{io::Write, path::PathBuf, sync::Arc};

use keyhint::{
    NextWordPredictor,
    PredictorOptions,
    models::{ModelFormat, NextWordModel, load_model_path},
    vocab::{VocabArtifact, io::save_word_index_json_path},
};

use crate::{
    input_output::OutputArgs,
    logging::LogArgs,
    predictor_args::{OptionsArgs, VocabArgs},
};

/// Args for the inspect command.
#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    vocab: VocabArgs,

    /// Optional model artifact; checks its pairing with the vocabulary.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Model format: auto, bigram-table.
    #[arg(long, default_value = "auto")]
    model_format: ModelFormat,

    #[command(flatten)]
    options: OptionsArgs,

    /// Export the vocabulary as word-index JSON.
    #[arg(long)]
    export: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    logging: LogArgs,
}

impl InspectArgs {
    /// Run the inspect command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let options = self.options.options()?;
        let vocab = self.vocab.load_vocab()?;
        let model = match &self.model {
            Some(path) => Some(load_model_path(path, self.model_format)?),
            None => None,
        };

        let mut writer = self.output.open_writer()?;
        write_summary(&mut writer, &vocab, model, options)?;
        writer.flush()?;

        if let Some(path) = &self.export {
            save_word_index_json_path(&vocab, path)?;
            log::info!("exported {} words to {:?}", vocab.index.len(), path);
        }

        Ok(())
    }
}

fn write_summary(
    writer: &mut dyn Write,
    vocab: &VocabArtifact,
    model: Option<Arc<dyn NextWordModel>>,
    options: PredictorOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let conventions = &vocab.conventions;
    writeln!(writer, "vocabulary:")?;
    writeln!(writer, "  words: {}", vocab.index.len())?;
    match vocab.index.max_id() {
        Some(max_id) => writeln!(writer, "  max id: {max_id}")?,
        None => writeln!(writer, "  max id: -")?,
    }
    writeln!(writer, "  fingerprint: {}", vocab.fingerprint.as_deref().unwrap_or("-"))?;
    writeln!(writer, "  lower: {}", conventions.lower)?;
    writeln!(writer, "  split: {:?}", conventions.split)?;
    writeln!(writer, "  filters: {:?}", conventions.filters)?;
    match conventions.num_words {
        Some(n) => writeln!(writer, "  num words: {n}")?,
        None => writeln!(writer, "  num words: -")?,
    }

    let Some(model) = model else {
        return Ok(());
    };

    writeln!(writer, "model:")?;
    writeln!(writer, "  input length: {}", model.input_len())?;
    writeln!(writer, "  output width: {}", model.output_width())?;
    writeln!(writer, "  fingerprint: {}", model.fingerprint().unwrap_or("-"))?;

    match NextWordPredictor::new(vocab.clone(), model, options) {
        Ok(_) => writeln!(writer, "pairing: ok")?,
        Err(e) => writeln!(writer, "pairing: {e}")?,
    }
    Ok(())
}
