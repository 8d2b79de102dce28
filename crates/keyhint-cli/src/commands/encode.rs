use std::{
    io::{BufRead, Write},
    sync::Arc,
};

use keyhint::encoding::SequenceEncoder;

use crate::{
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
    predictor_args::{OptionsArgs, VocabArgs},
};

/// Args for the encode command.
#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    vocab: VocabArgs,

    #[command(flatten)]
    options: OptionsArgs,

    /// Print only the non-pad suffix.
    #[arg(long)]
    content_only: bool,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    logging: LogArgs,
}

impl EncodeArgs {
    /// Run the encode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let options = self.options.options()?;
        let vocab = self.vocab.load_vocab()?;
        let encoder = SequenceEncoder::new(
            Arc::new(vocab.index),
            vocab.conventions,
            options.max_len,
            options.pad_id,
        );

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        run_encode(&mut reader, &mut writer, &encoder, self.content_only)
    }
}

/// Write one space-separated id line per input line.
fn run_encode(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    encoder: &SequenceEncoder,
    content_only: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for line in reader.lines() {
        let encoded = encoder.encode(&line?);
        let ids = if content_only {
            encoded.content()
        } else {
            encoded.as_slice()
        };

        for (idx, id) in ids.iter().enumerate() {
            write!(writer, "{}{}", if idx == 0 { "" } else { " " }, id)?;
        }
        writeln!(writer)?;
        writer.flush()?;
    }
    Ok(())
}
