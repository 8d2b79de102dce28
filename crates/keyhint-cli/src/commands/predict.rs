use std::io::{BufRead, Write};

use keyhint::NextWordPredictor;

use crate::{
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
    predictor_args::PredictorArgs,
};

/// Args for the predict command.
#[derive(clap::Args, Debug)]
pub struct PredictArgs {
    #[command(flatten)]
    predictor: PredictorArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Print each word with its score, as ``word:score``.
    #[arg(long)]
    scores: bool,

    #[command(flatten)]
    logging: LogArgs,
}

impl PredictArgs {
    /// Run the predict command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let predictor = self.predictor.load_predictor()?;

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        run_predict(&mut reader, &mut writer, &predictor, self.scores)
    }
}

/// Write one tab-separated recommendation line per input line.
fn run_predict(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    predictor: &NextWordPredictor,
    scores: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for line in reader.lines() {
        let line = line?;

        let fields: Vec<String> = if scores {
            match predictor.try_recommend(&line) {
                Ok(candidates) => candidates
                    .into_iter()
                    .map(|c| format!("{}:{:.6}", c.token, c.score))
                    .collect(),
                Err(e) => {
                    log::warn!("no recommendations for {line:?}: {e}");
                    Vec::new()
                }
            }
        } else {
            predictor.get_recommendations(&line)
        };

        writeln!(writer, "{}", fields.join("\t"))?;
        writer.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use keyhint::{
        PredictorOptions,
        models::BigramTableModel,
        vocab::{VocabArtifact, VocabIndex},
    };

    use super::*;

    fn predictor() -> NextWordPredictor {
        let vocab: VocabArtifact =
            VocabIndex::try_from_word_index([("the", 1), ("cat", 2), ("sat", 3)])
                .unwrap()
                .into();
        let model = BigramTableModel::new(4, vec![0.0, 0.1, 0.2, 0.3]).with_transition(1, 2, 0.9);
        NextWordPredictor::new(
            vocab,
            Arc::new(model),
            PredictorOptions::default()
                .with_max_len(4)
                .with_top_k(2),
        )
        .unwrap()
    }

    #[test]
    fn test_run_predict() {
        let mut reader: &[u8] = b"the\n\ncat\n";
        let mut out = Vec::new();
        run_predict(&mut reader, &mut out, &predictor(), false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "cat\tsat\n\nsat\tcat\n");
    }

    #[test]
    fn test_run_predict_scores() {
        let mut reader: &[u8] = b"the\n";
        let mut out = Vec::new();
        run_predict(&mut reader, &mut out, &predictor(), true).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "cat:0.900000\tsat:0.120000\n"
        );
    }
}
