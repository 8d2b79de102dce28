use std::io::{BufRead, Write};

use keyhint::Recommender;

use crate::{
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
    predictor_args::PredictorArgs,
    typing_buffer::TypingBuffer,
};

/// Args for the type command.
///
/// Each input line is typed followed by a space; an empty line types a
/// space. Commands: `:bs` backspace, `:dw` delete word, `:N` accept
/// recommendation N, `:clear`, `:q`.
#[derive(clap::Args, Debug)]
pub struct TypeSessionArgs {
    #[command(flatten)]
    predictor: PredictorArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    logging: LogArgs,
}

impl TypeSessionArgs {
    /// Run the type command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        // Typing still works without predictions.
        let recommender = Recommender::from_result(self.predictor.load_predictor());

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        run_session(&mut reader, &mut writer, &recommender)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum SessionInput<'a> {
    Text(&'a str),
    Space,
    Backspace,
    DeleteWord,
    Accept(usize),
    Clear,
    Quit,
    Unknown(&'a str),
}

fn parse_input(line: &str) -> SessionInput<'_> {
    let Some(command) = line.trim().strip_prefix(':') else {
        return match line {
            "" => SessionInput::Space,
            text => SessionInput::Text(text),
        };
    };

    match command {
        "bs" => SessionInput::Backspace,
        "dw" => SessionInput::DeleteWord,
        "clear" => SessionInput::Clear,
        "q" => SessionInput::Quit,
        n => match n.parse::<usize>() {
            Ok(n) if n > 0 => SessionInput::Accept(n),
            _ => SessionInput::Unknown(n),
        },
    }
}

fn render(
    writer: &mut dyn Write,
    buffer: &TypingBuffer,
    recommendations: &[String],
) -> std::io::Result<()> {
    writeln!(writer, "> {}", buffer.text())?;
    if recommendations.is_empty() {
        writeln!(writer, "  (no recommendations)")?;
    } else {
        let choices: Vec<String> = recommendations
            .iter()
            .enumerate()
            .map(|(idx, word)| format!("[{}] {word}", idx + 1))
            .collect();
        writeln!(writer, "  {}", choices.join("  "))?;
    }
    writer.flush()
}

fn run_session(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    recommender: &Recommender,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut buffer = TypingBuffer::default();
    let mut recommendations: Vec<String> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let refresh = match parse_input(&line) {
            SessionInput::Quit => break,
            SessionInput::Text(text) => buffer.type_text(&format!("{text} ")),
            SessionInput::Space => buffer.type_space(),
            SessionInput::Backspace => buffer.backspace(),
            SessionInput::DeleteWord => buffer.delete_word(),
            SessionInput::Accept(n) => match recommendations.get(n - 1) {
                Some(word) => buffer.accept(word),
                None => {
                    writeln!(writer, "  no recommendation {n}")?;
                    false
                }
            },
            SessionInput::Clear => {
                buffer.clear();
                recommendations.clear();
                false
            }
            SessionInput::Unknown(command) => {
                writeln!(writer, "  unknown command :{command}")?;
                false
            }
        };

        if refresh {
            recommendations = recommender.get_recommendations(buffer.context());
        }
        render(writer, &buffer, &recommendations)?;
    }
    Ok(())
}
