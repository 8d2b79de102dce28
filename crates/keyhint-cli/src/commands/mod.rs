use crate::commands::{
    encode::EncodeArgs,
    inspect::InspectArgs,
    predict::PredictArgs,
    type_session::TypeSessionArgs,
};

pub mod encode;
pub mod inspect;
pub mod predict;
pub mod type_session;

/// Subcommands for keyhint.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Recommend next words for each input line.
    Predict(PredictArgs),

    /// Print the encoded model input for each input line.
    Encode(EncodeArgs),

    /// Summarize the artifacts and check their pairing.
    Inspect(InspectArgs),

    /// Run an interactive typing session.
    Type(TypeSessionArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Predict(cmd) => cmd.run(),
            Commands::Encode(cmd) => cmd.run(),
            Commands::Inspect(cmd) => cmd.run(),
            Commands::Type(cmd) => cmd.run(),
        }
    }
}
