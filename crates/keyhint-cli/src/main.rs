mod commands;
mod input_output;
mod logging;
mod predictor_args;
mod typing_buffer;

use clap::Parser;
use commands::Commands;

/// keyhint: next-word recommendations from a pre-trained model.
#[derive(clap::Parser, Debug)]
pub struct Args {
    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    args.command.run()
}
