use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shared::domain::PuzzleVariant;

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print freshly generated scrambles. Unrecognized variant tags fall
    /// back to 3x3.
    Scramble {
        #[arg(long, default_value = "3x3")]
        variant: String,
        #[arg(long, default_value_t = 1)]
        count: u32,
    },
    /// Print the effective configuration after file and env overrides.
    Config {
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scramble { variant, count } => {
            let variant = PuzzleVariant::from_tag_lossy(&variant);
            for _ in 0..count {
                println!("{}", scramble::generate(variant));
            }
        }
        Command::Config { file } => {
            let config = battle_core::load_config(file.as_deref())?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
