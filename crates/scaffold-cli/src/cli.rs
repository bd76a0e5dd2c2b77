use clap::{Parser, Subcommand};

use crate::analyze::{run_analyze, AnalyzeArgs};
use crate::error::Result;
use crate::generate::{run_generate, GenerateArgs};

#[derive(Debug, Parser)]
#[command(
    name = "scaffold",
    about = "Generate Testing Library scaffolds for React components",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate test files for component sources.
    Generate(GenerateArgs),

    /// Print the analyzed component contracts of one file as JSON.
    Analyze(AnalyzeArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Analyze(args) => run_analyze(args),
    }
}
