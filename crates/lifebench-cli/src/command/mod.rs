use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lifebench_engine::{CellSymbols, DifficultySpec, GridSize};

use crate::model::{
    config::BenchConfig,
    openrouter::OpenRouterProvider,
    test_case::{Difficulty, TestCase},
};

use self::{
    benchmark::BenchmarkArg, list_models::ListModelsArg, preview::PreviewArg, run::RunArg,
};

mod benchmark;
mod list_models;
mod preview;
mod run;
mod show_config;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    config: ConfigArg,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Show a test case and the prompt without querying a model
    Preview(#[clap(flatten)] PreviewArg),
    /// Run a single test case against the configured model
    Run(#[clap(flatten)] RunArg),
    /// Run the default suite, or a suite file, and write a JSON report
    Benchmark(#[clap(flatten)] BenchmarkArg),
    /// Show the current configuration with the API key masked
    ShowConfig,
    /// List the models available from the provider
    ListModels(#[clap(flatten)] ListModelsArg),
}

pub async fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Preview(arg) => preview::run(&arg)?,
        Mode::Run(arg) => run::run(&args.config, &arg).await?,
        Mode::Benchmark(arg) => benchmark::run(&args.config, &arg).await?,
        Mode::ShowConfig => show_config::run(&args.config)?,
        Mode::ListModels(arg) => list_models::run(&args.config, &arg).await?,
    }
    Ok(())
}

/// Options shared by every mode that talks to a model.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// Path to the JSON configuration file
    #[arg(long, global = true, default_value = "config.json")]
    config: PathBuf,
    /// Model ID, overriding the configured one
    #[arg(long, global = true)]
    model: Option<String>,
}

impl ConfigArg {
    pub(crate) fn load(&self) -> anyhow::Result<BenchConfig> {
        Ok(BenchConfig::load(&self.config)?.with_model(self.model.as_deref()))
    }

    pub(crate) fn provider(&self) -> anyhow::Result<OpenRouterProvider> {
        OpenRouterProvider::new(self.load()?.openrouter)
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SymbolArg {
    /// Symbol for alive cells
    #[arg(long, default_value_t = CellSymbols::DEFAULT.alive())]
    alive: char,
    /// Symbol for dead cells
    #[arg(long, default_value_t = CellSymbols::DEFAULT.dead())]
    dead: char,
}

impl SymbolArg {
    pub(crate) fn symbols(&self) -> anyhow::Result<CellSymbols> {
        Ok(CellSymbols::new(self.alive, self.dead)?)
    }
}

/// Selection of a single test case.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CaseArg {
    /// Difficulty preset
    #[arg(long, default_value = "easy")]
    difficulty: Difficulty,
    /// Number of rows, overriding the preset size
    #[arg(long, requires = "cols")]
    rows: Option<usize>,
    /// Number of columns, overriding the preset size
    #[arg(long, requires = "rows")]
    cols: Option<usize>,
    /// Random seed for the initial grid
    #[arg(long, default_value_t = DifficultySpec::DEFAULT_SEED)]
    seed: u64,
    /// Probability of each cell being alive
    #[arg(long, default_value_t = DifficultySpec::DEFAULT_DENSITY)]
    density: f64,
}

impl CaseArg {
    pub(crate) fn test_case(&self) -> anyhow::Result<TestCase> {
        match (self.rows, self.cols) {
            (Some(rows), Some(cols)) => Ok(TestCase::new(
                "Custom",
                DifficultySpec::new(GridSize::new(rows, cols)?, self.density, self.seed),
            )),
            _ => Ok(TestCase::preset(self.difficulty, self.density, self.seed)),
        }
    }
}
