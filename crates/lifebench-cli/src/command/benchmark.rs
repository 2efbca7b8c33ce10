use std::path::PathBuf;

use lifebench_engine::DifficultySpec;

use super::{ConfigArg, SymbolArg};
use crate::{
    model::{
        provider::ModelProvider as _,
        runner,
        test_case::{self, TestCase},
    },
    schema::report::{BenchmarkReport, Outcome},
    util::{Output, format_percent, indent_board},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BenchmarkArg {
    /// Suite file with one `<size> <density>` test per line; the default suite is used if omitted
    #[arg(long)]
    tests: Option<PathBuf>,
    /// Output file path for the JSON report; stdout if omitted
    #[arg(long)]
    output: Option<PathBuf>,
    /// Maximum number of concurrent model requests
    #[arg(long, default_value_t = 1)]
    concurrency: usize,
    #[clap(flatten)]
    symbols: SymbolArg,
}

pub(crate) async fn run(config: &ConfigArg, arg: &BenchmarkArg) -> anyhow::Result<()> {
    let symbols = arg.symbols.symbols()?;
    let cases = match &arg.tests {
        Some(path) => test_case::load_suite(path)?,
        None => test_case::default_suite(),
    };
    let provider = config.provider()?;

    print_suite(&cases);
    eprintln!("Model: {}", provider.model());
    eprintln!("{}", "-".repeat(50));

    let report = runner::run_suite(&provider, &cases, symbols, arg.concurrency).await;

    print_report(&report);
    Output::save_json(&report, arg.output.clone())?;
    if let Some(path) = &arg.output {
        eprintln!("Results saved to: {}", path.display());
    }
    Ok(())
}

fn print_suite(cases: &[TestCase]) {
    eprintln!("Test suite:");
    for (i, case) in cases.iter().enumerate() {
        let DifficultySpec {
            size,
            density,
            seed,
        } = case.spec;
        eprintln!(
            "  {}. {} size={size}, density={density}, seed={seed}, points={}",
            i + 1,
            case.label,
            case.max_points()
        );
    }
    eprintln!(
        "Total possible points: {}",
        cases.iter().map(TestCase::max_points).sum::<usize>()
    );
}

fn print_report(report: &BenchmarkReport) {
    eprintln!();
    eprintln!("{}", "=".repeat(70));
    eprintln!("DETAILED RESULTS - Model: {}", report.model);
    eprintln!("Timestamp: {}", report.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
    eprintln!("{}", "=".repeat(70));

    for (i, result) in report.results.iter().enumerate() {
        let status = if result.is_perfect() { "✓" } else { "✗" };
        eprintln!();
        eprintln!(
            "Test {}: {status} {} ({}, seed={})",
            i + 1,
            result.label,
            result.spec.size,
            result.spec.seed
        );
        match &result.outcome {
            Outcome::Scored(record) => {
                eprintln!("  Cell accuracy: {}", format_percent(record.cell_accuracy()));
                eprintln!("  Correctness:   {:.4}", record.correctness());
                eprintln!(
                    "  Points:        {:.2} / {}",
                    record.points(),
                    result.max_points
                );
            }
            Outcome::Unscorable { reason } => {
                eprintln!("  Unscorable:    {reason}");
                eprintln!("  Points:        0 / {}", result.max_points);
            }
        }
        if let Some(error) = &result.error {
            eprintln!("  Error:         {error}");
        }
        eprintln!("  Response time: {:.2}s", result.response_time_secs);

        if !result.is_perfect() {
            eprintln!();
            eprintln!("  Initial state:");
            eprintln!("{}", indent_board(&result.initial_board, 4));
            eprintln!();
            eprintln!("  Expected:");
            eprintln!("{}", indent_board(&result.expected_board, 4));
            if let Some(predicted_board) = &result.predicted_board {
                eprintln!();
                eprintln!("  Predicted:");
                eprintln!("{}", indent_board(predicted_board, 4));
            }
        }
    }

    let summary = &report.summary;
    let scores = &summary.scores;
    eprintln!();
    eprintln!("{}", "-".repeat(50));
    eprintln!("Overall accuracy: {}", format_percent(scores.overall_accuracy));
    eprintln!("Mean correctness: {:.4}", scores.mean_correctness);
    eprintln!(
        "Perfect matches:  {}/{}",
        scores.perfect_matches, scores.total_tests
    );
    eprintln!(
        "Scored tests:     {}/{}",
        scores.scored_tests, scores.total_tests
    );
    eprintln!(
        "Points:           {:.2} / {}",
        scores.points_earned, scores.max_points
    );
    if let Some(stats) = &scores.correctness_stats {
        eprintln!(
            "Correctness:      min={:.4} median={:.4} max={:.4} std_dev={:.4}",
            stats.min, stats.median, stats.max, stats.std_dev
        );
    }
    eprintln!("Total tokens:     {}", summary.total_tokens);
    if let Some(cost) = summary.total_cost {
        eprintln!("Total cost:       {cost:.6}");
    }
}
