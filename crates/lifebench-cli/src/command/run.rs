use lifebench_engine::{decode, step};

use super::{CaseArg, ConfigArg, SymbolArg};
use crate::{
    model::{provider::ModelProvider as _, runner},
    schema::report::Outcome,
    util::{format_percent, indent_board, mismatch_map},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RunArg {
    #[clap(flatten)]
    case: CaseArg,
    #[clap(flatten)]
    symbols: SymbolArg,
}

pub(crate) async fn run(config: &ConfigArg, arg: &RunArg) -> anyhow::Result<()> {
    let symbols = arg.symbols.symbols()?;
    let case = arg.case.test_case()?;
    let provider = config.provider()?;

    println!(
        "Running {} test ({}) with seed {}...",
        case.label, case.spec.size, case.spec.seed
    );
    println!("Model: {}", provider.model());
    println!("{}", "-".repeat(40));

    let result = runner::run_test(&provider, &case, symbols).await;

    println!();
    println!("Results:");
    match &result.outcome {
        Outcome::Scored(record) => {
            println!("  Cell accuracy: {}", format_percent(record.cell_accuracy()));
            println!("  F1 (alive):    {:.4}", record.f1_alive());
            println!("  F1 (dead):     {:.4}", record.f1_dead());
            println!("  Correctness:   {:.4}", record.correctness());
            println!(
                "  Points:        {:.2} / {}",
                record.points(),
                result.max_points
            );
            println!(
                "  Perfect match: {}",
                if record.perfect_match() { "Yes" } else { "No" }
            );
        }
        Outcome::Unscorable { reason } => {
            println!("  Unscorable:    {reason}");
            println!("  Points:        0 / {}", result.max_points);
        }
    }
    if let Some(error) = &result.error {
        println!("  Error:         {error}");
    }
    println!("  Response time: {:.2}s", result.response_time_secs);
    if let Some(usage) = &result.usage {
        println!(
            "  Tokens:        {} (prompt {}, completion {})",
            usage.total_tokens, usage.prompt_tokens, usage.completion_tokens
        );
        if let Some(cost) = usage.cost {
            println!("  Cost:          {cost:.6}");
        }
    }

    println!();
    println!("Initial board:");
    println!("{}", indent_board(&result.initial_board, 2));
    println!();
    println!("Expected next state:");
    println!("{}", indent_board(&result.expected_board, 2));
    if let Some(predicted_board) = &result.predicted_board {
        println!();
        match result.candidate_source {
            Some(source) => println!("Model predicted (from {source}):"),
            None => println!("Model predicted:"),
        }
        println!("{}", indent_board(predicted_board, 2));
    }

    if result.outcome.is_scored() && !result.is_perfect() {
        let predicted = result
            .predicted_board
            .as_deref()
            .map(|board| decode(board, symbols))
            .transpose()?;
        let expected = step(&case.initial_grid());
        if let Some(map) = predicted.and_then(|predicted| mismatch_map(&predicted, &expected)) {
            println!();
            println!("Mismatches marked with *:");
            println!("{}", indent_board(&map, 2));
        }
    }
    Ok(())
}
