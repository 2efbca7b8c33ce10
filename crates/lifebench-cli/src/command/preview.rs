use lifebench_engine::{encode, step};

use super::{CaseArg, SymbolArg};
use crate::{model::prompt::build_prompt, util::indent_board};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PreviewArg {
    #[clap(flatten)]
    case: CaseArg,
    #[clap(flatten)]
    symbols: SymbolArg,
}

pub(crate) fn run(arg: &PreviewArg) -> anyhow::Result<()> {
    let symbols = arg.symbols.symbols()?;
    let case = arg.case.test_case()?;
    let initial = case.initial_grid();
    let expected = step(&initial);

    println!(
        "{} ({}), seed={}, density={}",
        case.label, case.spec.size, case.spec.seed, case.spec.density
    );
    println!("{}", "-".repeat(40));
    println!();
    println!("Initial board:");
    println!("{}", indent_board(&encode(&initial, symbols), 2));
    println!();
    println!("Expected next state:");
    println!("{}", indent_board(&encode(&expected, symbols), 2));
    println!();
    println!("Prompt that would be sent to the model:");
    println!("{}", "-".repeat(40));
    println!("{}", build_prompt(&initial, symbols));
    Ok(())
}
