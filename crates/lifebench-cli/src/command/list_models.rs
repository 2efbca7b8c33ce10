use super::ConfigArg;
use crate::model::provider::ModelProvider as _;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ListModelsArg {
    /// Only show model IDs containing this text
    #[arg(long)]
    filter: Option<String>,
}

pub(crate) async fn run(config: &ConfigArg, arg: &ListModelsArg) -> anyhow::Result<()> {
    let provider = config.provider()?;
    let models = provider.list_models().await?;

    let mut shown = 0;
    for model in models
        .iter()
        .filter(|model| arg.filter.as_deref().is_none_or(|filter| model.contains(filter)))
    {
        println!("{model}");
        shown += 1;
    }
    eprintln!("{shown} of {} models", models.len());
    Ok(())
}
