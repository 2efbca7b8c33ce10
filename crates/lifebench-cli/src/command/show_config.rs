use tracing::warn;

use super::ConfigArg;

pub(crate) fn run(arg: &ConfigArg) -> anyhow::Result<()> {
    let config = arg.load()?;
    let openrouter = &config.openrouter;

    println!(
        "API key:          {}",
        openrouter.masked_api_key().as_deref().unwrap_or("NOT SET")
    );
    println!("Model:            {}", openrouter.model);
    println!("Temperature:      {}", openrouter.temperature);
    println!("Max tokens:       {}", openrouter.max_tokens);
    match openrouter.reasoning_effort {
        Some(effort) => println!("Reasoning effort: {effort}"),
        None => println!("Reasoning effort: default"),
    }

    if !openrouter.has_api_key() {
        warn!("API key is not set; add your OpenRouter API key to the config file");
    }
    Ok(())
}
