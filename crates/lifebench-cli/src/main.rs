use tracing_subscriber::EnvFilter;

mod command;
mod model;
mod schema;
mod util;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so that JSON reports written to stdout stay parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive("lifebench=info".parse()?)
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    command::run().await
}
