use clap::Parser;
use clap_handler::Handler;

mod commands;

#[derive(Parser, clap_handler::Handler, Clone)]
#[clap(name = "mamori-probe", version)]
struct ProbeArgs {
    #[clap(subcommand)]
    command: commands::ProbeCommand,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .try_from_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = ProbeArgs::parse();
    args.run().await
}
