mod cli;

use anyhow::Context;
use cli::Args;
use kbom_query::application::dto::RequestEvent;
use kbom_query::application::factories::StoreFactory;
use kbom_query::config::{discover_config, load_config_from_path, ConfigOverrides, QueryConfig};
use kbom_query::ports::inbound::QueryPort;
use kbom_query::shared::error::ExitCode;
use kbom_query::shared::Result;
use std::process;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn init_tracing(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(args: Args) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(&std::env::current_dir()?)?,
    };

    let overrides = ConfigOverrides {
        endpoint: args.endpoint.clone(),
        local_dir: args.local_dir.clone(),
        unsigned: args.unsigned,
    };
    let config = QueryConfig::from_env(file_config, overrides)?;
    tracing::debug!(
        bucket = %config.location.bucket,
        key = %config.location.key,
        store = %StoreFactory::describe(&config.store),
        "configuration resolved"
    );

    let event = read_event(&args).await?;
    let router = StoreFactory::create_router(&config);
    let envelope = router.handle(event).await;

    let output = if args.pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };
    println!("{}", output);

    Ok(())
}

async fn read_event(args: &Args) -> Result<RequestEvent> {
    let raw = match args.event.as_deref() {
        None => {
            return Ok(RequestEvent::from_path(
                args.path.as_deref().unwrap_or("/"),
            ))
        }
        Some("-") => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("Failed to read request event from stdin")?;
            buffer
        }
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read request event file: {}", path))?,
    };

    let event = serde_json::from_str(&raw).context(
        "Failed to parse request event\n\n💡 Hint: The event must be a JSON object such as {\"rawPath\": \"/bom\"}",
    )?;
    Ok(event)
}
