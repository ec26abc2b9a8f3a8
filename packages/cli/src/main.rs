//! Operational CLI for dispatching task triggers to the configured bus.

use std::error::Error;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use task_core::{DefinitionId, Locale, TaskId, TaskRef, Tenant};
use task_transport::{EventBusConfig, builtin_registry};
use task_trigger::{FixedTenancy, TaskTriggerer};

#[derive(Parser)]
#[command(name = "taskbus", about = "Dispatch background-task triggers to the event bus")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Dispatch a trigger event for a task.
    Trigger {
        /// Task ID (ULID).
        #[arg(long)]
        task: String,
        /// Task definition slug.
        #[arg(long)]
        definition: String,
        /// Seconds the bus should wait before executing.
        #[arg(long, default_value_t = 0)]
        delay: i64,
        /// Tenant the task runs under (defaults to root).
        #[arg(long)]
        tenant: Option<String>,
        /// Content locale (defaults to en-US).
        #[arg(long)]
        locale: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Trigger {
            task,
            definition,
            delay,
            tenant,
            locale,
        } => {
            let config = EventBusConfig::from_env()?;
            let registry = builtin_registry();
            let transport = registry.create(config.builtin_plugin_name(), &config)?;

            let task = TaskRef::new(TaskId::parse(&task)?, DefinitionId::new(definition)?);
            let tenancy = FixedTenancy::new(
                tenant.map(Tenant::new).unwrap_or_default(),
                locale.map(Locale::new).unwrap_or_default(),
            );

            let triggerer = TaskTriggerer::new(transport, Arc::new(tenancy));
            let receipt = triggerer.trigger(&task, delay).await?;
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
    }
    Ok(())
}
