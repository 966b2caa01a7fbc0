use std::path::PathBuf;

use anyhow::{Context, Result};
use campo::agent::{AgentContext, TaskParams};
use campo::config::Settings;
use campo::registry::AgentRegistry;
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "campo")]
#[command(author, version, about = "Campo Futuro - agricultural alert agents", long_about = None)]
struct Cli {
    /// TOML settings file, overridden by CAMPO_* environment variables
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run agents in the given order
    Run {
        /// Agent names or task ids, e.g. PREDICTOR_INUNDACIONES or market_intelligence
        #[arg(required = true)]
        agents: Vec<String>,

        #[command(flatten)]
        task: TaskArgs,
    },

    /// Run every agent
    RunAll {
        #[command(flatten)]
        task: TaskArgs,
    },

    /// List agents and what they do
    List,

    /// Check each agent's dependencies
    Status,

    /// Short answer from one agent, not written to the alert log
    Brief {
        agent: String,

        #[command(flatten)]
        task: TaskArgs,
    },
}

#[derive(Args, Debug, Default)]
struct TaskArgs {
    /// Region to analyse (defaults to agents.default_region)
    #[arg(short, long)]
    region: Option<String>,

    /// Response language, e.g. ESPAÑOL or ENGLISH
    #[arg(short, long)]
    language: Option<String>,

    /// Comma separated products for market analysis
    #[arg(short, long, value_delimiter = ',')]
    products: Option<Vec<String>>,

    /// Days of news to consider (1 to 3650)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=3650))]
    days: Option<u32>,

    /// Number of items in a brief
    #[arg(long)]
    limit: Option<usize>,
}

impl From<TaskArgs> for TaskParams {
    fn from(args: TaskArgs) -> Self {
        TaskParams {
            region: args.region,
            language: args.language,
            products: args.products,
            date_range_days: args.days,
            limit: args.limit,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("campo=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_registry(settings: &Settings) -> Result<AgentRegistry> {
    let ctx = AgentContext::from_settings(settings).context("Failed to build agent context")?;
    AgentRegistry::with_all_agents(Arc::new(ctx)).context("Failed to register agents")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    let mut registry = build_registry(&settings)?;

    match cli.command {
        Command::Run { agents, task } => commands::run::execute(&mut registry, &agents, task.into()),
        Command::RunAll { task } => {
            let names: Vec<String> = registry.names().into_iter().map(String::from).collect();
            commands::run::execute(&mut registry, &names, task.into())
        }
        Command::List => commands::list::execute(&registry),
        Command::Status => commands::status::execute(&registry, &settings),
        Command::Brief { agent, task } => commands::brief::execute(&registry, &agent, task.into()),
    }
}
