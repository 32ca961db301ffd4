mod ask_cmd;
mod config_cmd;
mod context;
mod dashboard_cmd;
mod entity_cmd;
mod health_cmd;
mod sparql_cmd;
mod terminal_output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use ontodash_routing::RouteResolver;
use ontodash_views::{DashboardViewModel, QueryViewModel};

use config_cmd::ConfigCommands;
use context::AppContext;
use entity_cmd::EntityCommands;

#[derive(Parser)]
#[command(name = "ontodash")]
#[command(about = "Dashboard and natural-language query client for an ontology backend")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.ontodash/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:5000/api. Overrides the config.
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal dashboard and query views
    Ui {
        /// Start view: `/`, `/dashboard` or `/query`
        #[arg(long, default_value = "/")]
        route: String,
    },
    /// Check whether the backend is reachable
    Health,
    /// Load every collection once and print it
    Dashboard,
    /// Ask a question or issue a CRUD command in natural language
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Run a raw SPARQL query
    Sparql { query: String },
    /// Create, update or delete an entity directly
    #[command(subcommand)]
    Entity(EntityCommands),
    /// Inspect or initialise the config file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, Commands::Ui { .. });
    let ctx = AppContext::build(cli.config.as_deref(), cli.api_url.as_deref(), interactive).await?;

    let ok = match cli.command {
        Commands::Ui { route } => {
            let view = RouteResolver::new().navigate(&route);
            let dashboard = Arc::new(DashboardViewModel::new(ctx.api.clone(), ctx.bus.clone()));
            let query = Arc::new(
                QueryViewModel::new(ctx.api.clone(), ctx.bus.clone())
                    .with_refresh_delay(ctx.refresh_delay()),
            );
            tui::run(dashboard, query, view).await?;
            true
        }
        Commands::Health => health_cmd::run(ctx.api.as_ref(), &ctx.base_url).await,
        Commands::Dashboard => dashboard_cmd::run(ctx.api.clone(), ctx.bus.clone()).await,
        Commands::Ask { question } => {
            let question = question.join(" ");
            ask_cmd::run(ctx.api.clone(), ctx.bus.clone(), ctx.refresh_delay(), &question).await
        }
        Commands::Sparql { query } => sparql_cmd::run(ctx.api.as_ref(), &query).await,
        Commands::Entity(cmd) => entity_cmd::run(ctx.api.as_ref(), cmd).await?,
        Commands::Config(cmd) => {
            config_cmd::run(cmd, &ctx.config, &ctx.config_path).await?;
            true
        }
    };

    info!(ok, "ontodash finished");
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
