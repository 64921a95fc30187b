//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use switchboard_core::config::{self, paths};
use switchboard_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "switchboard")]
#[command(version)]
#[command(about = "Terminal dashboard for tool backends")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the tool backend program from config
    #[arg(long, env = "SWITCHBOARD_TOOL_COMMAND", value_name = "PROGRAM")]
    tool_command: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Lists the dashboard views and their shortcuts
    Views,
    /// Lists the tools of every category (or one)
    Tools {
        /// Only list tools of this category (neural, memory, github, ...)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Runs a single tool and prints its JSON result
    Exec {
        /// Tool name, e.g. neural_train
        #[arg(short, long)]
        tool: String,

        /// Tool parameters as a JSON object
        #[arg(short, long, default_value = "{}")]
        params: String,
    },
    /// Prints the backend and shell status as JSON
    Status,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = config::Config::load().context("load config")?;
    if let Some(program) = cli.tool_command {
        config.tool_command = Some(program);
    }

    // default to the dashboard
    let Some(command) = cli.command else {
        let _guard = logging::init_file(&paths::logs_dir()?, &config.log_filter)?;
        return commands::dashboard::run(&config).await;
    };

    logging::init_stderr(&config.log_filter)?;

    match command {
        Commands::Views => {
            commands::views::list();
            Ok(())
        }
        Commands::Tools { category } => commands::tools::list(category.as_deref()),
        Commands::Exec { tool, params } => commands::exec::run(&config, &tool, &params).await,
        Commands::Status => commands::status::run(&config).await,
        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
