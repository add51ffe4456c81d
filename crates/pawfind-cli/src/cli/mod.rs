//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use pawfind_core::{config, logging};
use pawfind_types::Sort;

mod commands;
mod connect;

#[derive(Parser)]
#[command(name = "pawfind")]
#[command(version)]
#[command(about = "Find adoptable dogs from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log filter (overrides `log_level` from config; RUST_LOG wins over both)
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,
}

/// Credentials for commands that log in before running.
#[derive(clap::Args, Debug, Clone, Default)]
struct LoginArgs {
    /// Name to log in with
    #[arg(long, env = "PAWFIND_NAME")]
    name: Option<String>,

    /// Email to log in with
    #[arg(long, env = "PAWFIND_EMAIL")]
    email: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Browse dogs interactively (default)
    Browse,

    /// Print the list of known breeds
    Breeds {
        #[command(flatten)]
        login: LoginArgs,
    },

    /// Run one search and print a page of results
    Search {
        #[command(flatten)]
        login: LoginArgs,

        /// Only show dogs of this breed
        #[arg(long)]
        breed: Option<String>,

        /// 1-based page to show
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Results per page (10, 25, 50 or 100)
        #[arg(long)]
        size: Option<u32>,

        /// Sort order, e.g. `breed`, `age:desc`
        #[arg(long, value_name = "FIELD[:DIR]")]
        sort: Option<Sort>,
    },

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

    let config = config::Config::load().context("load config")?;
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let _log_guard = logging::init(level, config.log_file.as_deref())?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli.command, config).await })
}

async fn dispatch(command: Option<Commands>, config: config::Config) -> Result<()> {
    let Some(command) = command else {
        return commands::browse::run(&config).await;
    };

    match command {
        Commands::Browse => commands::browse::run(&config).await,
        Commands::Breeds { login } => {
            commands::breeds::run(&config, login.name.as_deref(), login.email.as_deref()).await
        }
        Commands::Search {
            login,
            breed,
            page,
            size,
            sort,
        } => {
            commands::search::run(commands::search::SearchOptions {
                config: &config,
                name: login.name.as_deref(),
                email: login.email.as_deref(),
                breed: breed.as_deref(),
                page,
                size,
                sort,
            })
            .await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
