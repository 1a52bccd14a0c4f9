use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dfmgr::catalog::Catalog;
use dfmgr::config::{self, Config, DEFAULT_REPO_NAME};
use dfmgr::handlers::{self, App};
use dfmgr::logger;
use dfmgr::process::SystemRunner;
use dfmgr::prompt;
use dfmgr::sync::SyncOptions;

#[derive(Parser)]
#[command(name = "dfmgr")]
#[command(about = "Manage dotfiles with GitHub and GNU stow", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (default: $DFMGR_CONFIG or ~/.dfmgr)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up dfmgr and create your dotfiles repository
    Init,

    /// Clone a dotfiles repository and apply it
    Clone {
        /// GitHub user owning the repository
        username: String,

        /// Repository name
        #[arg(short, long, default_value = DEFAULT_REPO_NAME)]
        repo: String,

        /// Choose which packages to apply
        #[arg(short, long)]
        selective: bool,
    },

    /// Fork someone else's dotfiles repository and make it your own
    Fork {
        /// GitHub user owning the repository to fork
        username: String,

        /// Repository name
        #[arg(short, long, default_value = DEFAULT_REPO_NAME)]
        repo: String,

        /// Choose which packages to apply
        #[arg(short, long)]
        selective: bool,
    },

    /// Symlink the repository's packages into your home directory
    Apply {
        /// Choose which packages to apply
        #[arg(short, long)]
        selective: bool,
    },

    /// Remove symlinks created by apply
    Unapply {
        /// Choose which packages to remove
        #[arg(short, long)]
        selective: bool,
    },

    /// Copy files from your home directory into the repository
    Sync {
        /// Files, directories or glob patterns relative to your home directory
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Overwrite existing repository files without asking
        #[arg(short, long)]
        force: bool,

        /// Place files in category folders
        #[arg(short, long)]
        organize: bool,
    },

    /// Commit all changes and push them to GitHub
    Push {
        /// Commit message (prompted for when omitted)
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Pull the latest changes from GitHub
    Fetch,

    /// List known configuration file categories
    Categories {
        /// Show the files of one category
        name: Option<String>,
    },

    /// Show the current configuration
    Config,
}

fn main() {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        logger::error(format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let home = config::home_dir()?;
    let config_path = config::config_file_path(cli.config.as_deref())?;
    let config = Config::load(&config_path, &home);

    let runner = SystemRunner::inherit();
    let prompter = prompt::for_terminal();

    let mut app = App {
        config,
        home,
        prompter: prompter.as_ref(),
        runner: &runner,
        catalog: Catalog::builtin(),
    };

    match cli.command {
        Commands::Init => {
            handlers::handle_init(&mut app).context("Failed to initialize")?;
        }
        Commands::Clone {
            username,
            repo,
            selective,
        } => {
            handlers::handle_clone(&mut app, &username, &repo, selective)
                .context("Failed to clone")?;
        }
        Commands::Fork {
            username,
            repo,
            selective,
        } => {
            handlers::handle_fork(&mut app, &username, &repo, selective)
                .context("Failed to fork")?;
        }
        Commands::Apply { selective } => {
            handlers::handle_apply(&app, selective)?;
        }
        Commands::Unapply { selective } => {
            handlers::handle_unapply(&app, selective)?;
        }
        Commands::Sync {
            patterns,
            force,
            organize,
        } => {
            handlers::handle_sync(&app, &patterns, SyncOptions { force, organize })?;
        }
        Commands::Push { message } => {
            handlers::handle_push(&app, message.as_deref()).context("Failed to push changes")?;
        }
        Commands::Fetch => {
            handlers::handle_fetch(&app).context("Failed to fetch changes")?;
        }
        Commands::Categories { name } => {
            handlers::handle_categories(&app, name.as_deref())?;
        }
        Commands::Config => {
            handlers::handle_show_config(&app)?;
        }
    }

    Ok(())
}
