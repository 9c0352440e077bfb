//! DCSS Shell - native shell for Dungeon Crawl Stone Soup WebTiles
//!
//! Shows the game page with a key-command bar for the keys a touch keyboard
//! lacks, and forwards typed text to the page as keystrokes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dcss_shell::app::{self, init_tracing, LogTarget};
use dcss_shell::cli::{CommandsArgs, ConfigArgs, ScriptArgs};
use dcss_shell::config::{validate_server_url, Config};
use dcss_shell::constants::{APP_BINARY_NAME, LOG_FILE_NAME};

/// DCSS Shell - WebTiles with a key-command bar
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// WebTiles server address (overrides the configured one)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the command bar buttons
    Commands(CommandsArgs),
    /// Print the script sent to the page for a command
    Script(ScriptArgs),
    /// Show or initialise configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        if let Err(e) = init_tracing(&LogTarget::Stderr, cli.verbose) {
            eprintln!("Warning: {e:#}");
        }

        let result = match command {
            Commands::Commands(args) => args.execute(),
            Commands::Script(args) => args.execute(),
            Commands::Config(args) => args.execute(),
        };

        if let Err(e) = result {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code().code());
        }
        return Ok(());
    }

    let config = Config::load().context(format!(
        "Failed to load configuration. Run `{APP_BINARY_NAME} config` to inspect it"
    ))?;

    let url = match cli.url {
        Some(url) => {
            validate_server_url(&url)?;
            url
        }
        None => config.server.url.clone(),
    };

    let log_path = Config::config_dir()?.join(LOG_FILE_NAME);
    init_tracing(&LogTarget::File(log_path), cli.verbose)?;

    app::run_terminal(config, url)
}
