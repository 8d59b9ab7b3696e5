mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::EXIT_FAILURE;
use drydock_state::StateLayout;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "drydock",
    version,
    about = "Declarative local development environments"
)]
struct Cli {
    /// Path to the Drydock home directory.
    #[arg(long, default_value = "~/.drydock", global = true)]
    home: String,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the environment described by a blueprint folder.
    Up {
        /// Path to the blueprint folder.
        #[arg(default_value = ".")]
        blueprint: PathBuf,
    },
    /// Destroy the environment recorded in the state file.
    Down {
        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Show the resources recorded in the state file.
    Status {
        /// Output as structured JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Parse a blueprint folder and report what it declares.
    Validate {
        /// Path to the blueprint folder.
        #[arg(default_value = ".")]
        blueprint: PathBuf,
    },
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("DRYDOCK_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .init();

    let layout = StateLayout::new(expand_tilde(&cli.home));

    let result = match cli.command {
        Commands::Up { blueprint } => commands::up::run(&blueprint, layout),
        Commands::Down { yes } => commands::down::run(layout, yes),
        Commands::Status { json } => commands::status::run(&layout, json),
        Commands::Validate { blueprint } => commands::validate::run(&blueprint),
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
