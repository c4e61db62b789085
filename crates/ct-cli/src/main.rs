//! CLI frontend for the combat tracker.

mod commands;

use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ct",
    about = "Combat tracker: initiative order and dice for tabletop scenes",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log more detail to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read chat commands from stdin and print the replies
    Repl {
        /// Room the commands are sent from
        #[arg(short, long, default_value = "#table")]
        room: String,

        /// RNG seed for reproducible dice
        #[arg(short, long)]
        seed: Option<u64>,

        /// Character that starts every command
        #[arg(short, long, default_value = ".")]
        prefix: char,
    },

    /// Roll a dice expression such as 3d6v1+2
    Roll {
        /// RNG seed for reproducible dice
        #[arg(short, long)]
        seed: Option<u64>,

        /// The expression to roll
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        expression: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Repl { room, seed, prefix } => commands::repl::run(&room, seed, prefix),
        Commands::Roll { seed, expression } => commands::roll::run(&expression.join(" "), seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
