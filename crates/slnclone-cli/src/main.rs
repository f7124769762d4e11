//! slnclone - clone projects inside solution manifests

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slnclone")]
#[command(author, version, about = "Clone projects inside solution manifests")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the projects declared in a solution
    List {
        /// Path to the solution file
        solution: PathBuf,

        /// Include solution folders
        #[arg(long)]
        all: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Clone a project under a new name and identifier
    Clone {
        /// Path to the solution file
        solution: PathBuf,

        /// Identifier of the project to clone
        guid: String,

        /// Name of the new project (defaults to "<name>-copy")
        name: Option<String>,

        /// Print the planned insertions instead of writing the solution
        #[arg(long)]
        dry_run: bool,

        /// Also copy the project directory on disk
        #[arg(long)]
        copy_files: bool,

        /// Project file extension when the source has none
        #[arg(long)]
        extension: Option<String>,

        /// Settings file (defaults to the user config directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::List {
            solution,
            all,
            json,
        } => commands::list(&solution, all, json),

        Commands::Clone {
            solution,
            guid,
            name,
            dry_run,
            copy_files,
            extension,
            config,
        } => {
            let options = commands::CloneOptions {
                guid,
                name,
                dry_run,
                copy_files,
                extension,
                config,
            };
            commands::clone(&solution, &options).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
