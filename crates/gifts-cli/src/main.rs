mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::plan::PlanSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gifts",
    about = "Gifts assessment — take the questionnaire, review results, work the development plan",
    version,
    propagate_version = true
)]
struct Cli {
    /// Data root (default: auto-detect from .gifts/ or .git/)
    #[arg(long, global = true, env = "GIFTS_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the .gifts/ data directory
    Init,

    /// List the question battery
    Questions,

    /// List the gift taxonomy
    Gifts,

    /// Take the questionnaire from an answers file and persist the result
    Submit {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address (keys durable storage)
        #[arg(long)]
        email: String,
        /// YAML file mapping question id to rating (1-5)
        #[arg(long)]
        answers: PathBuf,
    },

    /// Show the latest stored result for an email
    Results {
        #[arg(long)]
        email: String,
    },

    /// Work with the development plan
    Plan {
        #[command(subcommand)]
        subcommand: PlanSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Questions => cmd::catalog::questions(cli.json),
        Commands::Gifts => cmd::catalog::gifts(cli.json),
        Commands::Submit {
            name,
            email,
            answers,
        } => cmd::submit::run(&root, &name, &email, &answers, cli.json),
        Commands::Results { email } => cmd::results::run(&root, &email, cli.json),
        Commands::Plan { subcommand } => cmd::plan::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
