//! tix - Markdown ticket tracker
//!
//! One TICKET-<NNN>.md file per ticket: YAML frontmatter plus a free-text
//! body. Results are JSON on stdout; one operation per invocation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tix_core::{Config, TicketStore, config::CONFIG_FILE};

mod commands;

#[derive(Parser)]
#[command(name = "tix")]
#[command(about = "Markdown ticket tracker")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Tickets directory (defaults to ./docs/tickets)
    #[arg(long, global = true, env = "TICKETS_DIR")]
    dir: Option<PathBuf>,

    /// Human-readable output instead of JSON
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List tickets, optionally filtered by status and type
    List {
        /// Filter by status
        status: Option<String>,

        /// Filter by type
        #[arg(value_name = "TYPE")]
        ticket_type: Option<String>,
    },

    /// Show one ticket with its body
    Get {
        /// Ticket ID
        id: String,
    },

    /// Create a ticket from a JSON object on stdin
    Create,

    /// Update a ticket from a JSON object of field updates on stdin
    Update {
        /// Ticket ID
        id: String,
    },

    /// Search tickets by case-insensitive substring (title, then body)
    Search {
        /// Substring to look for
        query: Option<String>,

        /// Filter by status
        status: Option<String>,
    },

    /// Print the blocks/blocked-by/parent dependency graph
    AnalyzeDependencies,

    /// List tickets whose parent is the given ticket
    GetSubtickets {
        /// Parent ticket ID
        parent_id: String,
    },
}

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage goes to stdout; help and version requests are not
            // failures.
            print!("{}", err);
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    if let Err(err) = run(cli) {
        let payload = serde_json::json!({ "error": err.to_string() });
        match err.downcast_ref::<tix_core::Error>() {
            // Missing tickets are part of the normal output contract.
            Some(tix_core::Error::NotFound(_)) => println!("{}", payload),
            _ => eprintln!("{}", payload),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(Path::new(CONFIG_FILE))?;
    let dir = cli.dir.unwrap_or_else(|| config.tickets_dir.clone());
    let store = TicketStore::open(dir)?;

    match cli.command {
        Commands::List {
            status,
            ticket_type,
        } => commands::list(&store, status, ticket_type, cli.pretty),
        Commands::Get { id } => commands::get(&store, &id, cli.pretty),
        Commands::Create => commands::create(&store, &config, cli.pretty),
        Commands::Update { id } => commands::update(&store, &id, cli.pretty),
        Commands::Search { query, status } => commands::search(&store, query, status, cli.pretty),
        Commands::AnalyzeDependencies => commands::analyze_dependencies(&store),
        Commands::GetSubtickets { parent_id } => {
            commands::get_subtickets(&store, &parent_id, cli.pretty)
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    // Diagnostics go to stderr so stdout stays pure JSON.
    let filter = EnvFilter::try_from_env("TIX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
