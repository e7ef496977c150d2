mod errors;
mod handlers;
mod operations;
mod state;
mod ui;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::errors::{map_config_error, map_file_load_error};
use crate::handlers::{
    build_filters, handle_browse, handle_filters, handle_search, handle_show, SearchRequest,
};
use crate::operations::load_config;
use crate::state::AppState;

/// Occupation Browser - Browse and search the ESCO/ISCO occupation classification
///
/// Examples:
///   # Show major and sub-major groups
///   occubrowse occupations.csv browse
///
///   # Show everything below minor group 251, including occupations
///   occubrowse occupations.csv browse --code 251 --records
///
///   # Fuzzy search across labels, codes, alternative labels and descriptions
///   occubrowse occupations.csv search software developer
///
///   # Restrict to major groups 2 OR 3 AND occupation type "esco"
///   occubrowse occupations.csv search analyst --major 2 --major 3 --type esco
///
///   # List facet values present in the data
///   occubrowse occupations.csv filters
#[derive(Parser, Debug)]
#[command(name = "occubrowse")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Filtering Logic:\n  \
    - Multiple --major values are combined with OR\n  \
    - Multiple --type values are combined with OR\n  \
    - Major group and type filters are combined with AND\n\n\
Logging:\n  \
    - Set RUST_LOG (e.g. RUST_LOG=occubrowse_core=debug) or pass -v / -vv")]
struct Cli {
    /// Path to the occupation records (.csv or .json)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Search configuration (JSON); defaults apply to omitted keys
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the classification tree
    Browse {
        /// Start at this group code instead of the roots
        #[arg(long, value_name = "CODE")]
        code: Option<String>,

        /// Number of group levels to print
        #[arg(short, long, default_value_t = 2)]
        depth: usize,

        /// Also list occupations under their groups
        #[arg(short, long)]
        records: bool,
    },

    /// Fuzzy search with optional facet filters
    Search {
        /// Query text; empty lists records matching the filters
        #[arg(value_name = "QUERY", num_args = 0..)]
        query: Vec<String>,

        /// Filter by ISCO major group (can be specified multiple times for OR logic)
        #[arg(short, long = "major", value_name = "DIGIT")]
        majors: Vec<String>,

        /// Filter by occupation type (can be specified multiple times for OR logic)
        #[arg(short, long = "type", value_name = "TYPE")]
        types: Vec<String>,

        /// Filter by facet (format: major=2 or type=esco)
        #[arg(short, long = "facet", value_name = "NAME=VALUE")]
        facets: Vec<String>,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the major groups and occupation types present in the data
    Filters,

    /// Show one occupation by key or code
    Show {
        #[arg(value_name = "KEY_OR_CODE")]
        key: String,
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
        .with_writer(io::stderr)
        .init();
}

fn exit_with(title: String, message: String, details: String) -> ! {
    eprintln!("{}: {}", title.red().bold(), message);
    if !details.is_empty() {
        eprintln!("\n{}", details);
    }
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref()).unwrap_or_else(|err| {
        let path = cli.config.clone().unwrap_or_default();
        let (title, message, details) = map_config_error(&err, &path);
        exit_with(title, message, details)
    });

    let state = AppState::load_from_file(&cli.file, config).unwrap_or_else(|err| {
        let (title, message, details) = map_file_load_error(&err, &cli.file);
        exit_with(title, message, details)
    });

    if let Err(err) = run(&state, cli.command) {
        eprintln!("{}: {:#}", "Error".red().bold(), err);
        process::exit(1);
    }
}

fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Browse {
            code,
            depth,
            records,
        } => handle_browse(state, code.as_deref(), depth, records, &mut out),
        Command::Search {
            query,
            majors,
            types,
            facets,
            limit,
            json,
        } => {
            let request = SearchRequest {
                query: query.join(" "),
                filters: build_filters(&majors, &types, &facets)?,
                limit,
                json,
            };
            handle_search(state, &request, &mut out)
        }
        Command::Filters => handle_filters(state, &mut out),
        Command::Show { key } => handle_show(state, &key, &mut out),
    }
}
