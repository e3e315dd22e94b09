use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use secdesk::commands::{FilterOptions, UpdateOptions, cmd_list, cmd_update, connect};
use secdesk::filter::{OrderBy, SortField};
use secdesk::types::{EventId, EventStatus, SecurityLevel};

#[derive(Parser)]
#[command(name = "secdesk")]
#[command(about = "Browse and triage security events")]
#[command(version)]
struct Cli {
    /// Configuration file (default: ./secdesk.yaml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of security events
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change the status of events on the current page
    Update {
        /// Event ids to update
        #[arg(value_parser = parse_event_id, required_unless_present = "all_on_page")]
        ids: Vec<EventId>,

        /// Update every event on the page instead of listing ids
        #[arg(long, conflicts_with = "ids")]
        all_on_page: bool,

        /// New status (NEW, ASSIGNED, RESOLVED)
        #[arg(short, long, value_parser = parse_status)]
        status: EventStatus,

        /// Note recorded with the change
        #[arg(short, long, default_value = "")]
        note: String,

        /// User to assign the events to
        #[arg(short, long)]
        assignee: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Include events with this status (repeatable; default: NEW, ASSIGNED)
    #[arg(long = "filter-status", value_parser = parse_status)]
    statuses: Vec<EventStatus>,

    /// Include events with this level (repeatable; default: Critical, High)
    #[arg(short, long = "level", value_parser = parse_level)]
    levels: Vec<SecurityLevel>,

    /// Only events from this computer
    #[arg(long)]
    pc: Option<String>,

    /// Sort key, prefixed with '-' for descending (e.g. -occurred_time)
    #[arg(short, long, value_parser = parse_orderby, allow_hyphen_values = true)]
    orderby: Option<OrderBy>,

    /// Page to show (1-based)
    #[arg(short, long, default_value = "1")]
    page: u32,
}

impl From<FilterArgs> for FilterOptions {
    fn from(args: FilterArgs) -> Self {
        FilterOptions {
            statuses: args.statuses,
            levels: args.levels,
            pc: args.pc,
            orderby: args.orderby,
            page: args.page,
        }
    }
}

fn parse_event_id(s: &str) -> Result<EventId, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_status(s: &str) -> Result<EventStatus, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_level(s: &str) -> Result<SecurityLevel, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_orderby(s: &str) -> Result<OrderBy, String> {
    OrderBy::parse(s).map_err(|_| {
        format!(
            "Invalid sort key. Must be one of: {} (optionally prefixed with '-')",
            SortField::ALL_STRINGS.join(", ")
        )
    })
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("SECDESK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> secdesk::error::Result<()> {
    let (config, api) = connect(cli.config.as_deref())?;

    match cli.command {
        Commands::List { filter, json } => cmd_list(api, &config, &filter.into(), json).await,
        Commands::Update {
            ids,
            all_on_page,
            status,
            note,
            assignee,
            filter,
        } => {
            let options = UpdateOptions {
                ids,
                all_on_page,
                status,
                note,
                assignee,
            };
            cmd_update(api, &config, &filter.into(), options).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
