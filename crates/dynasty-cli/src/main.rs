// Dynasty league stats entry point.
//
// Startup sequence:
// 1. Parse arguments
// 2. Initialize tracing (log to file, stdout is reserved for tables)
// 3. Load config
// 4. Build the HTTP API client
// 5. Run the selected command and print its tables

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dynasty_cli::commands::{self, CommandEnv};
use dynasty_cli::render::{write_tables, OutputFormat, Table};
use dynasty_core::api::HttpLeagueApi;
use dynasty_core::config;
use dynasty_core::model::{
    MatchType, PlayerRecordQuery, Position, RecordCategory, RecordView, RookieRecordQuery, RosterType,
    TransactionType,
};
use dynasty_views::owners::OwnerSortField;
use dynasty_views::sort::{SortDirection, SortState};
use dynasty_views::transactions::SummarySortField;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "dynasty")]
#[command(about = "Dynasty fantasy league stats: standings, drafts, trades, rivalries and records")]
#[command(version)]
struct Cli {
    /// Output format for every table.
    #[arg(long, value_enum, global = true, default_value_t)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Standings grouped by division
    Standings {
        /// Past season; defaults to the current one
        #[arg(short, long)]
        season: Option<i32>,
    },
    /// List every recorded draft
    Drafts,
    /// Draft board for one year (latest draft when omitted)
    Draft {
        year: Option<i32>,
    },
    /// Most recent league transactions
    Transactions {
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Per-owner counts of waiver adds, free agent adds and trades
    Summary {
        #[arg(long, default_value = "total")]
        sort: SummarySortField,
        #[arg(long, default_value = "desc")]
        direction: SortDirection,
    },
    /// Transactions involving one owner
    OwnerTransactions {
        user_id: String,
        /// Only waiver, free_agent or trade
        #[arg(long = "type")]
        kind: Option<TransactionType>,
    },
    /// Head-to-head matrix and record vs the weekly median
    H2h {
        #[arg(short, long, default_value = "regular_season")]
        category: RecordCategory,
    },
    /// Career owner records
    Owners {
        #[arg(short, long, default_value = "regular_season")]
        category: RecordCategory,
        #[arg(long, default_value = "wins")]
        sort: OwnerSortField,
        #[arg(long, default_value = "desc")]
        direction: SortDirection,
        /// Also show this owner's season-by-season breakdown
        #[arg(long)]
        owner: Option<String>,
    },
    /// Player scoring records
    Players {
        #[arg(long, default_value = "game")]
        view: RecordView,
        #[arg(long, default_value = "regular")]
        match_type: MatchType,
        #[arg(long, default_value = "all")]
        roster_type: RosterType,
        #[arg(long)]
        position: Option<Position>,
        /// 1 to 100; defaults to the configured player records limit
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Best performances by players in their rookie season
    Rookies {
        /// game or season
        #[arg(long, default_value = "game")]
        view: RecordView,
        #[arg(long, default_value = "regular")]
        match_type: MatchType,
        #[arg(long, default_value = "all")]
        roster_type: RosterType,
        #[arg(long)]
        position: Option<Position>,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Taxi squad players per team
    Taxi,
    /// Champions, division winners and trophies
    History {
        #[arg(short, long)]
        season: Option<i32>,
    },
    /// Seasons the backend has data for
    Seasons,
    /// Ask the backend to pull fresh league data
    Sync,
    /// Standings, recent transactions, summary and head to head in one view
    Dashboard,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse arguments
    let cli = Cli::parse();

    // 2. Initialize tracing
    init_tracing()?;
    info!("dynasty starting up");

    // 3. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: api={}, timeout={}s, cache={}s",
        config.api.base_url, config.api.timeout_secs, config.cache.stale_secs
    );

    // 4. Build the API client
    let api = HttpLeagueApi::from_config(&config).context("failed to build API client")?;
    let env = CommandEnv::new(Arc::new(api), config.display.clone());

    // 5. Run the command
    let tables = match run(&env, cli.command).await {
        Ok(tables) => tables,
        Err(e) => {
            error!("Command failed: {:#}", e);
            return Err(e);
        }
    };

    let stdout = std::io::stdout();
    write_tables(&mut stdout.lock(), &tables, cli.format).context("failed to write output")?;
    Ok(())
}

async fn run(env: &CommandEnv, command: Commands) -> anyhow::Result<Vec<Table>> {
    match command {
        Commands::Standings { season } => commands::standings(env, season).await,
        Commands::Drafts => commands::drafts(env).await,
        Commands::Draft { year } => commands::draft(env, year).await,
        Commands::Transactions { limit } => commands::transactions(env, limit).await,
        Commands::Summary { sort, direction } => {
            commands::summary(env, SortState::with_direction(sort, direction)).await
        }
        Commands::OwnerTransactions { user_id, kind } => {
            commands::owner_transactions(env, &user_id, kind).await
        }
        Commands::H2h { category } => commands::h2h(env, category).await,
        Commands::Owners {
            category,
            sort,
            direction,
            owner,
        } => {
            let sort = SortState::with_direction(sort, direction);
            commands::owners(env, category, sort, owner.as_deref()).await
        }
        Commands::Players {
            view,
            match_type,
            roster_type,
            position,
            limit,
        } => {
            let query = PlayerRecordQuery {
                view,
                match_type,
                roster_type,
                position,
                limit: limit.unwrap_or(env.display.player_records_limit),
            };
            commands::players(env, &query).await
        }
        Commands::Rookies {
            view,
            match_type,
            roster_type,
            position,
            limit,
        } => {
            let query = RookieRecordQuery(PlayerRecordQuery {
                view,
                match_type,
                roster_type,
                position,
                limit: limit.unwrap_or(env.display.player_records_limit),
            });
            commands::rookies(env, &query).await
        }
        Commands::Taxi => commands::taxi(env).await,
        Commands::History { season } => commands::history(env, season).await,
        Commands::Seasons => commands::seasons(env).await,
        Commands::Sync => commands::sync(env).await,
        Commands::Dashboard => commands::dashboard(env).await,
    }
}

/// Initialize tracing to log to a file (stdout carries the command output).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("dynasty.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dynasty=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
