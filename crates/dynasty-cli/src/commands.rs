// One async function per CLI command.
//
// Each command fetches through `LeagueApi`, hands the payload to the view
// builders in `dynasty_views`, and flattens the result into `Table`s. Nothing
// here writes to stdout, so commands can be driven by a fake API in tests.

use std::sync::Arc;

use anyhow::{anyhow, Context};
use dynasty_core::api::{ApiError, LeagueApi};
use dynasty_core::config::DisplayConfig;
use dynasty_core::loader::{spawn_load, KeyedLoader, ViewState};
use dynasty_core::model::{
    CategoryRecord, DraftDetail, EmptyResult, OwnerDetail, OwnersResponse, PlayerRecordQuery,
    PlayerRecordsResponse, RecordCategory, RookieRecordQuery, TransactionType, TransactionsResponse,
};
use dynasty_views::draft_board::{build_draft_board, BoardCell};
use dynasty_views::h2h::{build_h2h_grid, rank_vs_median, H2HCell};
use dynasty_views::history::{history_row, history_rows, trophy_shelf, HistoryRow};
use dynasty_views::owners::{rank_owners, season_breakdown, shows_vs_median, OwnerSortField};
use dynasty_views::player_records::{decode_player_records, PlayerRecordRows};
use dynasty_views::sort::SortState;
use dynasty_views::standings::group_by_division;
use dynasty_views::taxi::build_taxi_squads;
use dynasty_views::transactions::{
    build_transaction_view, sort_summary, Assets, SummarySortField, TransactionBody,
    TransactionView,
};
use futures_util::future::join4;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::render::Table;

/// Everything a command needs besides its own arguments.
#[derive(Clone)]
pub struct CommandEnv {
    pub api: Arc<dyn LeagueApi>,
    pub display: DisplayConfig,
}

impl CommandEnv {
    pub fn new(api: Arc<dyn LeagueApi>, display: DisplayConfig) -> Self {
        Self { api, display }
    }
}

/// A finished fetch: data to render, or a table explaining its absence.
enum Fetched<T> {
    Data(T),
    Nothing(Table),
}

/// Turn a settled view state into data. `Empty` becomes a note table and
/// `Failed` becomes an error carrying the raw message.
fn settle<T>(state: ViewState<T>, title: &str, empty_note: &str) -> anyhow::Result<Fetched<T>> {
    match state {
        ViewState::Loaded(data) => Ok(Fetched::Data(data)),
        ViewState::Empty => Ok(Fetched::Nothing(Table::note(title, empty_note))),
        ViewState::Failed(message) => Err(anyhow!("{title}: {message}")),
        ViewState::Idle | ViewState::Loading => Err(anyhow!("{title}: load did not complete")),
    }
}

fn fetched<T: EmptyResult>(
    result: Result<T, ApiError>,
    title: &str,
    empty_note: &str,
) -> anyhow::Result<Fetched<T>> {
    settle(ViewState::from_result(result), title, empty_note)
}

/// Like [`fetched`], but a failure becomes an error note in place of the
/// view, so views sharing a command render independently.
fn fetched_or_note<T: EmptyResult>(
    result: Result<T, ApiError>,
    title: &str,
    empty_note: &str,
) -> Fetched<T> {
    match result {
        Ok(data) if data.is_empty_result() => Fetched::Nothing(Table::note(title, empty_note)),
        Ok(data) => Fetched::Data(data),
        Err(e) => {
            warn!("{} unavailable: {}", title, e);
            Fetched::Nothing(Table::note(title, format!("Error: {e}")))
        }
    }
}

fn header_with_arrow(label: &str, active: bool, sort_arrow: &str) -> String {
    if active {
        format!("{label} {sort_arrow}")
    } else {
        label.to_string()
    }
}

fn record_cells(record: &CategoryRecord) -> Vec<String> {
    vec![
        record.wins.to_string(),
        record.losses.to_string(),
        record.ties.to_string(),
    ]
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

pub async fn standings(env: &CommandEnv, season: Option<i32>) -> anyhow::Result<Vec<Table>> {
    let response = match fetched(env.api.standings(season).await, "Standings", "No standings available")? {
        Fetched::Data(response) => response,
        Fetched::Nothing(table) => return Ok(vec![table]),
    };

    let tables = group_by_division(&response)
        .into_iter()
        .map(|group| {
            let mut table = Table::new(["#", "Team", "Owner", "W", "L", "T", "PF", "PA", "Win%"])
                .titled(format!("{} Standings: {}", response.season, group.label));
            for (i, team) in group.teams.iter().enumerate() {
                table.push(vec![
                    (i + 1).to_string(),
                    team.team_name.clone().unwrap_or_else(|| team.owner_label().to_string()),
                    team.owner_label().to_string(),
                    team.wins.to_string(),
                    team.losses.to_string(),
                    team.ties.to_string(),
                    format!("{:.2}", team.points_for),
                    format!("{:.2}", team.points_against),
                    format!("{:.3}", team.win_percentage),
                ]);
            }
            table
        })
        .collect();
    Ok(tables)
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

pub async fn drafts(env: &CommandEnv) -> anyhow::Result<Vec<Table>> {
    let list = match fetched(env.api.drafts().await, "Drafts", "No drafts found")? {
        Fetched::Data(list) => list,
        Fetched::Nothing(table) => return Ok(vec![table]),
    };

    let mut table = Table::new(["Year", "Type", "Status", "Rounds", "Picks"]).titled("Drafts");
    for draft in &list.drafts {
        table.push(vec![
            draft.year.to_string(),
            draft.draft_type.clone().unwrap_or_default(),
            draft.status.clone().unwrap_or_default(),
            draft.rounds.map(|r| r.to_string()).unwrap_or_default(),
            draft.total_picks.map(|p| p.to_string()).unwrap_or_default(),
        ]);
    }
    Ok(vec![table])
}

/// Load one draft through a `KeyedLoader`, the same path an interactive
/// view takes when the selected year changes.
async fn load_draft(api: Arc<dyn LeagueApi>, year: i32) -> ViewState<DraftDetail> {
    let mut loader: KeyedLoader<i32, DraftDetail> = KeyedLoader::new();
    let (tx, mut rx) = mpsc::channel(1);
    let ticket = loader.begin(year);
    spawn_load(ticket, tx, async move { api.draft(year).await });

    while let Some(event) = rx.recv().await {
        if loader.apply(event) {
            break;
        }
    }
    loader.state().clone()
}

/// The draft board for `year`, or for the most recent draft when no year
/// is given. The detail request waits for the draft list in that case.
pub async fn draft(env: &CommandEnv, year: Option<i32>) -> anyhow::Result<Vec<Table>> {
    let year = match year {
        Some(year) => year,
        None => {
            let list = env.api.drafts().await.context("failed to list drafts")?;
            match list.latest_year() {
                Some(year) => year,
                None => return Ok(vec![Table::note("Draft Board", "No drafts found")]),
            }
        }
    };
    info!("Loading draft board for {}", year);

    let title = format!("{year} Draft Board");
    let detail = match settle(load_draft(Arc::clone(&env.api), year).await, &title, "No picks recorded")? {
        Fetched::Data(detail) => detail,
        Fetched::Nothing(table) => return Ok(vec![table]),
    };

    let board = build_draft_board(&detail);
    if board.dropped_picks > 0 {
        warn!("{}: {} pick(s) did not fit the board", title, board.dropped_picks);
    }
    if board.is_empty() {
        return Ok(vec![Table::note(title, "No picks recorded")]);
    }

    let headers = std::iter::once("Round".to_string()).chain(board.slots.iter().map(|s| s.label()));
    let mut grid = Table::new(headers).titled(title);
    for round in &board.rounds {
        let mut row = vec![round.round.to_string()];
        row.extend(round.cells.iter().map(|cell| match cell {
            BoardCell::Empty { .. } => "-".to_string(),
            BoardCell::Pick { pick, traded } => {
                let mut label = pick.player_label().unwrap_or("?").to_string();
                if let Some(position) = &pick.position {
                    label.push_str(&format!(" ({position})"));
                }
                if *traded {
                    label.push_str(" [T]");
                }
                label
            }
        }));
        grid.push(row);
    }

    let mut traded = Table::new(["Pick", "Player", "Made By"]).titled("Traded Picks");
    for pick in board.traded_picks() {
        traded.push(vec![
            format!("{}.{:02}", pick.round, pick.pick_in_round),
            pick.player_label().unwrap_or("?").to_string(),
            pick.owner_display_name
                .clone()
                .unwrap_or_else(|| format!("Roster {}", pick.roster_id)),
        ]);
    }

    let mut tables = vec![grid];
    if !traded.is_empty() {
        tables.push(traded);
    }
    Ok(tables)
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

fn asset_list(assets: &Assets<'_>) -> String {
    assets
        .players
        .iter()
        .map(|p| p.label())
        .chain(assets.picks.iter().map(|p| p.label()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-line description of a transaction body.
pub fn describe_transaction(view: &TransactionView<'_>) -> String {
    let mut text = match &view.body {
        TransactionBody::Trade { parties, unattributed } => {
            let mut blocks: Vec<String> = parties
                .iter()
                .map(|party| {
                    let mut block = format!("{} gets {}", party.label, or_nothing(asset_list(&party.received)));
                    if !party.gave_up.is_empty() {
                        block.push_str(&format!(", gives {}", asset_list(&party.gave_up)));
                    }
                    block
                })
                .collect();
            if *unattributed > 0 {
                blocks.push(format!("{unattributed} unattributed"));
            }
            blocks.join("; ")
        }
        TransactionBody::Move { owners, adds, drops } => {
            let moves: Vec<String> = adds
                .iter()
                .map(|p| format!("+{}", p.label()))
                .chain(drops.iter().map(|p| format!("-{}", p.label())))
                .collect();
            match owners.first() {
                Some(owner) => format!("{}: {}", owner.label(), moves.join(", ")),
                None => moves.join(", "),
            }
        }
    };
    if let Some(reason) = view.failure_reason {
        text.push_str(&format!(" (failed: {reason})"));
    } else if view.header.failed {
        text.push_str(" (failed)");
    }
    text
}

fn or_nothing(list: String) -> String {
    if list.is_empty() {
        "nothing".to_string()
    } else {
        list
    }
}

fn transactions_table(response: &TransactionsResponse, title: String, date_format: &str) -> Table {
    let mut table = Table::new(["Date", "Type", "Week", "Details"]).titled(title);
    for txn in &response.transactions {
        let view = build_transaction_view(txn);
        let kind = match view.header.waiver_bid {
            Some(bid) => format!("{} (${bid})", view.header.kind_label),
            None => view.header.kind_label.to_string(),
        };
        table.push(vec![
            view.header.date_label(date_format),
            kind,
            view.header.week.map(|w| w.to_string()).unwrap_or_default(),
            describe_transaction(&view),
        ]);
    }
    table
}

/// Most recent transactions. `limit` falls back to the configured default.
pub async fn transactions(env: &CommandEnv, limit: Option<u32>) -> anyhow::Result<Vec<Table>> {
    let limit = limit.unwrap_or(env.display.recent_limit);
    let title = "Recent Transactions";
    let response = match fetched(env.api.recent_transactions(limit).await, title, "No transactions found")? {
        Fetched::Data(response) => response,
        Fetched::Nothing(table) => return Ok(vec![table]),
    };
    Ok(vec![transactions_table(&response, title.to_string(), &env.display.date_format)])
}

pub async fn owner_transactions(
    env: &CommandEnv,
    user_id: &str,
    kind: Option<TransactionType>,
) -> anyhow::Result<Vec<Table>> {
    let title = match kind {
        Some(kind) => format!("{} Transactions: {user_id}", kind.label()),
        None => format!("Transactions: {user_id}"),
    };
    let result = env.api.transactions_by_owner(user_id, kind).await;
    let response = match fetched(result, &title, "No transactions found")? {
        Fetched::Data(response) => response,
        Fetched::Nothing(table) => return Ok(vec![table]),
    };
    Ok(vec![transactions_table(&response, title, &env.display.date_format)])
}

pub async fn summary(env: &CommandEnv, sort: SortState<SummarySortField>) -> anyhow::Result<Vec<Table>> {
    let title = "Transaction Summary";
    let response = match fetched(env.api.transaction_summary().await, title, "No transactions found")? {
        Fetched::Data(response) => response,
        Fetched::Nothing(table) => return Ok(vec![table]),
    };

    let arrow = sort.direction.arrow();
    let headers = SummarySortField::ALL
        .iter()
        .map(|&field| header_with_arrow(field.label(), sort.is_active(field), arrow));
    let mut table = Table::new(headers).titled(title);
    for entry in sort_summary(&response.summary, &sort) {
        table.push(vec![
            entry.label().to_string(),
            entry.waiver_adds.to_string(),
            entry.free_agent_adds.to_string(),
            entry.trades.to_string(),
            entry.total.to_string(),
        ]);
    }
    Ok(vec![table])
}

// ---------------------------------------------------------------------------
// Head to head
// ---------------------------------------------------------------------------

pub async fn h2h(env: &CommandEnv, category: RecordCategory) -> anyhow::Result<Vec<Table>> {
    let title = format!("Head to Head: {}", category.label());
    let result = env.api.head_to_head_matrix(category).await;
    let response = match fetched(result, &title, "No matchups recorded")? {
        Fetched::Data(response) => response,
        Fetched::Nothing(table) => return Ok(vec![table]),
    };

    let grid = build_h2h_grid(&response);
    let headers = std::iter::once("Owner".to_string())
        .chain(grid.owners.iter().map(|o| o.label().to_string()))
        .chain(std::iter::once("Total".to_string()));
    let mut matrix = Table::new(headers).titled(title);
    for (i, (owner, cells)) in grid.owners.iter().zip(&grid.rows).enumerate() {
        let mut row = vec![owner.label().to_string()];
        row.extend(cells.iter().map(|cell| match cell {
            H2HCell::NotApplicable => "x".to_string(),
            H2HCell::Record(record) => record.to_string(),
        }));
        row.push(grid.row_total(i).to_string());
        matrix.push(row);
    }

    let mut tables = vec![matrix];
    if !response.median_records.is_empty() {
        let mut median = Table::new(["#", "Owner", "Record", "Win%"]).titled("Record vs Median");
        for (i, row) in rank_vs_median(&response).iter().enumerate() {
            median.push(vec![
                (i + 1).to_string(),
                row.owner.label().to_string(),
                row.record.to_string(),
                format!("{:.3}", row.win_pct),
            ]);
        }
        tables.push(median);
    }
    Ok(tables)
}

// ---------------------------------------------------------------------------
// Owners
// ---------------------------------------------------------------------------

fn trophy_text(earned: &[(&'static str, u32)]) -> String {
    earned
        .iter()
        .map(|(label, count)| format!("{label} x{count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn career_table(
    response: &OwnersResponse,
    category: RecordCategory,
    sort: &SortState<OwnerSortField>,
    title: String,
) -> Table {
    let arrow = sort.direction.arrow();
    let headers = OwnerSortField::ALL
        .iter()
        .map(|&field| header_with_arrow(field.label(), sort.is_active(field), arrow))
        .chain(std::iter::once("Trophies".to_string()));
    let mut table = Table::new(headers).titled(title);
    for owner in rank_owners(&response.owners, category, sort) {
        let record = owner.record(category);
        let mut row = vec![owner.name().to_string(), owner.seasons_played.to_string()];
        row.extend(record_cells(record));
        row.push(format!("{:.3}", record.win_percentage));
        row.push(format!("{:.2}", record.points_for));
        row.push(format!("{:.2}", record.points_against));
        row.push(trophy_text(&owner.trophies.earned()));
        table.push(row);
    }
    table
}

fn seasons_table(detail: &OwnerDetail, category: RecordCategory) -> Table {
    let with_median = shows_vs_median(category);
    let mut headers = vec!["Year", "Team", "Division", "W", "L", "T", "PF", "PA"];
    if with_median {
        headers.push("vs Median");
    }
    let mut table = Table::new(headers).titled(format!("Seasons: {}", detail.name()));
    for season in season_breakdown(detail, category) {
        let mut row = vec![
            season.year.to_string(),
            season.team_name.unwrap_or_default().to_string(),
            season.division.clone(),
        ];
        row.extend(record_cells(season.record));
        row.push(format!("{:.2}", season.record.points_for));
        row.push(format!("{:.2}", season.record.points_against));
        if let Some(median) = season.vs_median {
            row.push(median.to_string());
        }
        table.push(row);
    }
    table
}

/// Career table ranked by `sort`, plus one owner's seasons when `user_id`
/// is given. Both requests run concurrently and a failure in one only
/// replaces that table with an error note.
pub async fn owners(
    env: &CommandEnv,
    category: RecordCategory,
    sort: SortState<OwnerSortField>,
    user_id: Option<&str>,
) -> anyhow::Result<Vec<Table>> {
    let title = format!("Owners: {}", category.label());
    let detail_fetch = async {
        match user_id {
            Some(id) => Some((id, env.api.owner_detail(id).await)),
            None => None,
        }
    };
    let (owners_result, detail_result) = tokio::join!(env.api.owners(), detail_fetch);

    let mut tables = Vec::new();
    match fetched_or_note(owners_result, &title, "No owners found") {
        Fetched::Data(response) => tables.push(career_table(&response, category, &sort, title)),
        Fetched::Nothing(table) => tables.push(table),
    }

    if let Some((id, result)) = detail_result {
        match fetched_or_note(result, &format!("Seasons: {id}"), "No seasons recorded") {
            Fetched::Data(detail) => tables.push(seasons_table(&detail, category)),
            Fetched::Nothing(table) => tables.push(table),
        }
    }
    Ok(tables)
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

fn query_label(kind: &str, query: &PlayerRecordQuery) -> String {
    format!(
        "{kind}: {} / {} / {}",
        query.view.as_str(),
        query.match_type.as_str(),
        query.roster_type.as_str()
    )
}

/// Render a records payload with the columns of its view.
fn records_table(response: &PlayerRecordsResponse, title: String) -> Table {
    let owner = |name: &Option<String>| name.clone().unwrap_or_default();
    match decode_player_records(response) {
        PlayerRecordRows::Game(rows) => {
            let mut table = Table::new(["#", "Player", "Pos", "Points", "Season", "Week", "Owner"]).titled(title);
            for r in rows {
                table.push(vec![
                    r.rank.to_string(),
                    r.player_name,
                    r.position.unwrap_or_default(),
                    format!("{:.2}", r.points),
                    r.season.to_string(),
                    r.week.to_string(),
                    owner(&r.owner_name),
                ]);
            }
            table
        }
        PlayerRecordRows::Season(rows) => {
            let mut table =
                Table::new(["#", "Player", "Pos", "Points", "Games", "Avg", "Season", "Owner"]).titled(title);
            for r in rows {
                table.push(vec![
                    r.rank.to_string(),
                    r.player_name,
                    r.position.unwrap_or_default(),
                    format!("{:.2}", r.total_points),
                    r.games_played.to_string(),
                    format!("{:.2}", r.avg_points),
                    r.season.to_string(),
                    owner(&r.owner_name),
                ]);
            }
            table
        }
        PlayerRecordRows::Career(rows) => {
            let mut table =
                Table::new(["#", "Player", "Pos", "Points", "Games", "Avg", "Seasons", "Owner"]).titled(title);
            for r in rows {
                table.push(vec![
                    r.rank.to_string(),
                    r.player_name,
                    r.position.unwrap_or_default(),
                    format!("{:.2}", r.total_points),
                    r.games_played.to_string(),
                    format!("{:.2}", r.avg_points),
                    r.seasons_played.to_string(),
                    owner(&r.owner_name),
                ]);
            }
            table
        }
    }
}

pub async fn players(env: &CommandEnv, query: &PlayerRecordQuery) -> anyhow::Result<Vec<Table>> {
    let title = query_label("Player Records", query);
    let response = match fetched(env.api.player_records(query).await, &title, "No records found")? {
        Fetched::Data(response) => response,
        Fetched::Nothing(table) => return Ok(vec![table]),
    };
    Ok(vec![records_table(&response, title)])
}

/// Best performances by players in their first season.
pub async fn rookies(env: &CommandEnv, query: &RookieRecordQuery) -> anyhow::Result<Vec<Table>> {
    let title = query_label("Rookie Records", &query.0);
    let response = match fetched(env.api.rookie_records(query).await, &title, "No rookie records found")? {
        Fetched::Data(response) => response,
        Fetched::Nothing(table) => return Ok(vec![table]),
    };
    Ok(vec![records_table(&response, title)])
}

// ---------------------------------------------------------------------------
// Taxi squads
// ---------------------------------------------------------------------------

pub async fn taxi(env: &CommandEnv) -> anyhow::Result<Vec<Table>> {
    let response = match fetched(env.api.taxi_squads().await, "Taxi Squads", "No taxi squads found")? {
        Fetched::Data(response) => response,
        Fetched::Nothing(table) => return Ok(vec![table]),
    };

    let tables = build_taxi_squads(&response)
        .into_iter()
        .map(|squad| {
            let title = format!("Taxi Squad: {}", squad.label());
            if squad.players.is_empty() {
                return Table::note(title, "No taxi players");
            }
            let mut table = Table::new(["Player", "Pos", "Team"]).titled(title);
            for player in &squad.players {
                table.push(vec![
                    player.full_name.clone(),
                    player.position.clone().unwrap_or_default(),
                    player.team.clone().unwrap_or_default(),
                ]);
            }
            table
        })
        .collect();
    Ok(tables)
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

fn history_table(rows: &[HistoryRow]) -> Table {
    let mut table = Table::new(["Year", "Champion", "Division Winners", "Consolation"]).titled("League History");
    for row in rows {
        table.push(vec![
            row.year.to_string(),
            row.champion.clone(),
            row.division_winners.join("; "),
            row.consolation.clone(),
        ]);
    }
    table
}

/// Award winners per season plus the career trophy shelf. A failure to load
/// owners only costs the shelf.
pub async fn history(env: &CommandEnv, season: Option<i32>) -> anyhow::Result<Vec<Table>> {
    if let Some(season) = season {
        let history = env
            .api
            .season_history(season)
            .await
            .with_context(|| format!("failed to load {season} history"))?;
        return Ok(vec![history_table(&[history_row(&history)])]);
    }

    let (history_result, owners_result) = tokio::join!(env.api.league_history(), env.api.owners());
    let mut tables = match fetched(history_result, "League History", "No completed seasons")? {
        Fetched::Data(response) => vec![history_table(&history_rows(&response))],
        Fetched::Nothing(table) => vec![table],
    };

    let shelf = match owners_result {
        Ok(response) => {
            let mut table = Table::new(["Owner", "Trophies"]).titled("Trophy Shelf");
            for (owner, earned) in trophy_shelf(&response.owners) {
                table.push(vec![owner.name().to_string(), trophy_text(&earned)]);
            }
            table.note = Some("No trophies awarded".to_string());
            table
        }
        Err(e) => {
            warn!("Trophy shelf unavailable: {}", e);
            Table::note("Trophy Shelf", format!("Error: {e}"))
        }
    };
    tables.push(shelf);
    Ok(tables)
}

pub async fn seasons(env: &CommandEnv) -> anyhow::Result<Vec<Table>> {
    let response = match fetched(env.api.seasons().await, "Seasons", "No seasons found")? {
        Fetched::Data(response) => response,
        Fetched::Nothing(table) => return Ok(vec![table]),
    };
    let mut table = Table::new(["Season"]).titled("Seasons");
    for season in &response.seasons {
        table.push(vec![season.to_string()]);
    }
    Ok(vec![table])
}

pub async fn sync(env: &CommandEnv) -> anyhow::Result<Vec<Table>> {
    let response = env.api.sync_league().await.context("league sync failed")?;
    info!("League sync requested: {:?}", response.status);
    let mut table = Table::new(["Status", "Message"]).titled("League Sync");
    table.push(vec![
        response.status.unwrap_or_else(|| "ok".to_string()),
        response.message.unwrap_or_default(),
    ]);
    Ok(vec![table])
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Standings, recent transactions, summary and the regular-season matrix,
/// fetched concurrently. A failing section is replaced by an error note and
/// the others still render.
pub async fn dashboard(env: &CommandEnv) -> anyhow::Result<Vec<Table>> {
    let (standings_result, recent_result, summary_result, matrix_result) = join4(
        standings(env, None),
        transactions(env, None),
        summary(env, SortState::new(SummarySortField::default())),
        h2h(env, RecordCategory::RegularSeason),
    )
    .await;

    let sections = [
        ("Standings", standings_result),
        ("Recent Transactions", recent_result),
        ("Transaction Summary", summary_result),
        ("Head to Head", matrix_result),
    ];
    let mut tables = Vec::new();
    for (title, result) in sections {
        match result {
            Ok(section) => tables.extend(section),
            Err(e) => {
                warn!("Dashboard section {} failed: {:#}", title, e);
                tables.push(Table::note(title, format!("Error: {e:#}")));
            }
        }
    }
    Ok(tables)
}
