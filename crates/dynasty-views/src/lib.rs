// View-model builders.
//
// Every function here is a pure transformation from an already-fetched API
// payload to the structure one page renders. Nothing in this crate performs
// I/O; data arrives through `dynasty_core::api::LeagueApi` at the call site.

pub mod draft_board;
pub mod h2h;
pub mod history;
pub mod owners;
pub mod player_records;
pub mod sort;
pub mod standings;
pub mod taxi;
pub mod transactions;
