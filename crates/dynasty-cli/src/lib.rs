// Command implementations and output rendering for the `dynasty` binary.

pub mod commands;
pub mod render;
