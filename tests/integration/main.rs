#[path = "../common/mod.rs"]
mod common;

mod cli_run;
mod config_loading;
mod error_handling;
