pub mod commands;

pub use commands::{apply_serve_overrides, build_cli, handle_offline_subcommands, run_read};
