mod cli;
mod clone;
mod commands;
mod config;
mod error;
mod gist;
mod manifest;
mod open;
mod publish;
mod scaffold;
mod shell;
mod utils;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{cli::Cli, utils::env_opt_string};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = commands::run(cli) {
        eprintln!("[error] {:#}", err);
        std::process::exit(1);
    }
}

/// `--verbose` 强制 debug；否则使用 RUST_LOG，未设置或无法解析时为 warn
fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, env_opt_string("RUST_LOG").as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    rust_log
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}
