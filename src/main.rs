use clap::Parser;
use dirsort::cli::{Cli, SortOptions, report, run_cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = run_cli(&cli.path, &SortOptions::from(&cli));

    ExitCode::from(report(&result))
}
