// Paramsweep - Parameter File Generator for Pathfinding Benchmarks
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

mod cli;
mod error;
mod params;
mod sweep;
mod writer;

use clap::Parser;
use std::process;

use cli::Cli;

fn main() {
    use env_logger::Env;
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .init();

    let cli = Cli::parse();
    if let Err(err) = cli.run() {
        log::error!("{:#}", err);
        process::exit(1);
    }
}
