mod cli;
mod config;
mod convert;
mod logging;
mod plot;
mod run_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;
use teleconnect_pipeline::Engine;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Dense(args) => run_cmd::run(args, Engine::Dense),
        Command::Pixel(args) => run_cmd::run(args, Engine::PerPixel),
    }
}
