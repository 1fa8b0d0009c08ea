#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use crate::cli::{print_init, Args, Command};
use crate::process::{AggregateProcess, FileProcess, GuidesProcess, NormalizeProcess};
use anyhow::{Context, Error};
use clap::Parser;
use colored::Colorize;
use log::{error, LevelFilter};
use std::process::exit;

mod aggregate;
mod cli;
mod config;
mod error;
mod io;
mod library;
mod matrix;
mod normalize;
mod process;
mod progbars;
mod report;
mod utils;

fn run<P: FileProcess>(args: &P::Args, log_file: &str) -> Result<(), Error> {
    simple_logging::log_to_file(log_file, LevelFilter::Info)
        .with_context(|| format!("Failed to create log file {log_file}"))?;

    P::init_from_args(args).and_then(|process| process.process())
}

fn main() {
    let args = Args::parse();

    let res = match &args.command {
        Command::Aggregate(a) => {
            print_init("aggregate", a);
            run::<AggregateProcess>(a, "guidecount_aggregate.log")
        }
        Command::Normalize(a) => {
            print_init("normalize", a);
            run::<NormalizeProcess>(a, "guidecount_normalize.log")
        }
        Command::Guides(a) => run::<GuidesProcess>(a, "guidecount_guides.log"),
    };

    if let Err(e) = res {
        error!("{e:#}");
        eprintln!("{}: {e:#}", "ERROR".red().bold());
        exit(1);
    }
}
