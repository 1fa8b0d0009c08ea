pub mod aggregate_args;
pub mod guides_args;
pub mod misc;
pub mod normalize_args;

pub use crate::cli::{
    aggregate_args::AggregateArgs, guides_args::GuidesArgs, misc::*,
    normalize_args::NormalizeArgs,
};
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Merge per-sample raw guide counts into one count matrix ordered by the guide library.
    Aggregate(AggregateArgs),
    /// Rescale the sample columns of a count matrix to equal read depth.
    Normalize(NormalizeArgs),
    /// Write the guide names of a FASTA library as a plain list.
    Guides(GuidesArgs),
}

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,
}
