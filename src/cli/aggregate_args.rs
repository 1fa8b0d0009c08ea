use crate::aggregate::{SampleFile, UnmatchedPolicy};
use crate::error::CountError;
use crate::matrix::OutputFormat;
use crate::utils::parse_sample_arg;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

const DEFAULT_OUTPUT: &str = "counts-aggregated.tsv";

fn parse_output_format(s: &str) -> Result<OutputFormat, CountError> {
    s.parse()
}

#[derive(Parser, Debug)]
#[command(version, about, override_help = AGGREGATE_HELP)]
pub struct AggregateArgs {
    #[arg(short = 'l', long = "library")]
    pub library: PathBuf,

    #[arg(short = 's', long = "sample", required = true, num_args = 1.., value_parser = parse_sample_arg)]
    pub samples: Vec<SampleFile>,

    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    #[arg(short = 'f', long = "format", default_value = "table", value_parser = parse_output_format)]
    pub format: OutputFormat,

    #[arg(short = 'u', long = "unmatched", value_enum, default_value_t = UnmatchedPolicy::Warn)]
    pub unmatched: UnmatchedPolicy,

    #[arg(long = "no-legacy-artifacts")]
    pub no_legacy_artifacts: bool,

    #[arg(short = 'n', long = "normalize")]
    pub normalize: bool,

    #[arg(short = 'N', long = "normalized-output", requires = "normalize")]
    pub normalized_output: Option<PathBuf>,

    #[arg(short = 'q', long = "progress", default_value_t = false)]
    pub progress: bool,
}

impl AggregateArgs {
    pub fn validate(&self) -> Result<(), CountError> {
        if !self.library.is_file() {
            return Err(CountError::config(format!(
                "guide library {:?} does not exist",
                self.library
            )));
        }

        if self.normalized_output.as_ref() == Some(&self.output) {
            return Err(CountError::config(
                "normalized output must be written to a different file than the aggregated output",
            ));
        }

        Ok(())
    }
}

impl std::fmt::Display for AggregateArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}: {:?}\n\
            {}: {}\n\
            {}: {:?}\n\
            {}: {}\n\
            {}: {:?}\n\
            {}: {}\n\
            {}: {}\n\n",
            "Library".purple(),
            self.library,
            "Samples".purple(),
            self.samples.len(),
            "Output".purple(),
            self.output,
            "Format".purple(),
            self.format,
            "Unmatched keys".purple(),
            self.unmatched,
            "Strip list artifacts".purple(),
            !self.no_legacy_artifacts,
            "Normalize".purple(),
            self.normalize,
        )?;

        Ok(())
    }
}

const AGGREGATE_HELP: &str = r#"

guidecount aggregate: merge per-sample guide counts into one count matrix

usage:
    guidecount aggregate -l <LIBRARY> -s <COUNTS> [-s <COUNTS> ...] [OPTIONS] -o [OUTPUT]

    Every guide of the library gets exactly one row, in library order. Guides missing from a
    sample's count file are given a count of 0. Sample columns are sorted by sample name.

arguments:

    [[required]]:
    -l, --library: guide library. Either a list of GENE_IDENTIFIER keys (one per line or
    comma separated), or a FASTA file (.fa, .fasta, .fna) whose record names are the keys.

    -s, --sample: raw count file of one sample, as NAME=PATH or PATH. Without a NAME, the
    file name minus its extension(s) is used. Repeat for every sample.
    Each line holds a read count and a guide key, e.g. "12<TAB>A1BG_sgA1BG_1".

    [[output]]:
    -o, --output: aggregated count matrix (TSV) [counts-aggregated.tsv]

    -f, --format: label columns of the matrix. Choose from:
        - table: gene, identifier
        - bagel: SEQID, GENE
        - mageck: sgRNA, Gene

    -n, --normalize: also write a depth-normalized copy of the matrix.
    -N, --normalized-output: path of the normalized matrix [<output>_normalised.tsv]

    [[input handling]]:
    -u, --unmatched: keys absent from the library are dropped. Choose from:
        - warn: log every dropped key
        - drop: only report how many were dropped

    --no-legacy-artifacts: do not strip [ ] ' " , characters from count lines before parsing.

    [[misc]]
    -q, --progress: show progress bar, prints to standard error.

"#;
