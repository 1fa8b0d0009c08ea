use crate::error::CountError;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

const DEFAULT_LABEL_COLUMNS: usize = 2;

#[derive(Parser, Debug)]
#[command(version, about, override_help = NORMALIZE_HELP)]
pub struct NormalizeArgs {
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    #[arg(short = 'c', long = "label-columns", default_value_t = DEFAULT_LABEL_COLUMNS)]
    pub label_columns: usize,
}

impl NormalizeArgs {
    pub fn validate(&self) -> Result<(), CountError> {
        if !self.input.is_file() {
            return Err(CountError::config(format!(
                "count matrix {:?} does not exist",
                self.input
            )));
        }

        if self.output.as_ref() == Some(&self.input) {
            return Err(CountError::config(
                "normalized output must be written to a different file than the input matrix",
            ));
        }

        Ok(())
    }
}

impl std::fmt::Display for NormalizeArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}: {:?}\n\
            {}: {:?}\n\
            {}: {}\n\n",
            "Input".purple(),
            self.input,
            "Output".purple(),
            self.output,
            "Label columns".purple(),
            self.label_columns,
        )
    }
}

const NORMALIZE_HELP: &str = r#"

guidecount normalize: rescale sample columns of a count matrix to equal read depth

usage:
    guidecount normalize -i <MATRIX> [OPTIONS] -o [OUTPUT]

    Every sample is scaled so that it holds 1/N of the total reads in the matrix, N being the
    number of samples. Scaled counts are truncated to whole reads. A sample with no reads at all
    cannot be scaled and stops the run.

arguments:

    [[required]]:
    -i, --input: count matrix (TSV) as written by guidecount aggregate.

    [[optional]]:
    -o, --output: normalized matrix (TSV) [<input>_normalised.tsv]
    -c, --label-columns: number of leading non-count columns [2]

"#;
