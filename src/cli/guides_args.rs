use crate::error::CountError;
use crate::utils::is_fasta;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(version, about, override_help = GUIDES_HELP)]
pub struct GuidesArgs {
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

impl GuidesArgs {
    pub fn validate(&self) -> Result<(), CountError> {
        if !self.input.is_file() {
            return Err(CountError::config(format!(
                "library {:?} does not exist",
                self.input
            )));
        }

        if !is_fasta(&self.input) {
            return Err(CountError::config(format!(
                "library {:?} is not a FASTA file (.fa, .fasta, .fna)",
                self.input
            )));
        }

        Ok(())
    }
}

const GUIDES_HELP: &str = r#"

guidecount guides: list the guide names of a FASTA CRISPR library

usage:
    guidecount guides -i <LIBRARY.fasta> -o <OUTPUT>

    Writes one guide name per line, in library order. The list can be passed to
    guidecount aggregate with -l.

"#;
