use crate::aggregate::{AggregateOptions, SampleFile};
use crate::cli::{AggregateArgs, NormalizeArgs};
use crate::io::CountParser;
use crate::utils::gen_outfile_name;
use std::path::PathBuf;

pub const NORMALIZED_SUFFIX: &str = "normalised";

/// Everything an aggregation run reads and writes. All paths are explicit; nothing is looked up
/// in the working directory.
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    pub library: PathBuf,
    pub samples: Vec<SampleFile>,
    pub output: PathBuf,
    pub options: AggregateOptions,
    pub normalized_output: Option<PathBuf>,
    pub progress: bool,
}

impl AggregateConfig {
    pub fn from_args(args: &AggregateArgs) -> Self {
        let parser = match args.no_legacy_artifacts {
            true => CountParser::strict(),
            false => CountParser::default(),
        };

        let normalized_output = match args.normalize {
            true => Some(
                args.normalized_output
                    .clone()
                    .unwrap_or_else(|| gen_outfile_name(&args.output, NORMALIZED_SUFFIX)),
            ),
            false => None,
        };

        AggregateConfig {
            library: args.library.clone(),
            samples: args.samples.clone(),
            output: args.output.clone(),
            options: AggregateOptions {
                format: args.format,
                unmatched: args.unmatched,
                parser,
            },
            normalized_output,
            progress: args.progress,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub label_columns: usize,
}

impl NormalizeConfig {
    pub fn from_args(args: &NormalizeArgs) -> Self {
        NormalizeConfig {
            input: args.input.clone(),
            output: args
                .output
                .clone()
                .unwrap_or_else(|| gen_outfile_name(&args.input, NORMALIZED_SUFFIX)),
            label_columns: args.label_columns,
        }
    }
}
