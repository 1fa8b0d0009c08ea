use crate::cli::{print_written, NormalizeArgs};
use crate::config::NormalizeConfig;
use crate::io::{read_matrix, write_matrix};
use crate::normalize::normalize;
use crate::process::file_process::FileProcess;
use anyhow::{Context, Error};
use log::info;

pub struct NormalizeProcess {
    config: NormalizeConfig,
}

impl FileProcess for NormalizeProcess {
    type Args = NormalizeArgs;

    fn init_from_args(args: &NormalizeArgs) -> Result<Self, Error> {
        args.validate()?;
        Ok(Self {
            config: NormalizeConfig::from_args(args),
        })
    }

    fn process(self) -> Result<(), Error> {
        let matrix = read_matrix(&self.config.input, self.config.label_columns)
            .with_context(|| format!("Failed to read count matrix {:?}", self.config.input))?;

        info!(
            "Read {} guides x {} samples from {:?}",
            matrix.n_rows(),
            matrix.n_samples(),
            self.config.input
        );

        let (normalized, report) = normalize(&matrix).context("Normalization failed")?;

        write_matrix(&normalized, &self.config.output)
            .with_context(|| format!("Failed to write {:?}", self.config.output))?;

        print!("{report}");
        print_written("Normalized counts", &self.config.output);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CountError;
    use std::fs::{read_to_string, write};

    #[test]
    fn test_normalize_file_with_numeric_identifiers() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("counts-aggregated.tsv");
        write(&input, "SEQID\tGENE\ts1\ts2\n1\tA\t10\t30\n2\tA\t0\t0\n1\tB\t20\t10\n").unwrap();

        let args = NormalizeArgs {
            input: input.clone(),
            output: None,
            label_columns: 2,
        };

        NormalizeProcess::init_from_args(&args)
            .and_then(|p| p.process())
            .unwrap();

        assert_eq!(
            read_to_string(dir.path().join("counts-aggregated_normalised.tsv")).unwrap(),
            "SEQID\tGENE\ts1\ts2\n1\tA\t11\t26\n2\tA\t0\t0\n1\tB\t23\t8\n"
        );
    }

    #[test]
    fn test_zero_sample_reports_computation_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("m.tsv");
        let output = dir.path().join("m_norm.tsv");
        write(&input, "gene\tidentifier\tday0\tday14\nA\t1\t5\t0\n").unwrap();

        let args = NormalizeArgs {
            input,
            output: Some(output.clone()),
            label_columns: 2,
        };

        let err = NormalizeProcess::init_from_args(&args)
            .and_then(|p| p.process())
            .unwrap_err();

        match err.downcast_ref::<CountError>() {
            Some(CountError::Computation { sample, .. }) => assert_eq!(sample, "day14"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!output.exists());
    }
}
