use crate::aggregate::{aggregate, order_samples};
use crate::cli::{print_written, AggregateArgs};
use crate::config::AggregateConfig;
use crate::io::write_matrix;
use crate::library::Library;
use crate::normalize::normalize;
use crate::process::file_process::FileProcess;
use crate::progbars::make_samplebar;
use anyhow::{Context, Error};
use log::info;

pub struct AggregateProcess {
    config: AggregateConfig,
    library: Library,
}

impl FileProcess for AggregateProcess {
    type Args = AggregateArgs;

    fn init_from_args(args: &AggregateArgs) -> Result<Self, Error> {
        args.validate()?;

        let mut config = AggregateConfig::from_args(args);
        // sample set problems are reported before any file is opened
        config.samples = order_samples(config.samples)?;

        let library = Library::load(&config.library)
            .with_context(|| format!("Failed to load guide library {:?}", config.library))?;

        Ok(Self { config, library })
    }

    fn process(self) -> Result<(), Error> {
        let bar = make_samplebar(self.config.progress);

        let (matrix, report) = aggregate(
            &self.library,
            self.config.samples.clone(),
            &self.config.options,
            &bar,
        )
        .context("Aggregation failed; no output written")?;

        write_matrix(&matrix, &self.config.output)
            .with_context(|| format!("Failed to write {:?}", self.config.output))?;

        info!(
            "Wrote {} guides x {} samples ({} columns) to {:?}",
            matrix.n_rows(),
            matrix.n_samples(),
            matrix.n_columns(),
            self.config.output
        );
        print!("{report}");
        print_written("Aggregated counts", &self.config.output);

        if let Some(ref normalized_output) = self.config.normalized_output {
            let (normalized, norm_report) =
                normalize(&matrix).context("Normalization failed; aggregated counts were kept")?;

            write_matrix(&normalized, normalized_output)
                .with_context(|| format!("Failed to write {:?}", normalized_output))?;

            print!("{norm_report}");
            print_written("Normalized counts", normalized_output);
        }

        Ok(())
    }
}
