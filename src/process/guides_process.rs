use crate::cli::{print_written, GuidesArgs};
use crate::error::CountError;
use crate::io::{guide_names, write_atomically};
use crate::process::file_process::FileProcess;
use anyhow::{Context, Error};
use log::info;
use std::io::Write;

pub struct GuidesProcess {
    args: GuidesArgs,
}

impl FileProcess for GuidesProcess {
    type Args = GuidesArgs;

    fn init_from_args(args: &GuidesArgs) -> Result<Self, Error> {
        args.validate()?;
        Ok(Self { args: args.clone() })
    }

    fn process(self) -> Result<(), Error> {
        let names = guide_names(&self.args.input)
            .with_context(|| format!("Failed to read FASTA library {:?}", self.args.input))?;

        if names.is_empty() {
            anyhow::bail!("FASTA library {:?} contains no guides", self.args.input);
        }

        write_atomically(&self.args.output, |out| {
            for (_, name) in &names {
                writeln!(out, "{name}").map_err(|e| CountError::io(&self.args.output, e))?;
            }
            Ok(())
        })?;

        info!("Wrote {} guide names to {:?}", names.len(), self.args.output);
        print_written("Guide names", &self.args.output);

        Ok(())
    }
}
