use anyhow::Error;

/// One subcommand run: built from its parsed arguments, then consumed by `process`.
pub trait FileProcess {
    type Args;

    fn init_from_args(args: &Self::Args) -> Result<Self, Error>
    where
        Self: Sized;

    fn process(self) -> Result<(), Error>;
}
