pub mod aggregate_process;
pub mod file_process;
pub mod guides_process;
pub mod normalize_process;

pub use crate::process::{
    aggregate_process::AggregateProcess, file_process::FileProcess,
    guides_process::GuidesProcess, normalize_process::NormalizeProcess,
};
