pub mod count_reader;
pub mod file_io;
pub mod library_reader;
pub mod matrix_io;

pub use crate::io::{
    count_reader::{read_counts, CountParser},
    file_io::{open_input, write_atomically},
    library_reader::{guide_names, read_library_keys},
    matrix_io::{read_matrix, write_matrix},
};
