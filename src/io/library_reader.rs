use crate::error::{CountError, CountResult};
use crate::io::open_input;
use bio::io::fasta;
use std::io::BufRead;
use std::path::Path;

fn is_token_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

/// Read every raw guide key of a delimited library list, paired with its line number.
///
/// The list may hold one key per line or several per row (CSV); every non-empty cell is a key.
pub fn read_library_keys(path: &Path) -> CountResult<Vec<(usize, String)>> {
    let reader = open_input(path)?;
    let mut keys = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CountError::io(path, e))?;

        keys.extend(
            line.split(is_token_separator)
                .map(|tok| tok.trim_matches('"'))
                .filter(|tok| !tok.is_empty())
                .map(|tok| (i + 1, tok.to_string())),
        );
    }

    Ok(keys)
}

// bio records do not carry their position, so header lines are located in a separate pass.
fn fasta_header_lines(path: &Path) -> CountResult<Vec<usize>> {
    let mut lines = Vec::new();

    for (i, line) in open_input(path)?.lines().enumerate() {
        let line = line.map_err(|e| CountError::io(path, e))?;
        if line.starts_with('>') {
            lines.push(i + 1);
        }
    }

    Ok(lines)
}

/// Guide names of a FASTA library paired with the line of their header, in file order.
pub fn guide_names(path: &Path) -> CountResult<Vec<(usize, String)>> {
    let header_lines = fasta_header_lines(path)?;
    let reader = fasta::Reader::new(open_input(path)?);
    let mut names = Vec::new();

    for (record, line) in reader.records().zip(header_lines) {
        let record = record.map_err(|e| CountError::io(path, e))?;
        names.push((line, record.id().to_string()));
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::write;

    #[test]
    fn test_read_library_keys_csv_flattened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.csv");
        write(&path, "A_1\n\"A_2\",B_1\n\n  C_1  \n").unwrap();

        let keys = read_library_keys(&path).unwrap();
        assert_eq!(
            keys,
            vec![
                (1, "A_1".to_string()),
                (2, "A_2".to_string()),
                (2, "B_1".to_string()),
                (4, "C_1".to_string()),
            ]
        );
    }

    #[test]
    fn test_guide_names_from_fasta() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.fasta");
        write(
            &path,
            ">A1BG_sgA1BG_1\nGAGACCAGCTTGCTCAGCAA\n>A1BG_sgA1BG_2\nCTGGCCAGTG\nACCCTGCTCA\n>ZZZ3_sgZZZ3_1\nAGCACTCCAGGTTTCTCCAG\n",
        )
        .unwrap();

        let names = guide_names(&path).unwrap();
        assert_eq!(
            names,
            vec![
                (1, "A1BG_sgA1BG_1".to_string()),
                (3, "A1BG_sgA1BG_2".to_string()),
                (6, "ZZZ3_sgZZZ3_1".to_string()),
            ]
        );
    }
}
