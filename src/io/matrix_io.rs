use crate::error::{CountError, CountResult};
use crate::io::{open_input, write_atomically};
use crate::matrix::{CountMatrix, MatrixRow};
use csv::{ReaderBuilder, WriterBuilder};
use smol_str::SmolStr;
use std::path::Path;

/// Write a count matrix as TSV. The file only appears once it has been written completely.
pub fn write_matrix(matrix: &CountMatrix, outfile: &Path) -> CountResult<()> {
    write_atomically(outfile, |out| {
        let mut w = WriterBuilder::new().delimiter(b'\t').from_writer(out);

        w.write_record(matrix.header())?;

        for row in &matrix.rows {
            let fields = row
                .labels
                .iter()
                .map(|l| l.to_string())
                .chain(row.counts.iter().map(|c| c.to_string()));
            w.write_record(fields)?;
        }

        w.flush().map_err(|e| CountError::io(outfile, e))?;
        Ok(())
    })
}

/// Load a count matrix written by `write_matrix`. The first `label_columns` columns are labels;
/// every remaining column is a sample whose cells must be non-negative integers.
pub fn read_matrix(path: &Path, label_columns: usize) -> CountResult<CountMatrix> {
    let origin = path.display().to_string();
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(open_input(path)?);

    let header: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    if header.len() <= label_columns {
        return Err(CountError::config(format!(
            "{origin} has {} column(s); expected {label_columns} label column(s) followed by at least one sample column",
            header.len()
        )));
    }

    let (label_headers, samples) = header.split_at(label_columns);
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);

        if record.len() != header.len() {
            return Err(CountError::malformed(
                &origin,
                line,
                format!("expected {} fields, found {}", header.len(), record.len()),
            ));
        }

        let labels = record
            .iter()
            .take(label_columns)
            .map(SmolStr::from)
            .collect();

        let counts = record
            .iter()
            .skip(label_columns)
            .zip(samples)
            .map(|(cell, sample)| {
                cell.trim().parse::<u64>().map_err(|_| {
                    CountError::malformed(
                        &origin,
                        line,
                        format!("count '{cell}' for sample '{sample}' is not a non-negative integer"),
                    )
                })
            })
            .collect::<CountResult<Vec<u64>>>()?;

        rows.push(MatrixRow { labels, counts });
    }

    Ok(CountMatrix {
        label_headers: label_headers.to_vec(),
        samples: samples.to_vec(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{read_to_string, write};

    fn small_matrix() -> CountMatrix {
        CountMatrix {
            label_headers: vec!["gene".into(), "identifier".into()],
            samples: vec!["s1".into(), "s2".into()],
            rows: vec![
                MatrixRow {
                    labels: vec!["A".into(), "1".into()],
                    counts: vec![10, 30],
                },
                MatrixRow {
                    labels: vec!["B".into(), "1".into()],
                    counts: vec![20, 10],
                },
            ],
        }
    }

    #[test]
    fn test_write_matrix_layout() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("counts-aggregated.tsv");

        write_matrix(&small_matrix(), &out).unwrap();

        assert_eq!(
            read_to_string(&out).unwrap(),
            "gene\tidentifier\ts1\ts2\nA\t1\t10\t30\nB\t1\t20\t10\n"
        );
    }

    #[test]
    fn test_read_matrix_numeric_identifiers_stay_labels() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("counts-aggregated.tsv");
        write_matrix(&small_matrix(), &out).unwrap();

        let m = read_matrix(&out, 2).unwrap();
        assert_eq!(m, small_matrix());
    }

    #[test]
    fn test_read_matrix_rejects_bad_cell() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.tsv");
        write(&path, "gene\tidentifier\ts1\nA\t1\t4\nB\t1\t2.5\n").unwrap();

        match read_matrix(&path, 2) {
            Err(CountError::MalformedInput { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_read_matrix_without_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.tsv");
        write(&path, "gene\tidentifier\nA\t1\n").unwrap();

        assert!(matches!(
            read_matrix(&path, 2),
            Err(CountError::Configuration(_))
        ));
    }
}
