use crate::error::{CountError, CountResult};
use crate::library::{GuideRecord, Library};
use smol_str::SmolStr;
use std::fmt;
use std::str::FromStr;

/// Label column layout of a written count matrix, chosen by the downstream tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `gene`, `identifier`
    #[default]
    Table,
    /// `SEQID`, `GENE`, as read by BAGEL
    Bagel,
    /// `sgRNA` (full guide key), `Gene`, as read by MAGeCK
    Mageck,
}

impl OutputFormat {
    pub fn label_headers(&self) -> [&'static str; 2] {
        match self {
            OutputFormat::Table => ["gene", "identifier"],
            OutputFormat::Bagel => ["SEQID", "GENE"],
            OutputFormat::Mageck => ["sgRNA", "Gene"],
        }
    }

    pub fn labels(&self, guide: &GuideRecord) -> Vec<SmolStr> {
        match self {
            OutputFormat::Table => vec![guide.gene.clone(), guide.sequence_id.clone()],
            OutputFormat::Bagel => vec![guide.sequence_id.clone(), guide.gene.clone()],
            OutputFormat::Mageck => vec![guide.raw_key.clone(), guide.gene.clone()],
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" | "tsv" => Ok(OutputFormat::Table),
            "bagel" => Ok(OutputFormat::Bagel),
            "mageck" => Ok(OutputFormat::Mageck),
            other => Err(CountError::config(format!(
                "unsupported output format '{other}'; choose from table, bagel, mageck"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Bagel => write!(f, "bagel"),
            OutputFormat::Mageck => write!(f, "mageck"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    pub labels: Vec<SmolStr>,
    pub counts: Vec<u64>,
}

/// Guide-by-sample count table. Rows are addressed by library index; every row holds one count
/// per sample, in the order of `samples`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMatrix {
    pub label_headers: Vec<String>,
    pub samples: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

impl CountMatrix {
    /// One zero-filled row per library guide, in library order.
    pub fn zeroed(library: &Library, samples: Vec<String>, format: OutputFormat) -> Self {
        let n_samples = samples.len();
        let rows = library
            .guides()
            .map(|guide| MatrixRow {
                labels: format.labels(guide),
                counts: vec![0; n_samples],
            })
            .collect();

        CountMatrix {
            label_headers: format.label_headers().iter().map(|h| h.to_string()).collect(),
            samples,
            rows,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn n_columns(&self) -> usize {
        self.label_headers.len() + self.samples.len()
    }

    pub fn column(&self, sample_idx: usize) -> impl Iterator<Item = u64> + '_ {
        self.rows.iter().map(move |row| row.counts[sample_idx])
    }

    /// Total reads of one sample, or `None` if it does not fit in a `u64`.
    pub fn column_sum(&self, sample_idx: usize) -> Option<u64> {
        self.column(sample_idx)
            .try_fold(0u64, |acc, c| acc.checked_add(c))
    }

    pub fn column_sums(&self) -> CountResult<Vec<u64>> {
        (0..self.n_samples())
            .map(|j| {
                self.column_sum(j).ok_or_else(|| CountError::Computation {
                    sample: self.samples[j].clone(),
                    reason: format!("total read count exceeds {}", u64::MAX),
                })
            })
            .collect()
    }

    pub fn header(&self) -> impl Iterator<Item = &str> {
        self.label_headers
            .iter()
            .chain(self.samples.iter())
            .map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_matrix_shape() {
        let lib = Library::from_keys("lib", ["A_1", "A_2", "B_1"]).unwrap();
        let m = CountMatrix::zeroed(&lib, vec!["s1".into(), "s2".into()], OutputFormat::Table);

        assert_eq!(m.n_rows(), 3);
        assert_eq!(m.n_columns(), 4);
        assert_eq!(m.column_sums().unwrap(), vec![0, 0]);
        assert_eq!(
            m.header().collect::<Vec<_>>(),
            vec!["gene", "identifier", "s1", "s2"]
        );
    }

    #[test]
    fn test_column_sum_overflow() {
        let lib = Library::from_keys("lib", ["A_1", "A_2"]).unwrap();
        let mut m = CountMatrix::zeroed(&lib, vec!["s1".into(), "s2".into()], OutputFormat::Table);
        m.rows[0].counts = vec![10_000_000_000_000_000_000, 1];
        m.rows[1].counts = vec![10_000_000_000_000_000_000, 2];

        assert_eq!(m.column_sum(0), None);
        assert_eq!(m.column_sum(1), Some(3));
        match m.column_sums() {
            Err(CountError::Computation { sample, .. }) => assert_eq!(sample, "s1"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_format_labels() {
        let guide = GuideRecord::from_raw_key("A1BG_sgA1BG_1").unwrap();

        assert_eq!(OutputFormat::Table.labels(&guide), vec!["A1BG", "sgA1BG_1"]);
        assert_eq!(OutputFormat::Bagel.labels(&guide), vec!["sgA1BG_1", "A1BG"]);
        assert_eq!(OutputFormat::Mageck.labels(&guide), vec!["A1BG_sgA1BG_1", "A1BG"]);
    }

    #[test]
    fn test_unsupported_format() {
        assert_eq!("MAGeCK".parse::<OutputFormat>().unwrap(), OutputFormat::Mageck);
        assert!(matches!(
            "excel".parse::<OutputFormat>(),
            Err(CountError::Configuration(_))
        ));
    }
}
