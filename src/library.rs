use crate::error::{CountError, CountResult};
use crate::io::{guide_names, read_library_keys};
use crate::utils::is_fasta;
use indexmap::IndexMap;
use log::info;
use smol_str::SmolStr;
use std::path::Path;

const KEY_SEPARATOR: char = '_';

/// One guide of the screening library, e.g. `A1BG_sgA1BG_1` splits into gene `A1BG` and
/// sequence id `sgA1BG_1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideRecord {
    pub sequence_id: SmolStr,
    pub gene: SmolStr,
    pub raw_key: SmolStr,
}

/// Split a raw guide key on its first underscore into `(gene, sequence_id)`. Either part may be
/// empty; only a key without any underscore is rejected.
pub fn parse_raw_key(raw_key: &str) -> Option<(&str, &str)> {
    raw_key.split_once(KEY_SEPARATOR)
}

impl GuideRecord {
    pub fn from_raw_key(raw_key: &str) -> Option<Self> {
        let (gene, sequence_id) = parse_raw_key(raw_key)?;
        Some(GuideRecord {
            sequence_id: SmolStr::from(sequence_id),
            gene: SmolStr::from(gene),
            raw_key: SmolStr::from(raw_key),
        })
    }
}

#[derive(Debug)]
struct LibraryEntry {
    line: usize,
    guide: GuideRecord,
}

/// The ordered, authoritative guide list. A guide's position in the library is its row index in
/// every count matrix built from it.
#[derive(Debug)]
pub struct Library {
    pub origin: String,
    guides: IndexMap<SmolStr, LibraryEntry>,
}

impl Library {
    /// Build a library from raw keys paired with the line they were read from.
    pub fn from_numbered_keys<I, S>(origin: &str, keys: I) -> CountResult<Self>
    where
        I: IntoIterator<Item = (usize, S)>,
        S: AsRef<str>,
    {
        let mut guides: IndexMap<SmolStr, LibraryEntry> = IndexMap::new();

        for (line, key) in keys {
            let key = key.as_ref();
            let record = GuideRecord::from_raw_key(key).ok_or_else(|| {
                CountError::malformed(
                    origin,
                    line,
                    format!("guide key '{key}' is not of the form GENE{KEY_SEPARATOR}IDENTIFIER"),
                )
            })?;

            if let Some(first) = guides.get(key) {
                return Err(CountError::config(format!(
                    "duplicate guide key '{key}' in {origin} on line {line}; first listed on line {}",
                    first.line
                )));
            }

            guides.insert(record.raw_key.clone(), LibraryEntry { line, guide: record });
        }

        if guides.is_empty() {
            return Err(CountError::config(format!(
                "guide library {origin} contains no guides"
            )));
        }

        Ok(Library {
            origin: origin.to_string(),
            guides,
        })
    }

    /// Build a library from keys listed one per line.
    #[cfg(test)]
    pub fn from_keys<I, S>(origin: &str, keys: I) -> CountResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_numbered_keys(origin, keys.into_iter().enumerate().map(|(i, k)| (i + 1, k)))
    }

    /// Load a library from a FASTA file (guide names taken from record ids) or from a delimited
    /// list of raw keys.
    pub fn load(path: &Path) -> CountResult<Self> {
        let origin = path.display().to_string();

        let library = if is_fasta(path) {
            Self::from_numbered_keys(&origin, guide_names(path)?)?
        } else {
            Self::from_numbered_keys(&origin, read_library_keys(path)?)?
        };

        info!("Loaded {} guides from {}", library.len(), origin);
        Ok(library)
    }

    pub fn len(&self) -> usize {
        self.guides.len()
    }

    /// Row index of a raw key, if it belongs to the library.
    pub fn index_of(&self, raw_key: &str) -> Option<usize> {
        self.guides.get_index_of(raw_key)
    }

    pub fn guides(&self) -> impl Iterator<Item = &GuideRecord> {
        self.guides.values().map(|entry| &entry.guide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw_key_first_underscore() {
        assert_eq!(parse_raw_key("A1BG_sgA1BG_1"), Some(("A1BG", "sgA1BG_1")));
        assert_eq!(parse_raw_key("G1_a"), Some(("G1", "a")));
    }

    #[test]
    fn test_parse_raw_key_empty_parts() {
        assert_eq!(parse_raw_key("_a"), Some(("", "a")));
        assert_eq!(parse_raw_key("G1_"), Some(("G1", "")));
        assert_eq!(parse_raw_key("NOSEPARATOR"), None);
    }

    #[test]
    fn test_library_accepts_empty_gene_or_identifier() {
        let lib = Library::from_keys("lib", ["A_1", "G1_", "_a"]).unwrap();
        let parts: Vec<(&str, &str)> = lib
            .guides()
            .map(|g| (g.gene.as_str(), g.sequence_id.as_str()))
            .collect();

        assert_eq!(parts, vec![("A", "1"), ("G1", ""), ("", "a")]);
    }

    #[test]
    fn test_library_preserves_order() {
        let lib = Library::from_keys("lib", ["B_1", "A_1", "A_2"]).unwrap();
        let genes: Vec<&str> = lib.guides().map(|g| g.gene.as_str()).collect();

        assert_eq!(genes, vec!["B", "A", "A"]);
        assert_eq!(lib.index_of("A_1"), Some(1));
        assert_eq!(lib.index_of("C_1"), None);
    }

    #[test]
    fn test_library_rejects_missing_separator() {
        let res = Library::from_keys("lib.csv", ["A_1", "BROKEN"]);
        match res {
            Err(CountError::MalformedInput { origin, line, .. }) => {
                assert_eq!(origin, "lib.csv");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_library_rejects_duplicates() {
        let res = Library::from_keys("lib", ["A_1", "B_1", "A_1"]);
        assert!(matches!(res, Err(CountError::Configuration(_))));
    }

    #[test]
    fn test_duplicate_names_both_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.csv");
        std::fs::write(&path, "A_1,A_2,B_1\nC_1\nD_1,B_1\n").unwrap();

        match Library::load(&path) {
            Err(CountError::Configuration(msg)) => {
                assert!(msg.contains("'B_1'"));
                assert!(msg.contains("on line 3; first listed on line 1"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_fasta_errors_use_header_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.fasta");
        std::fs::write(
            &path,
            ">A1BG_sgA1BG_1\nGAGACCAGCT\nTGCTCAGCAA\n>BROKEN\nCTGGCCAGTGACCCTGCTCA\n",
        )
        .unwrap();

        match Library::load(&path) {
            Err(CountError::MalformedInput { line, .. }) => assert_eq!(line, 4),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_library_rejects_empty() {
        let res = Library::from_keys::<_, &str>("lib", []);
        assert!(matches!(res, Err(CountError::Configuration(_))));
    }
}
