/* Reading of per-sample raw count files.
*
* Each record is a read count and a guide key separated by whitespace, in either order:
*     12	A1BG_sgA1BG_1
*     A1BG_sgA1BG_1 12
*
* Older counting runs printed python-style lists instead, e.g. `['     12 A1BG_sgA1BG_1']`.
* The list artifacts are stripped before tokenizing unless the parser is built strict.
*/

use crate::error::{CountError, CountResult};
use crate::io::open_input;
use smol_str::SmolStr;
use std::io::BufRead;
use std::path::Path;

const LIST_ARTIFACTS: [char; 5] = ['[', ']', '\'', '"', ','];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCountEntry {
    pub raw_key: SmolStr,
    pub count: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct CountParser {
    pub strip_list_artifacts: bool,
}

impl Default for CountParser {
    fn default() -> Self {
        CountParser {
            strip_list_artifacts: true,
        }
    }
}

impl CountParser {
    pub fn strict() -> Self {
        CountParser {
            strip_list_artifacts: false,
        }
    }

    /// Parse one line. Blank lines yield `Ok(None)`; the error string describes what is wrong
    /// with the line and is wrapped with file/line context by the caller.
    pub fn parse_line(&self, line: &str) -> Result<Option<RawCountEntry>, String> {
        let cleaned: String = match self.strip_list_artifacts {
            true => line
                .chars()
                .map(|c| if LIST_ARTIFACTS.contains(&c) { ' ' } else { c })
                .collect(),
            false => line.to_string(),
        };

        let fields: Vec<&str> = cleaned.split_whitespace().collect();

        match fields.len() {
            0 => return Ok(None),
            2 => (),
            n => {
                return Err(format!(
                    "expected a count and a guide key, found {n} field(s) in '{}'",
                    line.trim()
                ))
            }
        }

        let (count, raw_key) = match (fields[0].parse::<u64>(), fields[1].parse::<u64>()) {
            (Ok(count), _) => (count, fields[1]),
            (Err(_), Ok(count)) => (count, fields[0]),
            (Err(_), Err(_)) => {
                return Err(format!(
                    "no non-negative integer count in '{}'",
                    line.trim()
                ))
            }
        };

        Ok(Some(RawCountEntry {
            raw_key: SmolStr::from(raw_key),
            count,
        }))
    }
}

/// Read every record of a raw count file. The first unparseable line fails the whole file.
pub fn read_counts(path: &Path, parser: &CountParser) -> CountResult<Vec<RawCountEntry>> {
    let origin = path.display().to_string();
    let reader = open_input(path)?;
    let mut entries = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CountError::io(path, e))?;

        match parser.parse_line(&line) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => continue,
            Err(reason) => return Err(CountError::malformed(&origin, i + 1, reason)),
        }
    }

    Ok(entries)
}
