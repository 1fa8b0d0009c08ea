/* Aggregation of per-sample raw count files into one guide-by-sample count matrix.
*
* aggregate() is the driver function:
* 1. check the sample set and order it by sample name
* 2. lay out one zero-filled row per library guide, in library order
* 3. for every sample file, write each parsed count into the row of its guide
* 4. return the matrix together with a per-sample summary
*
* The library is authoritative: keys missing from a sample file stay zero, keys missing from the
* library are dropped.
*/

use crate::error::{CountError, CountResult};
use crate::io::{read_counts, CountParser};
use crate::library::Library;
use crate::matrix::{CountMatrix, OutputFormat};
use crate::report::{AggregateReport, SampleSummary};
use indicatif::ProgressBar;
use log::{info, warn};
use std::collections::HashSet;
use std::path::PathBuf;

/// What to do with count records whose key is not in the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum UnmatchedPolicy {
    /// drop the record and log a warning naming the key
    #[default]
    Warn,
    /// drop the record, only reporting the number dropped
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFile {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateOptions {
    pub format: OutputFormat,
    pub unmatched: UnmatchedPolicy,
    pub parser: CountParser,
}

/// Reject an empty or ambiguous sample set and put samples in a reproducible order.
pub fn order_samples(mut samples: Vec<SampleFile>) -> CountResult<Vec<SampleFile>> {
    if samples.is_empty() {
        return Err(CountError::config("no sample count files given"));
    }

    let mut seen = HashSet::with_capacity(samples.len());
    for sample in &samples {
        if !seen.insert(sample.name.as_str()) {
            return Err(CountError::config(format!(
                "sample name '{}' is used more than once",
                sample.name
            )));
        }
    }

    samples.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(samples)
}

pub fn aggregate(
    library: &Library,
    samples: Vec<SampleFile>,
    options: &AggregateOptions,
    progress: &ProgressBar,
) -> CountResult<(CountMatrix, AggregateReport)> {
    let samples = order_samples(samples)?;

    if let Some(missing) = samples.iter().find(|s| !s.path.is_file()) {
        return Err(CountError::config(format!(
            "count file {:?} for sample '{}' does not exist",
            missing.path, missing.name
        )));
    }

    let names = samples.iter().map(|s| s.name.clone()).collect();
    let mut matrix = CountMatrix::zeroed(library, names, options.format);
    let mut report = AggregateReport::new(library.len());

    progress.set_length(samples.len() as u64);

    for (j, sample) in samples.iter().enumerate() {
        progress.set_message(sample.name.clone());

        let entries = read_counts(&sample.path, &options.parser)?;
        let mut summary = SampleSummary::new(&sample.name, entries.len());
        let mut filled = vec![false; library.len()];

        for entry in entries {
            let Some(i) = library.index_of(&entry.raw_key) else {
                if options.unmatched == UnmatchedPolicy::Warn {
                    warn!(
                        "{}: guide '{}' ({} reads) is not in library {}; dropped",
                        sample.name, entry.raw_key, entry.count, library.origin
                    );
                }
                summary.unmatched_keys += 1;
                summary.unmatched_reads = summary.unmatched_reads.saturating_add(entry.count);
                continue;
            };

            if filled[i] {
                warn!(
                    "{}: guide '{}' listed more than once; keeping the last count ({})",
                    sample.name, entry.raw_key, entry.count
                );
                summary.repeated_keys += 1;
            }

            filled[i] = true;
            matrix.rows[i].counts[j] = entry.count;
        }

        summary.reads_assigned =
            matrix
                .column_sum(j)
                .ok_or_else(|| CountError::Computation {
                    sample: sample.name.clone(),
                    reason: format!(
                        "total read count in {:?} exceeds {}",
                        sample.path,
                        u64::MAX
                    ),
                })?;
        summary.zero_guides = matrix.column(j).filter(|&c| c == 0).count();

        info!(
            "{}: {} records, {} reads assigned, {} unmatched keys",
            sample.name, summary.records, summary.reads_assigned, summary.unmatched_keys
        );

        report.samples.push(summary);
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok((matrix, report))
}
