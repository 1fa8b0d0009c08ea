use colored::Colorize;
use num_format::{Locale, ToFormattedString};
use std::fmt;

const LOCALE: Locale = Locale::en;

// Per-sample details of one aggregation run, filled in as each count file is merged.
#[derive(Debug)]
pub struct SampleSummary {
    pub name: String,
    pub records: usize,
    pub reads_assigned: u64,
    pub unmatched_keys: usize,
    pub unmatched_reads: u64,
    pub repeated_keys: usize,
    pub zero_guides: usize,
}

impl SampleSummary {
    pub fn new(name: &str, records: usize) -> Self {
        SampleSummary {
            name: name.to_string(),
            records,
            reads_assigned: 0,
            unmatched_keys: 0,
            unmatched_reads: 0,
            repeated_keys: 0,
            zero_guides: 0,
        }
    }
}

#[derive(Debug)]
pub struct AggregateReport {
    pub num_guides: usize,
    pub samples: Vec<SampleSummary>,
}

impl AggregateReport {
    pub fn new(num_guides: usize) -> Self {
        AggregateReport {
            num_guides,
            samples: Vec::new(),
        }
    }
}

impl fmt::Display for AggregateReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "\n{}\n{}\n{}: {}\n{}: {}",
            "AGGREGATION".yellow(),
            "=============================".yellow(),
            "Library guides".yellow(),
            self.num_guides.to_formatted_string(&LOCALE),
            "Samples".yellow(),
            self.samples.len().to_formatted_string(&LOCALE),
        )?;

        for s in &self.samples {
            writeln!(
                f,
                "{}\n  \
                {}: {}\n  \
                {}: {}\n  \
                {}: {}\n  \
                {}: {}",
                s.name.purple(),
                "Reads assigned",
                s.reads_assigned.to_formatted_string(&LOCALE),
                "Guides with zero reads",
                s.zero_guides.to_formatted_string(&LOCALE),
                "Unmatched keys (reads)",
                format!(
                    "{} ({})",
                    s.unmatched_keys.to_formatted_string(&LOCALE),
                    s.unmatched_reads.to_formatted_string(&LOCALE)
                ),
                "Repeated keys",
                s.repeated_keys.to_formatted_string(&LOCALE),
            )?;
        }

        writeln!(f, "{}", "=============================".yellow())
    }
}

#[derive(Debug)]
pub struct ScaledSample {
    pub name: String,
    pub reads_before: u64,
    pub reads_after: u64,
    pub scale_factor: f64,
}

#[derive(Debug)]
pub struct NormalizeReport {
    pub total_reads: u128,
    pub samples: Vec<ScaledSample>,
}

impl fmt::Display for NormalizeReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "\n{}\n{}\n{}: {}",
            "NORMALIZATION".yellow(),
            "=============================".yellow(),
            "Total reads".yellow(),
            self.total_reads.to_formatted_string(&LOCALE),
        )?;

        for s in &self.samples {
            writeln!(
                f,
                "{}: {} -> {} (x{:.4})",
                s.name.purple(),
                s.reads_before.to_formatted_string(&LOCALE),
                s.reads_after.to_formatted_string(&LOCALE),
                s.scale_factor,
            )?;
        }

        writeln!(f, "{}", "=============================".yellow())
    }
}
