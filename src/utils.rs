use crate::aggregate::SampleFile;
use std::path::{Path, PathBuf};

const FASTA_EXTENSIONS: [&str; 3] = ["fa", "fasta", "fna"];

pub fn get_file_ext(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// File name with a trailing `.gz` and one further extension removed, e.g. `s1.counts.txt.gz`
/// becomes `s1.counts`.
pub fn strip_extensions(path: &Path) -> String {
    let fname = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();

    let fname = fname.strip_suffix(".gz").unwrap_or(&fname);

    match fname.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => fname.to_string(),
    }
}

pub fn is_fasta(path: &Path) -> bool {
    let unzipped = match get_file_ext(path) {
        Some("gz") => path.with_extension(""),
        _ => path.to_path_buf(),
    };

    get_file_ext(&unzipped)
        .map(|ext| FASTA_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Interpret a sample argument: either `NAME=PATH`, or a bare path whose file name (without
/// extensions) becomes the sample name.
pub fn parse_sample_arg(arg: &str) -> Result<SampleFile, String> {
    match arg.split_once('=') {
        Some((name, path)) => {
            if name.is_empty() || path.is_empty() {
                return Err(format!("invalid sample '{arg}'; expected NAME=PATH or PATH"));
            }
            Ok(SampleFile {
                name: name.to_string(),
                path: PathBuf::from(path),
            })
        }
        None => {
            let path = PathBuf::from(arg);
            Ok(SampleFile {
                name: strip_extensions(&path),
                path,
            })
        }
    }
}

/// Output path next to `infile`, named `<stem>_<suffix>.tsv`.
pub fn gen_outfile_name(infile: &Path, suffix: &str) -> PathBuf {
    let outf = format!("{}_{suffix}.tsv", strip_extensions(infile));
    match infile.parent() {
        Some(parent) => parent.join(outf),
        None => PathBuf::from(outf),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_extensions() {
        assert_eq!(strip_extensions(Path::new("/data/s1.txt")), "s1");
        assert_eq!(strip_extensions(Path::new("s1.counts.txt.gz")), "s1.counts");
        assert_eq!(strip_extensions(Path::new("plain")), "plain");
    }

    #[test]
    fn test_is_fasta() {
        assert!(is_fasta(Path::new("lib/bassik.fasta")));
        assert!(is_fasta(Path::new("lib/bassik.FA.gz")));
        assert!(!is_fasta(Path::new("bassik-guides-sorted.csv")));
        assert!(!is_fasta(Path::new("guides.txt.gz")));
    }

    #[test]
    fn test_parse_sample_arg() {
        let s = parse_sample_arg("day0=/runs/a/counts.txt").unwrap();
        assert_eq!(s.name, "day0");
        assert_eq!(s.path, PathBuf::from("/runs/a/counts.txt"));

        let s = parse_sample_arg("/runs/b/day14.txt").unwrap();
        assert_eq!(s.name, "day14");

        assert!(parse_sample_arg("=x.txt").is_err());
    }

    #[test]
    fn test_gen_outfile_name() {
        assert_eq!(
            gen_outfile_name(Path::new("out/counts-aggregated.tsv"), "normalised"),
            PathBuf::from("out/counts-aggregated_normalised.tsv")
        );
    }
}
