use crate::error::{CountError, CountResult};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub type InputReader = Box<dyn BufRead>;

pub fn is_gzipped(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("gz")
}

/// Open a plaintext or gzipped text file for line-oriented reading.
pub fn open_input(path: &Path) -> CountResult<InputReader> {
    let fhandle = File::open(path).map_err(|e| CountError::io(path, e))?;

    match is_gzipped(path) {
        true => Ok(Box::new(BufReader::new(GzDecoder::new(fhandle)))),
        false => Ok(Box::new(BufReader::new(fhandle))),
    }
}

/// Write `outfile` through a temporary file in the same directory, renaming it into place only
/// once `write` has returned successfully. A failed write leaves nothing at `outfile`.
pub fn write_atomically<F>(outfile: &Path, write: F) -> CountResult<()>
where
    F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> CountResult<()>,
{
    let parent = match outfile.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| CountError::io(parent, e))?;

    {
        let mut bufwriter = BufWriter::new(&mut tmp);
        write(&mut bufwriter)?;
        bufwriter.flush().map_err(|e| CountError::io(outfile, e))?;
    }

    tmp.persist(outfile)
        .map_err(|e| CountError::io(outfile, e.error))?;

    Ok(())
}
