use std::{fs::File, io::{BufReader, Read}, path::{Path, PathBuf}};
use log::{debug, trace};
use rayon::prelude::*;
use crate::error::Result;
use crate::value::JsonValue;

const PROGRESS_STEP: u64 = 1024 * 1024;

// Reader that logs how far through a file the decoder has got
struct ProgressReader<R: Read> {
    inner: R,
    read_bytes: u64,
    total_bytes: u64,
    last_report: u64,
    path: PathBuf,
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.read_bytes += n as u64;
        if self.read_bytes - self.last_report >= PROGRESS_STEP || n == 0 {
            let percent = if self.total_bytes > 0 {
                self.read_bytes as f64 / self.total_bytes as f64 * 100.0
            } else {
                0.0
            };
            trace!(
                "{}: read {} of {} bytes ({:.1}%)",
                self.path.display(),
                self.read_bytes,
                self.total_bytes,
                percent
            );
            self.last_report = self.read_bytes;
        }
        Ok(n)
    }
}

/// Reads and decodes the JSON document at `path`.
///
/// Errors carry the path they came from.
pub fn load_file(path: impl AsRef<Path>) -> Result<JsonValue> {
    let path = path.as_ref();
    read_document(path).map_err(|e| e.at_path(path))
}

fn read_document(path: &Path) -> Result<JsonValue> {
    let f = File::open(path)?;
    let total_bytes = f.metadata().map(|m| m.len()).unwrap_or(0);

    let progress_reader = ProgressReader {
        inner: f,
        read_bytes: 0,
        total_bytes,
        last_report: 0,
        path: path.to_path_buf(),
    };
    let root = load_reader(BufReader::new(progress_reader))?;
    debug!(
        "loaded {} ({} bytes, top-level {})",
        path.display(),
        total_bytes,
        root.kind()
    );
    Ok(root)
}

/// Decodes one JSON document from `reader`.
pub fn load_reader<R: Read>(reader: R) -> Result<JsonValue> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn parse_str(text: &str) -> Result<JsonValue> {
    Ok(serde_json::from_str(text)?)
}

/// Loads every file in parallel. Documents come back in the order of `paths`;
/// on failure the error of the earliest failing path in that order is returned.
pub fn load_files<P: AsRef<Path> + Sync>(paths: &[P]) -> Result<Vec<JsonValue>> {
    let loaded: Vec<Result<JsonValue>> = paths.par_iter().map(load_file).collect();
    loaded.into_iter().collect()
}
