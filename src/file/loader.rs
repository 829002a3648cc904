//! Input stream opening.
//!
//! `-` names standard input; anything else is a path. Files ending in `.gz`
//! are decompressed on the fly. Streams are released when dropped.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Input identifier for standard input.
pub const STDIN: &str = "-";

/// An open input, released on drop.
pub struct InputStream {
    name: String,
    reader: Box<dyn Read>,
}

impl InputStream {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Read for InputStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl Drop for InputStream {
    fn drop(&mut self) {
        tracing::debug!(input = %self.name, "closing input stream");
    }
}

/// Opens the named input for reading.
///
/// # Examples
///
/// ```no_run
/// use std::io::Read;
/// use yamlsmith::file::loader::open_stream;
///
/// let mut input = open_stream("config.yaml.gz").unwrap();
/// let mut text = String::new();
/// input.read_to_string(&mut text).unwrap();
/// ```
///
/// # Errors
///
/// Returns the I/O error if the file cannot be opened.
pub fn open_stream(filename: &str) -> io::Result<InputStream> {
    let reader: Box<dyn Read> = if filename == STDIN {
        Box::new(io::stdin().lock())
    } else {
        let file = BufReader::new(File::open(filename)?);
        if is_gzipped(filename) {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        }
    };
    tracing::debug!(input = %filename, "opened input stream");
    Ok(InputStream {
        name: filename.to_string(),
        reader,
    })
}

/// Checks whether a path names a gzip file.
fn is_gzipped<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false)
}
