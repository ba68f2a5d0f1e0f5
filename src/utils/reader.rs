//! Log file reader with automatic decompression.
//!
//! Rotated access logs are commonly shipped as `access.log.1.gz` or
//! `.zst`; both are streamed without temp files.
//!
//! # Examples
//!
//! ```no_run
//! use access_log_analyzer::utils::reader::open_file;
//! use std::io::{BufRead, BufReader};
//!
//! let reader = open_file("access.log.gz").unwrap();
//! for line in BufReader::new(reader).lines() {
//!     let _line = line.unwrap();
//! }
//! ```

use crate::error::FileError;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Opens a log file, picking a decoder from the extension.
///
/// - `.gz` → gzip (multi-member, as produced by `logrotate` + `cat`)
/// - `.zst` → zstandard
/// - anything else → plain text
///
/// A path that does not exist yields [`FileError::Unavailable`]; every other
/// failure is a [`FileError::Fault`].
pub fn open_file(path: impl AsRef<Path>) -> Result<Box<dyn Read + Send>, FileError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => FileError::Unavailable {
            path: display.clone(),
        },
        _ => FileError::Fault {
            path: display.clone(),
            message: format!("failed to open file: {e}"),
        },
    })?;

    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "gz" => Ok(Box::new(MultiGzDecoder::new(file))),
        "zst" => {
            let decoder = zstd::Decoder::new(file).map_err(|e| FileError::Fault {
                path: display,
                message: format!("failed to create zstd decoder: {e}"),
            })?;
            Ok(Box::new(decoder))
        }
        _ => Ok(Box::new(file)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use tempfile::NamedTempFile;

    fn read_lines(reader: Box<dyn Read + Send>) -> Vec<String> {
        BufReader::new(reader)
            .lines()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_plain_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "line 1").unwrap();
        writeln!(temp, "line 2").unwrap();
        temp.flush().unwrap();

        let lines = read_lines(open_file(temp.path()).unwrap());
        assert_eq!(lines, vec!["line 1", "line 2"]);
    }

    #[test]
    fn test_gzip_file() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut temp = NamedTempFile::with_suffix(".gz").unwrap();
        {
            let mut encoder = GzEncoder::new(&mut temp, Compression::default());
            writeln!(encoder, "compressed line").unwrap();
            encoder.finish().unwrap();
        }
        temp.flush().unwrap();

        let lines = read_lines(open_file(temp.path()).unwrap());
        assert_eq!(lines, vec!["compressed line"]);
    }

    #[test]
    fn test_zstd_file() {
        let mut temp = NamedTempFile::with_suffix(".zst").unwrap();
        {
            let mut encoder = zstd::Encoder::new(&mut temp, 3).unwrap();
            writeln!(encoder, "zstd line").unwrap();
            encoder.finish().unwrap();
        }
        temp.flush().unwrap();

        let lines = read_lines(open_file(temp.path()).unwrap());
        assert_eq!(lines, vec!["zstd line"]);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let err = open_file("/nonexistent/access.log").err().unwrap();
        assert_eq!(
            err,
            FileError::Unavailable {
                path: "/nonexistent/access.log".to_string()
            }
        );
    }
}
