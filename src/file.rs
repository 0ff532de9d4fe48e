//! Compress whole files into `.zst` files.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::block;
use crate::error::FileError;

/// Extension appended to compressed files.
pub const SUFFIX: &str = ".zst";

/// Sizes before and after compressing a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub original_size: u64,
    pub compressed_size: u64,
}

impl Report {
    /// Share of the original size saved by compression, in percent.
    ///
    /// Negative if the output is larger than the input; `0.0` for empty input.
    pub fn saved_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        let original = self.original_size as f64;
        (original - self.compressed_size as f64) / original * 100.0
    }
}

/// The path `source` compresses to by default: `source` with `.zst` appended.
pub fn default_target(source: &Path) -> PathBuf {
    let mut target = OsString::from(source.as_os_str());
    target.push(SUFFIX);
    PathBuf::from(target)
}

/// Compresses the file at `source` into a single zstd frame at `target`.
///
/// `target` is created, or truncated if it exists.
pub fn compress_file(source: &Path, target: &Path, level: i32) -> Result<Report, FileError> {
    let data = fs::read(source).map_err(|source_err| FileError::Read {
        path: source.to_owned(),
        source: source_err,
    })?;

    let start = Instant::now();
    let compressed = block::compress_with_spare_capacity(&data, level)?;
    log::info!(
        "compressed {} at level {} in {:?}",
        source.display(),
        level,
        start.elapsed()
    );

    fs::write(target, &compressed).map_err(|source_err| FileError::Write {
        path: target.to_owned(),
        source: source_err,
    })?;
    log::debug!("wrote {} bytes to {}", compressed.len(), target.display());

    Ok(Report {
        original_size: data.len() as u64,
        compressed_size: compressed.len() as u64,
    })
}
