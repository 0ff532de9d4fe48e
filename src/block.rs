//! Compress individual blocks of data.
//!
//! These methods process all the input data at once.
//! It is therefore best used with relatively small blocks
//! (like small network packets).

use crate::bridge;
use crate::error::Error;

/// Compresses a single block of data to the given destination buffer.
///
/// Returns the number of bytes written, or an error if something happened
/// (for instance if the destination buffer was too small).
pub fn compress_to_buffer(source: &[u8], destination: &mut [u8], level: i32) -> Result<usize, Error> {
    bridge::compress(source, destination, level).into_result()
}

/// Compresses a block of data and returns the compressed result.
///
/// The returned vector holds exactly the compressed bytes.
pub fn compress(data: &[u8], level: i32) -> Result<Vec<u8>, Error> {
    let mut buffer = compress_with_spare_capacity(data, level)?;
    buffer.shrink_to_fit();
    Ok(buffer)
}

/// Compresses a block of data, keeping the worst-case allocation.
///
/// The returned vector has the compressed size as length, but keeps the
/// capacity of [`compress_bound`](crate::compress_bound), which saves a copy
/// when the result is short-lived.
pub fn compress_with_spare_capacity(data: &[u8], level: i32) -> Result<Vec<u8>, Error> {
    let mut buffer = vec![0u8; bridge::compress_bound(data.len())];
    let len = compress_to_buffer(data, &mut buffer, level)?;
    buffer.truncate(len);
    Ok(buffer)
}
