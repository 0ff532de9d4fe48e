//! Compression bridge to the [zstd library][zstd] for foreign callers.
//!
//! This crate provides:
//!
//! * Stateless [buffer-to-buffer compression](fn.compress.html) returning the
//!   codec's own [result codes](struct.ResultCode.html), with the matching
//!   bound and error queries.
//! * [Host array access](access/index.html), to compress arrays lent by a
//!   managed runtime, either through a copy or pinned in place.
//! * A [C ABI](ffi/index.html) exposing all of the above.
//! * [Block](block/index.html) and [file](file/index.html) helpers returning
//!   proper `Result`s.
//!
//! # Example
//!
//! ```rust
//! let data = b"Some data, some data, some data.";
//! let mut buffer = vec![0; zstd_bridge::compress_bound(data.len())];
//!
//! let code = zstd_bridge::compress(data, &mut buffer, 3);
//! assert!(!code.is_error());
//! buffer.truncate(code.into_raw());
//! ```
//!
//! [zstd]: https://github.com/facebook/zstd

pub mod access;
pub mod block;
mod bridge;
mod error;
pub mod ffi;
pub mod file;

pub use crate::bridge::{
    compress, compress_bound, get_error_code, get_error_name, is_error, version_number, ResultCode,
};
pub use crate::error::{Error, ErrorKind, FileError};

/// Default compression level of the codec.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = zstd_safe::CLEVEL_DEFAULT;

/// Checks that `compressed` decompresses to `data`.
#[cfg(test)]
fn test_cycle_check(data: &[u8], compressed: &[u8]) {
    let mut decompressed = vec![0u8; data.len()];
    let len = zstd_safe::decompress(&mut decompressed[..], compressed).unwrap();
    assert_eq!(&decompressed[..len], data);
}
