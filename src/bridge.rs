//! Stateless compression calls over caller-owned buffers.
//!
//! Every function here maps to a single codec call and returns what the codec
//! returns. Failures travel in the [`ResultCode`] itself: check
//! [`ResultCode::is_error`] (or use [`ResultCode::into_result`]) before
//! reading a code as a length.

use std::fmt;

use crate::error::Error;

/// The integer returned by a compression call.
///
/// Either a number of bytes written, or an error in the codec's reserved
/// range.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultCode(usize);

impl ResultCode {
    /// Wraps a raw code, as returned by the codec.
    pub fn from_raw(code: usize) -> Self {
        ResultCode(code)
    }

    /// The raw code.
    pub fn into_raw(self) -> usize {
        self.0
    }

    /// Returns `true` if this code carries an error rather than a length.
    pub fn is_error(self) -> bool {
        is_error(self)
    }

    /// The codec discriminant of the error this code carries.
    ///
    /// Only meaningful if [`is_error`](Self::is_error) is `true`.
    pub fn error_code(self) -> u32 {
        get_error_code(self)
    }

    /// The codec's label for the error this code carries.
    pub fn error_name(self) -> String {
        get_error_name(self)
    }

    /// Splits this code into the number of bytes written, or the error.
    pub fn into_result(self) -> Result<usize, Error> {
        if self.is_error() {
            Err(Error::from_result_code(self))
        } else {
            Ok(self.0)
        }
    }
}

impl fmt::Debug for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_error() {
            write!(f, "ResultCode(error {}: {})", self.error_code(), self.error_name())
        } else {
            write!(f, "ResultCode({})", self.0)
        }
    }
}

impl From<zstd_safe::SafeResult> for ResultCode {
    fn from(result: zstd_safe::SafeResult) -> Self {
        match result {
            Ok(written) => ResultCode(written),
            Err(code) => ResultCode(code),
        }
    }
}

/// Compresses `source` as a single zstd frame into `destination`.
///
/// On success, the returned code is the number of bytes written at the start
/// of `destination`; the rest of `destination` is left unspecified. A
/// destination smaller than [`compress_bound`] may fail with `DstSizeTooSmall`.
///
/// `level` is handed to the codec as is.
pub fn compress(source: &[u8], destination: &mut [u8], level: i32) -> ResultCode {
    let code = ResultCode::from(zstd_safe::compress(destination, source, level));
    log::trace!(
        "compress: {} bytes into {} at level {}: {:?}",
        source.len(),
        destination.len(),
        level,
        code
    );
    code
}

/// Maximum compressed size of `source_size` bytes, in the worst case.
///
/// A destination of this size never fails with `DstSizeTooSmall`.
/// Past the largest input the codec accepts, returns `usize::MAX`, so the
/// bound never decreases as `source_size` grows.
pub fn compress_bound(source_size: usize) -> usize {
    let bound = zstd_safe::compress_bound(source_size);
    if is_error(ResultCode::from_raw(bound)) {
        usize::MAX
    } else {
        bound
    }
}

/// Returns `true` if `code` carries an error rather than a length.
pub fn is_error(code: ResultCode) -> bool {
    unsafe { zstd_sys::ZSTD_isError(code.0) != 0 }
}

/// The codec's label for the error carried by `code`.
///
/// Each call returns a new `String`.
pub fn get_error_name(code: ResultCode) -> String {
    zstd_safe::get_error_name(code.0).to_owned()
}

/// The codec discriminant of the error carried by `code`.
///
/// Returns `0` (`NoError`) if `code` is not an error.
pub fn get_error_code(code: ResultCode) -> u32 {
    unsafe { zstd_sys::ZSTD_getErrorCode(code.0) as u32 }
}

/// Version of the linked codec, as `major * 10000 + minor * 100 + release`.
pub fn version_number() -> u32 {
    zstd_safe::version_number()
}
