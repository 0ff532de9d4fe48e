//! Error kinds reported by the codec, and the error types built from them.

use std::io;
use std::path::PathBuf;

use crate::bridge::ResultCode;

macro_rules! error_kinds {
    ($($(#[$doc:meta])* $kind:ident => $codec:ident,)*) => {
        /// A failure reason, as enumerated by the codec.
        ///
        /// The discriminant of each kind is read from the codec itself,
        /// see [`ErrorKind::code`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorKind {
            $($(#[$doc])* $kind,)*
        }

        impl ErrorKind {
            /// Every kind, in codec order.
            pub const ALL: &'static [ErrorKind] = &[$(ErrorKind::$kind,)*];

            /// The discriminant the codec uses for this kind.
            pub fn code(self) -> u32 {
                match self {
                    $(ErrorKind::$kind => zstd_sys::ZSTD_ErrorCode::$codec as u32,)*
                }
            }

            /// The identifier of this kind, like `"DstSizeTooSmall"`.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(ErrorKind::$kind => stringify!($kind),)*
                }
            }
        }
    };
}

error_kinds! {
    NoError => ZSTD_error_no_error,
    Generic => ZSTD_error_GENERIC,
    PrefixUnknown => ZSTD_error_prefix_unknown,
    VersionUnsupported => ZSTD_error_version_unsupported,
    FrameParameterUnsupported => ZSTD_error_frameParameter_unsupported,
    FrameParameterWindowTooLarge => ZSTD_error_frameParameter_windowTooLarge,
    CorruptionDetected => ZSTD_error_corruption_detected,
    ChecksumWrong => ZSTD_error_checksum_wrong,
    DictionaryCorrupted => ZSTD_error_dictionary_corrupted,
    DictionaryWrong => ZSTD_error_dictionary_wrong,
    DictionaryCreationFailed => ZSTD_error_dictionaryCreation_failed,
    ParameterUnsupported => ZSTD_error_parameter_unsupported,
    ParameterOutOfBound => ZSTD_error_parameter_outOfBound,
    TableLogTooLarge => ZSTD_error_tableLog_tooLarge,
    MaxSymbolValueTooLarge => ZSTD_error_maxSymbolValue_tooLarge,
    MaxSymbolValueTooSmall => ZSTD_error_maxSymbolValue_tooSmall,
    StageWrong => ZSTD_error_stage_wrong,
    InitMissing => ZSTD_error_init_missing,
    /// Also reported when a buffer could not be lent to the codec.
    MemoryAllocation => ZSTD_error_memory_allocation,
    WorkSpaceTooSmall => ZSTD_error_workSpace_tooSmall,
    DstSizeTooSmall => ZSTD_error_dstSize_tooSmall,
    SrcSizeWrong => ZSTD_error_srcSize_wrong,
    DstBufferNull => ZSTD_error_dstBuffer_null,
}

impl ErrorKind {
    /// Looks up the kind with the given codec discriminant.
    ///
    /// Returns `None` for discriminants this crate does not enumerate.
    pub fn from_code(code: u32) -> Option<Self> {
        ErrorKind::ALL.iter().copied().find(|kind| kind.code() == code)
    }

    /// The result code a codec function returns when failing with this kind.
    ///
    /// `NoError` maps to `0`, which reads as a zero-length success.
    pub fn result_code(self) -> ResultCode {
        // The codec encodes an error as the negated discriminant.
        ResultCode::from_raw(0usize.wrapping_sub(self.code() as usize))
    }

    /// The codec's human-readable label for this kind.
    pub fn name(self) -> String {
        self.result_code().error_name()
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed codec call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("zstd error: {name} (code: {code})")]
pub struct Error {
    code: u32,
    name: String,
}

impl Error {
    /// Builds the error carried by an error result code.
    ///
    /// `code` must satisfy [`ResultCode::is_error`].
    pub(crate) fn from_result_code(code: ResultCode) -> Self {
        Error {
            code: code.error_code(),
            name: code.error_name(),
        }
    }

    /// The codec discriminant of this error.
    pub fn code(&self) -> u32 {
        self.code
    }

    /// The codec's label for this error.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kind of this error, if it is one this crate enumerates.
    pub fn kind(&self) -> Option<ErrorKind> {
        ErrorKind::from_code(self.code)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error {
            code: kind.code(),
            name: kind.name(),
        }
    }
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        io::Error::new(io::ErrorKind::Other, error)
    }
}

/// A failure while compressing a file.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Compress(#[from] Error),
}
