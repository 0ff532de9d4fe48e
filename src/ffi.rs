//! C ABI for foreign callers.
//!
//! A host runtime binds its native-call layer to these symbols. Every
//! function is stateless and returns on the calling thread.
//!
//! # Safety
//! Buffers are passed as a pointer and a length. The caller guarantees that a
//! non-null pointer is valid for its length for the duration of the call, and
//! that source and destination do not overlap. A null pointer with a non-zero
//! length is reported as `MemoryAllocation` rather than dereferenced.
use std::alloc::{self, Layout};
use std::ffi::CString;
use std::ptr::{self, NonNull};

use libc::{c_char, c_int, c_uint, size_t};

use crate::access::{self, Access, HostArray, Release};
use crate::bridge::{self, ResultCode};
use crate::error::ErrorKind;

/// A `(pointer, length)` pair handed over by a C caller.
///
/// Copying access works on a heap buffer of the same length, written back on
/// commit. A source copy starts with the caller's bytes; a destination copy
/// starts zeroed and never reads the caller's memory. If the buffer cannot be
/// allocated, access fails. Critical access lends the caller's pointer itself.
#[derive(Debug)]
pub struct RawArray {
    data: *mut u8,
    len: usize,
    copy_in: bool,
}

impl RawArray {
    /// Wraps a caller buffer to be read from.
    ///
    /// # Safety
    ///
    /// If `data` is not null, it must be valid for reads of `len` bytes for
    /// the lifetime of this value. It is never written.
    pub unsafe fn source(data: *const u8, len: usize) -> Self {
        RawArray {
            data: data as *mut u8,
            len,
            copy_in: true,
        }
    }

    /// Wraps a caller buffer to be written to.
    ///
    /// Its prior contents are never read, so it may be uninitialized.
    ///
    /// # Safety
    ///
    /// If `data` is not null, it must be valid for writes of `len` bytes for
    /// the lifetime of this value.
    pub unsafe fn destination(data: *mut u8, len: usize) -> Self {
        RawArray {
            data,
            len,
            copy_in: false,
        }
    }

    fn pointer(&self) -> Option<NonNull<u8>> {
        if self.len == 0 {
            return Some(NonNull::dangling());
        }
        NonNull::new(self.data)
    }

    fn layout(&self) -> Option<Layout> {
        Layout::array::<u8>(self.len).ok()
    }
}

unsafe impl HostArray for RawArray {
    fn len(&self) -> usize {
        self.len
    }

    fn elements(&self) -> Option<NonNull<u8>> {
        let data = self.pointer()?;
        if self.len == 0 {
            return Some(data);
        }

        let layout = self.layout()?;
        let copy = if self.copy_in {
            let copy = NonNull::new(unsafe { alloc::alloc(layout) })?;
            unsafe { ptr::copy_nonoverlapping(data.as_ptr(), copy.as_ptr(), self.len) };
            copy
        } else {
            NonNull::new(unsafe { alloc::alloc_zeroed(layout) })?
        };
        Some(copy)
    }

    fn release_elements(&self, elements: NonNull<u8>, mode: Release) {
        if self.len == 0 {
            return;
        }
        if mode == Release::Commit {
            unsafe { ptr::copy_nonoverlapping(elements.as_ptr(), self.data, self.len) };
        }
        if let Some(layout) = self.layout() {
            unsafe { alloc::dealloc(elements.as_ptr(), layout) };
        }
    }

    fn critical(&self) -> Option<NonNull<u8>> {
        self.pointer()
    }

    fn release_critical(&self, _elements: NonNull<u8>, _mode: Release) {
        // Nothing to unpin: the caller owns the memory.
    }
}

unsafe fn compress_with(
    src: *const u8,
    src_len: size_t,
    dst: *mut u8,
    dst_capacity: size_t,
    level: c_int,
    access: Access,
) -> size_t {
    let source = RawArray::source(src, src_len);
    let destination = RawArray::destination(dst, dst_capacity);
    access::compress_array(&source, &destination, level, access).into_raw()
}

/// Compresses `src_len` bytes from `src` into `dst`, through a copy of both.
///
/// Returns the compressed size, or an error code to be tested with
/// `zstd_bridge_is_error`.
///
/// # Safety
/// - `src` must be valid for `src_len` bytes (can be NULL if `src_len` is 0).
/// - `dst` must be valid for writes of `dst_capacity` bytes (can be NULL if `dst_capacity` is 0).
///   Its prior contents are never read.
#[no_mangle]
pub unsafe extern "C" fn zstd_bridge_compress(
    src: *const u8,
    src_len: size_t,
    dst: *mut u8,
    dst_capacity: size_t,
    level: c_int,
) -> size_t {
    compress_with(src, src_len, dst, dst_capacity, level, Access::Elements)
}

/// Same as `zstd_bridge_compress`, but works on the caller's memory directly.
///
/// # Safety
/// Same as `zstd_bridge_compress`.
#[no_mangle]
pub unsafe extern "C" fn zstd_bridge_compress_critical(
    src: *const u8,
    src_len: size_t,
    dst: *mut u8,
    dst_capacity: size_t,
    level: c_int,
) -> size_t {
    compress_with(src, src_len, dst, dst_capacity, level, Access::Critical)
}

/// Maximum compressed size of `src_size` bytes.
///
/// Saturates to `SIZE_MAX` past the largest input the codec accepts.
#[no_mangle]
pub extern "C" fn zstd_bridge_compress_bound(src_size: size_t) -> size_t {
    bridge::compress_bound(src_size)
}

/// Returns `true` if `code` is an error code.
#[no_mangle]
pub extern "C" fn zstd_bridge_is_error(code: size_t) -> bool {
    bridge::is_error(ResultCode::from_raw(code))
}

/// Returns a new NUL-terminated label for the error in `code`.
///
/// The string must be freed with `zstd_bridge_string_free()`.
/// Returns NULL only if the label cannot be represented as a C string.
#[no_mangle]
pub extern "C" fn zstd_bridge_get_error_name(code: size_t) -> *mut c_char {
    match CString::new(bridge::get_error_name(ResultCode::from_raw(code))) {
        Ok(name) => name.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Frees a string returned by this library.
///
/// # Safety
/// - `string` must come from `zstd_bridge_get_error_name()`, or be NULL.
/// - The string must not be used after this call.
#[no_mangle]
pub unsafe extern "C" fn zstd_bridge_string_free(string: *mut c_char) {
    if !string.is_null() {
        drop(CString::from_raw(string));
    }
}

/// The error discriminant carried by `code`.
#[no_mangle]
pub extern "C" fn zstd_bridge_get_error_code(code: size_t) -> c_uint {
    bridge::get_error_code(ResultCode::from_raw(code))
}

/// Version of the linked codec.
#[no_mangle]
pub extern "C" fn zstd_bridge_version_number() -> c_uint {
    bridge::version_number()
}

macro_rules! error_accessors {
    ($($symbol:ident => $kind:ident,)*) => {
        $(
            #[doc = concat!("Discriminant of `", stringify!($kind), "` errors.")]
            #[no_mangle]
            pub extern "C" fn $symbol() -> c_uint {
                ErrorKind::$kind.code()
            }
        )*
    };
}

error_accessors! {
    zstd_bridge_err_no_error => NoError,
    zstd_bridge_err_generic => Generic,
    zstd_bridge_err_prefix_unknown => PrefixUnknown,
    zstd_bridge_err_version_unsupported => VersionUnsupported,
    zstd_bridge_err_frame_parameter_unsupported => FrameParameterUnsupported,
    zstd_bridge_err_frame_parameter_window_too_large => FrameParameterWindowTooLarge,
    zstd_bridge_err_corruption_detected => CorruptionDetected,
    zstd_bridge_err_checksum_wrong => ChecksumWrong,
    zstd_bridge_err_dictionary_corrupted => DictionaryCorrupted,
    zstd_bridge_err_dictionary_wrong => DictionaryWrong,
    zstd_bridge_err_dictionary_creation_failed => DictionaryCreationFailed,
    zstd_bridge_err_parameter_unsupported => ParameterUnsupported,
    zstd_bridge_err_parameter_out_of_bound => ParameterOutOfBound,
    zstd_bridge_err_table_log_too_large => TableLogTooLarge,
    zstd_bridge_err_max_symbol_value_too_large => MaxSymbolValueTooLarge,
    zstd_bridge_err_max_symbol_value_too_small => MaxSymbolValueTooSmall,
    zstd_bridge_err_stage_wrong => StageWrong,
    zstd_bridge_err_init_missing => InitMissing,
    zstd_bridge_err_memory_allocation => MemoryAllocation,
    zstd_bridge_err_work_space_too_small => WorkSpaceTooSmall,
    zstd_bridge_err_dst_size_too_small => DstSizeTooSmall,
    zstd_bridge_err_src_size_wrong => SrcSizeWrong,
    zstd_bridge_err_dst_buffer_null => DstBufferNull,
}
