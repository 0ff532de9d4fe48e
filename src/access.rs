//! Borrowing arrays owned by a host runtime for the duration of one call.
//!
//! A host runtime with a managed heap can lend an array to native code in two
//! ways:
//!
//! * [`Access::Elements`]: the host hands out the array contents, possibly as
//!   a copy. Changes reach the array only if the access is committed.
//! * [`Access::Critical`]: the host pins the array in place and hands out a
//!   pointer to it. This avoids the copy, but the host must not move the
//!   array, nor run anything that might, until the pin is released.
//!
//! Either way, acquiring access can fail. [`compress_array`] turns such a
//! failure into the `MemoryAllocation` result code, after releasing whatever
//! it did acquire.

use std::ptr::NonNull;
use std::slice;

use crate::bridge::{self, ResultCode};
use crate::error::ErrorKind;

/// How to borrow host arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Borrow the contents, possibly through a copy.
    Elements,
    /// Pin the arrays in place.
    Critical,
}

/// What to do with an access when releasing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Write changes back to the array.
    Commit,
    /// Discard changes.
    Abort,
}

/// An array owned by a host runtime.
///
/// # Safety
///
/// A pointer returned by [`elements`](HostArray::elements) or
/// [`critical`](HostArray::critical) must be valid for reads and writes of
/// [`len`](HostArray::len) bytes, and must not be accessed by anyone else,
/// until it is passed back to the matching release method.
pub unsafe trait HostArray {
    /// Number of bytes in the array.
    fn len(&self) -> usize;

    /// Returns `true` if the array holds no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lends the array contents, possibly through a copy.
    fn elements(&self) -> Option<NonNull<u8>>;

    /// Ends an access obtained from [`elements`](HostArray::elements).
    fn release_elements(&self, elements: NonNull<u8>, mode: Release);

    /// Pins the array and lends a pointer to it.
    fn critical(&self) -> Option<NonNull<u8>>;

    /// Ends an access obtained from [`critical`](HostArray::critical).
    fn release_critical(&self, elements: NonNull<u8>, mode: Release);
}

/// An access to a host array, released when dropped.
struct Lease<'a, A: HostArray + ?Sized> {
    array: &'a A,
    elements: NonNull<u8>,
    access: Access,
    mode: Release,
}

impl<'a, A: HostArray + ?Sized> Lease<'a, A> {
    /// Acquires access to `array`, to be released with `Release::Abort`
    /// unless [`commit`](Self::commit) is called.
    fn acquire(array: &'a A, access: Access) -> Option<Self> {
        let elements = match access {
            Access::Elements => array.elements(),
            Access::Critical => array.critical(),
        }?;

        Some(Lease {
            array,
            elements,
            access,
            mode: Release::Abort,
        })
    }

    fn commit(&mut self) {
        self.mode = Release::Commit;
    }

    fn as_slice(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self.elements.as_ptr(), self.array.len()) }
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { slice::from_raw_parts_mut(self.elements.as_ptr(), self.array.len()) }
    }
}

impl<A: HostArray + ?Sized> Drop for Lease<'_, A> {
    fn drop(&mut self) {
        match self.access {
            Access::Elements => self.array.release_elements(self.elements, self.mode),
            Access::Critical => self.array.release_critical(self.elements, self.mode),
        }
    }
}

/// Compresses the contents of `source` into `destination`.
///
/// Both arrays are borrowed with the given `access` for the duration of the
/// call. `source` is always released without copying back; `destination` is
/// committed once the codec ran, whatever it returned.
///
/// If either array cannot be borrowed, the other one is released and the
/// `MemoryAllocation` result code is returned.
///
/// `source` and `destination` must be different arrays.
pub fn compress_array<S, D>(source: &S, destination: &D, level: i32, access: Access) -> ResultCode
where
    S: HostArray + ?Sized,
    D: HostArray + ?Sized,
{
    let source = Lease::acquire(source, access);
    let destination = Lease::acquire(destination, access);

    let (source, mut destination) = match (source, destination) {
        (Some(source), Some(destination)) => (source, destination),
        (source, destination) => {
            log::warn!(
                "{:?} access failed (source: {}, destination: {})",
                access,
                if source.is_some() { "ok" } else { "failed" },
                if destination.is_some() { "ok" } else { "failed" },
            );
            return ErrorKind::MemoryAllocation.result_code();
        }
    };

    let code = bridge::compress(source.as_slice(), destination.as_mut_slice(), level);
    destination.commit();
    code
}
