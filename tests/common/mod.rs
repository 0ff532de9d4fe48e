#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::ptr::{self, NonNull};

use zstd_bridge::access::{HostArray, Release};

/// What happened to a `ManagedArray`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Copied,
    CopyReleased(Release),
    Pinned,
    Unpinned(Release),
}

/// An array living on a simulated managed heap.
///
/// Copying access hands out a separate heap copy; critical access hands out
/// the storage itself. Both fail once the configured number of grants is
/// used up.
pub struct ManagedArray {
    storage: RefCell<Vec<u8>>,
    grants: Cell<usize>,
    events: RefCell<Vec<Event>>,
}

impl ManagedArray {
    pub fn new(data: Vec<u8>) -> Self {
        ManagedArray::with_grants(data, usize::MAX)
    }

    pub fn with_grants(data: Vec<u8>, grants: usize) -> Self {
        ManagedArray {
            storage: RefCell::new(data),
            grants: Cell::new(grants),
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn zeroed(len: usize) -> Self {
        ManagedArray::new(vec![0; len])
    }

    pub fn contents(&self) -> Vec<u8> {
        self.storage.borrow().clone()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    fn take_grant(&self) -> bool {
        match self.grants.get().checked_sub(1) {
            Some(left) => {
                self.grants.set(left);
                true
            }
            None => false,
        }
    }
}

unsafe impl HostArray for ManagedArray {
    fn len(&self) -> usize {
        self.storage.borrow().len()
    }

    fn elements(&self) -> Option<NonNull<u8>> {
        if !self.take_grant() {
            return None;
        }
        let copy: Box<[u8]> = self.storage.borrow().as_slice().into();
        self.events.borrow_mut().push(Event::Copied);
        NonNull::new(Box::into_raw(copy) as *mut u8)
    }

    fn release_elements(&self, elements: NonNull<u8>, mode: Release) {
        let len = self.len();
        let copy = unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(elements.as_ptr(), len)) };
        if mode == Release::Commit {
            self.storage.borrow_mut().copy_from_slice(&copy);
        }
        self.events.borrow_mut().push(Event::CopyReleased(mode));
    }

    fn critical(&self) -> Option<NonNull<u8>> {
        if !self.take_grant() {
            return None;
        }
        self.events.borrow_mut().push(Event::Pinned);
        NonNull::new(self.storage.borrow_mut().as_mut_ptr())
    }

    fn release_critical(&self, _elements: NonNull<u8>, mode: Release) {
        self.events.borrow_mut().push(Event::Unpinned(mode));
    }
}

/// Deterministic bytes that zstd cannot shrink.
pub fn noise(len: usize) -> Vec<u8> {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}

/// Highly compressible text.
pub fn text(len: usize) -> Vec<u8> {
    b"This is a larger string that should be highly compressible. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

/// Checks that `compressed` decompresses to `data`.
pub fn assert_round_trip(data: &[u8], compressed: &[u8]) {
    let mut decompressed = vec![0u8; data.len()];
    let len = zstd_safe::decompress(&mut decompressed[..], compressed).unwrap();
    assert_eq!(len, data.len());
    assert!(decompressed == data);
}
