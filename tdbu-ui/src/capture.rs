//! Pointer capture for drag sessions.
//!
//! While a control is being dragged it must keep receiving move and release
//! events even after the pointer leaves its bounds. Instead of registering ad
//! hoc global listeners, a control acquires a [`CaptureGuard`] from the shared
//! [`PointerCapture`] registry when a drag starts. The host routes every move
//! and release to the owners currently in the registry.
//!
//! The guard removes its registration when dropped, so the registration is
//! released on pointer-up and also when the control is torn down mid-drag.
//!
//! ```
//! use tdbu_ui::capture::{CaptureOwner, PointerCapture};
//!
//! let capture = PointerCapture::new();
//! let owner = CaptureOwner::next();
//! {
//!     let _guard = capture.acquire(owner);
//!     assert!(capture.is_captured_by(owner));
//! }
//! assert!(capture.is_empty());
//! ```

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use parking_lot::Mutex;
use slotmap::SlotMap;
use smallvec::SmallVec;
use tracing::trace;

slotmap::new_key_type! {
    /// Key of one capture registration.
    pub struct CaptureKey;
}

/// Identity of a control that can capture the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaptureOwner(u64);

impl CaptureOwner {
    /// Allocates a fresh process-unique owner id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Shared registry of controls that currently capture the pointer.
///
/// Cloning yields another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct PointerCapture {
    table: Arc<Mutex<SlotMap<CaptureKey, CaptureOwner>>>,
}

impl PointerCapture {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `owner` until the returned guard is dropped.
    pub fn acquire(&self, owner: CaptureOwner) -> CaptureGuard {
        let key = self.table.lock().insert(owner);
        trace!(owner = owner.raw(), "pointer capture acquired");
        CaptureGuard {
            table: Arc::clone(&self.table),
            key,
            owner,
        }
    }

    /// Owners that should receive global move/release events, in no
    /// particular order.
    pub fn owners(&self) -> SmallVec<[CaptureOwner; 2]> {
        self.table.lock().values().copied().collect()
    }

    /// Returns true if `owner` holds at least one registration.
    pub fn is_captured_by(&self, owner: CaptureOwner) -> bool {
        self.table.lock().values().any(|o| *o == owner)
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    /// Returns true if nothing captures the pointer.
    pub fn is_empty(&self) -> bool {
        self.table.lock().is_empty()
    }
}

impl PartialEq for PointerCapture {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.table, &other.table)
    }
}

impl Eq for PointerCapture {}

/// A live capture registration. Dropping it releases the registration.
#[must_use = "dropping the guard releases the pointer capture immediately"]
#[derive(Debug)]
pub struct CaptureGuard {
    table: Arc<Mutex<SlotMap<CaptureKey, CaptureOwner>>>,
    key: CaptureKey,
    owner: CaptureOwner,
}

impl CaptureGuard {
    /// The owner this guard registered.
    pub fn owner(&self) -> CaptureOwner {
        self.owner
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        if self.table.lock().remove(self.key).is_some() {
            trace!(owner = self.owner.raw(), "pointer capture released");
        }
    }
}
