//! Comparable callback handles for component arguments.
//!
//! ## Usage
//!
//! Store a [`CallbackWith`] in an args struct to hand a control its outbound
//! channel. Handles compare by identity so args stay `PartialEq` without
//! comparing closures.

use std::sync::Arc;

/// Stable, comparable callback handle for `Fn(T) -> R`.
///
/// Handles compare by identity (`Arc::ptr_eq`), so a clone equals its source
/// and two separately built handles never do.
///
/// ```
/// use std::sync::{
///     Arc,
///     atomic::{AtomicU32, Ordering},
/// };
/// use tdbu_ui::CallbackWith;
///
/// let total = Arc::new(AtomicU32::new(0));
/// let sink = {
///     let total = Arc::clone(&total);
///     CallbackWith::new(move |v: u32| {
///         total.fetch_add(v, Ordering::SeqCst);
///     })
/// };
/// sink.call(3);
/// sink.clone().call(4);
/// assert_eq!(total.load(Ordering::SeqCst), 7);
/// ```
pub struct CallbackWith<T, R = ()> {
    handler: Arc<dyn Fn(T) -> R + Send + Sync>,
}

impl<T, R> CallbackWith<T, R> {
    /// Create a callback handle from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Invoke the callback with an argument.
    pub fn call(&self, value: T) -> R {
        (self.handler)(value)
    }
}

impl<T: 'static> CallbackWith<T> {
    /// A callback that drops its argument.
    pub fn noop() -> Self {
        Self::new(|_| {})
    }
}

impl<T: 'static> Default for CallbackWith<T> {
    fn default() -> Self {
        Self::noop()
    }
}

impl<T, R, F> From<F> for CallbackWith<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

impl<T, R> std::fmt::Debug for CallbackWith<T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackWith").finish_non_exhaustive()
    }
}
