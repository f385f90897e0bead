// -*- mode: rust; -*-
//
// This file is part of bandersnatch.
// See LICENSE for licensing information.

//! The process-wide Not-a-Point (NaP) policy.
//!
//! Zero-initialized points and a handful of exceptional group-law inputs
//! produce NaP values: sentinels whose coordinates fail every curve
//! check.  Arithmetic propagates NaPs silently; only boundary operations
//! (comparisons, predicates, serialization) report them, by invoking a
//! single process-wide handler.
//!
//! The handler receives a human-readable reason, the boolean that the
//! interrupted comparison or predicate should return, and the offending
//! points; whatever it returns is returned by the caller in turn.  The
//! default handler ignores the event and returns `false`.  Handler
//! changes are rare and go through a mutex; the hot path never takes the
//! lock except when a fault is actually being reported.

use core::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, Mutex};

/// The signature of a NaP handler.
///
/// Arguments are the reason for the fault, the value the interrupted
/// boolean operation would return for a NaP, and the points involved.
pub type NapHandler = Arc<dyn Fn(&str, bool, &[&dyn Debug]) -> bool + Send + Sync>;

static CURRENT_HANDLER: LazyLock<Mutex<NapHandler>> =
    LazyLock::new(|| Mutex::new(silent_nap_handler()));

/// The default handler: ignore the fault and return `false`.
pub fn silent_nap_handler() -> NapHandler {
    Arc::new(|_, _, _| false)
}

/// A handler that panics with the fault reason.  Useful while debugging
/// code suspected of operating on invalid points.
pub fn panicking_nap_handler() -> NapHandler {
    Arc::new(|reason, _, _| panic!("{}", reason))
}

/// Install a new process-wide NaP handler, returning the previous one
/// so callers can stack and later restore it.
pub fn set_nap_handler(handler: NapHandler) -> NapHandler {
    let mut current = CURRENT_HANDLER.lock().unwrap();
    core::mem::replace(&mut *current, handler)
}

/// Read the currently installed NaP handler.
pub fn nap_handler() -> NapHandler {
    CURRENT_HANDLER.lock().unwrap().clone()
}

/// Report a NaP to the installed handler.
pub(crate) fn handle_naps(reason: &str, comparison: bool, points: &[&dyn Debug]) -> bool {
    let handler = nap_handler();
    handler(reason, comparison, points)
}

/// Restores the previous handler even if the closure panics.
struct HandlerGuard(Option<NapHandler>);

impl Drop for HandlerGuard {
    fn drop(&mut self) {
        if let Some(old) = self.0.take() {
            set_nap_handler(old);
        }
    }
}

/// Run `f` and report whether any NaP was encountered while it ran.
///
/// A recording handler is installed for the duration of the call; it
/// sets a flag and then delegates to the previously installed handler,
/// so the ambient policy still applies.
pub fn was_invalid_point_encountered<F: FnOnce()>(f: F) -> bool {
    let flag = Arc::new(AtomicBool::new(false));
    let previous = nap_handler();

    let recorder: NapHandler = {
        let flag = flag.clone();
        let previous = previous.clone();
        Arc::new(move |reason, comparison, points| {
            flag.store(true, Ordering::SeqCst);
            previous(reason, comparison, points)
        })
    };

    let old = set_nap_handler(recorder);
    let _guard = HandlerGuard(Some(old));
    f();
    flag.load(Ordering::SeqCst)
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    /// Tests that install handlers must not run concurrently with each
    /// other; they serialize on this lock.
    static HANDLER_LOCK: Mutex<()> = Mutex::new(());

    /// Take the serialization lock, shrugging off poison from a test
    /// that panicked on purpose while holding it.
    pub(crate) fn handler_lock() -> std::sync::MutexGuard<'static, ()> {
        HANDLER_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[test]
    fn default_handler_is_silent() {
        let _lock = handler_lock();
        assert!(!handle_naps("test fault", true, &[]));
    }

    #[test]
    fn set_returns_previous_handler() {
        let _lock = handler_lock();
        let always_true: NapHandler = Arc::new(|_, _, _| true);
        let old = set_nap_handler(always_true);
        assert!(handle_naps("test fault", false, &[]));
        set_nap_handler(old);
        assert!(!handle_naps("test fault", false, &[]));
    }

    #[test]
    fn recording_handler_sets_flag_and_delegates() {
        let _lock = handler_lock();
        let seen = was_invalid_point_encountered(|| {
            handle_naps("synthetic fault", true, &[]);
        });
        assert!(seen);

        let seen = was_invalid_point_encountered(|| {});
        assert!(!seen);
    }

    #[test]
    fn recording_handler_restores_previous() {
        let _lock = handler_lock();
        let always_true: NapHandler = Arc::new(|_, _, _| true);
        let old = set_nap_handler(always_true);
        let seen = was_invalid_point_encountered(|| {
            // The delegate is the always-true handler.
            assert!(handle_naps("synthetic fault", false, &[]));
        });
        assert!(seen);
        // The always-true handler must be back in place.
        assert!(handle_naps("synthetic fault", false, &[]));
        set_nap_handler(old);
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn panicking_handler_panics() {
        // The guard restores the silent handler during unwinding.
        let _lock = handler_lock();
        let old = set_nap_handler(panicking_nap_handler());
        let _guard = HandlerGuard(Some(old));
        handle_naps("boom", false, &[]);
    }
}
