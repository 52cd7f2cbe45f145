//! Synchronous signals.
//!
//! A [`Signal`] fans one value out to every connected slot, in connection
//! order, on the emitting thread. `FormSignals` in the `terrace` crate keeps
//! one signal per form notification so several observers can watch the same
//! form.
//!
//! Slots are snapshotted before they run, so a slot may connect to or
//! disconnect from the signal that is calling it. The change applies from
//! the next emission.
//!
//! # Example
//!
//! ```
//! use std::ops::Range;
//! use terrace_core::Signal;
//!
//! let sections_added = Signal::<Range<usize>>::new();
//! let id = sections_added.connect(|sections| {
//!     println!("sections {sections:?} appeared");
//! });
//!
//! sections_added.emit(0..2);
//! assert!(sections_added.disconnect(id));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Handle to one connected slot, for [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A value broadcast to any number of slots.
///
/// `Args` is the payload type; slots receive it by reference.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Creates a signal with no slots.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connects `slot`, returning a handle that can disconnect it.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.slots.lock().insert(Arc::new(slot));
        tracing::trace!(target: targets::SIGNAL, ?id, "slot connected");
        id
    }

    /// Disconnects the slot behind `id`. Returns `false` if it was already
    /// gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// Suppresses (or resumes) emission.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Whether emission is suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Calls every slot with `args`. Does nothing while blocked.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "blocked, emit skipped");
            return;
        }

        let slots: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, slots = slots.len(), "emit");
        for slot in slots {
            slot(&args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::Range;

    #[test]
    fn test_slots_run_in_connection_order() {
        let signal = Signal::<Range<usize>>::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for name in ["widget", "inspector"] {
            let log = log.clone();
            signal.connect(move |range| log.lock().push(format!("{name} {range:?}")));
        }
        signal.emit(1..3);

        assert_eq!(*log.lock(), vec!["widget 1..3", "inspector 1..3"]);
    }

    #[test]
    fn test_blocked_signal_drops_payload() {
        let signal = Signal::<Vec<usize>>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        signal.connect(move |rows| seen_clone.lock().extend(rows.iter().copied()));

        signal.set_blocked(true);
        assert!(signal.is_blocked());
        signal.emit(vec![0, 1]);
        signal.set_blocked(false);
        signal.emit(vec![4]);

        assert_eq!(*seen.lock(), vec![4]);
    }

    #[test]
    fn test_disconnect_stops_delivery() {
        let signal = Signal::<usize>::new();
        let hits = Arc::new(Mutex::new(0));
        let hits_clone = hits.clone();
        let id = signal.connect(move |_| *hits_clone.lock() += 1);

        signal.emit(0);
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(1);

        assert_eq!(*hits.lock(), 1);
    }

    #[test]
    fn test_one_shot_slot_disconnects_itself() {
        let signal = Arc::new(Signal::<()>::new());
        let hits = Arc::new(Mutex::new(0));
        let own_id = Arc::new(Mutex::new(None));

        let (signal_clone, hits_clone, id_clone) = (signal.clone(), hits.clone(), own_id.clone());
        let id = signal.connect(move |_| {
            *hits_clone.lock() += 1;
            if let Some(id) = id_clone.lock().take() {
                signal_clone.disconnect(id);
            }
        });
        *own_id.lock() = Some(id);

        signal.emit(());
        signal.emit(());

        assert_eq!(*hits.lock(), 1);
    }
}
