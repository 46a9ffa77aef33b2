// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Competing-gesture suppression across recognizers that share a pointer space.
//!
//! Several recognizers can be bound on one page (for example, one per row of a list). While a
//! gesture is live on one of them, the others must not start competing gestures from the same
//! pointer or touch stream. [`ObserverRegistry`] is the explicit service object that tracks this:
//! recognizers register to obtain a [`ContextId`], a recognizer whose press starts a gesture calls
//! [`ObserverRegistry::suppress_others`], and the gesture's end calls
//! [`ObserverRegistry::release`].
//!
//! Suppression is counted per suppressor, so overlapping gestures (a mouse drag on one element
//! and a touch drag on another) each restore only what they suppressed.
//!
//! ```
//! use understory_event_state::observer::ObserverRegistry;
//!
//! let mut registry = ObserverRegistry::new();
//! let a = registry.register();
//! let b = registry.register();
//!
//! registry.suppress_others(a);
//! assert!(registry.is_suppressed(b));
//! assert!(!registry.is_suppressed(a));
//!
//! registry.release(a);
//! registry.release(a); // idempotent
//! assert!(!registry.is_suppressed(b));
//! ```

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

/// Identity of a recognizer context within an [`ObserverRegistry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

impl ContextId {
    /// Raw numeric value, unique within the registry that issued it.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Process-wide bookkeeping of live gestures and the contexts they suppress.
#[derive(Clone, Debug, Default)]
pub struct ObserverRegistry {
    next_id: u64,
    contexts: HashSet<ContextId>,
    /// Live gesture token → contexts suppressed on its behalf.
    entries: HashMap<ContextId, SmallVec<[ContextId; 4]>>,
    /// Suppressed context → number of outstanding suppressions.
    suppressed: HashMap<ContextId, u32>,
}

impl ObserverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new context and return its identity.
    pub fn register(&mut self) -> ContextId {
        self.next_id += 1;
        let id = ContextId(self.next_id);
        self.contexts.insert(id);
        id
    }

    /// Forget a context, releasing anything it suppressed.
    ///
    /// Unregistering an unknown context is a no-op.
    pub fn unregister(&mut self, id: ContextId) {
        self.release(id);
        self.contexts.remove(&id);
        self.suppressed.remove(&id);
        for suppressed in self.entries.values_mut() {
            suppressed.retain(|other| *other != id);
        }
    }

    /// Whether `id` is currently registered.
    pub fn contains(&self, id: ContextId) -> bool {
        self.contexts.contains(&id)
    }

    /// Number of registered contexts.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Whether no contexts are registered.
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Mark `id` inactive for competing recognition.
    ///
    /// Calls nest: each `suppress` needs a matching [`restore`](Self::restore).
    pub fn suppress(&mut self, id: ContextId) {
        if self.contexts.contains(&id) {
            *self.suppressed.entry(id).or_insert(0) += 1;
        }
    }

    /// Undo one [`suppress`](Self::suppress) of `id`.
    ///
    /// Restoring a context that is not suppressed is a no-op.
    pub fn restore(&mut self, id: ContextId) {
        if let Some(count) = self.suppressed.get_mut(&id) {
            debug_assert!(*count > 0, "zero suppression counts are removed eagerly");
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.suppressed.remove(&id);
            }
        }
    }

    /// Whether recognition on `id` is currently suppressed by another live gesture.
    pub fn is_suppressed(&self, id: ContextId) -> bool {
        self.suppressed.contains_key(&id)
    }

    /// Whether `id` currently holds a live suppression entry.
    pub fn is_active(&self, id: ContextId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Suppress every other registered context on behalf of the live gesture on `active`.
    ///
    /// A second call for the same `active` token before [`release`](Self::release) is a no-op.
    pub fn suppress_others(&mut self, active: ContextId) {
        if self.entries.contains_key(&active) || !self.contexts.contains(&active) {
            return;
        }
        let others: SmallVec<[ContextId; 4]> = self
            .contexts
            .iter()
            .copied()
            .filter(|id| *id != active)
            .collect();
        for id in &others {
            *self.suppressed.entry(*id).or_insert(0) += 1;
        }
        self.entries.insert(active, others);
    }

    /// Remove the entry for `active`, restoring every context it suppressed.
    ///
    /// Safe to call repeatedly; only the first call after
    /// [`suppress_others`](Self::suppress_others) has an effect.
    pub fn release(&mut self, active: ContextId) {
        if let Some(others) = self.entries.remove(&active) {
            for id in others {
                self.restore(id);
            }
        }
    }
}
