//! # Ordered entry list.
//!
//! The single data structure behind a channel: `(subscriber, priority)`
//! pairs kept sorted by priority ascending, registration order within a tie.
//!
//! ```text
//! storage:   [ S1(5)  S3(5)  S2(10) ]      index 0 ──► n-1
//! dispatch:  [ S2(10) S3(5)  S1(5)  ]      index n-1 ──► 0
//! ```
//!
//! ## Rules
//! - Each subscriber appears at most once (pointer identity).
//! - Priorities are non-decreasing along the storage order.
//! - Dispatch walks storage backwards: priority descending, and among equal
//!   priorities the most recently placed entry first.
//!
//! ## Re-subscription
//! Placement is split into a scan ([`EntryList::plan`]) and a mutation
//! ([`EntryList::apply`]) so the channel can scan under a shared lock and
//! mutate under an exclusive one. Given the existing index `i` and the
//! insertion index `k` (first entry with a strictly greater priority):
//! - if the subscriber keeps its priority, or `k == i` / `k == i + 1`, the
//!   priority is overwritten in place and the entry does not move;
//! - otherwise a fresh entry is inserted at `k` and the old one is removed,
//!   at `i` when `i < k` and at `i + 1` when the insertion shifted it.

use crate::shapes::Shape;
use crate::subscriber::Subscriber;

/// One registration.
pub(crate) struct Entry<S: Shape, P> {
    pub(crate) subscriber: Subscriber<S>,
    pub(crate) priority: P,
}

impl<S: Shape, P: Clone> Clone for Entry<S, P> {
    fn clone(&self) -> Self {
        Self {
            subscriber: self.subscriber.clone(),
            priority: self.priority.clone(),
        }
    }
}

/// Result of scanning the list for one subscribe call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Placement {
    /// Current index of the subscriber, if registered.
    pub(crate) existing: Option<usize>,
    /// Index of the first entry with a strictly greater priority (or `len`).
    pub(crate) insertion: usize,
}

/// What a subscribe call did to the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// New subscriber appended at its slot.
    Inserted,
    /// Existing subscriber relocated to a new slot.
    Moved,
    /// Existing subscriber kept its slot; priority overwritten.
    Updated,
}

impl Outcome {
    pub(crate) fn as_label(self) -> &'static str {
        match self {
            Outcome::Inserted => "inserted",
            Outcome::Moved => "moved",
            Outcome::Updated => "updated",
        }
    }
}

/// Priority-sorted registrations of one channel.
pub(crate) struct EntryList<S: Shape, P> {
    entries: Vec<Entry<S, P>>,
}

impl<S: Shape, P> EntryList<S, P> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.entries.shrink_to_fit();
    }

    /// Entries in dispatch order (storage order reversed).
    pub(crate) fn iter_dispatch(&self) -> impl Iterator<Item = &Entry<S, P>> {
        self.entries.iter().rev()
    }
}

impl<S: Shape, P: Ord + Clone> EntryList<S, P> {

    pub(crate) fn position(&self, subscriber: &Subscriber<S>) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.subscriber.same(subscriber))
    }

    pub(crate) fn priority_of(&self, subscriber: &Subscriber<S>) -> Option<P> {
        self.position(subscriber)
            .map(|i| self.entries[i].priority.clone())
    }

    /// Index of the first entry whose priority is strictly greater than `priority`.
    pub(crate) fn insertion_index(&self, priority: &P) -> usize {
        self.entries.partition_point(|e| e.priority <= *priority)
    }

    /// Read-only half of a subscribe.
    pub(crate) fn plan(&self, subscriber: &Subscriber<S>, priority: &P) -> Placement {
        Placement {
            existing: self.position(subscriber),
            insertion: self.insertion_index(priority),
        }
    }

    /// Mutating half of a subscribe; `placement` must come from [`Self::plan`]
    /// on the unchanged list.
    pub(crate) fn apply(
        &mut self,
        placement: Placement,
        subscriber: Subscriber<S>,
        priority: P,
    ) -> Outcome {
        let Placement {
            existing,
            insertion,
        } = placement;

        if let Some(i) = existing {
            let entry = &mut self.entries[i];
            if entry.priority == priority || insertion == i || insertion == i + 1 {
                entry.priority = priority;
                return Outcome::Updated;
            }
        }

        self.entries.insert(
            insertion,
            Entry {
                subscriber,
                priority,
            },
        );

        match existing {
            Some(i) => {
                let stale = if i < insertion { i } else { i + 1 };
                self.entries.remove(stale);
                Outcome::Moved
            }
            None => Outcome::Inserted,
        }
    }

    /// Scan and mutate in one step. The channel splits these across lock
    /// states instead.
    #[cfg(test)]
    pub(crate) fn upsert(&mut self, subscriber: Subscriber<S>, priority: P) -> Outcome {
        let placement = self.plan(&subscriber, &priority);
        self.apply(placement, subscriber, priority)
    }

    /// Removes the subscriber; returns `false` if it was not registered.
    pub(crate) fn remove(&mut self, subscriber: &Subscriber<S>) -> bool {
        match self.position(subscriber) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    /// Owned copy of the entries in dispatch order.
    pub(crate) fn snapshot(&self) -> Vec<Entry<S, P>> {
        self.iter_dispatch().cloned().collect()
    }
}
