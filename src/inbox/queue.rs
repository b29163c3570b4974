use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// An item waiting in an [`Inbox`] and the number of failed attempts so far.
#[derive(Debug, Clone, PartialEq)]
pub struct InboxEntry<T> {
    pub item: T,
    pub attempts: u32,
}

/// A named FIFO work queue. Clones share the same queue.
pub struct Inbox<T> {
    name: &'static str,
    entries: Arc<Mutex<VecDeque<InboxEntry<T>>>>,
}

impl<T> Clone for Inbox<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> Inbox<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Appends a fresh item behind everything already queued.
    pub fn push(&self, item: T) {
        self.push_entry(InboxEntry { item, attempts: 0 });
    }

    /// Appends an entry, keeping its attempt count.
    pub fn push_entry(&self, entry: InboxEntry<T>) {
        self.entries.lock().push_back(entry);
    }

    /// Takes the oldest entry.
    pub fn pop(&self) -> Option<InboxEntry<T>> {
        self.entries.lock().pop_front()
    }

    /// Puts a failed entry back at the pop end so it is the next one taken.
    pub fn requeue(&self, entry: InboxEntry<T>) {
        self.entries.lock().push_front(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Removes and returns every queued entry, oldest first.
    pub fn drain(&self) -> Vec<InboxEntry<T>> {
        self.entries.lock().drain(..).collect()
    }
}
