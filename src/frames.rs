//! Book-keeping for frame callbacks handed to the browser.
//!
//! A callback stays in `live` until it fires or is cancelled. Cancelling drops
//! it straight away. A fired callback is still on the stack while it runs, so
//! it moves to `spent` and is released when the next frame fires.

use fnv::FnvHashMap;

pub struct FrameSlots<T> {
    next: u64,
    live: FnvHashMap<u64, (i32, T)>,
    spent: Vec<T>,
}

impl<T> Default for FrameSlots<T> {
    fn default() -> Self {
        Self {
            next: 0,
            live: FnvHashMap::default(),
            spent: Vec::new(),
        }
    }
}

impl<T> FrameSlots<T> {
    /// Reserve a key for a request about to be made. Never returns 0.
    pub fn next_key(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    /// Record a pending request under `key` with the browser's `handle`.
    pub fn insert(&mut self, key: u64, handle: i32, value: T) {
        self.live.insert(key, (handle, value));
    }

    /// Forget a pending request, handing back its browser handle and value.
    pub fn cancel(&mut self, key: u64) -> Option<(i32, T)> {
        self.live.remove(&key)
    }

    /// Mark `key` as firing. Returns values from earlier frames, which are
    /// finished and safe to drop.
    pub fn retire(&mut self, key: u64) -> Vec<T> {
        let finished = std::mem::take(&mut self.spent);
        if let Some((_, value)) = self.live.remove(&key) {
            self.spent.push(value);
        }
        finished
    }

    pub fn live_len(&self) -> usize {
        self.live.len()
    }

    pub fn spent_len(&self) -> usize {
        self.spent.len()
    }
}
