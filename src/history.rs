// Bounded undo/redo history over whole-canvas snapshots.
// The sequence is never empty and `cursor` always points at what is on screen.

use crate::error::Error;

pub const DEFAULT_CAPACITY: usize = 50;

pub struct History<T> {
    sequence: Vec<T>,
    cursor: usize,
    capacity: usize,
}

impl<T> History<T> {
    /// Seed the history with one snapshot.
    /// A capacity below 2 would let eviction remove the visible entry, so it is refused.
    pub fn new(capacity: usize, seed: T) -> Result<Self, Error> {
        if capacity <= 1 {
            return Err(Error::InvalidCapacity(capacity));
        }
        // capacity comes from user config; the sequence grows on demand instead
        Ok(Self { sequence: vec![seed], cursor: 0, capacity })
    }

    /// Drop everything and start over from `seed` (startup and clear).
    pub fn initialize(&mut self, seed: T) {
        self.sequence.clear();
        self.sequence.push(seed);
        self.cursor = 0;
    }

    /// Record a new snapshot after the cursor, discarding any redo branch.
    pub fn commit(&mut self, snapshot: T) {
        if self.can_redo() {
            let dropped = self.sequence.len() - self.cursor - 1;
            self.sequence.truncate(self.cursor + 1);
            log::debug!("history: discarded {dropped} redo snapshot(s)");
        }
        self.sequence.push(snapshot);
        self.cursor += 1;

        if self.sequence.len() > self.capacity {
            // cursor >= 1 here since capacity >= 2
            self.sequence.remove(0);
            self.cursor -= 1;
            log::debug!("history: evicted oldest snapshot");
        }
        log::debug!("history: commit -> {}/{}", self.cursor, self.sequence.len() - 1);
    }

    /// Step back one snapshot. None means nothing to undo.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.sequence[self.cursor])
    }

    /// Step forward one snapshot. None means nothing to redo.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.sequence[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.sequence.len() - 1
    }

    /// The snapshot currently on screen.
    #[cfg(test)]
    pub fn current(&self) -> &T {
        &self.sequence[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[cfg(test)]
    fn entries(&self) -> &[T] {
        &self.sequence
    }
}
