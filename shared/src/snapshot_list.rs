use std::collections::VecDeque;

use thiserror::Error;

/// Errors that can occur during SnapshotList operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotListError {
    /// Attempted to insert a second entry for a timestamp that is already buffered
    #[error("Duplicate timestamp {timestamp_ms}ms not allowed in SnapshotList")]
    DuplicateTimestamp { timestamp_ms: u64 },
}

/// Bounded list of items kept in ascending timestamp order.
///
/// New items almost always arrive in order, so every search scans from the
/// back. When the list grows past its capacity the oldest entry is evicted.
pub struct SnapshotList<T> {
    list: VecDeque<(u64, T)>,
    capacity: usize,
}

impl<T> SnapshotList<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            list: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn front(&self) -> Option<&(u64, T)> {
        self.list.front()
    }

    pub fn back(&self) -> Option<&(u64, T)> {
        self.list.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(u64, T)> {
        self.list.iter()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Inserts an item at its ordered position, scanning from the back.
    /// Returns the entry evicted to respect the capacity, if any.
    /// Returns an error if the timestamp is already present.
    pub fn try_insert_scan_from_back(
        &mut self,
        timestamp_ms: u64,
        item: T,
    ) -> Result<Option<(u64, T)>, SnapshotListError> {
        let mut index = self.list.len();

        loop {
            if index == 0 {
                // made it all the way through, insert at front and be done
                break;
            }

            let old_timestamp = self.list[index - 1].0;
            if old_timestamp == timestamp_ms {
                return Err(SnapshotListError::DuplicateTimestamp { timestamp_ms });
            }
            if old_timestamp < timestamp_ms {
                break;
            }

            index -= 1;
        }

        self.list.insert(index, (timestamp_ms, item));

        if self.list.len() > self.capacity {
            return Ok(self.list.pop_front());
        }
        Ok(None)
    }

    /// Replaces the item stored for `timestamp_ms`, returning the previous
    /// one, or `None` if nothing is stored for that timestamp.
    pub fn replace_scan_from_back(&mut self, timestamp_ms: u64, item: T) -> Option<T> {
        for (old_timestamp, old_item) in self.list.iter_mut().rev() {
            if *old_timestamp == timestamp_ms {
                return Some(std::mem::replace(old_item, item));
            }
            if *old_timestamp < timestamp_ms {
                return None;
            }
        }
        None
    }

    /// Drops every entry stamped strictly before `timestamp_ms`, always
    /// keeping at least the newest entry. Returns how many were removed.
    pub fn remove_older_than(&mut self, timestamp_ms: u64) -> usize {
        let mut removed = 0;
        while self.list.len() > 1 {
            match self.list.front() {
                Some((old_timestamp, _)) if *old_timestamp < timestamp_ms => {
                    self.list.pop_front();
                    removed += 1;
                }
                _ => break,
            }
        }
        removed
    }
}
