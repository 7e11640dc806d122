//! Container
//!
//! A capacity-bounded set of items representing one packed output group (one
//! disc). `add` is the only gate that enforces the ceiling: a container never
//! holds more than `max_size` bytes.

use crate::error::PackError;
use crate::types::{ByteSize, Item};
use std::collections::HashMap;

/// Items assigned to one disc, with a running size total.
#[derive(Debug, Clone)]
pub struct Container {
    /// Held items in insertion order
    items: Vec<Item>,
    /// Index: item id -> position in `items`
    index: HashMap<String, usize>,
    size: ByteSize,
    max_size: u64,
}

impl Container {
    /// Create an empty container with the given ceiling.
    pub fn new(max_size: u64) -> Self {
        Container {
            items: Vec::new(),
            index: HashMap::new(),
            size: 0,
            max_size,
        }
    }

    /// Add an item, keeping a running size total.
    ///
    /// Fails with `CapacityExceeded` when the new total would be above
    /// `max_size`; the container is left untouched in that case. Adding an id
    /// that is already held replaces its recorded size.
    pub fn add(&mut self, id: impl Into<String>, size: ByteSize) -> Result<(), PackError> {
        let id = id.into();
        let previous = self.index.get(&id).map(|&pos| self.items[pos].size);
        let attempted = self
            .size
            .saturating_sub(previous.unwrap_or(0))
            .saturating_add(size);

        if i128::from(attempted) > i128::from(self.max_size) {
            return Err(PackError::CapacityExceeded {
                attempted,
                max_size: self.max_size,
            });
        }

        match self.index.get(&id) {
            Some(&pos) => self.items[pos].size = size,
            None => {
                self.index.insert(id.clone(), self.items.len());
                self.items.push(Item { id, size });
            }
        }
        self.size = attempted;
        Ok(())
    }

    /// Remove and return the most recently added item.
    pub fn pop_last(&mut self) -> Option<Item> {
        let item = self.items.pop()?;
        self.index.remove(&item.id);
        self.size -= item.size;
        Some(item)
    }

    /// Number of held items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Held item identifiers, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Current total of held item sizes.
    pub fn size(&self) -> ByteSize {
        self.size
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Bytes still available before reaching `max_size`.
    pub fn remaining(&self) -> u64 {
        let remaining = i128::from(self.max_size) - i128::from(self.size);
        u64::try_from(remaining.max(0)).unwrap_or(u64::MAX)
    }
}
