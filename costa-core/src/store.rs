//! Data-access collaborator boundary.
//!
//! The query layer only ever consumes snapshots from `fetch_all`; it never
//! mutates through the store itself. Callers mutate, then re-fetch.
//! `MemoryStore` is the in-process reference implementation backing the CLI
//! and tests; a hosted database adapter would implement the same trait.

use crate::item::{CatalogItem, Flag};
use crate::reorder::ReorderAssignment;
use anyhow::{Result, bail};
use std::collections::HashMap;

pub trait CatalogStore {
    /// Fresh snapshot of every item, ascending id order.
    fn fetch_all(&self) -> Vec<CatalogItem>;

    fn fetch_one(&self, id: u32) -> Option<CatalogItem>;

    /// Insert a new item. The item's id must be unused.
    fn create(&mut self, item: CatalogItem) -> Result<()>;

    /// Replace the stored item carrying `item.id`.
    fn update(&mut self, item: CatalogItem) -> Result<()>;

    fn set_flag(&mut self, id: u32, flag: Flag, value: bool) -> Result<()>;

    /// Apply a reorder batch all-or-nothing: either every pair refers to a
    /// stored item and all sort_orders change, or nothing changes.
    fn batch_reorder(&mut self, batch: &[ReorderAssignment]) -> Result<()>;

    fn delete(&mut self, id: u32) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<u32, CatalogItem>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<CatalogItem>) -> Result<Self> {
        let mut store = Self::new();
        for item in items {
            store.create(item)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogStore for MemoryStore {
    fn fetch_all(&self) -> Vec<CatalogItem> {
        let mut all: Vec<CatalogItem> = self.items.values().cloned().collect();
        all.sort_by_key(|item| item.id);
        all
    }

    fn fetch_one(&self, id: u32) -> Option<CatalogItem> {
        self.items.get(&id).cloned()
    }

    fn create(&mut self, item: CatalogItem) -> Result<()> {
        if self.items.contains_key(&item.id) {
            bail!("duplicate item id {}", item.id);
        }
        self.items.insert(item.id, item);
        Ok(())
    }

    fn update(&mut self, item: CatalogItem) -> Result<()> {
        if !self.items.contains_key(&item.id) {
            bail!("no item with id {}", item.id);
        }
        self.items.insert(item.id, item);
        Ok(())
    }

    fn set_flag(&mut self, id: u32, flag: Flag, value: bool) -> Result<()> {
        let Some(item) = self.items.get_mut(&id) else {
            bail!("no item with id {id}");
        };
        match flag {
            Flag::Featured => item.featured = value,
            Flag::Active => item.active = value,
        }
        Ok(())
    }

    fn batch_reorder(&mut self, batch: &[ReorderAssignment]) -> Result<()> {
        // Validate the whole batch before touching anything.
        for pair in batch {
            if !self.items.contains_key(&pair.id) {
                bail!("reorder batch refers to missing id {}", pair.id);
            }
        }
        for pair in batch {
            if let Some(item) = self.items.get_mut(&pair.id) {
                item.sort_order = pair.sort_order;
            }
        }
        Ok(())
    }

    fn delete(&mut self, id: u32) -> Result<()> {
        if self.items.remove(&id).is_none() {
            bail!("no item with id {id}");
        }
        Ok(())
    }
}
