//! Memory Store Module
//!
//! In-process store with the same observable semantics as the DynamoDB table:
//! overwriting puts, upserting updates, and paged scans in key order.

use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::store::{key_of, shoe_id_of, AttributePath, Item, ScanPage, ShoeStore, SHOE_ID};

/// Default number of records returned per scan page
pub const DEFAULT_PAGE_SIZE: usize = 100;

// == Memory Store ==
/// Records kept in a `BTreeMap` keyed by `shoeId`.
#[derive(Debug)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, Item>>,
    /// Maximum number of records per scan page
    page_size: usize,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store returning at most `page_size` records per scan.
    pub fn new(page_size: usize) -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            page_size: page_size.max(1),
        }
    }

    // == Length ==
    /// Returns the current number of records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[async_trait]
impl ShoeStore for MemoryStore {
    async fn get(&self, shoe_id: &str) -> StoreResult<Option<Item>> {
        Ok(self.records.read().await.get(shoe_id).cloned())
    }

    async fn put(&self, item: Item) -> StoreResult<()> {
        let shoe_id = shoe_id_of(&item)
            .ok_or_else(|| {
                StoreError::Validation(format!("Missing the key {} in the item", SHOE_ID))
            })?
            .to_string();

        self.records.write().await.insert(shoe_id, item);
        Ok(())
    }

    async fn update(
        &self,
        shoe_id: &str,
        path: &AttributePath,
        value: Value,
    ) -> StoreResult<Option<Item>> {
        if path.root() == SHOE_ID {
            return Err(StoreError::Validation(format!(
                "Cannot update attribute {}. This attribute is part of the key",
                SHOE_ID
            )));
        }

        let mut records = self.records.write().await;
        let existing = records.get(shoe_id).cloned();
        let mut record = existing.unwrap_or_else(|| key_of(shoe_id));

        set_at_path(&mut record, path, value.clone())?;
        records.insert(shoe_id.to_string(), record);

        Ok(Some(nest_under_path(path, value)))
    }

    async fn delete(&self, shoe_id: &str) -> StoreResult<Option<Item>> {
        Ok(self.records.write().await.remove(shoe_id))
    }

    async fn scan(&self, exclusive_start_key: Option<Item>) -> StoreResult<ScanPage> {
        let records = self.records.read().await;

        let start = match exclusive_start_key.as_ref() {
            Some(key) => {
                let id = shoe_id_of(key).ok_or_else(|| {
                    StoreError::Validation("Exclusive start key must contain shoeId".to_string())
                })?;
                Bound::Excluded(id.to_string())
            }
            None => Bound::Unbounded,
        };

        let mut remaining = records.range((start, Bound::Unbounded));
        let items: Vec<Item> = remaining
            .by_ref()
            .take(self.page_size)
            .map(|(_, item)| item.clone())
            .collect();

        // A continuation key is only handed out while records remain past this page
        let last_evaluated_key = match (remaining.next(), items.last()) {
            (Some(_), Some(last)) => shoe_id_of(last).map(key_of),
            _ => None,
        };

        Ok(ScanPage {
            items,
            last_evaluated_key,
        })
    }
}

/// Sets `value` at `path`, requiring every parent to be an existing map.
fn set_at_path(record: &mut Item, path: &AttributePath, value: Value) -> StoreResult<()> {
    let (last, parents) = path
        .segments()
        .split_last()
        .ok_or_else(|| StoreError::Validation("Empty attribute path".to_string()))?;

    let mut target = record;
    for segment in parents {
        target = match target.get_mut(segment) {
            Some(Value::Object(child)) => child,
            _ => {
                return Err(StoreError::Validation(format!(
                    "The document path '{}' is invalid for update",
                    path
                )))
            }
        };
    }

    target.insert(last.clone(), value);
    Ok(())
}

/// Wraps `value` in maps following `path`, e.g. `a.b` -> `{"a": {"b": value}}`.
fn nest_under_path(path: &AttributePath, value: Value) -> Item {
    let mut nested = value;
    for segment in path.segments()[1..].iter().rev() {
        let mut map = Item::new();
        map.insert(segment.clone(), nested);
        nested = Value::Object(map);
    }

    let mut changed = Item::new();
    changed.insert(path.root().to_string(), nested);
    changed
}
