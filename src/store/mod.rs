//! Store Module
//!
//! Binding to the document store holding shoe records: the point read,
//! point write, partial update and point delete primitives, plus a paged scan.

mod attribute;
mod dynamo;
mod expression;
mod memory;
mod path;
mod scan;


use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreResult;

// Re-export public types
pub use attribute::{from_attribute_map, to_attribute_map};
pub use dynamo::DynamoStore;
pub use expression::UpdateExpression;
pub use memory::{MemoryStore, DEFAULT_PAGE_SIZE};
pub use path::AttributePath;
pub use scan::scan_all;

// == Public Constants ==
/// Partition key attribute of the shoe table
pub const SHOE_ID: &str = "shoeId";

/// A stored record, or any attribute map returned by the store.
pub type Item = Map<String, Value>;

/// Returns the record's key, if it carries a string `shoeId`.
pub fn shoe_id_of(item: &Item) -> Option<&str> {
    item.get(SHOE_ID).and_then(Value::as_str)
}

/// Builds the key map identifying a single record.
pub fn key_of(shoe_id: &str) -> Item {
    let mut key = Item::new();
    key.insert(SHOE_ID.to_string(), Value::String(shoe_id.to_string()));
    key
}

// == Scan Page ==
/// One page of scan results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanPage {
    pub items: Vec<Item>,
    /// Continuation token; present when more results remain
    pub last_evaluated_key: Option<Item>,
}

// == Shoe Store Trait ==
/// Storage primitives the request handlers are built on.
///
/// Implementations report failures as [`StoreError`](crate::error::StoreError)
/// and apply no retries of their own.
#[async_trait]
pub trait ShoeStore: Send + Sync {
    /// Reads one record. `None` when no record has this id.
    async fn get(&self, shoe_id: &str) -> StoreResult<Option<Item>>;

    /// Writes a record, replacing any record with the same id.
    async fn put(&self, item: Item) -> StoreResult<()>;

    /// Sets one attribute of a record, creating the record if needed.
    ///
    /// Returns the new values of the changed attributes, rooted at the
    /// top-level attribute of `path`.
    async fn update(
        &self,
        shoe_id: &str,
        path: &AttributePath,
        value: Value,
    ) -> StoreResult<Option<Item>>;

    /// Deletes a record, returning it if it existed.
    async fn delete(&self, shoe_id: &str) -> StoreResult<Option<Item>>;

    /// Reads one page of the table, starting after `exclusive_start_key`.
    async fn scan(&self, exclusive_start_key: Option<Item>) -> StoreResult<ScanPage>;
}
