//! Scan Aggregation Module
//!
//! Drains a table by following scan continuation keys.

use tracing::debug;

use crate::error::StoreResult;
use crate::store::{Item, ShoeStore};

/// Scans the whole table and returns every record in store order.
///
/// Pages are requested one after another, each starting from the previous
/// page's continuation key, until the store reports none. Any failing page
/// aborts the whole aggregation.
pub async fn scan_all(store: &dyn ShoeStore) -> StoreResult<Vec<Item>> {
    let mut items = Vec::new();
    let mut start_key = None;
    let mut pages = 0usize;

    loop {
        let page = store.scan(start_key.take()).await?;
        pages += 1;
        debug!(
            "Scan page {}: {} items, more={}",
            pages,
            page.items.len(),
            page.last_evaluated_key.is_some()
        );

        items.extend(page.items);

        match page.last_evaluated_key {
            Some(key) => start_key = Some(key),
            None => break,
        }
    }

    Ok(items)
}
