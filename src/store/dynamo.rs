//! DynamoDB Store Module
//!
//! `ShoeStore` backed by a DynamoDB table through the AWS SDK.

use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::attribute::{from_attribute_map, to_attribute, to_attribute_map};
use crate::store::expression::VALUE_PLACEHOLDER;
use crate::store::{AttributePath, Item, ScanPage, ShoeStore, UpdateExpression, SHOE_ID};

// == DynamoDB Store ==
/// A single DynamoDB table keyed by `shoeId`.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Creates a store over `table_name` using an already configured client.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Name of the backing table.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn key(shoe_id: &str) -> AttributeValue {
        AttributeValue::S(shoe_id.to_string())
    }
}

#[async_trait]
impl ShoeStore for DynamoStore {
    async fn get(&self, shoe_id: &str) -> StoreResult<Option<Item>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(SHOE_ID, Self::key(shoe_id))
            .send()
            .await
            .map_err(|e| classify("GetItem", e))?;

        output.item.as_ref().map(from_attribute_map).transpose()
    }

    async fn put(&self, item: Item) -> StoreResult<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_attribute_map(&item)))
            .send()
            .await
            .map_err(|e| classify("PutItem", e))?;

        Ok(())
    }

    async fn update(
        &self,
        shoe_id: &str,
        path: &AttributePath,
        value: Value,
    ) -> StoreResult<Option<Item>> {
        let update = UpdateExpression::set(path);
        debug!(expression = %update.expression, %path, "Updating shoe {}", shoe_id);

        let output = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(SHOE_ID, Self::key(shoe_id))
            .update_expression(update.expression)
            .set_expression_attribute_names(Some(update.names))
            .expression_attribute_values(VALUE_PLACEHOLDER, to_attribute(&value))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(|e| classify("UpdateItem", e))?;

        output.attributes.as_ref().map(from_attribute_map).transpose()
    }

    async fn delete(&self, shoe_id: &str) -> StoreResult<Option<Item>> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(SHOE_ID, Self::key(shoe_id))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| classify("DeleteItem", e))?;

        output.attributes.as_ref().map(from_attribute_map).transpose()
    }

    async fn scan(&self, exclusive_start_key: Option<Item>) -> StoreResult<ScanPage> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_exclusive_start_key(exclusive_start_key.as_ref().map(to_attribute_map))
            .send()
            .await
            .map_err(|e| classify("Scan", e))?;

        let items = output
            .items
            .unwrap_or_default()
            .iter()
            .map(from_attribute_map)
            .collect::<StoreResult<Vec<_>>>()?;

        let last_evaluated_key = output
            .last_evaluated_key
            .as_ref()
            .filter(|key| !key.is_empty())
            .map(from_attribute_map)
            .transpose()?;

        Ok(ScanPage {
            items,
            last_evaluated_key,
        })
    }
}

// == Error Classification ==
/// Maps an SDK failure to a store error, keeping validation rejections distinct.
fn classify<E, R>(operation: &'static str, err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: Debug,
{
    let code = err.as_service_error().and_then(|e| e.code());
    if code == Some("ValidationException") {
        let message = err
            .as_service_error()
            .and_then(|e| e.message())
            .unwrap_or("request rejected by the store")
            .to_string();
        return StoreError::Validation(message);
    }

    StoreError::Backend {
        operation,
        message: DisplayErrorContext(&err).to_string(),
    }
}
