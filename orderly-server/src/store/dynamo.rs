//! DynamoDB store
//!
//! Remote table keyed by `location_id`. The aggregate is stored as one JSON
//! document attribute (`doc`), so the codec stays a single serde_json call
//! in each direction; `updated_at` is duplicated as a plain attribute for
//! console visibility.

use std::collections::HashMap;

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use shared::models::Location;

use super::{LocationStore, StoreError, StoreResult};
use async_trait::async_trait;

const KEY_ATTR: &str = "location_id";
const DOC_ATTR: &str = "doc";
const UPDATED_ATTR: &str = "updated_at";

/// DynamoDB-backed location store
pub struct DynamoStore {
    client: Client,
    table: String,
}

impl DynamoStore {
    pub fn new(client: Client, table: String) -> Self {
        tracing::info!(table = %table, "DynamoDB store initialized");
        Self { client, table }
    }

    fn decode_item(item: &HashMap<String, AttributeValue>) -> StoreResult<Location> {
        let doc = item
            .get(DOC_ATTR)
            .and_then(|v| v.as_s().ok())
            .ok_or_else(|| {
                StoreError::Corrupt(format!("item missing '{}' attribute", DOC_ATTR))
            })?;
        serde_json::from_str(doc).map_err(|e| StoreError::Corrupt(e.to_string()))
    }
}

#[async_trait]
impl LocationStore for DynamoStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Location>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(KEY_ATTR, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;

        output.item().map(Self::decode_item).transpose()
    }

    async fn put(&self, location: &Location) -> StoreResult<()> {
        let doc =
            serde_json::to_string(location).map_err(|e| StoreError::Write(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table)
            .item(KEY_ATTR, AttributeValue::S(location.id.clone()))
            .item(DOC_ATTR, AttributeValue::S(doc))
            .item(
                UPDATED_ATTR,
                AttributeValue::S(location.updated_at.to_rfc3339()),
            )
            .send()
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        tracing::debug!(location_id = %location.id, "Location saved to DynamoDB");
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Location>> {
        let mut locations = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        // Paginated scan; the table holds one item per location
        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| StoreError::Read(e.to_string()))?;

            for item in output.items() {
                locations.push(Self::decode_item(item)?);
            }

            match output.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        tracing::debug!(count = locations.len(), "Locations scanned from DynamoDB");
        Ok(locations)
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table)
            .key(KEY_ATTR, AttributeValue::S(id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        Ok(output.attributes().is_some())
    }

    fn backend(&self) -> &'static str {
        "dynamodb"
    }
}
