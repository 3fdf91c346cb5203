//! DynamoDB-backed visit table
//!
//! Items are keyed by the `user` string attribute and carry the counter in the
//! numeric `visit_count` attribute. Reads use `GetItem`, writes use an
//! unconditional `PutItem`.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use super::{StoreError, VisitRecord, VisitStore};

/// Partition key attribute
pub const KEY_ATTRIBUTE: &str = "user";

/// Counter attribute
pub const COUNT_ATTRIBUTE: &str = "visit_count";

/// DynamoDB table client
#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build a client from the ambient AWS configuration (region, credentials)
    pub async fn from_env(table_name: impl Into<String>) -> Self {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(Client::new(&sdk_config), table_name)
    }
}

#[async_trait]
impl VisitStore for DynamoStore {
    async fn get(&self, key: &str) -> Result<Option<VisitRecord>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, AttributeValue::S(key.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::ReadFailed(DisplayErrorContext(&e).to_string()))?;

        output
            .item()
            .map(|item| record_from_item(key, item))
            .transpose()
    }

    async fn put(&self, record: &VisitRecord) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_from_record(record)))
            .send()
            .await
            .map_err(|e| StoreError::WriteFailed(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }

    fn kind(&self) -> &'static str {
        "dynamodb"
    }
}

/// Decode a `GetItem` result for `key`
pub fn record_from_item(
    key: &str,
    item: &HashMap<String, AttributeValue>,
) -> Result<VisitRecord, StoreError> {
    let malformed = |reason: String| StoreError::Malformed {
        key: key.to_string(),
        reason,
    };

    let count = match item.get(COUNT_ATTRIBUTE) {
        Some(AttributeValue::N(raw)) => raw
            .parse::<u64>()
            .map_err(|e| malformed(format!("{} = {:?}: {}", COUNT_ATTRIBUTE, raw, e)))?,
        Some(other) => {
            return Err(malformed(format!(
                "{} is not a number: {:?}",
                COUNT_ATTRIBUTE, other
            )))
        }
        None => return Err(malformed(format!("missing {}", COUNT_ATTRIBUTE))),
    };

    Ok(VisitRecord::new(key, count))
}

/// Encode a record as a `PutItem` item
pub fn item_from_record(record: &VisitRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            KEY_ATTRIBUTE.to_string(),
            AttributeValue::S(record.key.clone()),
        ),
        (
            COUNT_ATTRIBUTE.to_string(),
            AttributeValue::N(record.count.to_string()),
        ),
    ])
}
