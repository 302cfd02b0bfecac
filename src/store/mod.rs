mod memory;

pub use memory::MemoryStore;

use crate::{encrypted_table::TableAttributes, errors::StoreError};
use async_trait::async_trait;
use aws_sdk_dynamodb::{types::AttributeValue, Client};
use std::collections::HashMap;

/// The backing key-value store collaborator.
///
/// One call per operation; the table is identified by name on every call and
/// no handle is cached between operations. Consistency guarantees are
/// whatever the implementation provides.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn put_item(&self, table_name: &str, item: TableAttributes) -> Result<(), StoreError>;

    async fn get_item(
        &self,
        table_name: &str,
        key: &TableAttributes,
    ) -> Result<Option<TableAttributes>, StoreError>;
}

/// Item store backed by Amazon DynamoDB.
pub struct DynamoStore {
    db: Client,
}

impl DynamoStore {
    pub fn new(db: Client) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemStore for DynamoStore {
    async fn put_item(&self, table_name: &str, item: TableAttributes) -> Result<(), StoreError> {
        let item: HashMap<String, AttributeValue> = item.into();

        self.db
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| StoreError::Aws(e.to_string()))?;

        Ok(())
    }

    async fn get_item(
        &self,
        table_name: &str,
        key: &TableAttributes,
    ) -> Result<Option<TableAttributes>, StoreError> {
        let key: HashMap<String, AttributeValue> = key.clone().into();

        let result = self
            .db
            .get_item()
            .table_name(table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| StoreError::Aws(e.to_string()))?;

        result
            .item
            .map(TableAttributes::try_from)
            .transpose()
            .map_err(StoreError::from)
    }
}
