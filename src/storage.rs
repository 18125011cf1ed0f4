//! Storage gateway over DynamoDB.
//!
//! Every operation is a request type converting by `TryFrom` into a resolved
//! input, which a [`KeyValueStore`] then sends. [`aws_sdk_dynamodb::Client`] is
//! the production store; tests substitute in-memory fakes.

/// apply expression placeholder maps and table name to a builder
macro_rules! apply_expression_attributes {
    ($builder:expr, $input:expr) => {
        $builder
            .set_expression_attribute_names($input.expression_attribute_names)
            .set_expression_attribute_values($input.expression_attribute_values)
            .table_name($input.table_name)
    };
}

pub(crate) use apply_expression_attributes;

/// Get item operation for retrieving a single item by primary key.
pub mod get_item;

/// Put item operation for creating or replacing items.
pub mod put_item;

/// Query operation for retrieving items matching key conditions.
pub mod query;

/// Update item operation for assigning attribute values.
pub mod update_item;

use crate::{
    common::condition::AttributeCondition,
    error::Result,
};

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, types};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections;

/// A raw DynamoDB item.
pub type Item = collections::HashMap<String, types::AttributeValue>;

/// Sends resolved storage requests.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetches one item, `None` when the key matches nothing.
    async fn get_item(&self, input: get_item::GetItemInput) -> Result<Option<Item>>;
    /// Writes one item.
    async fn put_item(&self, input: put_item::PutItemInput) -> Result<()>;
    /// Returns the items matching the key condition.
    async fn query(&self, input: query::QueryInput) -> Result<Vec<Item>>;
    /// Applies an update expression to one item.
    async fn update_item(&self, input: update_item::UpdateItemInput) -> Result<()>;
}

#[async_trait]
impl KeyValueStore for Client {
    async fn get_item(&self, input: get_item::GetItemInput) -> Result<Option<Item>> {
        input.send(self).await
    }

    async fn put_item(&self, input: put_item::PutItemInput) -> Result<()> {
        input.send(self).await
    }

    async fn query(&self, input: query::QueryInput) -> Result<Vec<Item>> {
        input.send(self).await
    }

    async fn update_item(&self, input: update_item::UpdateItemInput) -> Result<()> {
        input.send(self).await
    }
}

/// Storage gateway.
///
/// ```rust,no_run
/// use aws_lambda_kit::storage::StorageGateway;
/// use serde_json::json;
///
/// # async fn example(client: aws_sdk_dynamodb::Client) -> aws_lambda_kit::Result<()> {
/// let storage = StorageGateway::new(client);
/// storage.put("users", json!({"id": "1", "name": "Jane"})).await?;
/// let item = storage.get("users", json!({"id": "1"})).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct StorageGateway<S = Client> {
    store: S,
}

impl<S: KeyValueStore> StorageGateway<S> {
    /// Wraps a configured store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the raw stored item for `key`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "aws_lambda_kit.get_item", skip_all, fields(table = table_name), err)
    )]
    pub async fn get<K: Serialize>(&self, table_name: &str, key: K) -> Result<Option<Item>> {
        let input: get_item::GetItemInput = get_item::GetItem {
            key,
            table_name: table_name.to_string(),
        }
        .try_into()?;
        self.store.get_item(input).await
    }

    /// Writes `item` verbatim.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "aws_lambda_kit.put_item", skip_all, fields(table = table_name), err)
    )]
    pub async fn put<T: Serialize>(&self, table_name: &str, item: T) -> Result<()> {
        let input: put_item::PutItemInput = put_item::PutItem {
            item,
            table_name: table_name.to_string(),
        }
        .try_into()?;
        self.store.put_item(input).await
    }

    /// Returns the items matching every condition.
    ///
    /// An empty condition list is still sent, without a key condition, and the
    /// store is expected to reject it.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "aws_lambda_kit.query", skip_all, fields(table = table_name), err)
    )]
    pub async fn query<T: Serialize>(
        &self,
        table_name: &str,
        conditions: Vec<AttributeCondition<T>>,
    ) -> Result<Vec<Item>> {
        let input: query::QueryInput = query::Query {
            conditions,
            table_name: table_name.to_string(),
        }
        .try_into()?;
        self.store.query(input).await
    }

    /// Assigns `attributes` on the item at `key`.
    ///
    /// Returns [`update_item::UPDATE_SUCCESS_MESSAGE`] rather than the store's
    /// response.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "aws_lambda_kit.update_item", skip_all, fields(table = table_name), err)
    )]
    pub async fn update<K: Serialize, T: Serialize>(
        &self,
        table_name: &str,
        key: K,
        attributes: IndexMap<String, T>,
    ) -> Result<&'static str> {
        let input: update_item::UpdateItemInput = update_item::UpdateItem {
            attributes,
            key,
            table_name: table_name.to_string(),
        }
        .try_into()?;
        self.store.update_item(input).await?;
        Ok(update_item::UPDATE_SUCCESS_MESSAGE)
    }
}
