use crate::{
    common,
    error::{Error, Result},
    storage,
};

use aws_sdk_dynamodb::{Client, types};
use indexmap::IndexMap;
use serde::Serialize;
use serde_dynamo::{to_attribute_value, to_item};
use std::collections;

/// Message returned by a successful update instead of the store's response.
pub const UPDATE_SUCCESS_MESSAGE: &str = "Successful update Item";

/// Builds a `set` update expression assigning every attribute, in map order.
///
/// An empty map yields an empty expression.
///
/// ```rust
/// use aws_lambda_kit::storage::update_item::get_update_expression;
/// use indexmap::IndexMap;
///
/// let attributes = IndexMap::from([("name", "Jane"), ("city", "Turin")]);
/// let operation = get_update_expression(attributes).unwrap();
/// assert_eq!(operation.expression, "set #name = :name, #city = :city");
/// ```
pub fn get_update_expression<K, T>(attributes: IndexMap<K, T>) -> Result<common::ExpressionInput>
where
    K: Into<String>,
    T: Serialize,
{
    let mut operations = Vec::with_capacity(attributes.len());
    for (name, value) in attributes {
        let value = to_attribute_value(value)?;
        let operation = common::ExpressionInput::fragment(name.into(), value, |name, value| {
            format!("{name} = {value}")
        });
        operations.push(operation);
    }
    let mut operation = common::ExpressionInput::merge(", ", operations);
    if !operation.expression.is_empty() {
        operation.expression = format!("set {}", operation.expression);
    }
    Ok(operation)
}

/// Resolved `UpdateItem` request, as handed to a [`storage::KeyValueStore`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateItemInput {
    /// Name placeholders used by the update expression.
    ///
    /// Sent even when empty: a request carrying only the key would be
    /// accepted as an upsert, while an empty map is rejected by the store.
    pub expression_attribute_names: Option<collections::HashMap<String, String>>,
    /// Value placeholders used by the update expression, sent even when empty.
    pub expression_attribute_values: Option<collections::HashMap<String, types::AttributeValue>>,
    /// The primary key of the item.
    pub key: storage::Item,
    /// The table to update.
    pub table_name: String,
    /// The update expression, `None` when no attribute was given.
    pub update_expression: Option<String>,
}

/// Update item operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateItem<K, T> {
    /// New attribute values, assigned in map order.
    pub attributes: IndexMap<String, T>,
    /// The primary key of the item to update.
    pub key: K,
    /// The table to update.
    pub table_name: String,
}

impl<K: Serialize, T: Serialize> TryFrom<UpdateItem<K, T>> for UpdateItemInput {
    type Error = Error;

    fn try_from(update_item: UpdateItem<K, T>) -> Result<Self> {
        let key = to_item(update_item.key)?;
        let update_operation = get_update_expression(update_item.attributes)?;
        let update_expression =
            (!update_operation.expression.is_empty()).then_some(update_operation.expression);
        let operation = Self {
            expression_attribute_names: Some(update_operation.expression_attribute_names),
            expression_attribute_values: Some(update_operation.expression_attribute_values),
            key,
            table_name: update_item.table_name,
            update_expression,
        };
        Ok(operation)
    }
}

impl UpdateItemInput {
    pub(crate) async fn send(self, client: &Client) -> Result<()> {
        let builder = client
            .update_item()
            .set_key(Some(self.key))
            .set_update_expression(self.update_expression);
        storage::apply_expression_attributes!(builder, self)
            .send()
            .await
            .map_err(|error| Error::storage(error.into_service_error()))?;
        Ok(())
    }
}
