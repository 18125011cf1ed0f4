use crate::{
    common::{self, condition::AttributeCondition},
    error::{Error, Result},
    storage,
};

use aws_sdk_dynamodb::{Client, types};
use serde::Serialize;
use std::collections;

/// Resolved `Query` request, as handed to a [`storage::KeyValueStore`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryInput {
    /// Name placeholders used by the key condition.
    pub expression_attribute_names: Option<collections::HashMap<String, String>>,
    /// Value placeholders used by the key condition.
    pub expression_attribute_values: Option<collections::HashMap<String, types::AttributeValue>>,
    /// The key condition, `None` when no condition was given.
    pub key_condition_expression: Option<String>,
    /// The table to query.
    pub table_name: String,
}

/// Query operation.
///
/// ```rust
/// use aws_lambda_kit::common::condition::{AttributeCondition, ConditionOperator};
/// use aws_lambda_kit::storage::query::{Query, QueryInput};
///
/// let query = Query {
///     conditions: vec![
///         AttributeCondition {
///             name: "pk".to_string(),
///             operator: ConditionOperator::Equals,
///             value: "user#1".to_string(),
///         },
///         AttributeCondition {
///             name: "sk".to_string(),
///             operator: ConditionOperator::BeginsWith,
///             value: "order#".to_string(),
///         },
///     ],
///     table_name: "orders".to_string(),
/// };
/// let input: QueryInput = query.try_into().unwrap();
/// assert_eq!(
///     input.key_condition_expression.as_deref(),
///     Some("#pk = :pk AND begins_with(#sk, :sk)"),
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query<T> {
    /// Key conditions, folded in order and joined with `AND`.
    pub conditions: Vec<AttributeCondition<T>>,
    /// The table to query.
    pub table_name: String,
}

impl<T: Serialize> TryFrom<Query<T>> for QueryInput {
    type Error = Error;

    fn try_from(query: Query<T>) -> Result<Self> {
        let key_condition_operation: common::ExpressionInput =
            AttributeCondition::get_key_condition_expression(query.conditions)?;
        let (key_condition_expression, expression_attribute_names, expression_attribute_values) =
            key_condition_operation.into_request_parts();
        let operation = Self {
            expression_attribute_names,
            expression_attribute_values,
            key_condition_expression,
            table_name: query.table_name,
        };
        Ok(operation)
    }
}

impl QueryInput {
    pub(crate) async fn send(self, client: &Client) -> Result<Vec<storage::Item>> {
        let builder = client
            .query()
            .set_key_condition_expression(self.key_condition_expression);
        let output = storage::apply_expression_attributes!(builder, self)
            .send()
            .await
            .map_err(|error| Error::storage(error.into_service_error()))?;
        Ok(output.items.unwrap_or_default())
    }
}
