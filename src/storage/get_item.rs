use crate::{
    error::{Error, Result},
    storage,
};

use aws_sdk_dynamodb::Client;
use serde::Serialize;
use serde_dynamo::to_item;

/// Resolved `GetItem` request, as handed to a [`storage::KeyValueStore`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItemInput {
    /// The primary key of the item.
    pub key: storage::Item,
    /// The table to read from.
    pub table_name: String,
}

/// Get item operation.
///
/// ```rust
/// use aws_lambda_kit::storage::get_item::{GetItem, GetItemInput};
/// use serde_json::json;
///
/// let get_item = GetItem {
///     key: json!({"id": "1"}),
///     table_name: "users".to_string(),
/// };
/// let input: GetItemInput = get_item.try_into().unwrap();
/// assert_eq!(input.key.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItem<K> {
    /// The primary key of the item, serialized to a DynamoDB map.
    pub key: K,
    /// The table to read from.
    pub table_name: String,
}

impl<K: Serialize> TryFrom<GetItem<K>> for GetItemInput {
    type Error = Error;

    fn try_from(get_item: GetItem<K>) -> Result<Self> {
        let key = to_item(get_item.key)?;
        let operation = Self {
            key,
            table_name: get_item.table_name,
        };
        Ok(operation)
    }
}

impl GetItemInput {
    pub(crate) async fn send(self, client: &Client) -> Result<Option<storage::Item>> {
        let output = client
            .get_item()
            .set_key(Some(self.key))
            .table_name(self.table_name)
            .send()
            .await
            .map_err(|error| Error::storage(error.into_service_error()))?;
        Ok(output.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::types;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::collections;

    #[rstest]
    #[case::partition_key_only(
        GetItem {
            key: json!(
                {
                    "a": "b"
                }
            ),
            table_name: "c".to_string(),
        },
        GetItemInput {
            key: collections::HashMap::from(
                [(
                    "a".to_string(),
                    types::AttributeValue::S(
                        "b".to_string()
                    ),
                )]
            ),
            table_name: "c".to_string(),
        }
    )]
    #[case::partition_and_sort_key(
        GetItem {
            key: json!(
                {
                    "a": "b",
                    "c": 42
                }
            ),
            table_name: "d".to_string(),
        },
        GetItemInput {
            key: collections::HashMap::from(
                [
                    (
                        "a".to_string(),
                        types::AttributeValue::S(
                            "b".to_string()
                        ),
                    ),
                    (
                        "c".to_string(),
                        types::AttributeValue::N(
                            "42".to_string()
                        ),
                    ),
                ]
            ),
            table_name: "d".to_string(),
        }
    )]
    fn test_get_item(#[case] args: GetItem<Value>, #[case] expected: GetItemInput) {
        let actual: GetItemInput = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_get_item_rejects_scalar_key() {
        let get_item = GetItem {
            key: "not a map",
            table_name: "a".to_string(),
        };
        let actual = GetItemInput::try_from(get_item);
        assert!(matches!(actual, Err(Error::Serialization(_))));
    }
}
