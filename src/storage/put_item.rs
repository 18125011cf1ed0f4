use crate::{
    error::{Error, Result},
    storage,
};

use aws_sdk_dynamodb::Client;
use serde::Serialize;
use serde_dynamo::to_item;

/// Resolved `PutItem` request, as handed to a [`storage::KeyValueStore`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PutItemInput {
    /// The item, written verbatim.
    pub item: storage::Item,
    /// The table to write to.
    pub table_name: String,
}

/// Put item operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PutItem<T> {
    /// The item to put into the table.
    pub item: T,
    /// The table to write to.
    pub table_name: String,
}

impl<T: Serialize> TryFrom<PutItem<T>> for PutItemInput {
    type Error = Error;

    fn try_from(put_item: PutItem<T>) -> Result<Self> {
        let item = to_item(put_item.item)?;
        let operation = Self {
            item,
            table_name: put_item.table_name,
        };
        Ok(operation)
    }
}

impl PutItemInput {
    pub(crate) async fn send(self, client: &Client) -> Result<()> {
        client
            .put_item()
            .set_item(Some(self.item))
            .table_name(self.table_name)
            .send()
            .await
            .map_err(|error| Error::storage(error.into_service_error()))?;
        Ok(())
    }
}
