//! Expression building shared by the storage operations.
//!
//! DynamoDB expressions never embed attribute names or values literally: every
//! name is referenced through a `#name` placeholder and every value through a
//! `:name` placeholder, both resolved by the maps sent next to the expression.

/// Key condition expressions for queries.
pub mod condition;

use aws_sdk_dynamodb::types;
use std::collections;

fn name_placeholder(name: &str) -> String {
    format!("#{name}")
}

fn value_placeholder(name: &str) -> String {
    format!(":{name}")
}

fn get_expression(left: String, operator: &str, right: String) -> String {
    if left.is_empty() {
        right
    } else if right.is_empty() {
        left
    } else {
        format!("{left}{operator}{right}")
    }
}

/// A parameterized expression together with its placeholder maps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpressionInput {
    /// The expression text, empty when nothing was folded into it.
    pub expression: String,
    /// Name placeholders (`#name`) mapped to attribute names.
    pub expression_attribute_names: collections::HashMap<String, String>,
    /// Value placeholders (`:name`) mapped to attribute values.
    pub expression_attribute_values: collections::HashMap<String, types::AttributeValue>,
}

impl ExpressionInput {
    /// Single-attribute fragment binding `#name` and `:name`.
    pub(crate) fn fragment(
        name: String,
        value: types::AttributeValue,
        render: impl FnOnce(&str, &str) -> String,
    ) -> Self {
        let name_placeholder = name_placeholder(&name);
        let value_placeholder = value_placeholder(&name);
        let expression = render(&name_placeholder, &value_placeholder);
        Self {
            expression,
            expression_attribute_names: collections::HashMap::from([(name_placeholder, name)]),
            expression_attribute_values: collections::HashMap::from([(value_placeholder, value)]),
        }
    }

    pub(crate) fn merge(operator: &str, items: Vec<Self>) -> Self {
        let mut operation = Self::default();
        for item in items {
            operation
                .expression_attribute_names
                .extend(item.expression_attribute_names);
            operation
                .expression_attribute_values
                .extend(item.expression_attribute_values);
            operation.expression = get_expression(operation.expression, operator, item.expression);
        }
        operation
    }

    /// Splits the expression into the optional request fields.
    ///
    /// An empty expression or map becomes `None`, so an empty fold reaches the
    /// store as a missing expression rather than an empty one.
    pub(crate) fn into_request_parts(
        self,
    ) -> (
        Option<String>,
        Option<collections::HashMap<String, String>>,
        Option<collections::HashMap<String, types::AttributeValue>>,
    ) {
        let expression = (!self.expression.is_empty()).then_some(self.expression);
        let names = (!self.expression_attribute_names.is_empty())
            .then_some(self.expression_attribute_names);
        let values = (!self.expression_attribute_values.is_empty())
            .then_some(self.expression_attribute_values);
        (expression, names, values)
    }
}
