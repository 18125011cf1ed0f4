use crate::{
    common,
    error::{Error, Result},
};

use serde::{Deserialize, Serialize};
use serde_dynamo::to_attribute_value;
use std::{fmt, str};

/// Joins key condition fragments.
const AND: &str = " AND ";

/// Comparison applied by a key condition.
///
/// ```rust
/// use aws_lambda_kit::common::condition::ConditionOperator;
///
/// let operator: ConditionOperator = "begins_with".parse().unwrap();
/// assert_eq!(operator, ConditionOperator::BeginsWith);
/// assert!("contains".parse::<ConditionOperator>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum ConditionOperator {
    /// `#name = :name`
    Equals,
    /// `begins_with(#name, :name)`
    BeginsWith,
}

impl ConditionOperator {
    /// The wire name of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::BeginsWith => "begins_with",
        }
    }

    fn get_expression(self, name_placeholder: &str, value_placeholder: &str) -> String {
        match self {
            Self::Equals => format!("{name_placeholder} = {value_placeholder}"),
            Self::BeginsWith => format!("begins_with({name_placeholder}, {value_placeholder})"),
        }
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl str::FromStr for ConditionOperator {
    type Err = Error;

    fn from_str(operator: &str) -> Result<Self> {
        match operator {
            "equals" => Ok(Self::Equals),
            "begins_with" => Ok(Self::BeginsWith),
            other => Err(Error::UnsupportedOperator(other.to_string())),
        }
    }
}

impl TryFrom<String> for ConditionOperator {
    type Error = Error;

    fn try_from(operator: String) -> Result<Self> {
        operator.parse()
    }
}

impl From<ConditionOperator> for String {
    fn from(operator: ConditionOperator) -> Self {
        operator.as_str().to_string()
    }
}

/// Condition on a single key attribute.
///
/// Also deserializes from the `AttributeName` / `AttributeCondition` /
/// `AttributeValue` shape used by older event payloads.
///
/// ```rust
/// use aws_lambda_kit::common::condition::{AttributeCondition, ConditionOperator};
///
/// let condition = AttributeCondition {
///     name: "pk".to_string(),
///     operator: ConditionOperator::Equals,
///     value: "user#1".to_string(),
/// };
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AttributeCondition<T> {
    /// The attribute the condition applies to.
    #[serde(alias = "AttributeName")]
    pub name: String,
    /// How the attribute is compared.
    #[serde(alias = "AttributeCondition")]
    pub operator: ConditionOperator,
    /// The value bound to the `:name` placeholder.
    #[serde(alias = "AttributeValue")]
    pub value: T,
}

impl<T: Serialize> AttributeCondition<T> {
    fn into_expression(self) -> Result<common::ExpressionInput> {
        let value = to_attribute_value(self.value)?;
        let operator = self.operator;
        let operation = common::ExpressionInput::fragment(self.name, value, |name, value| {
            operator.get_expression(name, value)
        });
        Ok(operation)
    }

    /// Folds the conditions left to right into one key condition expression.
    ///
    /// An empty sequence yields an empty expression.
    pub fn get_key_condition_expression(
        conditions: Vec<Self>,
    ) -> Result<common::ExpressionInput> {
        let mut operations = Vec::with_capacity(conditions.len());
        for condition in conditions {
            operations.push(condition.into_expression()?);
        }
        Ok(common::ExpressionInput::merge(AND, operations))
    }
}
