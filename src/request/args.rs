//! Runtime argument values of one call.

use serde::Serialize;
use serde_json::Value;

use crate::error::RestClientError;

/// Arguments of a client method call, in parameter declaration order.
///
/// Values are held as JSON; `None`/`null` marks an absent argument.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(Vec<Value>);

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next argument.
    pub fn arg<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, RestClientError> {
        let value = serde_json::to_value(value).map_err(RestClientError::Encode)?;
        self.0.push(value);
        Ok(self)
    }

    pub fn push(&mut self, value: Value) {
        self.0.push(value);
    }

    /// Argument at `index`. Missing trailing arguments read as `null`.
    pub fn get(&self, index: usize) -> &Value {
        self.0.get(index).unwrap_or(&Value::Null)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

/// String form used for query and path substitution.
///
/// Returns `None` for `null` and for values whose string form is empty.
pub(crate) fn string_form(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
