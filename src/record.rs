use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SinkError;

/// Name of the field holding the item's source URL(s).
pub const URL_FIELD: &str = "url";

/// One scraped item flowing through the pipeline.
///
/// Fields keep their insertion order, so the JSON document sent to the
/// store lists them the way the spider produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    fields: Map<String, Value>,
}

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, returning the previous value if the name was taken.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Document id used as the last path segment of the store endpoint.
    ///
    /// The `url` field is normally a list of strings and the first entry is
    /// used. A plain string is taken as-is and numbers or booleans are
    /// rendered with their JSON text.
    pub fn document_id(&self) -> Result<String, SinkError> {
        let url = self.fields.get(URL_FIELD).ok_or(SinkError::MissingDocumentId)?;
        let first = match url {
            Value::Array(entries) => entries.first().ok_or(SinkError::MissingDocumentId)?,
            other => other,
        };

        match first {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(SinkError::InvalidDocumentId(other.to_string())),
        }
    }
}

impl From<Map<String, Value>> for Item {
    fn from(fields: Map<String, Value>) -> Self {
        Item { fields }
    }
}

impl TryFrom<Value> for Item {
    type Error = SinkError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Item { fields }),
            _ => Err(SinkError::NotAnObject),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Item {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Item {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
