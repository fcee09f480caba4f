use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::RecordId;

/// Field values of a single record, keyed by API field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field to a literal value.
    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    /// Set a date field using the platform's `YYYY-MM-DD` format.
    pub fn date(self, name: &str, date: NaiveDate) -> Self {
        self.field(name, date.format("%Y-%m-%d").to_string())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// One error entry as returned by the REST API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub message: String,
    #[serde(default, alias = "statusCode")]
    pub error_code: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
}

/// Result of a single-record create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveResult {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

impl SaveResult {
    /// The created record's id, when the save succeeded.
    pub fn created_id(&self) -> Option<&RecordId> {
        if self.success {
            self.id.as_ref()
        } else {
            None
        }
    }
}
