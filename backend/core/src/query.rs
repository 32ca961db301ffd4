//! Response shapes of the query endpoints.
//!
//! `/nl-query` answers either with a result set or with a mutation
//! acknowledgement; the two are told apart by the presence of an `action`
//! key and surface here as [`QueryResponse::Read`] and
//! [`QueryResponse::Mutation`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A loosely-typed result row. Key order follows the backend's payload.
pub type Row = Map<String, Value>;

/// Result set of a SELECT, from either `/query` or `/nl-query`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub results: Vec<Row>,
    #[serde(default)]
    pub count: usize,
    /// Question echoed back by `/nl-query`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// Generated SPARQL text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparql: Option<String>,
    /// How the query was produced ("ai" or "keywords").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// Acknowledgement of a create / update / delete / relation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MutationResult {
    pub success: bool,
    /// Action tag, e.g. `create`, `update`, `delete`, `add_relation`.
    pub action: String,
    pub message: String,
    /// The affected entity, when the backend returns it as an object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<Row>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Read(ReadResult),
    Mutation(MutationResult),
}

impl QueryResponse {
    /// Classify a decoded JSON payload by the presence of `action`.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let Value::Object(mut map) = value else {
            return Err(serde::de::Error::custom("query response is not an object"));
        };

        let Some(action) = map.remove("action") else {
            return serde_json::from_value(Value::Object(map)).map(QueryResponse::Read);
        };

        let action = match action {
            Value::String(s) => s,
            other => other.to_string(),
        };
        let message = match map.remove("message") {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        let entity = match map.remove("entity") {
            Some(Value::Object(row)) => Some(row),
            _ => None,
        };
        let success = map.get("success").and_then(Value::as_bool).unwrap_or(true);

        Ok(QueryResponse::Mutation(MutationResult {
            success,
            action,
            message,
            entity,
        }))
    }

    pub fn is_mutation(&self) -> bool {
        matches!(self, QueryResponse::Mutation(_))
    }
}

impl<'de> Deserialize<'de> for QueryResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        QueryResponse::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// Reply of the entity CRUD endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Failure envelope the backend attaches to error responses.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub suggestion: Option<String>,
}

/// Column names for a generic result table: the keys of the first row.
pub fn row_keys(rows: &[Row]) -> Vec<String> {
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

/// Plain-text rendering of a cell value.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
