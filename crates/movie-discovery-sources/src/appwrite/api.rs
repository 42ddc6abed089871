use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Placeholder id asking the store to generate a document id
pub const UNIQUE_ID: &str = "unique()";

/// Document list filter, rendered in the store's JSON query syntax
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Equal(String, Value),
    OrderDesc(String),
    Limit(u32),
}

impl Query {
    pub fn equal(attribute: &str, value: impl Into<Value>) -> Self {
        Self::Equal(attribute.to_string(), value.into())
    }

    pub fn order_desc(attribute: &str) -> Self {
        Self::OrderDesc(attribute.to_string())
    }

    pub fn render(&self) -> String {
        let query = match self {
            Self::Equal(attribute, value) => json!({
                "method": "equal",
                "attribute": attribute,
                "values": [value],
            }),
            Self::OrderDesc(attribute) => json!({
                "method": "orderDesc",
                "attribute": attribute,
            }),
            Self::Limit(limit) => json!({
                "method": "limit",
                "values": [limit],
            }),
        };
        query.to_string()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentList {
    #[serde(default)]
    pub documents: Vec<Value>,
}

pub(crate) fn create_body(data: Map<String, Value>) -> Value {
    json!({
        "documentId": UNIQUE_ID,
        "data": data,
    })
}

pub(crate) fn update_body(data: Map<String, Value>) -> Value {
    json!({ "data": data })
}

/// Store-assigned id of a raw document
pub(crate) fn document_id(document: &Value) -> Option<&str> {
    document.get("$id").and_then(Value::as_str)
}
