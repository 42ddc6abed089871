use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Admin-supplied platform identifiers for one movie.
///
/// Identifiers are keyed by their document field name (`netflix_id`,
/// `hotstar_id`, ...), so a record read from the store and a record written
/// back share the same shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverrideRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_id: Option<u64>,
    #[serde(default)]
    pub identifiers: BTreeMap<String, String>,
}

impl OverrideRecord {
    pub fn new(movie_id: u64) -> Self {
        Self {
            document_id: None,
            movie_id: Some(movie_id),
            identifiers: BTreeMap::new(),
        }
    }

    pub fn field_name(platform_key: &str) -> String {
        format!("{}_id", platform_key)
    }

    /// Non-empty identifier stored for a platform key
    pub fn identifier_for(&self, platform_key: &str) -> Option<&str> {
        self.identifiers
            .get(&Self::field_name(platform_key))
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    pub fn set_identifier(&mut self, platform_key: &str, identifier: impl Into<String>) {
        self.identifiers
            .insert(Self::field_name(platform_key), identifier.into());
    }

    pub fn with_identifier(mut self, platform_key: &str, identifier: impl Into<String>) -> Self {
        self.set_identifier(platform_key, identifier);
        self
    }

    /// Build a record from a raw store document.
    ///
    /// Every string field named `*_id` becomes an identifier, except the
    /// catalog key `tmdb_id` and store metadata (`$id`, `$collectionId`, ...).
    pub fn from_document(document: &serde_json::Value) -> Option<Self> {
        let fields = document.as_object()?;
        let mut record = Self {
            document_id: fields.get("$id").and_then(|v| v.as_str()).map(str::to_string),
            movie_id: fields.get("tmdb_id").and_then(|v| v.as_u64()),
            identifiers: BTreeMap::new(),
        };

        for (name, value) in fields {
            if name.starts_with('$') || name == "tmdb_id" || !name.ends_with("_id") {
                continue;
            }
            if let Some(id) = value.as_str() {
                record.identifiers.insert(name.clone(), id.to_string());
            }
        }

        Some(record)
    }

    /// Fields to send to the store for an upsert
    pub fn to_document_data(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut data = serde_json::Map::new();
        if let Some(movie_id) = self.movie_id {
            data.insert("tmdb_id".to_string(), serde_json::Value::from(movie_id));
        }
        for (name, id) in &self.identifiers {
            data.insert(name.clone(), serde_json::Value::String(id.clone()));
        }
        data
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.values().all(|id| id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identifier_for_ignores_empty_values() {
        let record = OverrideRecord::new(1)
            .with_identifier("hotstar", "1260143699")
            .with_identifier("netflix", "");

        assert_eq!(record.identifier_for("hotstar"), Some("1260143699"));
        assert_eq!(record.identifier_for("netflix"), None);
        assert_eq!(record.identifier_for("prime"), None);
        assert!(!record.is_empty());
    }

    #[test]
    fn test_from_document_skips_metadata_and_non_strings() {
        let document = json!({
            "$id": "doc-1",
            "$collectionId": "streaming_links",
            "tmdb_id": 447365,
            "hotstar_id": "1260143699",
            "netflix_id": null,
            "prime_id": "",
            "notes": "ignored",
        });

        let record = OverrideRecord::from_document(&document).unwrap();
        assert_eq!(record.document_id.as_deref(), Some("doc-1"));
        assert_eq!(record.movie_id, Some(447365));
        assert_eq!(record.identifiers.len(), 2);
        assert_eq!(record.identifier_for("hotstar"), Some("1260143699"));
        assert_eq!(record.identifier_for("prime"), None);
    }

    #[test]
    fn test_to_document_data_includes_catalog_key() {
        let data = OverrideRecord::new(42)
            .with_identifier("zee5", "0-0-1z5")
            .to_document_data();

        assert_eq!(data.get("tmdb_id"), Some(&json!(42)));
        assert_eq!(data.get("zee5_id"), Some(&json!("0-0-1z5")));
    }
}
