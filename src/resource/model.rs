use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::error::{Result, SiteStackError};

/// One remote data item. Only `id` and `name` are required; everything else
/// the source sends is kept as-is.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResourceRecord {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRecord {
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| SiteStackError::Parse(format!("Invalid resource record: {}", e)))
    }

    /// Full JSON form, used for JSONPath lookups
    pub fn to_value(&self) -> Value {
        let mut map = self.extra.clone();
        map.insert("id".to_string(), Value::from(self.id));
        map.insert("name".to_string(), Value::String(self.name.clone()));
        Value::Object(map)
    }
}

/// Records in the order the source returned them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceCollection {
    records: Vec<ResourceRecord>,
}

impl ResourceCollection {
    pub fn new(records: Vec<ResourceRecord>) -> Self {
        Self { records }
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| {
                    ResourceRecord::from_value(item).map_err(|e| {
                        SiteStackError::Parse(format!("Collection item {}: {}", idx, e))
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::new),
            other => Err(SiteStackError::Parse(format!(
                "Expected a JSON array for a collection, got {}",
                kind_of(&other)
            ))),
        }
    }

    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ids that appear more than once, in first-seen order
    pub fn duplicate_ids(&self) -> Vec<i64> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for record in &self.records {
            if !seen.insert(record.id) && !duplicates.contains(&record.id) {
                duplicates.push(record.id);
            }
        }
        duplicates
    }
}

/// Result of one resource fetch that did not fail outright
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceOutcome {
    Record(ResourceRecord),
    Collection(ResourceCollection),
    NotFound,
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_keeps_extra_fields() {
        let record = ResourceRecord::from_value(json!({
            "id": 1,
            "name": "Leanne Graham",
            "email": "Sincere@april.biz"
        }))
        .unwrap();

        assert_eq!(record.id, 1);
        assert_eq!(record.name, "Leanne Graham");
        assert_eq!(record.extra["email"], "Sincere@april.biz");
        assert_eq!(record.to_value()["email"], "Sincere@april.biz");
        assert_eq!(record.to_value()["id"], 1);
    }

    #[test]
    fn test_record_requires_id_and_name() {
        assert!(ResourceRecord::from_value(json!({"name": "No Id"})).is_err());
        assert!(ResourceRecord::from_value(json!({"id": 1})).is_err());
        assert!(ResourceRecord::from_value(json!({"id": "1", "name": "x"})).is_err());
    }

    #[test]
    fn test_collection_preserves_order() {
        let collection = ResourceCollection::from_value(json!([
            {"id": 2, "name": "B"},
            {"id": 1, "name": "A"}
        ]))
        .unwrap();

        let names: Vec<&str> = collection.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_empty_collection() {
        let collection = ResourceCollection::from_value(json!([])).unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_collection_rejects_object() {
        let err = ResourceCollection::from_value(json!({})).unwrap_err();
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_duplicate_ids() {
        let collection = ResourceCollection::from_value(json!([
            {"id": 1, "name": "A"},
            {"id": 1, "name": "A again"},
            {"id": 2, "name": "B"},
            {"id": 1, "name": "A thrice"}
        ]))
        .unwrap();

        assert_eq!(collection.duplicate_ids(), vec![1]);
    }
}
