use serde_json::Value;
use serde_json_path::JsonPath;

use crate::error::{Result, SiteStackError};

/// JSONPath extractor for pulling display values out of records
#[derive(Debug, Clone)]
pub struct JsonPathExtractor {
    path: JsonPath,
}

impl JsonPathExtractor {
    pub fn new(path: &str) -> Result<Self> {
        // "@this" selects the whole value
        let source = if path == "@this" { "$" } else { path };

        let parsed_path = JsonPath::parse(source).map_err(|e| {
            SiteStackError::Validation(format!("Failed to parse JSONPath '{}': {}", path, e))
        })?;

        Ok(Self { path: parsed_path })
    }

    /// Extract the first matching value
    pub fn extract_single(&self, data: &Value) -> Option<Value> {
        self.path.query(data).first().cloned()
    }

    /// Extract the first match as display text; strings lose their quotes,
    /// missing values render empty
    pub fn extract_text(&self, data: &Value) -> String {
        match self.extract_single(data) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_single() {
        let data = json!({
            "address": {
                "city": "Gwenborough"
            }
        });

        let extractor = JsonPathExtractor::new("$.address.city").unwrap();
        let result = extractor.extract_single(&data);

        assert_eq!(result, Some(json!("Gwenborough")));
    }

    #[test]
    fn test_extract_text() {
        let data = json!({"id": 5, "name": "Leanne Graham", "phone": null});

        assert_eq!(JsonPathExtractor::new("$.name").unwrap().extract_text(&data), "Leanne Graham");
        assert_eq!(JsonPathExtractor::new("$.id").unwrap().extract_text(&data), "5");
        assert_eq!(JsonPathExtractor::new("$.phone").unwrap().extract_text(&data), "");
        assert_eq!(JsonPathExtractor::new("$.missing").unwrap().extract_text(&data), "");
    }

    #[test]
    fn test_extract_at_this() {
        let data = json!("plain");

        let extractor = JsonPathExtractor::new("@this").unwrap();
        assert_eq!(extractor.extract_text(&data), "plain");
    }

    #[test]
    fn test_invalid_path() {
        assert!(JsonPathExtractor::new("$[").is_err());
    }
}
