use std::collections::HashMap;
use tera::Context;

use super::collection::Cell;
use super::renderer::ViewRenderer;
use crate::config::{Field, RecordView as RecordConfig};
use crate::data::JsonPathExtractor;
use crate::error::Result;
use crate::resource::ResourceRecord;

/// A single record rendered alongside the identifier it was requested with
pub struct RecordView<'a> {
    config: &'a RecordConfig,
    record: &'a ResourceRecord,
    params: &'a HashMap<String, String>,
}

impl<'a> RecordView<'a> {
    pub fn new(
        config: &'a RecordConfig,
        record: &'a ResourceRecord,
        params: &'a HashMap<String, String>,
    ) -> Self {
        Self {
            config,
            record,
            params,
        }
    }

    fn fields(&self) -> Result<Vec<Cell>> {
        if self.config.fields.is_empty() {
            return Ok(vec![
                Cell {
                    display: "ID".to_string(),
                    value: self.record.id.to_string(),
                },
                Cell {
                    display: "Name".to_string(),
                    value: self.record.name.clone(),
                },
            ]);
        }

        let value = self.record.to_value();
        self.config
            .fields
            .iter()
            .map(|field| {
                Ok(Cell {
                    display: field.display.clone(),
                    value: self.field_value(field, &value)?,
                })
            })
            .collect()
    }

    fn field_value(&self, field: &Field, value: &serde_json::Value) -> Result<String> {
        if let Some(param) = &field.param {
            return Ok(self.params.get(param).cloned().unwrap_or_default());
        }
        match &field.path {
            Some(path) => Ok(JsonPathExtractor::new(path)?.extract_text(value)),
            None => Ok(String::new()),
        }
    }
}

impl ViewRenderer for RecordView<'_> {
    fn template(&self) -> &'static str {
        "record.html"
    }

    fn populate(&self, context: &mut Context) -> Result<()> {
        context.insert("record_id", &self.record.id);
        context.insert(
            "identifier",
            self.params
                .get(&self.config.identifier)
                .map(String::as_str)
                .unwrap_or_default(),
        );
        context.insert("fields", &self.fields()?);
        Ok(())
    }
}
