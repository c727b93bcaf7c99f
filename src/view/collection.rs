use serde::Serialize;
use tera::Context;

use super::renderer::ViewRenderer;
use crate::config::CollectionView as CollectionConfig;
use crate::data::JsonPathExtractor;
use crate::error::Result;
use crate::resource::ResourceCollection;

#[derive(Debug, Serialize)]
struct Row {
    key: i64,
    name: String,
    cells: Vec<Cell>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Cell {
    pub(crate) display: String,
    pub(crate) value: String,
}

/// One row per record, keyed by the record id, in source order
pub struct CollectionView<'a> {
    config: &'a CollectionConfig,
    collection: &'a ResourceCollection,
}

impl<'a> CollectionView<'a> {
    pub fn new(config: &'a CollectionConfig, collection: &'a ResourceCollection) -> Self {
        Self { config, collection }
    }

    fn rows(&self) -> Result<Vec<Row>> {
        let columns = self
            .config
            .columns
            .iter()
            .map(|column| Ok((column.display.as_str(), JsonPathExtractor::new(&column.path)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(self
            .collection
            .records()
            .iter()
            .map(|record| {
                let value = record.to_value();
                Row {
                    key: record.id,
                    name: record.name.clone(),
                    cells: columns
                        .iter()
                        .map(|(display, extractor)| Cell {
                            display: display.to_string(),
                            value: extractor.extract_text(&value),
                        })
                        .collect(),
                }
            })
            .collect())
    }
}

impl ViewRenderer for CollectionView<'_> {
    fn template(&self) -> &'static str {
        "collection.html"
    }

    fn populate(&self, context: &mut Context) -> Result<()> {
        context.insert("rows", &self.rows()?);
        context.insert("empty_message", &self.config.empty_message);
        Ok(())
    }
}
