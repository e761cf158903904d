//! Attribute-by-company transposition of the dataset.

use super::models::{Dataset, RowId};

pub const ATTRIBUTE_HEADER: &str = "Attribut";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub attribute: String,
    /// One value per company, in the order of [`ComparisonGrid::companies`].
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonGrid {
    /// Company columns keyed by row id, so equal names never merge.
    pub companies: Vec<(RowId, String)>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonGrid {
    /// Transposes `dataset`: one row per column of the schema, one column per
    /// record. An empty dataset has no rows.
    pub fn build(dataset: &Dataset) -> Self {
        let companies: Vec<(RowId, String)> = dataset
            .iter()
            .map(|(id, record)| (id, record.name().to_string()))
            .collect();

        if dataset.is_empty() {
            return Self { companies, rows: Vec::new() };
        }

        let rows = dataset
            .schema()
            .columns()
            .iter()
            .map(|attribute| ComparisonRow {
                attribute: attribute.clone(),
                values: dataset
                    .records()
                    .iter()
                    .map(|record| record.value(attribute).to_string())
                    .collect(),
            })
            .collect();

        Self { companies, rows }
    }

    /// Header labels: the attribute column followed by company names.
    pub fn header(&self) -> Vec<&str> {
        std::iter::once(ATTRIBUTE_HEADER)
            .chain(self.companies.iter().map(|(_, name)| name.as_str()))
            .collect()
    }

    pub fn column_count(&self) -> usize {
        self.companies.len() + 1
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
