//! CSV parsing service for the company dataset.
//!
//! Turns raw CSV text into a [`Dataset`]: the first row gives the column
//! names, every following non-blank row becomes a [`RowRecord`] in source
//! order. Values are kept as opaque strings.

use super::errors::{LoadError, LoadResult};
use super::models::{Dataset, RowRecord};
use super::schema::Schema;
use tracing::debug;

pub struct DatasetParser;

impl DatasetParser {
    /// Parses CSV text with header-row inference.
    ///
    /// Blank lines are skipped, but a line of empty fields such as `,,` is
    /// a record. Rows shorter than the header keep only the fields they
    /// carry; fields beyond the header are dropped.
    ///
    /// # Arguments
    ///
    /// * `text` - UTF-8 CSV content, first row holding the column names
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingHeader`] when the text has no header row,
    /// or [`LoadError::Csv`] when the content is not parseable CSV.
    ///
    /// # Examples
    ///
    /// ```
    /// use portage_list::domain::DatasetParser;
    ///
    /// let dataset = DatasetParser::parse("A,B\n1,2\n\n3,4\n").unwrap();
    /// assert_eq!(dataset.len(), 2);
    /// assert_eq!(dataset.records()[1].value("B"), "4");
    /// ```
    pub fn parse(text: &str) -> LoadResult<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(LoadError::MissingHeader);
        }

        let schema = Schema::from_headers(headers.iter());
        let mut records = Vec::new();

        for (line, result) in reader.records().enumerate() {
            let raw = result?;
            // only a line with nothing on it is blank; ",," is a row of empty fields
            if raw.len() == 1 && raw.get(0) == Some("") {
                continue;
            }
            if raw.len() > schema.len() {
                debug!(
                    record = line + 1,
                    dropped = raw.len() - schema.len(),
                    "record has more fields than the header"
                );
            }

            let fields = schema
                .columns()
                .iter()
                .zip(raw.iter())
                .map(|(column, value)| (column.clone(), value.to_string()))
                .collect();
            records.push(RowRecord::new(fields));
        }

        Ok(Dataset::new(schema, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::{self, KNOWN_COLUMNS};

    #[test]
    fn test_two_rows_in_source_order() {
        let dataset = DatasetParser::parse("A,B\nx1,y1\nx2,y2\n").unwrap();
        assert_eq!(dataset.len(), 2);
        for record in dataset.records() {
            assert_eq!(record.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        }
        assert_eq!(dataset.records()[0].value("A"), "x1");
        assert_eq!(dataset.records()[1].value("B"), "y2");
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let dataset = DatasetParser::parse("A,B\n\n1,2\n\n\n3,4\n\n").unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_rows_of_empty_fields_are_kept() {
        let dataset = DatasetParser::parse("A,B\nx,1\n,\ny,2\n").unwrap();
        assert_eq!(dataset.len(), 3);
        let empty = &dataset.records()[1];
        assert_eq!(empty.len(), 2);
        assert_eq!(empty.value("A"), "");
        assert_eq!(dataset.records()[2].value("A"), "y");
    }

    #[test]
    fn test_quoted_fields() {
        let csv = "Nom,\"Label \"\"Zéro frais caché\"\"\"\n\"Alpha, SAS\",Oui\n";
        let dataset = DatasetParser::parse(csv).unwrap();
        assert_eq!(dataset.records()[0].value("Nom"), "Alpha, SAS");
        assert_eq!(dataset.records()[0].value(schema::LABEL_ZERO_HIDDEN_FEES), "Oui");
    }

    #[test]
    fn test_short_and_long_rows() {
        let dataset = DatasetParser::parse("A,B,C\n1,2\n4,5,6,7\n").unwrap();
        let short = &dataset.records()[0];
        assert_eq!(short.len(), 2);
        assert_eq!(short.get("C"), None);
        let long = &dataset.records()[1];
        assert_eq!(long.len(), 3);
        assert_eq!(long.value("C"), "6");
    }

    #[test]
    fn test_header_only_gives_empty_dataset() {
        let dataset = DatasetParser::parse("A,B\n").unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.schema().len(), 2);
    }

    #[test]
    fn test_empty_text_has_no_header() {
        assert!(matches!(DatasetParser::parse(""), Err(LoadError::MissingHeader)));
    }

    #[test]
    fn test_values_stay_opaque() {
        let dataset = DatasetParser::parse("TJM\n 0500 \n").unwrap();
        assert_eq!(dataset.records()[0].value("TJM"), " 0500 ");
    }

    #[test]
    fn test_bundled_data_matches_known_columns() {
        let dataset = DatasetParser::parse(include_str!("../../data/companies.csv")).unwrap();
        assert!(dataset.schema().missing().is_empty());
        assert_eq!(dataset.schema().len(), KNOWN_COLUMNS.len());
        assert!(dataset.len() > 10);
        assert!(dataset.incomplete_rows().is_empty());
    }
}
