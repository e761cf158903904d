use super::schema::{self, Schema};
use std::fmt;

/// Position of a record in source order, used as its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(pub usize);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One CSV data row: column name to opaque string value, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowRecord {
    fields: Vec<(String, String)>,
}

impl RowRecord {
    /// Creates a record from `(column, value)` pairs in header order.
    ///
    /// # Arguments
    ///
    /// * `fields` - Pairs as read from one CSV row; may be shorter than the header
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Value of `column`, `None` when the row stopped before it.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == column)
            .map(|(_, value)| value.as_str())
    }

    /// Value of a column, or the empty string when the record lacks it.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Column names carried by this record, in header order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Number of fields the row actually carried.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Company name, empty when absent.
    pub fn name(&self) -> &str {
        self.value(schema::NAME)
    }

    /// Company website, empty when absent.
    pub fn website(&self) -> &str {
        self.value(schema::WEBSITE)
    }
}

/// The loaded companies: a header schema and the records in source order.
///
/// # Examples
///
/// ```
/// use portage_list::domain::{DatasetParser, RowId};
///
/// let dataset = DatasetParser::parse("Nom de l'entreprise,TJM\nAlpha,500\nAlpha,450\n").unwrap();
/// assert_eq!(dataset.len(), 2);
/// // duplicate names stay distinct records
/// assert_eq!(dataset.get(RowId(1)).unwrap().value("TJM"), "450");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    schema: Schema,
    records: Vec<RowRecord>,
}

impl Dataset {
    /// Creates a dataset; record `i` gets the identity `RowId(i)`.
    ///
    /// # Arguments
    ///
    /// * `schema` - Normalized header of the source
    /// * `records` - Data rows in source order
    pub fn new(schema: Schema, records: Vec<RowRecord>) -> Self {
        Self { schema, records }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[RowRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record with identity `id`.
    pub fn get(&self, id: RowId) -> Option<&RowRecord> {
        self.records.get(id.0)
    }

    pub fn first(&self) -> Option<&RowRecord> {
        self.records.first()
    }

    /// Records with their identities, in source order.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &RowRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| (RowId(index), record))
    }

    /// Identities of every record, in source order.
    pub fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        (0..self.records.len()).map(RowId)
    }

    /// Records carrying fewer fields than the header declares.
    pub fn incomplete_rows(&self) -> Vec<RowId> {
        let expected = self.schema.len();
        self.iter()
            .filter(|(_, record)| record.len() < expected)
            .map(|(id, _)| id)
            .collect()
    }
}
