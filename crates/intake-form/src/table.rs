//! # Record Table
//!
//! The dataset behind the submissions table. Records are only ever
//! appended, and only by the [`Accumulator`](crate::Accumulator); the
//! table hands out shared slices so a renderer cannot mutate them.

use intake_core::{FormField, RecordId, SubmittedRecord};
use serde::{Deserialize, Serialize};

/// One column of the submissions table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub field: FormField,
    pub header: String,
    /// Whether the renderer should offer sorting on this column.
    pub sortable: bool,
}

impl ColumnSpec {
    pub fn new(field: FormField) -> Self {
        Self {
            field,
            header: field.label().to_string(),
            sortable: false,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

/// The eight form fields in form order; Email is sortable.
pub fn default_columns() -> Vec<ColumnSpec> {
    FormField::all()
        .iter()
        .map(|field| match field {
            FormField::Email => ColumnSpec::new(*field).sortable(),
            _ => ColumnSpec::new(*field),
        })
        .collect()
}

/// Displays the current table contents. Sorting and pagination belong to
/// the implementation.
pub trait TableRenderer {
    fn render(&mut self, columns: &[ColumnSpec], records: &[SubmittedRecord]);
}

/// Append-only, insertion-ordered sequence of submitted records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordTable {
    records: Vec<SubmittedRecord>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, record: SubmittedRecord) -> &SubmittedRecord {
        self.records.push(record);
        let last = self.records.len() - 1;
        &self.records[last]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SubmittedRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SubmittedRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: RecordId) -> Option<&SubmittedRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Text shown in a cell: display names for region columns, raw values
    /// otherwise.
    pub fn cell(record: &SubmittedRecord, field: FormField) -> &str {
        record.display_value(field)
    }

    /// All rows rendered as text for the given columns.
    pub fn rows(&self, columns: &[ColumnSpec]) -> Vec<Vec<String>> {
        self.records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| Self::cell(record, c.field).to_string())
                    .collect()
            })
            .collect()
    }

    /// Hand the contents to a renderer. Nothing is rendered while the
    /// table is empty.
    pub fn render_into<R: TableRenderer + ?Sized>(&self, columns: &[ColumnSpec], renderer: &mut R) -> bool {
        if self.records.is_empty() {
            return false;
        }
        renderer.render(columns, &self.records);
        true
    }
}

impl<'a> IntoIterator for &'a RecordTable {
    type Item = &'a SubmittedRecord;
    type IntoIter = std::slice::Iter<'a, SubmittedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
