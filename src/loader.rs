//! Reading and validating the marks table.
//!
//! Input is comma separated text with a header row that must name a `Name` and
//! a `Marks` column. Validation runs in a fixed order (existence, schema, type)
//! and the first failure aborts the whole load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::{LoadError, LoadResult};

/// Header of the column holding student names.
pub const NAME_COLUMN: &str = "Name";

/// Header of the column holding numeric marks.
pub const MARKS_COLUMN: &str = "Marks";

/// A single validated input row.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub name: String,
    pub marks: f64,
}

impl Record {
    pub fn new(name: impl Into<String>, marks: f64) -> Self {
        Self {
            name: name.into(),
            marks,
        }
    }
}

/// Validated rows in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    /// Creates a table from already validated records.
    pub fn new(records: impl Into<Vec<Record>>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Returns the records in input order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the marks column.
    pub fn marks(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|record| record.marks)
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

/// Loads and validates the table stored at `path`.
pub fn load(path: impl AsRef<Path>) -> LoadResult<Table> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = load_from_reader(file)?;
    debug!("Loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Parses and validates CSV text from any reader.
pub fn load_from_reader<R: Read>(reader: R) -> LoadResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?;
    let name_index = headers.iter().position(|field| field == NAME_COLUMN);
    let marks_index = headers.iter().position(|field| field == MARKS_COLUMN);

    let (name_index, marks_index) = match (name_index, marks_index) {
        (Some(name), Some(marks)) => (name, marks),
        (name, marks) => {
            let missing = [(NAME_COLUMN, name), (MARKS_COLUMN, marks)]
                .into_iter()
                .filter(|(_, index)| index.is_none())
                .map(|(column, _)| column.to_string())
                .collect();
            return Err(LoadError::Schema { missing });
        }
    };

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let raw_marks = row.get(marks_index).unwrap_or_default();
        let marks = parse_marks(raw_marks).ok_or_else(|| LoadError::Type {
            row: index + 1,
            value: raw_marks.to_owned(),
        })?;
        let name = row.get(name_index).unwrap_or_default();
        records.push(Record::new(name, marks));
    }

    Ok(Table::new(records))
}

/// Coerces a raw marks cell into a finite number.
fn parse_marks(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
