use std::collections::HashMap;

use crate::error::{ProcessingError, Result};

/// One decoded DATA record: column name → raw value, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataRow {
    fields: Vec<(String, String)>,
}

impl DataRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.fields.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DataRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl IntoIterator for DataRow {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Pair split DATA fields with split COLUMNS names
///
/// Both slices still carry the leading and trailing placeholder produced by the
/// wrapping delimiters; those positions are skipped.
pub fn zip_row(columns: &[String], fields: Vec<String>) -> Result<DataRow> {
    if columns.len() != fields.len() {
        return Err(ProcessingError::MalformedRow {
            columns: columns.len().saturating_sub(2),
            fields: fields.len().saturating_sub(2),
        }
        .into());
    }
    let last = fields.len().saturating_sub(1);
    Ok(columns
        .iter()
        .cloned()
        .zip(fields)
        .enumerate()
        .filter(|(i, _)| *i != 0 && *i != last)
        .map(|(_, pair)| pair)
        .collect())
}
