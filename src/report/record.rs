// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Payload values as report rows.

use serde_json::Value;

/// Column name used for scalar payload values
pub const VALUE_COLUMN: &str = "Value";

/// A payload value that can be laid out as named columns.
///
/// The engine never looks inside payload values except through this trait,
/// and only when a report is written.
pub trait Tabular {
    /// `(column, value)` pairs in display order.
    fn fields(&self) -> Vec<(String, String)>;
}

/// Ordered column/value record, the usual payload output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Record::insert`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set a column, replacing the value if it already exists.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Objects become one column per key; anything else a single `Value` column.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => {
                let mut record = Self::new();
                for (key, value) in map {
                    record.insert(key.clone(), json_cell(value));
                }
                record
            }
            other => Self::new().with(VALUE_COLUMN, json_cell(other)),
        }
    }
}

fn json_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(json_cell).collect::<Vec<_>>().join("; "),
        other => other.to_string(),
    }
}

impl Tabular for Record {
    fn fields(&self) -> Vec<(String, String)> {
        self.fields.clone()
    }
}

impl Tabular for String {
    fn fields(&self) -> Vec<(String, String)> {
        vec![(VALUE_COLUMN.to_string(), self.clone())]
    }
}

impl Tabular for Value {
    fn fields(&self) -> Vec<(String, String)> {
        Record::from_json(self).fields
    }
}

impl Tabular for () {
    fn fields(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_replaces_existing_column() {
        let mut record = Record::new().with("Version", "4.8").with("Release", "528040");
        record.insert("Version", "4.8.1");
        assert_eq!(record.get("Version"), Some("4.8.1"));
        assert_eq!(record.len(), 2);
        assert_eq!(record.fields()[0].0, "Version");
    }

    #[test]
    fn test_from_json_object() {
        let record = Record::from_json(&json!({
            "Manufacturer": "Dell Inc.",
            "Serial": "7XK2Q93",
            "Ram": 16,
            "Drives": ["C:", "D:"],
            "Missing": null
        }));
        assert_eq!(record.get("Manufacturer"), Some("Dell Inc."));
        assert_eq!(record.get("Ram"), Some("16"));
        assert_eq!(record.get("Drives"), Some("C:; D:"));
        assert_eq!(record.get("Missing"), Some(""));
    }

    #[test]
    fn test_from_json_keeps_payload_column_order() {
        let value: Value =
            serde_json::from_str(r#"{"Serial":"7XK2Q93","Model":"OptiPlex","Bios":"1.2.0"}"#)
                .unwrap();
        let columns: Vec<String> = Record::from_json(&value)
            .fields()
            .into_iter()
            .map(|(column, _)| column)
            .collect();
        assert_eq!(columns, vec!["Serial", "Model", "Bios"]);
    }

    #[test]
    fn test_from_json_scalar() {
        let record = Record::from_json(&json!(true));
        assert_eq!(record.fields(), vec![("Value".to_string(), "true".to_string())]);
    }

    #[test]
    fn test_string_and_unit_tabular() {
        assert_eq!("ok".to_string().fields()[0].1, "ok");
        assert!(().fields().is_empty());
    }
}
