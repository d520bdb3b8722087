//! Conversion of structured and tabular sources to JSON.

use super::Converter;
use crate::error::{ConvertError, ConvertResult};
use calamine::{open_workbook_auto, Data, Reader};
use serde_json::{Map, Value};
use sift_core::ext_key;
use std::path::Path;

/// Converts YAML, CSV and Excel sources into pretty-printed JSON.
///
/// CSV rows become an array of objects keyed by the header row. A
/// single-sheet workbook is unwrapped to its record array; multiple sheets
/// become an object keyed by sheet name.
pub struct JsonConverter;

impl JsonConverter {
    pub fn new() -> Self {
        Self
    }

    fn convert_yaml(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        let text = std::fs::read_to_string(input)?;
        let value: Value =
            serde_yaml::from_str(&text).map_err(|e| ConvertError::ParseFailed {
                format: "yaml",
                message: e.to_string(),
            })?;
        write_pretty(output, &value)
    }

    fn convert_csv(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        let mut reader = csv::Reader::from_path(input).map_err(|e| ConvertError::ParseFailed {
            format: "csv",
            message: e.to_string(),
        })?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ConvertError::ParseFailed {
                format: "csv",
                message: e.to_string(),
            })?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| ConvertError::ParseFailed {
                format: "csv",
                message: e.to_string(),
            })?;
            let mut row = Map::new();
            for (header, field) in headers.iter().zip(record.iter()) {
                row.insert(header.clone(), Value::String(field.to_string()));
            }
            records.push(Value::Object(row));
        }

        write_pretty(output, &Value::Array(records))
    }

    fn convert_excel(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        let mut workbook = open_workbook_auto(input).map_err(|e| ConvertError::ParseFailed {
            format: "excel",
            message: e.to_string(),
        })?;

        let mut sheets = Map::new();
        for (name, range) in workbook.worksheets() {
            let mut rows = range.rows();
            let headers: Vec<String> = match rows.next() {
                Some(row) => row.iter().map(cell_to_string).collect(),
                None => continue,
            };

            let mut records = Vec::new();
            for row in rows {
                let mut record = Map::new();
                for (header, cell) in headers.iter().zip(row.iter()) {
                    record.insert(header.clone(), cell_to_value(cell));
                }
                records.push(Value::Object(record));
            }
            sheets.insert(name, Value::Array(records));
        }

        if sheets.is_empty() {
            return Err(ConvertError::EmptyInput(input.to_path_buf()));
        }

        // A single-sheet workbook unwraps to its record array.
        let value = if sheets.len() == 1 {
            sheets.into_iter().next().map(|(_, v)| v).unwrap_or_default()
        } else {
            Value::Object(sheets)
        };
        write_pretty(output, &value)
    }
}

impl Default for JsonConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for JsonConverter {
    fn convert(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        match ext_key(input).as_str() {
            "yaml" | "yml" => self.convert_yaml(input, output),
            "csv" => self.convert_csv(input, output),
            "xlsx" | "xls" => self.convert_excel(input, output),
            other => Err(ConvertError::Unsupported {
                strategy: "json",
                extension: other.to_string(),
            }),
        }
    }

    fn target_extension(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["yaml", "yml", "csv", "xlsx", "xls"]
    }
}

fn write_pretty(output: &Path, value: &Value) -> ConvertResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| ConvertError::ParseFailed {
        format: "json",
        message: e.to_string(),
    })?;
    std::fs::write(output, json)?;
    Ok(())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Float(f) => serde_json::json!(f),
        Data::Int(i) => serde_json::json!(i),
        Data::Bool(b) => Value::Bool(*b),
        other => Value::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_yaml_to_json() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cfg.yaml");
        let output = dir.path().join("cfg.json");
        std::fs::write(&input, "name: demo\nitems:\n  - 1\n  - 2\n").unwrap();

        JsonConverter::new().convert(&input, &output).unwrap();
        let value: Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(value["name"], "demo");
        assert_eq!(value["items"][1], 2);
    }

    #[test]
    fn test_csv_to_record_array() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("rows.csv");
        let output = dir.path().join("rows.json");
        std::fs::write(&input, "id,name\n1,alpha\n2,beta\n").unwrap();

        JsonConverter::new().convert(&input, &output).unwrap();
        let value: Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["id"], "1");
        assert_eq!(value[1]["name"], "beta");
    }

    #[test]
    fn test_invalid_yaml_is_a_parse_failure() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.yaml");
        let output = dir.path().join("bad.json");
        std::fs::write(&input, "key: [unclosed\nother: :::").unwrap();

        let err = JsonConverter::new().convert(&input, &output).unwrap_err();
        assert!(matches!(err, ConvertError::ParseFailed { format: "yaml", .. }));
    }
}
