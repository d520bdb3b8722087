//! Schema-aware splitting for structured and delimited text.

use super::Splitter;
use crate::error::{SplitError, SplitResult};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Splits hierarchical documents by their structure.
///
/// The text is parsed as JSON (after a truncation repair pass), then as
/// YAML. A structured object or array is re-serialized canonically and, if
/// too large, recursively partitioned into sub-documents. Anything else is
/// treated as delimited text: the first `header_lines` lines are repeated
/// atop every batch of `max_num_rows` data lines.
pub struct SchemaSplitter {
    max_chunk_size: usize,
    max_num_rows: usize,
    header_lines: usize,
}

impl SchemaSplitter {
    pub fn new(max_chunk_size: usize, max_num_rows: usize, header_lines: usize) -> Self {
        Self {
            max_chunk_size,
            max_num_rows,
            header_lines,
        }
    }

    fn split_structured(&self, value: &Value) -> SplitResult<Vec<String>> {
        let normalized = to_json(value);
        if normalized.len() <= self.max_chunk_size {
            return Ok(vec![normalized]);
        }

        let pieces = partition_value(value, self.max_chunk_size)?;
        debug!("Partitioned structured input into {} pieces", pieces.len());
        Ok(pieces.iter().map(to_json).collect())
    }

    fn split_delimited(&self, text: &str) -> Vec<String> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.is_empty() {
            warn!("No content to split");
            return vec![];
        }

        let header_count = self.header_lines.min(lines.len());
        let (header, data) = lines.split_at(header_count);

        data.chunks(self.max_num_rows)
            .map(|batch| {
                let mut part: Vec<&str> = header.to_vec();
                part.extend_from_slice(batch);
                part.join("\n")
            })
            .collect()
    }
}

impl Splitter for SchemaSplitter {
    fn split(&self, text: &str) -> SplitResult<Vec<String>> {
        if let Some(value) = parse_structured(text) {
            if value.is_object() || value.is_array() {
                return self.split_structured(&value);
            }
        }
        Ok(self.split_delimited(text))
    }
}

/// Try JSON first (with the truncation repair applied), then YAML. Scalars
/// parse successfully but are handed back for the delimited fallback.
fn parse_structured(text: &str) -> Option<Value> {
    let repaired = repair_truncated(text);
    if let Ok(value) = serde_json::from_str::<Value>(&repaired) {
        return Some(value);
    }
    serde_yaml::from_str::<Value>(text).ok()
}

/// If the text opens with `{` or `[` but was cut off before its closers,
/// append the missing ones (string state respected) so truncated uploads
/// still parse.
fn repair_truncated(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        return trimmed.to_string();
    }
    if trimmed.ends_with('}') || trimmed.ends_with(']') {
        return trimmed.to_string();
    }

    let mut stack = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    for c in trimmed.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                stack.pop();
            }
            _ => {}
        }
    }

    if stack.is_empty() && !in_string {
        return trimmed.to_string();
    }

    debug!("Input looks truncated; appending {} closer(s)", stack.len());
    let mut repaired = trimmed.to_string();
    if in_string {
        repaired.push('"');
    }
    while let Some(closer) = stack.pop() {
        repaired.push(closer);
    }
    repaired
}

/// Recursively partition an object or array into values whose canonical
/// serialization fits in `budget` bytes.
fn partition_value(value: &Value, budget: usize) -> SplitResult<Vec<Value>> {
    if json_len(value) <= budget {
        return Ok(vec![value.clone()]);
    }

    match value {
        Value::Object(map) => {
            let mut pieces = Vec::new();
            let mut current = Map::new();
            for (key, val) in map {
                let mut entry = Map::new();
                entry.insert(key.clone(), val.clone());
                let entry_value = Value::Object(entry);

                if json_len(&entry_value) > budget {
                    flush_object(&mut pieces, &mut current);
                    // Room left for the `{"key":}` wrapper around each piece.
                    let overhead = to_json(&Value::String(key.clone())).len() + 3;
                    let child_budget = budget.checked_sub(overhead).filter(|b| *b > 0).ok_or_else(
                        || {
                            SplitError::Malformed(format!(
                                "entry '{key}' leaves no room for its value"
                            ))
                        },
                    )?;
                    for piece in partition_value(val, child_budget)? {
                        let mut wrapper = Map::new();
                        wrapper.insert(key.clone(), piece);
                        pieces.push(Value::Object(wrapper));
                    }
                } else {
                    let mut candidate = current.clone();
                    candidate.insert(key.clone(), val.clone());
                    if !current.is_empty() && json_len(&Value::Object(candidate.clone())) > budget {
                        flush_object(&mut pieces, &mut current);
                        current.insert(key.clone(), val.clone());
                    } else {
                        current = candidate;
                    }
                }
            }
            flush_object(&mut pieces, &mut current);
            Ok(pieces)
        }
        Value::Array(items) => {
            let mut pieces = Vec::new();
            let mut current: Vec<Value> = Vec::new();
            for item in items {
                if json_len(item) + 2 > budget {
                    flush_array(&mut pieces, &mut current);
                    let child_budget = budget.checked_sub(2).filter(|b| *b > 0).ok_or_else(|| {
                        SplitError::Malformed("array budget too small for any element".to_string())
                    })?;
                    for piece in partition_value(item, child_budget)? {
                        pieces.push(Value::Array(vec![piece]));
                    }
                } else {
                    let mut candidate = current.clone();
                    candidate.push(item.clone());
                    if !current.is_empty() && json_len(&Value::Array(candidate.clone())) > budget {
                        flush_array(&mut pieces, &mut current);
                        current.push(item.clone());
                    } else {
                        current = candidate;
                    }
                }
            }
            flush_array(&mut pieces, &mut current);
            Ok(pieces)
        }
        _ => Err(SplitError::Malformed(
            "oversized scalar value cannot be partitioned".to_string(),
        )),
    }
}

fn flush_object(pieces: &mut Vec<Value>, current: &mut Map<String, Value>) {
    if !current.is_empty() {
        pieces.push(Value::Object(std::mem::take(current)));
    }
}

fn flush_array(pieces: &mut Vec<Value>, current: &mut Vec<Value>) {
    if !current.is_empty() {
        pieces.push(Value::Array(std::mem::take(current)));
    }
}

fn to_json(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

fn json_len(value: &Value) -> usize {
    to_json(value).len()
}
