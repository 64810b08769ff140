//! JSON writer

use crate::error::{ConversionError, ConversionResult};
use crate::model::{Node, Number};
use serde_json::{Map, Value};

/// Pretty-print `node` as JSON with two-space indentation, keys in source order
pub fn write_json(node: &Node) -> ConversionResult<String> {
    let value = to_json_value(node)?;
    serde_json::to_string_pretty(&value).map_err(|e| ConversionError::serialize(e.to_string()))
}

/// Convert the tree into a `serde_json::Value`; fails on non-finite floats
pub fn to_json_value(node: &Node) -> ConversionResult<Value> {
    Ok(match node {
        Node::Null => Value::Null,
        Node::Bool(b) => Value::Bool(*b),
        Node::Number(n) => Value::Number(to_json_number(n)?),
        Node::String(s) => Value::String(s.clone()),
        Node::List(items) => Value::Array(
            items
                .iter()
                .map(to_json_value)
                .collect::<ConversionResult<Vec<_>>>()?,
        ),
        Node::Map(entries) => {
            let mut object = Map::with_capacity(entries.len());
            for (key, value) in entries {
                object.insert(key.clone(), to_json_value(value)?);
            }
            Value::Object(object)
        }
    })
}

fn to_json_number(number: &Number) -> ConversionResult<serde_json::Number> {
    match *number {
        Number::Int(i) => Ok(i.into()),
        Number::UInt(u) => Ok(u.into()),
        Number::Float(f) => serde_json::Number::from_f64(f).ok_or_else(|| {
            ConversionError::serialize(format!("{} cannot be represented in JSON", f))
        }),
    }
}
