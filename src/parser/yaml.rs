//! YAML decoding into the intermediate tree

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::model::{Node, Number};
use indexmap::IndexMap;
use serde_yaml::Value as YamlValue;

/// Decode YAML text into a mapping or sequence.
///
/// Nested values below the top level are carried over as-is, never flattened.
/// A bare scalar (including an empty document) is rejected as an unsupported shape.
pub fn parse_yaml(content: &str) -> ConversionResult<Node> {
    if content.trim().is_empty() {
        return Err(ConversionError::parse(
            ConversionErrorKind::UnsupportedShape,
            "document is empty, expected a mapping or sequence",
        ));
    }

    let value: YamlValue = serde_yaml::from_str(content).map_err(|e| {
        ConversionError::parse(ConversionErrorKind::InvalidSyntax, e.to_string())
    })?;

    let node = convert_yaml_value(value)?;
    if !node.is_container() {
        return Err(ConversionError::parse(
            ConversionErrorKind::UnsupportedShape,
            format!(
                "top-level value is a {}, expected a mapping or sequence",
                node.kind_name()
            ),
        ));
    }

    Ok(node)
}

fn convert_yaml_value(value: YamlValue) -> ConversionResult<Node> {
    Ok(match value {
        YamlValue::Null => Node::Null,
        YamlValue::Bool(b) => Node::Bool(b),
        YamlValue::Number(n) => Node::Number(convert_number(&n)),
        YamlValue::String(s) => Node::String(s),
        YamlValue::Sequence(items) => Node::List(
            items
                .into_iter()
                .map(convert_yaml_value)
                .collect::<ConversionResult<Vec<_>>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut entries = IndexMap::with_capacity(mapping.len());
            for (key, value) in mapping {
                entries.insert(mapping_key(key)?, convert_yaml_value(value)?);
            }
            Node::Map(entries)
        }
        YamlValue::Tagged(tagged) => convert_yaml_value(tagged.value)?,
    })
}

fn convert_number(number: &serde_yaml::Number) -> Number {
    if let Some(i) = number.as_i64() {
        Number::Int(i)
    } else if let Some(u) = number.as_u64() {
        Number::UInt(u)
    } else {
        Number::Float(number.as_f64().unwrap_or(f64::NAN))
    }
}

/// Scalar keys are rendered as text; collection keys have no JSON equivalent
fn mapping_key(key: YamlValue) -> ConversionResult<String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Tagged(tagged) => mapping_key(tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => Err(ConversionError::parse(
            ConversionErrorKind::UnsupportedShape,
            "mapping keys must be scalars",
        )),
    }
}
