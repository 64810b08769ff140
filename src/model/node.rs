//! Tree-shaped values decoded from structured sources

use indexmap::IndexMap;
use std::fmt;

/// Numeric scalar (integer or floating-point)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    /// Returns true unless this is a NaN or infinite float
    pub fn is_finite(&self) -> bool {
        match self {
            Number::Float(f) => f.is_finite(),
            Number::Int(_) | Number::UInt(_) => true,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::UInt(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

/// A scalar, an ordered list, or an ordered key/value mapping
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Node>),
    Map(IndexMap<String, Node>),
}

impl Node {
    /// Mapping or sequence, as opposed to a bare scalar
    pub fn is_container(&self) -> bool {
        matches!(self, Node::List(_) | Node::Map(_))
    }

    /// Null or the empty string
    pub fn is_empty_scalar(&self) -> bool {
        match self {
            Node::Null => true,
            Node::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Short name of the variant, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::List(_) => "sequence",
            Node::Map(_) => "mapping",
        }
    }

    /// Drop null and empty-string entries from every mapping and sequence
    pub fn prune_empty(self) -> Node {
        match self {
            Node::List(items) => Node::List(
                items
                    .into_iter()
                    .filter(|item| !item.is_empty_scalar())
                    .map(Node::prune_empty)
                    .collect(),
            ),
            Node::Map(entries) => Node::Map(
                entries
                    .into_iter()
                    .filter(|(_, value)| !value.is_empty_scalar())
                    .map(|(key, value)| (key, value.prune_empty()))
                    .collect(),
            ),
            scalar => scalar,
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}
