//! Semantic model of the JSON documents exchanged with the Ravello REST API.
//!
//! Applications and images are deeply nested, loosely-typed JSON. Rather than
//! passing `serde_json::Value` around, callers work with a closed set of
//! variants and typed lookups that name the missing or mistyped field.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a document does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("missing field '{path}'")]
    MissingField { path: String },

    #[error("field '{path}' should be a {expected}, found {found}")]
    WrongType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// A single value inside a [`Document`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integer above `i64::MAX`; kept exact so it is written back unchanged.
    Unsigned(u64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Document(Document),
}

impl Value {
    /// Variant name, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) | Self::Unsigned(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Document(_) => "document",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Self::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_document_mut(&mut self) -> Option<&mut Document> {
        match self {
            Self::Document(doc) => Some(doc),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Self::Document(doc)
    }
}

/// An ordered mapping from string keys to [`Value`]s.
///
/// Key order is preserved, so a document fetched from the API serializes back
/// with its fields in the order the server sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(IndexMap<String, Value>);

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Insert or replace a field. Replacing keeps the field's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Value)> {
        self.0.iter_mut()
    }

    /// Look up a top-level string field.
    pub fn require_str(&self, key: &str) -> Result<&str, DocumentError> {
        let value = self.at_path(&[key])?;
        value.as_str().ok_or_else(|| DocumentError::WrongType {
            path: key.to_string(),
            expected: "string",
            found: value.kind(),
        })
    }

    /// Walk nested documents along `path` and return the value at its end.
    pub fn at_path(&self, path: &[&str]) -> Result<&Value, DocumentError> {
        let Some((last, parents)) = path.split_last() else {
            return Err(DocumentError::MissingField {
                path: String::new(),
            });
        };
        let mut current = self;
        for (depth, key) in parents.iter().enumerate() {
            current = match current.0.get(*key) {
                Some(Value::Document(doc)) => doc,
                Some(other) => {
                    return Err(DocumentError::WrongType {
                        path: dotted(&path[..=depth]),
                        expected: "document",
                        found: other.kind(),
                    });
                }
                None => {
                    return Err(DocumentError::MissingField {
                        path: dotted(&path[..=depth]),
                    });
                }
            };
        }
        current.0.get(*last).ok_or_else(|| DocumentError::MissingField {
            path: dotted(path),
        })
    }

    /// Mutable counterpart of [`Document::at_path`].
    pub fn at_path_mut(&mut self, path: &[&str]) -> Result<&mut Value, DocumentError> {
        let Some((last, parents)) = path.split_last() else {
            return Err(DocumentError::MissingField {
                path: String::new(),
            });
        };
        let mut current = self;
        for (depth, key) in parents.iter().enumerate() {
            current = match current.0.get_mut(*key) {
                Some(Value::Document(doc)) => doc,
                Some(other) => {
                    return Err(DocumentError::WrongType {
                        path: dotted(&path[..=depth]),
                        expected: "document",
                        found: other.kind(),
                    });
                }
                None => {
                    return Err(DocumentError::MissingField {
                        path: dotted(&path[..=depth]),
                    });
                }
            };
        }
        current
            .0
            .get_mut(*last)
            .ok_or_else(|| DocumentError::MissingField {
                path: dotted(path),
            })
    }

    /// Sequence stored at `path`.
    pub fn sequence_at(&self, path: &[&str]) -> Result<&[Value], DocumentError> {
        let value = self.at_path(path)?;
        value.as_sequence().ok_or_else(|| DocumentError::WrongType {
            path: dotted(path),
            expected: "sequence",
            found: value.kind(),
        })
    }

    /// Mutable sequence stored at `path`.
    pub fn sequence_at_mut(&mut self, path: &[&str]) -> Result<&mut Vec<Value>, DocumentError> {
        let value = self.at_path_mut(path)?;
        let found = value.kind();
        value.as_sequence_mut().ok_or_else(|| DocumentError::WrongType {
            path: dotted(path),
            expected: "sequence",
            found,
        })
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn dotted(path: &[&str]) -> String {
    path.join(".")
}
