//! Typed, read-only view of an element tree under plist conventions.
//!
//! Decoding is lazy: a node is only interpreted when navigation reaches it.

use crate::core::document::Element;
use crate::utils::error::ShapeError;
use chrono::{DateTime, SecondsFormat, Utc};

#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Dictionary(&'a Element),
    Array(&'a Element),
    String(String),
    /// Wide enough for both `i64` and `u64` plist integers.
    Integer(i128),
    Real(f64),
    Boolean(bool),
    Date(DateTime<Utc>),
    Data(String),
    Other(&'a str),
}

/// Outcome of one navigation step.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<'a> {
    Found(Value<'a>),
    /// The value being navigated is not the container this step needs.
    WrongType { found: &'static str },
    NotFound,
}

impl<'a> Value<'a> {
    /// Interprets one element. `path` is only used for error messages.
    pub fn decode(element: &'a Element, path: &str) -> Result<Value<'a>, ShapeError> {
        let invalid = |kind: &'static str, text: &str| ShapeError::InvalidScalar {
            path: path.to_string(),
            kind,
            text: text.to_string(),
        };

        let value = match element.name() {
            "dict" => Value::Dictionary(element),
            "array" => Value::Array(element),
            "string" => Value::String(element.text()),
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            "integer" => {
                let text = element.text();
                let parsed = parse_integer(text.trim());
                Value::Integer(parsed.ok_or_else(|| invalid("integer", &text))?)
            }
            "real" => {
                let text = element.text();
                Value::Real(text.trim().parse().map_err(|_| invalid("real", &text))?)
            }
            "date" => {
                let text = element.text();
                let date = DateTime::parse_from_rfc3339(text.trim())
                    .map_err(|_| invalid("date", &text))?;
                Value::Date(date.with_timezone(&Utc))
            }
            "data" => Value::Data(element.text().split_whitespace().collect()),
            other => Value::Other(other),
        };
        Ok(value)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Dictionary(_) => "dictionary",
            Value::Array(_) => "array",
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Boolean(_) => "boolean",
            Value::Date(_) => "date",
            Value::Data(_) => "data",
            Value::Other(_) => "unknown element",
        }
    }

    /// Looks up `key` in a dictionary. The last occurrence of a repeated key
    /// wins; a trailing key without a value is ignored.
    pub fn get(&self, key: &str, path: &str) -> Result<Lookup<'a>, ShapeError> {
        let Value::Dictionary(dict) = *self else {
            return Ok(Lookup::WrongType { found: self.kind() });
        };

        let children: Vec<&'a Element> = dict.child_elements().collect();
        let mut found = None;
        let mut i = 0;
        while i < children.len() {
            if children[i].name() == "key" {
                if let Some(value) = children.get(i + 1) {
                    if children[i].text() == key {
                        found = Some(*value);
                    }
                }
                i += 2;
            } else {
                i += 1;
            }
        }

        match found {
            Some(element) => Ok(Lookup::Found(Value::decode(element, path)?)),
            None => Ok(Lookup::NotFound),
        }
    }

    /// Element `index` of an array.
    pub fn index(&self, index: usize, path: &str) -> Result<Lookup<'a>, ShapeError> {
        let Value::Array(array) = *self else {
            return Ok(Lookup::WrongType { found: self.kind() });
        };

        match array.child_elements().nth(index) {
            Some(element) => Ok(Lookup::Found(Value::decode(element, path)?)),
            None => Ok(Lookup::NotFound),
        }
    }

    /// Array items, in document order. `None` if this is not an array.
    pub fn items(&self) -> Option<impl Iterator<Item = &'a Element>> {
        match *self {
            Value::Array(array) => Some(array.child_elements()),
            _ => None,
        }
    }

    /// Text shown in a table cell. Containers have none.
    pub fn to_cell_text(&self) -> Option<String> {
        match self {
            Value::String(s) | Value::Data(s) => Some(s.clone()),
            Value::Integer(n) => Some(n.to_string()),
            Value::Real(x) => Some(x.to_string()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::Date(d) => Some(d.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Value::Dictionary(_) | Value::Array(_) | Value::Other(_) => None,
        }
    }
}

fn parse_integer(text: &str) -> Option<i128> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok().map(i128::from),
        None => text
            .parse::<i64>()
            .map(i128::from)
            .or_else(|_| text.parse::<u64>().map(i128::from))
            .ok(),
    }
}
