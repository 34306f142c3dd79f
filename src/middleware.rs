//! Declared controller middleware and its normalized form.
//!
//! A controller may declare middleware in any of three shapes:
//!
//! - a single identifier: `"auth"`
//! - a mapping of identifiers to options: `{ "auth": ["web"], "throttle": 60 }`
//! - a list that mixes identifiers and mappings:
//!   `["auth", { "throttle": [60, 1] }]`
//!
//! In a mapping, an entry with a numeric key and a string value names an
//! identifier positionally, so `{ "0": "auth", "cache": "public" }` is the
//! same as `["auth", { "cache": "public" }]`.
//!
//! Every shape normalizes to an ordered list of [`MiddlewareEntry`] values
//! whose options are always a JSON array or object.
//!

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Middleware as declared by a controller attribute.
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MiddlewareDecl {
    Id(String),
    Map(Map<String, Value>),
    List(Vec<MiddlewareItem>),
}

/// An element of a declared middleware list.
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MiddlewareItem {
    Id(String),
    Map(Map<String, Value>),
}

/// A middleware identifier and the options passed to it.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MiddlewareEntry {
    id: String,
    options: Value,
}

/// Flattens a middleware declaration into ordered entries.
///
/// ```
/// use autoroute::middleware::normalize;
/// use autoroute::MiddlewareDecl;
/// use serde_json::json;
///
/// let decl: MiddlewareDecl = serde_json::from_value(json!({
///     "auth": ["web"],
///     "throttle": [],
/// }))?;
///
/// let entries = normalize(&decl);
///
/// assert_eq!(entries[0].id(), "auth");
/// assert_eq!(entries[0].options(), &json!(["web"]));
/// assert_eq!(entries[1].id(), "throttle");
/// assert_eq!(entries[1].options(), &json!([]));
/// # Ok::<(), serde_json::Error>(())
/// ```
///
pub fn normalize(decl: &MiddlewareDecl) -> Vec<MiddlewareEntry> {
    let mut entries = Vec::new();

    match decl {
        MiddlewareDecl::Id(id) => entries.push(MiddlewareEntry::new(id, Value::Null)),
        MiddlewareDecl::Map(map) => push_map(&mut entries, map),
        MiddlewareDecl::List(items) => {
            for item in items {
                match item {
                    MiddlewareItem::Id(id) => entries.push(MiddlewareEntry::new(id, Value::Null)),
                    MiddlewareItem::Map(map) => push_map(&mut entries, map),
                }
            }
        }
    }

    entries
}

fn push_map(entries: &mut Vec<MiddlewareEntry>, map: &Map<String, Value>) {
    for (key, value) in map {
        match value {
            Value::String(id) if is_positional(key) => {
                entries.push(MiddlewareEntry::new(id, Value::Null));
            }
            options => entries.push(MiddlewareEntry::new(key, options.clone())),
        }
    }
}

fn is_positional(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|byte| byte.is_ascii_digit())
}

impl MiddlewareEntry {
    /// Returns a new entry. `null` options become an empty array and any other
    /// scalar is wrapped in an array.
    ///
    pub fn new(id: impl Into<String>, options: Value) -> Self {
        let options = match options {
            Value::Null => Value::Array(Vec::new()),
            options @ (Value::Array(_) | Value::Object(_)) => options,
            scalar => Value::Array(vec![scalar]),
        };

        Self {
            id: id.into(),
            options,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The options of the middleware: always an array or an object.
    ///
    pub fn options(&self) -> &Value {
        &self.options
    }
}

impl From<&str> for MiddlewareDecl {
    fn from(id: &str) -> Self {
        Self::Id(id.to_owned())
    }
}

impl From<String> for MiddlewareDecl {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<Map<String, Value>> for MiddlewareDecl {
    fn from(map: Map<String, Value>) -> Self {
        Self::Map(map)
    }
}

impl From<Vec<MiddlewareItem>> for MiddlewareDecl {
    fn from(items: Vec<MiddlewareItem>) -> Self {
        Self::List(items)
    }
}

impl From<&str> for MiddlewareItem {
    fn from(id: &str) -> Self {
        Self::Id(id.to_owned())
    }
}

impl From<(&str, Value)> for MiddlewareItem {
    fn from((id, options): (&str, Value)) -> Self {
        let mut map = Map::new();

        map.insert(id.to_owned(), options);
        Self::Map(map)
    }
}
