use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// The default namespace under which controllers live.
const DEFAULT_ROOT: &str = "controllers";

/// The default suffix stripped from controller class names.
const DEFAULT_SUFFIX: &str = "Controller";

/// The default name of the single entrypoint of an invokable controller.
const DEFAULT_INVOKE_METHOD: &str = "invoke";

/// The default name of the constructor, which is never routed.
const DEFAULT_CONSTRUCTOR: &str = "new";

/// The default request abstraction type.
const DEFAULT_REQUEST_TYPE: &str = "Request";

/// Naming conventions used to interpret controller descriptors.
///
/// Every field has a default, so a config document only needs to name the
/// values that differ.
///
/// ```
/// use autoroute::Config;
///
/// let config = Config::from_json(r#"{ "suffix": "Handler" }"#)?;
///
/// assert_eq!(config, Config::new().suffix("Handler"));
/// # Ok::<(), autoroute::Error>(())
/// ```
///
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    root: String,
    suffix: String,
    invoke_method: String,
    constructor: String,
    request_types: Vec<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserializes a config from a JSON document. Missing keys use their
    /// default value.
    ///
    /// The document must be an object. Arrays, scalars and `null` are
    /// rejected even though every field has a default.
    ///
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Map<String, Value> = serde_json::from_str(json).map_err(Error::Config)?;
        Self::deserialize(Value::Object(document)).map_err(Error::Config)
    }

    /// Sets the namespace that is stripped from the front of controller type
    /// names. The default value is `controllers`.
    ///
    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the suffix removed from a class name before it becomes a path
    /// segment. The default value is `Controller`.
    ///
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Sets the method name that marks a controller as invokable. The default
    /// value is `invoke`.
    ///
    pub fn invoke_method(mut self, name: impl Into<String>) -> Self {
        self.invoke_method = name.into();
        self
    }

    /// Sets the method name that is treated as the constructor. The default
    /// value is `new`.
    ///
    pub fn constructor(mut self, name: impl Into<String>) -> Self {
        self.constructor = name.into();
        self
    }

    /// Adds a type that is injected by the host instead of bound from the
    /// path. Parameters of this type, or of a subtype, are not routed.
    ///
    pub fn request_type(mut self, name: impl Into<String>) -> Self {
        let name = name.into();

        if !self.request_types.contains(&name) {
            self.request_types.push(name);
        }

        self
    }
}

impl Config {
    pub(crate) fn root_namespace(&self) -> &str {
        &self.root
    }

    pub(crate) fn class_suffix(&self) -> &str {
        &self.suffix
    }

    pub(crate) fn invoke_name(&self) -> &str {
        &self.invoke_method
    }

    pub(crate) fn constructor_name(&self) -> &str {
        &self.constructor
    }

    pub(crate) fn is_request_type(&self, name: &str) -> bool {
        self.request_types.iter().any(|ty| ty == name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT.to_owned(),
            suffix: DEFAULT_SUFFIX.to_owned(),
            invoke_method: DEFAULT_INVOKE_METHOD.to_owned(),
            constructor: DEFAULT_CONSTRUCTOR.to_owned(),
            request_types: vec![DEFAULT_REQUEST_TYPE.to_owned()],
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::Config;
    use crate::Error;

    #[test]
    fn defaults() {
        let config = Config::new();

        assert_eq!(config.root_namespace(), "controllers");
        assert_eq!(config.class_suffix(), "Controller");
        assert_eq!(config.invoke_name(), "invoke");
        assert_eq!(config.constructor_name(), "new");
        assert!(config.is_request_type("Request"));
        assert!(!config.is_request_type("Profile"));
    }

    #[test]
    fn from_json_fills_missing_keys() {
        let config = Config::from_json(
            r#"{ "root": "app::http", "request_types": ["Request", "FormRequest"] }"#,
        )
        .unwrap();

        assert_eq!(config.root_namespace(), "app::http");
        assert_eq!(config.class_suffix(), "Controller");
        assert!(config.is_request_type("FormRequest"));
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn from_json_rejects_unknown_keys() {
        assert_matches!(Config::from_json(r#"{ "sufix": "X" }"#), Err(Error::Config(_)));
    }

    #[test]
    fn from_json_requires_an_object() {
        for json in ["[]", r#"["app"]"#, "null", "42", r#""controllers""#] {
            assert_matches!(Config::from_json(json), Err(Error::Config(_)), "{}", json);
        }
    }

    #[test]
    fn builder() {
        let config = Config::new()
            .root("app")
            .suffix("Handler")
            .invoke_method("call")
            .constructor("init")
            .request_type("HttpRequest")
            .request_type("Request");

        assert_eq!(config.root_namespace(), "app");
        assert_eq!(config.class_suffix(), "Handler");
        assert_eq!(config.invoke_name(), "call");
        assert_eq!(config.constructor_name(), "init");
        assert!(config.is_request_type("HttpRequest"));
        assert_eq!(config.request_types.len(), 2);
    }
}
