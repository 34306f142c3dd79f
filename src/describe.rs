//! Controller metadata consumed by the inference engine.
//!
//! A [`ControllerDescriptor`] is the structural shape of a controller type:
//! where it lives, what it is called, which attributes it declares and which
//! methods it exposes. Descriptors are produced by the host, either through
//! the [`Routable`] trait or by loading a [`Manifest`] written at build time.
//!

use serde::Deserialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::middleware::MiddlewareDecl;

/// A type that can describe its own routing shape.
///
/// ```
/// use autoroute::{ControllerDescriptor, MethodDescriptor, Routable};
///
/// struct UsersController;
///
/// impl Routable for UsersController {
///     fn describe(&self) -> ControllerDescriptor {
///         ControllerDescriptor::new("UsersController")
///             .method(MethodDescriptor::new("index"))
///             .method(MethodDescriptor::new("show").untyped("id"))
///     }
/// }
/// ```
///
pub trait Routable {
    fn describe(&self) -> ControllerDescriptor;
}

/// Optional attributes a controller may declare.
///
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Attributes {
    /// Path segments inserted before the resource segment.
    ///
    pub prefix: Option<String>,

    /// Whether the resource segment is pluralized. Defaults to true.
    ///
    pub plural: Option<bool>,

    /// Middleware applied to every route of the controller.
    ///
    pub middleware: Option<MiddlewareDecl>,

    /// A pipe-delimited list of verbs for the entrypoint of an invokable
    /// controller.
    ///
    pub method: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ControllerDescriptor {
    type_name: String,
    namespace: Vec<String>,
    class_name: String,
    attributes: Attributes,
    methods: Vec<MethodDescriptor>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MethodDescriptor {
    name: String,

    #[serde(default)]
    declared_by: Option<String>,

    #[serde(default = "public_by_default")]
    public: bool,

    #[serde(default)]
    parameters: Vec<ParameterDescriptor>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ParameterDescriptor {
    name: String,

    #[serde(default, rename = "type")]
    ty: Option<TypeRef>,
}

/// The declared type of a parameter.
///
/// A resolved type knows every type it is a subtype of. An unresolved type
/// has a name but nothing is known about its ancestry.
///
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(from = "TypeRefRepr")]
pub struct TypeRef {
    name: String,
    supertypes: Option<Vec<String>>,
}

/// A list of controller descriptors produced by a build-time generator.
///
/// ```
/// use autoroute::{Config, Manifest};
///
/// let manifest = Manifest::from_json(r#"[
///     {
///         "type": "controllers::admin::UsersController",
///         "attributes": { "middleware": "auth" },
///         "methods": [
///             { "name": "show", "parameters": [{ "name": "id" }] }
///         ]
///     }
/// ]"#)?;
///
/// let controllers = manifest.into_descriptors(&Config::new())?;
///
/// assert_eq!(controllers[0].namespace_segments(), ["admin"]);
/// assert_eq!(controllers[0].class_name(), "UsersController");
/// # Ok::<(), autoroute::Error>(())
/// ```
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct ManifestEntry {
    #[serde(rename = "type")]
    type_name: String,

    #[serde(default)]
    attributes: Attributes,

    #[serde(default)]
    methods: Vec<MethodDescriptor>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeRefRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        supertypes: Vec<String>,
        #[serde(default = "resolved_by_default")]
        resolved: bool,
    },
}

fn public_by_default() -> bool {
    true
}

fn resolved_by_default() -> bool {
    true
}

/// Splits a type name into its path segments. Both `::` and `\` are
/// accepted as separators and empty segments are ignored.
///
fn segments(name: &str) -> impl Iterator<Item = &str> {
    name.split("::")
        .flat_map(|part| part.split('\\'))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

impl ControllerDescriptor {
    /// Returns a descriptor for a controller at the root namespace.
    ///
    pub fn new(class_name: impl Into<String>) -> Self {
        let class_name = class_name.into();

        Self {
            type_name: class_name.clone(),
            namespace: Vec::new(),
            class_name,
            attributes: Attributes::default(),
            methods: Vec::new(),
        }
    }

    /// Derives the namespace and class name of a controller from its fully
    /// qualified type name.
    ///
    /// The configured root namespace is stripped from the front of the name.
    /// The last segment is the class name and the segments in between are the
    /// namespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTypeName`] if the name does not start with the
    /// root namespace or has no segment after it.
    ///
    pub fn parse(type_name: &str, config: &Config) -> Result<Self> {
        let root = config.root_namespace();
        let invalid = || Error::InvalidTypeName {
            name: type_name.to_owned(),
            root: root.to_owned(),
        };

        let mut parts = segments(type_name);

        for expected in segments(root) {
            if parts.next() != Some(expected) {
                return Err(invalid());
            }
        }

        let mut namespace: Vec<String> = parts.map(str::to_owned).collect();
        let class_name = namespace.pop().ok_or_else(invalid)?;

        Ok(Self {
            type_name: type_name.to_owned(),
            namespace,
            class_name,
            attributes: Attributes::default(),
            methods: Vec::new(),
        })
    }

    /// Sets the namespace segments below the controller root.
    ///
    pub fn namespace<I, S>(mut self, namespace: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespace = namespace.into_iter().map(Into::into).collect();

        if !self.namespace.is_empty() {
            let mut type_name = self.namespace.join("::");

            type_name.push_str("::");
            type_name.push_str(&self.class_name);
            self.type_name = type_name;
        }

        self
    }

    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.attributes.prefix = Some(prefix.into());
        self
    }

    pub fn plural(mut self, plural: bool) -> Self {
        self.attributes.plural = Some(plural);
        self
    }

    pub fn middleware(mut self, middleware: impl Into<MiddlewareDecl>) -> Self {
        self.attributes.middleware = Some(middleware.into());
        self
    }

    /// Sets the verbs of an invokable controller as a pipe-delimited list.
    ///
    pub fn verbs(mut self, verbs: impl Into<String>) -> Self {
        self.attributes.method = Some(verbs.into());
        self
    }

    /// Appends a method. Methods are routed in the order they are added.
    ///
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }
}

impl ControllerDescriptor {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn namespace_segments(&self) -> &[String] {
        &self.namespace
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn declared_attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Returns an iterator over the methods that may become routes: public
    /// methods declared by this type that are not the constructor.
    ///
    pub fn routable_methods<'a>(
        &'a self,
        config: &'a Config,
    ) -> impl Iterator<Item = &'a MethodDescriptor> + 'a {
        self.methods.iter().filter(move |method| {
            method.public
                && method.name != config.constructor_name()
                && method
                    .declared_by
                    .as_deref()
                    .is_none_or(|owner| owner == self.type_name)
        })
    }

    /// Returns true if the controller exposes the invoke method.
    ///
    pub fn is_invokable(&self, config: &Config) -> bool {
        self.routable_methods(config)
            .any(|method| method.name == config.invoke_name())
    }
}

impl Routable for ControllerDescriptor {
    fn describe(&self) -> ControllerDescriptor {
        self.clone()
    }
}

impl<T: Routable + ?Sized> Routable for &T {
    fn describe(&self) -> ControllerDescriptor {
        T::describe(self)
    }
}

impl<T: Routable + ?Sized> Routable for Box<T> {
    fn describe(&self) -> ControllerDescriptor {
        T::describe(self)
    }
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_by: None,
            public: true,
            parameters: Vec::new(),
        }
    }

    /// Marks the method as inherited from `owner`.
    ///
    pub fn declared_by(mut self, owner: impl Into<String>) -> Self {
        self.declared_by = Some(owner.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    /// Appends a parameter with a declared type.
    ///
    pub fn param(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.parameters.push(ParameterDescriptor::new(name, Some(ty)));
        self
    }

    /// Appends a parameter without a declared type.
    ///
    pub fn untyped(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(ParameterDescriptor::new(name, None));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, ty: Option<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> Option<&TypeRef> {
        self.ty.as_ref()
    }
}

impl TypeRef {
    /// Returns a resolved type without supertypes.
    ///
    pub fn new(name: impl Into<String>) -> Self {
        Self::resolved(name, Vec::<String>::new())
    }

    pub fn resolved<I, S>(name: impl Into<String>, supertypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            supertypes: Some(supertypes.into_iter().map(Into::into).collect()),
        }
    }

    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supertypes: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the supertypes of a resolved type.
    ///
    pub fn supertypes(&self) -> Option<&[String]> {
        self.supertypes.as_deref()
    }

    pub fn is_resolved(&self) -> bool {
        self.supertypes.is_some()
    }
}

impl From<TypeRefRepr> for TypeRef {
    fn from(repr: TypeRefRepr) -> Self {
        match repr {
            TypeRefRepr::Name(name) => Self::new(name),
            TypeRefRepr::Full {
                name,
                resolved: false,
                ..
            } => Self::unresolved(name),
            TypeRefRepr::Full {
                name, supertypes, ..
            } => Self::resolved(name, supertypes),
        }
    }
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::Manifest)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts the manifest into descriptors, preserving the order in which
    /// the controllers were listed.
    ///
    pub fn into_descriptors(self, config: &Config) -> Result<Vec<ControllerDescriptor>> {
        self.entries
            .into_iter()
            .map(|entry| {
                let mut descriptor = ControllerDescriptor::parse(&entry.type_name, config)?;

                descriptor.attributes = entry.attributes;
                descriptor.methods = entry.methods;
                Ok(descriptor)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::{ControllerDescriptor, Manifest, MethodDescriptor, TypeRef};
    use crate::{Config, Error, MiddlewareDecl};

    #[test]
    fn parse_type_names() {
        let config = Config::new();

        let users = ControllerDescriptor::parse("controllers::UsersController", &config).unwrap();
        assert!(users.namespace_segments().is_empty());
        assert_eq!(users.class_name(), "UsersController");
        assert_eq!(users.type_name(), "controllers::UsersController");

        let monthly =
            ControllerDescriptor::parse("controllers::reports::MonthlyController", &config)
                .unwrap();
        assert_eq!(monthly.namespace_segments(), ["reports"]);
        assert_eq!(monthly.class_name(), "MonthlyController");

        let nested =
            ControllerDescriptor::parse("\\controllers\\Admin\\BlogPosts\\TagsController", &config)
                .unwrap();
        assert_eq!(nested.namespace_segments(), ["Admin", "BlogPosts"]);
        assert_eq!(nested.class_name(), "TagsController");
    }

    #[test]
    fn parse_rejects_names_outside_the_root() {
        let config = Config::new().root("app::http::controllers");

        assert_matches!(
            ControllerDescriptor::parse("app::models::User", &config),
            Err(Error::InvalidTypeName { name, root }) => {
                assert_eq!(name, "app::models::User");
                assert_eq!(root, "app::http::controllers");
            }
        );
        assert_matches!(
            ControllerDescriptor::parse("app::http::controllers", &config),
            Err(Error::InvalidTypeName { .. })
        );
        assert!(ControllerDescriptor::parse("app::http::controllers::PingController", &config)
            .is_ok());
    }

    #[test]
    fn parse_with_empty_root() {
        let config = Config::new().root("");
        let users = ControllerDescriptor::parse("admin::UsersController", &config).unwrap();

        assert_eq!(users.namespace_segments(), ["admin"]);
        assert_matches!(
            ControllerDescriptor::parse("::", &config),
            Err(Error::InvalidTypeName { .. })
        );
    }

    #[test]
    fn routable_methods() {
        let config = Config::new();
        let controller = ControllerDescriptor::new("UsersController")
            .method(MethodDescriptor::new("new"))
            .method(MethodDescriptor::new("index"))
            .method(MethodDescriptor::new("authorize").private())
            .method(MethodDescriptor::new("middleware").declared_by("Controller"))
            .method(MethodDescriptor::new("show").declared_by("UsersController"));

        let names: Vec<_> = controller
            .routable_methods(&config)
            .map(MethodDescriptor::name)
            .collect();

        assert_eq!(names, ["index", "show"]);
        assert!(!controller.is_invokable(&config));
    }

    #[test]
    fn invokable_requires_a_routable_entrypoint() {
        let config = Config::new();
        let inherited = ControllerDescriptor::new("PingController")
            .method(MethodDescriptor::new("invoke").declared_by("Base"));
        let declared = ControllerDescriptor::new("PingController")
            .method(MethodDescriptor::new("invoke"));

        assert!(!inherited.is_invokable(&config));
        assert!(declared.is_invokable(&config));
        assert!(!declared.is_invokable(&Config::new().invoke_method("call")));
    }

    #[test]
    fn namespace_builder_sets_type_name() {
        let controller = ControllerDescriptor::new("MonthlyController").namespace(["reports"]);

        assert_eq!(controller.type_name(), "reports::MonthlyController");
        assert_eq!(controller.namespace_segments(), ["reports"]);
    }

    #[test]
    fn manifest_entries() {
        let manifest = Manifest::from_json(
            r#"[
                {
                    "type": "controllers::reports::MonthlyController",
                    "attributes": { "plural": false, "middleware": ["auth", { "throttle": 60 }] },
                    "methods": [
                        { "name": "new", "public": true },
                        {
                            "name": "get_summary",
                            "parameters": [
                                { "name": "request", "type": "Request" },
                                { "name": "month" },
                                {
                                    "name": "profile",
                                    "type": { "name": "Profile", "supertypes": ["Model"] }
                                },
                                {
                                    "name": "ghost",
                                    "type": { "name": "Ghost", "resolved": false }
                                }
                            ]
                        }
                    ]
                }
            ]"#,
        )
        .unwrap();

        assert_eq!(manifest.len(), 1);

        let controllers = manifest.into_descriptors(&Config::new()).unwrap();
        let monthly = &controllers[0];

        assert_eq!(monthly.declared_attributes().plural, Some(false));
        assert_matches!(monthly.declared_attributes().middleware, Some(MiddlewareDecl::List(_)));
        assert_eq!(monthly.methods().len(), 2);

        let params = monthly.methods()[1].parameters();

        assert_eq!(params[0].ty(), Some(&TypeRef::new("Request")));
        assert_eq!(params[1].ty(), None);
        assert_eq!(
            params[2].ty().and_then(TypeRef::supertypes),
            Some(&["Model".to_owned()][..])
        );
        assert!(!params[3].ty().unwrap().is_resolved());
    }

    #[test]
    fn manifest_errors() {
        assert_matches!(Manifest::from_json("{"), Err(Error::Manifest(_)));
        assert_matches!(
            Manifest::from_json(r#"[{ "type": "UsersController", "routes": [] }]"#),
            Err(Error::Manifest(_))
        );

        let manifest = Manifest::from_json(r#"[{ "type": "models::User" }]"#).unwrap();

        assert_matches!(
            manifest.into_descriptors(&Config::new()),
            Err(Error::InvalidTypeName { .. })
        );
    }
}
