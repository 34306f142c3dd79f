//! Path templates and the rules that build them.
//!

use heck::ToKebabCase;
use std::fmt::{self, Display, Formatter};

use crate::action::Action;
use crate::config::Config;
use crate::convention::is_crud;
use crate::describe::{ControllerDescriptor, ParameterDescriptor};
use crate::inflect::plural;

/// A segment of a path template.
///
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Segment {
    /// A segment that matches itself.
    ///
    Literal(String),

    /// A `{name}` placeholder bound to the parameter `name`.
    ///
    Param(String),
}

/// An ordered list of path segments such as `teams/{team}/users`.
///
/// The string form of a template never starts or ends with `/` and never
/// contains an empty segment.
///
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct PathTemplate {
    segments: Vec<Segment>,
}

/// Removes leading and trailing slashes and collapses every run of slashes
/// into one.
///
/// ```
/// use autoroute::path::sanitize;
///
/// assert_eq!(sanitize("//users///{id}/"), "users/{id}");
/// assert_eq!(sanitize("/"), "");
/// ```
///
pub fn sanitize(path: &str) -> String {
    let mut sanitized = String::with_capacity(path.len());

    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        if !sanitized.is_empty() {
            sanitized.push('/');
        }

        sanitized.push_str(segment);
    }

    sanitized
}

impl Segment {
    fn parse(segment: &str) -> Self {
        let name = segment
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .filter(|name| !name.is_empty() && !name.contains(['{', '}']));

        match name {
            Some(name) => Self::Param(name.to_owned()),
            None => Self::Literal(segment.to_owned()),
        }
    }

    /// Returns the parameter name if the segment is a placeholder.
    ///
    pub fn param(&self) -> Option<&str> {
        match self {
            Self::Param(name) => Some(name),
            Self::Literal(_) => None,
        }
    }
}

impl PathTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a template from a `/` separated string. The input does not need
    /// to be sanitized.
    ///
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(Segment::parse)
                .collect(),
        }
    }

    /// Builds the path of a route.
    ///
    /// The path is the namespace, an optional prefix and the resource segment
    /// derived from the class name, followed by the first path parameter, the
    /// action suffix and the remaining path parameters. Parameters already
    /// bound by a placeholder in the prefix are not repeated.
    ///
    pub fn build(
        controller: &ControllerDescriptor,
        action: &Action,
        params: &[&ParameterDescriptor],
        config: &Config,
    ) -> Self {
        let mut template = Self::base(controller, config);
        let unbound: Vec<_> = params
            .iter()
            .map(|param| param.name())
            .filter(|name| !template.contains_param(name))
            .collect();
        let mut unbound = unbound.into_iter();

        if let Some(first) = unbound.next() {
            template.push(Segment::Param(first.to_owned()));
        }

        if let Some(suffix) = action.suffix() {
            template.extend(suffix);
        }

        for name in unbound {
            template.push(Segment::Param(name.to_owned()));
        }

        template
    }

    /// The namespace, prefix and resource segments shared by every route of
    /// a controller.
    ///
    fn base(controller: &ControllerDescriptor, config: &Config) -> Self {
        let mut template = Self::new();

        for segment in controller.namespace_segments() {
            template.extend(&segment.to_kebab_case());
        }

        let resource = resource(controller, config);

        if !resource.is_empty() {
            if let Some(prefix) = &controller.declared_attributes().prefix {
                template.segments.extend(Self::parse(prefix).segments);
            }

            template.extend(&resource);
        }

        template
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the names of the placeholders in the
    /// template.
    ///
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::param)
    }

    pub fn contains_param(&self, name: &str) -> bool {
        self.params().any(|param| param == name)
    }

    fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Appends the segments of a `/` separated literal.
    ///
    fn extend(&mut self, path: &str) {
        self.segments.extend(
            path.split('/')
                .filter(|segment| !segment.is_empty())
                .map(|segment| Segment::Literal(segment.to_owned())),
        );
    }
}

impl Display for PathTemplate {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }

            write!(f, "{}", segment)?;
        }

        Ok(())
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Literal(literal) => f.write_str(literal),
            Self::Param(name) => write!(f, "{{{}}}", name),
        }
    }
}

/// The resource segment of a controller: the kebab-case class name without
/// the configured suffix, pluralized unless the controller opts out or is
/// invokable. A resource named like a CRUD action is empty.
///
fn resource(controller: &ControllerDescriptor, config: &Config) -> String {
    let class_name = controller.class_name();
    let stem = class_name
        .strip_suffix(config.class_suffix())
        .unwrap_or(class_name);

    let singular = stem.to_kebab_case();
    let pluralize = controller.declared_attributes().plural.unwrap_or(true)
        && !controller.is_invokable(config);

    let resource = if pluralize { plural(&singular) } else { singular };

    if is_crud(&resource) {
        String::new()
    } else {
        resource
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{sanitize, PathTemplate, Segment};
    use crate::action::Action;
    use crate::describe::{ControllerDescriptor, MethodDescriptor, TypeRef};
    use crate::params::path_params;
    use crate::Config;

    fn build(controller: &ControllerDescriptor, method: &str) -> String {
        let config = Config::new();
        let method = controller
            .methods()
            .iter()
            .find(|candidate| candidate.name() == method)
            .unwrap();

        let action = Action::resolve(method.name(), controller, &config);
        let params = path_params(controller.type_name(), method, &config).unwrap();

        PathTemplate::build(controller, &action, &params, &config).to_string()
    }

    #[test]
    fn parse_segments() {
        let template = PathTemplate::parse("/teams/{team}//members/{}/{a{b}}/");

        assert_eq!(
            template.segments(),
            [
                Segment::Literal("teams".to_owned()),
                Segment::Param("team".to_owned()),
                Segment::Literal("members".to_owned()),
                Segment::Literal("{}".to_owned()),
                Segment::Literal("{a{b}}".to_owned()),
            ]
        );
        assert_eq!(template.to_string(), "teams/{team}/members/{}/{a{b}}");
        assert!(template.contains_param("team"));
        assert!(PathTemplate::parse("//").is_empty());
    }

    #[test]
    fn resource_paths() {
        let users = ControllerDescriptor::new("UsersController")
            .method(MethodDescriptor::new("index"))
            .method(MethodDescriptor::new("show").untyped("id"))
            .method(MethodDescriptor::new("edit").untyped("id"))
            .method(MethodDescriptor::new("create"))
            .method(
                MethodDescriptor::new("getPosts")
                    .param("request", TypeRef::new("Request"))
                    .untyped("id")
                    .untyped("page"),
            );

        assert_eq!(build(&users, "index"), "users");
        assert_eq!(build(&users, "show"), "users/{id}");
        assert_eq!(build(&users, "edit"), "users/{id}/edit");
        assert_eq!(build(&users, "create"), "users/create");
        assert_eq!(build(&users, "getPosts"), "users/{id}/posts/{page}");
    }

    #[test]
    fn singular_class_names_are_pluralized() {
        let user = ControllerDescriptor::new("UserProfileController")
            .method(MethodDescriptor::new("index"));
        let monthly = ControllerDescriptor::new("MonthlyController")
            .namespace(["Reports"])
            .plural(false)
            .method(MethodDescriptor::new("get_summary"));

        assert_eq!(build(&user, "index"), "user-profiles");
        assert_eq!(build(&monthly, "get_summary"), "reports/monthly/summary");
    }

    #[test]
    fn namespace_segments_are_kebab_case() {
        let tags = ControllerDescriptor::new("TagsController")
            .namespace(["Admin", "BlogPosts"])
            .method(MethodDescriptor::new("index"));

        assert_eq!(build(&tags, "index"), "admin/blog-posts/tags");
    }

    #[test]
    fn crud_named_resources_are_suppressed() {
        let index = ControllerDescriptor::new("IndexController")
            .namespace(["dashboard"])
            .plural(false)
            .prefix("ignored")
            .method(MethodDescriptor::new("show").untyped("id"))
            .method(MethodDescriptor::new("stats"));

        assert_eq!(build(&index, "show"), "dashboard/{id}");
        assert_eq!(build(&index, "stats"), "dashboard/stats");
    }

    #[test]
    fn invokable_paths() {
        let ping = ControllerDescriptor::new("PingController")
            .method(MethodDescriptor::new("invoke"));
        let status = ControllerDescriptor::new("StatusController")
            .method(MethodDescriptor::new("invoke").untyped("service"));

        assert_eq!(build(&ping, "invoke"), "ping");
        assert_eq!(build(&status, "invoke"), "status/{service}");
    }

    #[test]
    fn prefix_placeholders_bind_params() {
        let members = ControllerDescriptor::new("MembersController")
            .prefix("/teams/{team}/")
            .method(MethodDescriptor::new("index").untyped("team"))
            .method(MethodDescriptor::new("show").untyped("team").untyped("member"))
            .method(MethodDescriptor::new("edit").untyped("member").untyped("team"));

        assert_eq!(build(&members, "index"), "teams/{team}/members");
        assert_eq!(build(&members, "show"), "teams/{team}/members/{member}");
        assert_eq!(build(&members, "edit"), "teams/{team}/members/{member}/edit");
    }

    #[test]
    fn sanitize_paths() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("users"), "users");
        assert_eq!(sanitize("/users/"), "users");
        assert_eq!(sanitize("users////{id}"), "users/{id}");
        assert_eq!(sanitize("///"), "");
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(path in "[a-z{}/]{0,32}") {
            let once = sanitize(&path);

            prop_assert_eq!(sanitize(&once), once.clone());
            prop_assert!(!once.contains("//"));
            prop_assert!(!once.starts_with('/'));
            prop_assert!(!once.ends_with('/'));
        }

        #[test]
        fn parsed_templates_are_sanitized(path in "[a-z{}/]{0,32}") {
            let rendered = PathTemplate::parse(&path).to_string();

            prop_assert_eq!(sanitize(&rendered), rendered.clone());
            prop_assert_eq!(PathTemplate::parse(&rendered).to_string(), rendered);
        }
    }
}
