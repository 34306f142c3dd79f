use autoroute_table::{Table, Verbs};
use std::fmt::{self, Display, Formatter};

use crate::error::BoxError;
use crate::middleware::MiddlewareEntry;
use crate::path::PathTemplate;

/// The handler a route dispatches to.
///
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Target {
    /// A method of a controller type: `(type, method)`.
    ///
    Method(String, String),

    /// The entrypoint of an invokable controller, addressed by its type alone.
    ///
    Invokable(String),
}

/// A route inferred from a controller method.
///
#[derive(Clone, Debug, PartialEq)]
pub struct RouteDescriptor {
    verbs: Verbs,
    path: PathTemplate,
    name: String,
    target: Target,
    middleware: Vec<MiddlewareEntry>,
}

/// The host's route table.
///
/// The synthesizer calls `register` once per inferred route. An
/// implementation may reject a route, for example when its name or its verb
/// and path collide with a route registered earlier.
///
pub trait RouteTable {
    fn register(&mut self, route: RouteDescriptor) -> Result<(), BoxError>;
}

impl Target {
    /// The controller type the target belongs to.
    ///
    pub fn type_name(&self) -> &str {
        match self {
            Self::Method(ty, _) | Self::Invokable(ty) => ty,
        }
    }

    /// The method of the target, if it is not an invokable entrypoint.
    ///
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::Method(_, method) => Some(method),
            Self::Invokable(_) => None,
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Method(ty, method) => write!(f, "{}::{}", ty, method),
            Self::Invokable(ty) => f.write_str(ty),
        }
    }
}

impl RouteDescriptor {
    pub fn new(
        verbs: Verbs,
        path: PathTemplate,
        name: String,
        target: Target,
        middleware: Vec<MiddlewareEntry>,
    ) -> Self {
        Self {
            verbs,
            path,
            name,
            target,
            middleware,
        }
    }

    pub fn verbs(&self) -> Verbs {
        self.verbs
    }

    pub fn path(&self) -> &PathTemplate {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn middleware(&self) -> &[MiddlewareEntry] {
        &self.middleware
    }
}

impl RouteTable for Vec<RouteDescriptor> {
    fn register(&mut self, route: RouteDescriptor) -> Result<(), BoxError> {
        self.push(route);
        Ok(())
    }
}

impl RouteTable for Table<RouteDescriptor> {
    fn register(&mut self, route: RouteDescriptor) -> Result<(), BoxError> {
        let path = route.path.to_string();
        let name = route.name.clone();

        self.insert(route.verbs, &path, &name, route)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{RouteDescriptor, RouteTable, Target};
    use crate::path::PathTemplate;
    use crate::{Table, Verbs};

    fn route(verbs: Verbs, path: &str, name: &str) -> RouteDescriptor {
        RouteDescriptor::new(
            verbs,
            PathTemplate::parse(path),
            name.to_owned(),
            Target::Method("UsersController".to_owned(), "show".to_owned()),
            Vec::new(),
        )
    }

    #[test]
    fn target_accessors() {
        let method = Target::Method("UsersController".to_owned(), "show".to_owned());
        let invokable = Target::Invokable("PingController".to_owned());

        assert_eq!(method.type_name(), "UsersController");
        assert_eq!(method.method(), Some("show"));
        assert_eq!(method.to_string(), "UsersController::show");
        assert_eq!(invokable.type_name(), "PingController");
        assert_eq!(invokable.method(), None);
        assert_eq!(invokable.to_string(), "PingController");
    }

    #[test]
    fn register_into_vec() {
        let mut routes = Vec::new();

        routes.register(route(Verbs::GET, "users", "users.index")).unwrap();
        routes.register(route(Verbs::GET, "users", "users.index")).unwrap();

        assert_eq!(routes.len(), 2);
    }

    #[test]
    fn register_into_table() {
        let mut table = Table::new();

        table.register(route(Verbs::GET, "users/{id}", "users.show")).unwrap();

        assert!(table.register(route(Verbs::GET, "users/{user}", "users.view")).is_err());
        assert!(table.register(route(Verbs::PUT, "users/{id}", "users.show")).is_err());
        table.register(route(Verbs::PUT, "users/{user}", "users.update")).unwrap();

        let show = table.get("users.show").unwrap();

        assert_eq!(show.verbs(), Verbs::GET);
        assert_eq!(show.path(), "users/{id}");
        assert_eq!(show.value().target().to_string(), "UsersController::show");
        assert_eq!(table.len(), 2);
        assert_eq!(table.url_for("users.update", &[("user", "12")]).unwrap(), "/users/12");
    }
}
