use crate::action::Action;
use crate::config::Config;
use crate::describe::{ControllerDescriptor, MethodDescriptor, Routable};
use crate::error::{Error, Result};
use crate::middleware::{self, MiddlewareEntry};
use crate::name::route_name;
use crate::params::path_params;
use crate::path::PathTemplate;
use crate::route::{RouteDescriptor, RouteTable, Target};

/// A controller descriptor paired with its normalized middleware.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Controller {
    descriptor: ControllerDescriptor,
    middleware: Vec<MiddlewareEntry>,
}

/// Infers the routes of controllers and registers them with a route table.
///
/// # Example
///
/// ```
/// use autoroute::{ControllerDescriptor, MethodDescriptor, Synthesizer, Table, Verbs};
///
/// let users = ControllerDescriptor::new("UsersController")
///     .middleware("auth")
///     .method(MethodDescriptor::new("index"))
///     .method(MethodDescriptor::new("show").untyped("id"));
///
/// let mut table = Table::new();
///
/// Synthesizer::default().boot([users], &mut table)?;
///
/// let show = table.get("users.show").unwrap();
///
/// assert_eq!(show.verbs(), Verbs::GET);
/// assert_eq!(show.path(), "users/{id}");
/// assert_eq!(show.value().middleware()[0].id(), "auth");
/// # Ok::<(), autoroute::Error>(())
/// ```
///
#[derive(Clone, Debug, Default)]
pub struct Synthesizer {
    config: Config,
}

impl Controller {
    pub fn new(descriptor: ControllerDescriptor) -> Self {
        let middleware = descriptor
            .declared_attributes()
            .middleware
            .as_ref()
            .map(middleware::normalize)
            .unwrap_or_default();

        Self {
            descriptor,
            middleware,
        }
    }

    pub fn descriptor(&self) -> &ControllerDescriptor {
        &self.descriptor
    }

    pub fn middleware(&self) -> &[MiddlewareEntry] {
        &self.middleware
    }
}

impl From<ControllerDescriptor> for Controller {
    fn from(descriptor: ControllerDescriptor) -> Self {
        Self::new(descriptor)
    }
}

impl Synthesizer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the routes of every routable method of `controller`, in the
    /// order the methods are declared.
    ///
    /// Either every route is returned or none is: the first method that
    /// cannot be routed fails the whole controller.
    ///
    pub fn synthesize(&self, controller: &Controller) -> Result<Vec<RouteDescriptor>> {
        let descriptor = &controller.descriptor;

        descriptor
            .routable_methods(&self.config)
            .map(|method| self.route(controller, method))
            .collect()
    }

    /// Synthesizes the routes of `controller` and registers them with
    /// `table`. Returns the number of routes registered.
    ///
    /// Nothing is registered if synthesis fails.
    ///
    pub fn register<T>(&self, controller: &Controller, table: &mut T) -> Result<usize>
    where
        T: RouteTable + ?Sized,
    {
        let routes = self.synthesize(controller)?;
        let count = routes.len();

        for route in routes {
            let name = route.name().to_owned();

            table
                .register(route)
                .map_err(|source| Error::Register { name, source })?;
        }

        Ok(count)
    }

    /// Registers every controller in the order it is yielded by
    /// `controllers`. Stops at the first error. Returns the total number of
    /// routes registered.
    ///
    pub fn boot<I, T>(&self, controllers: I, table: &mut T) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Routable,
        T: RouteTable + ?Sized,
    {
        let mut total = 0;

        for routable in controllers {
            let controller = Controller::new(routable.describe());
            let count = self.register(&controller, table)?;

            tracing::info!(
                controller = %controller.descriptor.type_name(),
                routes = count,
                "registered controller"
            );

            total += count;
        }

        Ok(total)
    }

    fn route(&self, controller: &Controller, method: &MethodDescriptor) -> Result<RouteDescriptor> {
        let descriptor = &controller.descriptor;
        let type_name = descriptor.type_name();

        let params = path_params(type_name, method, &self.config)?;
        let action = Action::resolve(method.name(), descriptor, &self.config);
        let path = PathTemplate::build(descriptor, &action, &params, &self.config);
        let name = route_name(&path, &action).ok_or_else(|| Error::UnnamedRoute {
            controller: type_name.to_owned(),
            method: method.name().to_owned(),
        })?;

        let target = if method.name() == self.config.invoke_name() {
            Target::Invokable(type_name.to_owned())
        } else {
            Target::Method(type_name.to_owned(), method.name().to_owned())
        };

        let route = RouteDescriptor::new(
            action.verbs(),
            path,
            name,
            target,
            controller.middleware.clone(),
        );

        tracing::debug!(
            verbs = %route.verbs(),
            path = %route.path(),
            name = route.name(),
            target = %route.target(),
            "synthesized route"
        );

        Ok(route)
    }
}
