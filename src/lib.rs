//! Infer route registrations from the shape of your controllers.
//!
//! A controller is described by where it lives, what it is called, the
//! attributes it declares and the public methods it exposes. From that shape
//! alone, [`Synthesizer`] infers a verb set, a path template and a dotted name
//! for every method and hands the result to a [`RouteTable`].
//!
//! ```
//! use autoroute::{ControllerDescriptor, MethodDescriptor, Synthesizer, Table, TypeRef, Verbs};
//!
//! let users = ControllerDescriptor::new("UsersController")
//!     .method(MethodDescriptor::new("index"))
//!     .method(MethodDescriptor::new("store").param("request", TypeRef::new("Request")))
//!     .method(MethodDescriptor::new("show").untyped("id"));
//!
//! let mut table = Table::new();
//!
//! Synthesizer::default().boot([users], &mut table)?;
//!
//! let show = table.get("users.show").unwrap();
//!
//! assert_eq!(show.verbs(), Verbs::GET);
//! assert_eq!(show.path(), "users/{id}");
//! assert_eq!(table.url_for("users.show", &[("id", "42")]).unwrap(), "/users/42");
//! assert_eq!(table.url_for("users.store", &[]).unwrap(), "/users");
//! # Ok::<(), autoroute::Error>(())
//! ```
//!

#![forbid(unsafe_code)]

pub mod convention;
pub mod error;
pub mod inflect;
pub mod middleware;
pub mod name;
pub mod params;
pub mod path;

mod action;
mod config;
mod describe;
mod route;
mod synthesize;

pub use action::Action;
pub use config::Config;
pub use describe::{
    Attributes, ControllerDescriptor, Manifest, MethodDescriptor, ParameterDescriptor, Routable,
    TypeRef,
};
pub use error::{BoxError, Error, Result};
pub use middleware::{MiddlewareDecl, MiddlewareEntry, MiddlewareItem};
pub use path::{PathTemplate, Segment};
pub use route::{RouteDescriptor, RouteTable, Target};
pub use synthesize::{Controller, Synthesizer};

pub use autoroute_table::{self as table, Table, Verbs};
pub use http;
