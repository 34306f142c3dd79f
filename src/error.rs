//! Error handling.
//!
//! Every error the engine reports is a configuration error detected while an
//! application boots. None of them are recoverable at the call site; they
//! should abort startup with a message that names the offending controller.
//!

/// A type alias for `Box<dyn Error + Send + Sync>`.
///
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A type alias for `std::result::Result<T, autoroute::Error>`.
///
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A parameter declares a type whose relationship to the request types
    /// could not be determined.
    ///
    #[error(
        "unable to determine if parameter \"{parameter}\" of {controller}::{method} is a \
         request: the type \"{ty}\" is unresolved"
    )]
    UnresolvedType {
        controller: String,
        method: String,
        parameter: String,
        ty: String,
    },

    /// The path and the action of a method are both empty.
    ///
    #[error("{controller}::{method} does not produce a route name")]
    UnnamedRoute { controller: String, method: String },

    /// A controller type name is not under the configured root namespace or
    /// does not contain a class segment.
    ///
    #[error("\"{name}\" is not a controller type under \"{root}\"")]
    InvalidTypeName { name: String, root: String },

    /// The route table rejected a route.
    ///
    #[error("failed to register route \"{name}\"")]
    Register {
        name: String,
        #[source]
        source: BoxError,
    },

    /// A config document could not be deserialized.
    ///
    #[error("invalid config")]
    Config(#[source] serde_json::Error),

    /// A controller manifest could not be deserialized.
    ///
    #[error("invalid controller manifest")]
    Manifest(#[source] serde_json::Error),
}
