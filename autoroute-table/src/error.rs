use crate::verb::Verbs;

/// An error that occurred when inserting into or reading from a route table.
///
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid path template \"{path}\"")]
    InvalidPattern { path: String },

    #[error("a route named \"{name}\" is already registered")]
    DuplicateName { name: String },

    #[error("\"{verb} /{path}\" is already registered as \"{existing}\"")]
    DuplicateRoute {
        verb: Verbs,
        path: String,
        existing: String,
    },

    #[error("routes must respond to at least one verb: \"{name}\"")]
    NoVerbs { name: String },

    #[error("no route named \"{name}\"")]
    UnknownName { name: String },

    #[error("missing value for parameter \"{param}\" of route \"{name}\"")]
    MissingParam { name: String, param: String },
}
