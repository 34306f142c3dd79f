#![forbid(unsafe_code)]

mod error;
mod path;
mod table;
mod verb;

pub use error::Error;
pub use table::{Entry, Table};
pub use verb::Verbs;
