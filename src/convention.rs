//! The fixed tables that drive route inference.
//!

use autoroute_table::Verbs;

/// A conventional resource action.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CrudAction {
    /// The kebab-case name of the action.
    ///
    pub name: &'static str,

    /// Other method names that select the action.
    ///
    pub aliases: &'static [&'static str],

    /// The verb the action responds to.
    ///
    pub verb: Verbs,

    /// Whether the action name is appended to the path.
    ///
    pub suffix: bool,
}

pub static CRUD: [CrudAction; 8] = [
    crud("index", &[], Verbs::GET, false),
    crud("store", &[], Verbs::POST, false),
    crud("update", &[], Verbs::PUT, false),
    crud("show", &[], Verbs::GET, false),
    crud("destroy", &[], Verbs::DELETE, false),
    crud("create", &[], Verbs::GET, true),
    crud("edit", &[], Verbs::GET, true),
    crud("force-destroy", &["forceDestroy", "force_destroy"], Verbs::DELETE, true),
];

/// Method name prefixes that select a verb explicitly.
///
pub static VERB_PREFIXES: [(&str, Verbs); 5] = [
    ("get", Verbs::GET),
    ("put", Verbs::PUT),
    ("post", Verbs::POST),
    ("delete", Verbs::DELETE),
    ("patch", Verbs::PATCH),
];

const fn crud(
    name: &'static str,
    aliases: &'static [&'static str],
    verb: Verbs,
    suffix: bool,
) -> CrudAction {
    CrudAction {
        name,
        aliases,
        verb,
        suffix,
    }
}

/// Returns the CRUD action selected by the method `name`.
///
/// The match is exact and case-sensitive. `Index` or `SHOW` are ordinary
/// methods.
///
/// ```
/// use autoroute::convention::crud_action;
///
/// assert_eq!(crud_action("forceDestroy").map(|action| action.name), Some("force-destroy"));
/// assert!(crud_action("Index").is_none());
/// ```
///
pub fn crud_action(name: &str) -> Option<&'static CrudAction> {
    CRUD.iter().find(|action| action.name == name || action.aliases.contains(&name))
}

/// Returns true if the kebab-case `slug` is the name of a CRUD action.
///
pub fn is_crud(slug: &str) -> bool {
    CRUD.iter().any(|action| action.name == slug)
}

/// Splits a kebab-case slug into an explicit verb and the rest of the name.
///
/// The rest must be non-empty. A method named `get` alone does not carry a
/// verb prefix.
///
/// ```
/// use autoroute::convention::verb_prefix;
/// use autoroute::Verbs;
///
/// assert_eq!(verb_prefix("get-summary"), Some((Verbs::GET, "summary")));
/// assert_eq!(verb_prefix("getaway"), None);
/// assert_eq!(verb_prefix("get"), None);
/// ```
///
pub fn verb_prefix(slug: &str) -> Option<(Verbs, &str)> {
    VERB_PREFIXES.iter().find_map(|(prefix, verb)| {
        let rest = slug.strip_prefix(prefix)?.strip_prefix('-')?;

        if rest.is_empty() {
            None
        } else {
            Some((*verb, rest))
        }
    })
}
