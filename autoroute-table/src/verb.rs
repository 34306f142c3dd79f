use bitflags::bitflags;
use http::Method;
use std::fmt::{self, Display, Formatter};

bitflags! {
    /// A set of HTTP methods a route responds to.
    ///
    /// Iteration yields the methods in a fixed, alphabetical order so that two
    /// equal sets always render the same way.
    ///
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Verbs: u16 {
        const CONNECT = 1 << 0;
        const DELETE  = 1 << 1;
        const GET     = 1 << 2;
        const HEAD    = 1 << 3;
        const OPTIONS = 1 << 4;
        const PATCH   = 1 << 5;
        const POST    = 1 << 6;
        const PUT     = 1 << 7;
        const TRACE   = 1 << 8;
    }
}

impl Verbs {
    /// Returns the verb with the provided name. Matching is case-insensitive.
    ///
    /// ```
    /// use autoroute_table::Verbs;
    ///
    /// assert_eq!(Verbs::parse_name("post"), Some(Verbs::POST));
    /// assert_eq!(Verbs::parse_name("Delete"), Some(Verbs::DELETE));
    /// assert_eq!(Verbs::parse_name("fetch"), None);
    /// ```
    ///
    pub fn parse_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .find(|verb| verb.as_str().is_some_and(|s| s.eq_ignore_ascii_case(name)))
    }

    /// Parses a pipe-delimited list of verb names such as `"get|post"`.
    ///
    /// Blank entries are skipped. Returns `None` if the list names an unknown
    /// verb or does not name any verb at all.
    ///
    pub fn parse_list(list: &str) -> Option<Self> {
        let mut verbs = Self::empty();

        for name in list.split('|').map(str::trim) {
            if name.is_empty() {
                continue;
            }

            verbs |= Self::parse_name(name)?;
        }

        if verbs.is_empty() { None } else { Some(verbs) }
    }

    /// Returns the upper case name of a single verb. Returns `None` when self
    /// is empty or contains more than one verb.
    ///
    pub fn as_str(&self) -> Option<&'static str> {
        match *self {
            Self::CONNECT => Some("CONNECT"),
            Self::DELETE => Some("DELETE"),
            Self::GET => Some("GET"),
            Self::HEAD => Some("HEAD"),
            Self::OPTIONS => Some("OPTIONS"),
            Self::PATCH => Some("PATCH"),
            Self::POST => Some("POST"),
            Self::PUT => Some("PUT"),
            Self::TRACE => Some("TRACE"),
            _ => None,
        }
    }

    /// Returns an iterator that yields an [`http::Method`] for each verb in
    /// the set.
    ///
    pub fn methods(&self) -> impl Iterator<Item = Method> + '_ {
        self.iter().filter_map(|verb| match verb {
            Self::CONNECT => Some(Method::CONNECT),
            Self::DELETE => Some(Method::DELETE),
            Self::GET => Some(Method::GET),
            Self::HEAD => Some(Method::HEAD),
            Self::OPTIONS => Some(Method::OPTIONS),
            Self::PATCH => Some(Method::PATCH),
            Self::POST => Some(Method::POST),
            Self::PUT => Some(Method::PUT),
            Self::TRACE => Some(Method::TRACE),
            _ => None,
        })
    }
}

impl Display for Verbs {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut names = self.iter().filter_map(|verb| verb.as_str());

        if let Some(first) = names.next() {
            f.write_str(first)?;
        }

        for name in names {
            write!(f, "|{}", name)?;
        }

        Ok(())
    }
}

impl From<Method> for Verbs {
    fn from(method: Method) -> Self {
        Self::from(&method)
    }
}

impl From<&'_ Method> for Verbs {
    fn from(method: &Method) -> Self {
        match *method {
            Method::CONNECT => Self::CONNECT,
            Method::DELETE => Self::DELETE,
            Method::GET => Self::GET,
            Method::HEAD => Self::HEAD,
            Method::OPTIONS => Self::OPTIONS,
            Method::PATCH => Self::PATCH,
            Method::POST => Self::POST,
            Method::PUT => Self::PUT,
            Method::TRACE => Self::TRACE,
            _ => Self::empty(),
        }
    }
}
