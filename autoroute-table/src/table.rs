use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::slice;

use crate::error::Error;
use crate::path::{self, Pattern, Split};
use crate::verb::Verbs;

/// Characters that are percent-encoded when a parameter value is written into
/// a path segment by [`Table::url_for`].
///
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A route table that binds a verb set and a path template to a value and a
/// unique name.
///
/// Collisions are rejected when a route is inserted. Two routes cannot share a
/// name, and two routes with the same path shape cannot share a verb.
///
/// The table records what was registered. It does not match requests.
///
/// # Example
///
/// ```
/// use autoroute_table::{Table, Verbs};
///
/// let mut table = Table::new();
///
/// table.insert(Verbs::GET, "users/{id}", "users.show", "show").unwrap();
/// table.insert(Verbs::PUT, "users/{id}", "users.update", "update").unwrap();
///
/// let update = table.get("users.update").unwrap();
///
/// assert_eq!(update.verbs(), Verbs::PUT);
/// assert_eq!(*update.value(), "update");
/// assert_eq!(table.url_for("users.show", &[("id", "12")]).unwrap(), "/users/12");
/// ```
///
#[derive(Debug)]
pub struct Table<T> {
    entries: Vec<Entry<T>>,
    names: HashMap<String, usize>,
    shapes: HashMap<String, SmallVec<[usize; 2]>>,
}

/// A route stored in a [`Table`].
///
#[derive(Debug)]
pub struct Entry<T> {
    verbs: Verbs,
    path: String,
    name: String,
    value: T,
}

impl<T> Entry<T> {
    #[inline]
    pub fn verbs(&self) -> Verbs {
        self.verbs
    }

    /// The sanitized path template. `users/{id}` rather than `/users/{id}/`.
    ///
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            names: HashMap::new(),
            shapes: HashMap::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Entry<T>> {
        self.entries.iter()
    }

    /// Returns the route with the provided name.
    ///
    pub fn get(&self, name: &str) -> Option<&Entry<T>> {
        self.names.get(name).and_then(|index| self.entries.get(*index))
    }

    /// Binds `verbs` and `path` to `value` under `name`.
    ///
    /// # Errors
    ///
    /// - [`Error::NoVerbs`] if `verbs` is empty.
    /// - [`Error::InvalidPattern`] if `path` contains a malformed placeholder.
    /// - [`Error::DuplicateName`] if `name` is already registered.
    /// - [`Error::DuplicateRoute`] if a route with the same path shape already
    ///   responds to one of `verbs`.
    ///
    pub fn insert(&mut self, verbs: Verbs, path: &str, name: &str, value: T) -> Result<(), Error> {
        if verbs.is_empty() {
            return Err(Error::NoVerbs {
                name: name.to_owned(),
            });
        }

        if self.names.contains_key(name) {
            return Err(Error::DuplicateName {
                name: name.to_owned(),
            });
        }

        let patterns = path::patterns(path)?;
        let shape = shape_of(&patterns);

        // Placeholders match any segment, so `users/{id}` and `users/{user}`
        // compete for the same requests.
        if let Some(existing) = self.shapes.get(&shape) {
            for entry in existing.iter().filter_map(|index| self.entries.get(*index)) {
                let overlap = entry.verbs & verbs;

                if !overlap.is_empty() {
                    return Err(Error::DuplicateRoute {
                        verb: overlap,
                        path: entry.path.clone(),
                        existing: entry.name.clone(),
                    });
                }
            }
        }

        let index = self.entries.len();

        self.entries.push(Entry {
            verbs,
            path: canonical_of(&patterns),
            name: name.to_owned(),
            value,
        });

        self.names.insert(name.to_owned(), index);
        self.shapes.entry(shape).or_default().push(index);

        Ok(())
    }

    /// Builds the url of the route named `name`, substituting each placeholder
    /// with the percent-encoded value of the param with the same name.
    ///
    pub fn url_for(&self, name: &str, params: &[(&str, &str)]) -> Result<String, Error> {
        let entry = self.get(name).ok_or_else(|| Error::UnknownName {
            name: name.to_owned(),
        })?;

        let mut url = String::with_capacity(entry.path.len() + 1);

        for (segment, _) in Split::new(&entry.path) {
            url.push('/');

            let param = segment
                .strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'));

            let Some(param) = param else {
                url.push_str(segment);
                continue;
            };

            let value = params
                .iter()
                .find_map(|(key, value)| (*key == param).then_some(*value))
                .ok_or_else(|| Error::MissingParam {
                    name: name.to_owned(),
                    param: param.to_owned(),
                })?;

            url.extend(utf8_percent_encode(value, SEGMENT));
        }

        if url.is_empty() {
            url.push('/');
        }

        Ok(url)
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Table<T> {
    type Item = &'a Entry<T>;
    type IntoIter = slice::Iter<'a, Entry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn canonical_of(patterns: &[Pattern]) -> String {
    let mut canonical = String::new();

    for pattern in patterns {
        if !canonical.is_empty() {
            canonical.push('/');
        }

        match pattern {
            Pattern::Static(label) => canonical.push_str(label),
            Pattern::Dynamic(name) => {
                canonical.push('{');
                canonical.push_str(name);
                canonical.push('}');
            }
        }
    }

    canonical
}

fn shape_of(patterns: &[Pattern]) -> String {
    let mut shape = String::new();

    for pattern in patterns {
        shape.push('/');

        match pattern {
            Pattern::Static(label) => shape.push_str(label),
            Pattern::Dynamic(_) => shape.push_str("{}"),
        }
    }

    shape
}
