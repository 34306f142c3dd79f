use std::{iter, slice};

use crate::error::Error;

pub struct Split<'a> {
    path: &'a str,
    offset: usize,
    bytes: iter::Enumerate<slice::Iter<'a, u8>>,
}

#[derive(Debug, PartialEq)]
pub(crate) enum Pattern {
    Static(String),
    Dynamic(String),
}

/// Returns a `Pattern` for each segment in the path template.
///
/// Placeholders occupy a whole segment and are written as `{name}`.
///
pub(crate) fn patterns(path: &str) -> Result<Vec<Pattern>, Error> {
    Split::new(path)
        .map(|(segment, _)| {
            let invalid = || Error::InvalidPattern {
                path: path.to_owned(),
            };

            match segment.strip_prefix('{') {
                Some(rest) => match rest.strip_suffix('}') {
                    Some(name) if is_param_name(name) => Ok(Pattern::Dynamic(name.to_owned())),
                    _ => Err(invalid()),
                },

                // Braces are only allowed around a whole segment.
                None if segment.contains(['{', '}']) => Err(invalid()),

                None => Ok(Pattern::Static(segment.to_owned())),
            }
        })
        .collect()
}

fn is_param_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['{', '}'])
}

impl<'a> Split<'a> {
    #[inline]
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            offset: 0,
            bytes: path.as_bytes().iter().enumerate(),
        }
    }
}

impl<'a> Iterator for Split<'a> {
    type Item = (&'a str, [usize; 2]);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let path = &self.path;
        let offset = &mut self.offset;

        for (end, b) in self.bytes.by_ref() {
            if *b == b'/' {
                let start = *offset;
                *offset = end + 1;

                // Skip empty segments produced by leading or repeated slashes.
                if end > start {
                    return Some((&path[start..end], [start, end]));
                }
            }
        }

        let end = path.len();
        let start = *offset;

        // Only yield if there's something left between offset and path.len().
        // Prevents slicing past the end on trailing slashes like "/users/".
        if end > start {
            *offset = end;
            Some((&path[start..end], [start, end]))
        } else {
            None
        }
    }
}
