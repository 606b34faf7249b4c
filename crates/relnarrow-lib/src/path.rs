//! Dotted relation paths.

use std::fmt;

/// `posts.comments.author`, split into segments.
///
/// Segments are kept as written; an empty one (`posts.` or `posts..x`)
/// stops the walk at that point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationPath<'a> {
    segments: Vec<&'a str>,
}

impl<'a> RelationPath<'a> {
    pub fn parse(path: &'a str) -> Self {
        Self {
            segments: path.split('.').collect(),
        }
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for RelationPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
