//! Field paths, used to locate decode failures.

use std::fmt;

/// A single step in a path through a decoded document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Navigate to a named field (or the root element).
    Field(String),
    /// Navigate to an element of a sequence by index.
    Index(usize),
}

/// A path through a decoded document, recorded as a series of steps.
///
/// Displays as `library.bookList.books[2].title`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    /// The empty path (the document itself).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn push(&mut self, step: PathStep) {
        self.steps.push(step);
    }

    /// Remove and return the last step.
    pub fn pop(&mut self) -> Option<PathStep> {
        self.steps.pop()
    }

    /// The recorded steps.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Returns true if no steps have been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The innermost field name on this path, skipping trailing indices.
    pub fn last_field(&self) -> Option<&str> {
        self.steps.iter().rev().find_map(|step| match step {
            PathStep::Field(name) => Some(name.as_str()),
            PathStep::Index(_) => None,
        })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("<document>");
        }
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Field(name) if i == 0 => f.write_str(name)?,
                PathStep::Field(name) => write!(f, ".{name}")?,
                PathStep::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    /// Build a path of field steps, mostly useful in tests.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            steps: iter
                .into_iter()
                .map(|name| PathStep::Field(name.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mixes_fields_and_indices() {
        let mut path = Path::new();
        assert_eq!(path.to_string(), "<document>");

        path.push(PathStep::Field("library".into()));
        path.push(PathStep::Field("books".into()));
        path.push(PathStep::Index(2));
        path.push(PathStep::Field("title".into()));
        assert_eq!(path.to_string(), "library.books[2].title");
        assert_eq!(path.last_field(), Some("title"));

        path.pop();
        assert_eq!(path.last_field(), Some("books"));
    }

    #[test]
    fn collect_from_names() {
        let path: Path = ["user", "age"].into_iter().collect();
        assert_eq!(path.to_string(), "user.age");
    }
}
