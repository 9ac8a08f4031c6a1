use std::collections::HashSet;

/// Recursion variables bound by an enclosing `rec` with no action prefix in
/// between.
///
/// The set is a value: extending it with [`ExposedNames::with`] produces a
/// new set and leaves the original untouched, so sibling branches never see
/// each other's bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExposedNames {
    names: HashSet<String>,
}

impl ExposedNames {
    /// The empty set, used at the root and below every prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of this set with `name` added.
    pub fn with(&self, name: &str) -> Self {
        let mut names = self.names.clone();
        names.insert(name.to_string());
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExposedNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
