use std::collections::HashSet;

/// Set of restaurant names to skip during listing processing
///
/// Some listings repeat a fixed group of entries on every page. Naming them
/// here keeps them out of the results without touching the crawl logic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    names: HashSet<String>,
}

impl ExclusionSet {
    /// Creates an empty exclusion set
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name; blank names are ignored
    pub fn insert(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.names.insert(name.to_string())
    }

    /// Returns true if the name is excluded
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name.trim())
    }

    /// Number of excluded names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing is excluded
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Excluded names in sorted order
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name.as_ref());
        }
        set
    }
}

impl<S: AsRef<str>> Extend<S> for ExclusionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name.as_ref());
        }
    }
}
