//! Category extraction across record collections

/// Ordered collection of unique category names for one chart instance
///
/// Insertion order is preserved; it drives legend ordering and color
/// alignment downstream, so it must match the order the caller (or the
/// extractor's first-seen pass) established.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CategorySet {
    names: Vec<String>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an iterator, deduplicating while preserving first-seen order
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            set.insert(name);
        }
        set
    }

    /// Insert a name if not already present; returns whether it was added
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.names.iter().any(|existing| *existing == name) {
            false
        } else {
            self.names.push(name);
            true
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Copy without the names matching `predicate`
    pub fn without<P: Fn(&str) -> bool>(&self, predicate: P) -> Self {
        Self {
            names: self
                .names
                .iter()
                .filter(|name| !predicate(name))
                .cloned()
                .collect(),
        }
    }
}

/// Collect the deduplicated set of category names present across all
/// records, preserving first-seen order. The accessor yields weighted
/// `(name, count)` pairs; weights are ignored here. Input is never mutated
/// and an empty collection yields an empty set.
pub fn extract_categories<R, T, I>(records: &[R], tags_of: T) -> CategorySet
where
    T: Fn(&R) -> I,
    I: IntoIterator<Item = (String, u32)>,
{
    let mut set = CategorySet::new();
    for record in records {
        for (name, _) in tags_of(record) {
            set.insert(name);
        }
    }
    set
}
