//! Ordered, case-insensitive header collection.

/// An ordered header multimap.
///
/// Insertion order and the original name case are preserved; lookups compare
/// names ASCII-case-insensitively. At most one entry is stored per
/// case-insensitive name: inserting `x-foo` over an existing `X-Foo` replaces
/// the entry (taking the new spelling) rather than adding a second one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, Vec<String>)>,
}

/// A header value list.
///
/// Exists so a bare string coerces into a one-element sequence at call sites:
/// `&str`, `String`, `Vec<String>` and `&[&str]` all convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderValues(Vec<String>);

impl From<&str> for HeaderValues {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for HeaderValues {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<String>> for HeaderValues {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl From<&[&str]> for HeaderValues {
    fn from(values: &[&str]) -> Self {
        Self(values.iter().map(|v| (*v).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for HeaderValues {
    fn from(values: [&str; N]) -> Self {
        Self(values.iter().map(|v| (*v).to_string()).collect())
    }
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order, names in their original case.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(stored, _)| stored.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive containment check.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// The stored value sequence for the case-insensitive match, if any.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.position(name).map(|i| self.entries[i].1.as_slice())
    }

    /// Replaces any existing values under the case-insensitive name, keeping
    /// the entry's position and taking the new spelling; appends otherwise.
    pub fn insert(&mut self, name: impl Into<String>, values: impl Into<HeaderValues>) {
        let name = name.into();
        let values = values.into().0;

        match self.position(&name) {
            Some(i) => self.entries[i] = (name, values),
            None => self.entries.push((name, values)),
        }
    }

    /// Appends values to an existing entry, or inserts a new one.
    pub fn append(&mut self, name: impl Into<String>, values: impl Into<HeaderValues>) {
        let name = name.into();
        let mut values = values.into().0;

        match self.position(&name) {
            Some(i) => self.entries[i].1.append(&mut values),
            None => self.entries.push((name, values)),
        }
    }

    /// Removes the case-insensitively matching entry, if present.
    pub fn remove(&mut self, name: &str) {
        if let Some(i) = self.position(name) {
            self.entries.remove(i);
        }
    }

    /// Removes any case-insensitive match and places the entry first.
    pub fn insert_first(&mut self, name: impl Into<String>, values: impl Into<HeaderValues>) {
        let name = name.into();
        self.remove(&name);
        self.entries.insert(0, (name, values.into().0));
    }
}
