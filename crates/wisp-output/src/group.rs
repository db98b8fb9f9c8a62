//! The in-memory container tree.

use indexmap::IndexMap;

/// An attribute value: scalar metadata attached to a group.
#[derive(Clone, Debug, PartialEq)]
pub enum Attr {
    /// Unsigned integer attribute.
    U64(u64),
    /// Floating-point attribute.
    F64(f64),
    /// String attribute.
    Str(String),
}

/// A node in the container tree.
///
/// Holds ordered attributes, ordered float datasets, and ordered child
/// groups. Insertion order is preserved end to end, so files list
/// events and interactions in generation order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Group {
    attrs: IndexMap<String, Attr>,
    datasets: IndexMap<String, Vec<f64>>,
    children: IndexMap<String, Group>,
}

impl Group {
    /// An empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any previous value under `name`.
    pub fn set_attr(&mut self, name: impl Into<String>, value: Attr) {
        self.attrs.insert(name.into(), value);
    }

    /// The attribute under `name`, if present.
    pub fn attr(&self, name: &str) -> Option<&Attr> {
        self.attrs.get(name)
    }

    /// The attributes, in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &Attr)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Store a dataset, replacing any previous data under `name`.
    pub fn set_dataset(&mut self, name: impl Into<String>, data: Vec<f64>) {
        self.datasets.insert(name.into(), data);
    }

    /// The dataset under `name`, if present.
    pub fn dataset(&self, name: &str) -> Option<&[f64]> {
        self.datasets.get(name).map(|v| v.as_slice())
    }

    /// The datasets, in insertion order.
    pub fn datasets(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.datasets.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Get or create the child group under `name`.
    pub fn require_group(&mut self, name: impl Into<String>) -> &mut Group {
        self.children.entry(name.into()).or_default()
    }

    /// The child group under `name`, if present.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.children.get(name)
    }

    /// The child groups, in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &Group)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of child groups.
    pub fn group_count(&self) -> usize {
        self.children.len()
    }
}
