use super::component::Component;
use std::collections::HashMap;

/// Insertion-ordered set of components keyed by identifier.
///
/// Holds at most one component per identifier; the first inserted wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentSet {
    components: Vec<Component>,
    index: HashMap<String, usize>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `component` unless its identifier is already present.
    ///
    /// Returns `true` when the component was added.
    pub fn insert(&mut self, component: Component) -> bool {
        if self.index.contains_key(component.identifier()) {
            return false;
        }
        self.index
            .insert(component.identifier().to_string(), self.components.len());
        self.components.push(component);
        true
    }

    /// Inserts `component`, or backfills missing evidence into the entry
    /// already stored under the same identifier.
    pub fn insert_or_backfill(&mut self, component: Component) {
        match self.index.get(component.identifier()) {
            Some(&position) => self.components[position].backfill_from(&component),
            None => {
                self.insert(component);
            }
        }
    }

    pub fn get(&self, identifier: &str) -> Option<&Component> {
        self.index
            .get(identifier)
            .map(|&position| &self.components[position])
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.index.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.components.iter()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(Component::identifier)
    }
}

impl FromIterator<Component> for ComponentSet {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        let mut set = ComponentSet::new();
        for component in iter {
            set.insert(component);
        }
        set
    }
}

impl IntoIterator for ComponentSet {
    type Item = Component;
    type IntoIter = std::vec::IntoIter<Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}

impl<'a> IntoIterator for &'a ComponentSet {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}
