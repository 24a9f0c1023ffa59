use std::collections::{BTreeSet, HashMap, HashSet};

use crate::{
    ast::types::OBJECT,
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Inheritance adjacency: parent name to the names of its direct children.
///
/// Entries are only created while the graph is built. Looking up a name that
/// was never registered is an error, never an implicitly created empty entry.
#[derive(Debug, Clone, Default)]
pub struct ClassGraph {
    edges: HashMap<String, BTreeSet<String>>,
}

impl ClassGraph {
    pub fn new() -> Self {
        ClassGraph::default()
    }

    /// Gives `class` an entry with no children if it has none yet.
    pub(crate) fn register(&mut self, class: &str) {
        self.edges.entry(String::from(class)).or_default();
    }

    pub(crate) fn add_edge(&mut self, parent: &str, child: &str) {
        self.edges
            .entry(String::from(parent))
            .or_default()
            .insert(String::from(child));
    }

    /// Removes `parent` and moves its children under `Object`.
    ///
    /// Returns the moved children, or `None` if `parent` had no entry.
    pub(crate) fn reparent_to_object(&mut self, parent: &str) -> Option<BTreeSet<String>> {
        let children = self.edges.remove(parent)?;
        self.edges
            .entry(String::from(OBJECT))
            .or_default()
            .extend(children.iter().cloned());
        Some(children)
    }

    pub fn children(&self, class: &str) -> Result<&BTreeSet<String>, Error> {
        self.edges.get(class).ok_or_else(|| {
            Error::new(
                ErrorImpl::UnregisteredClass {
                    class: String::from(class),
                },
                Position::null(),
            )
        })
    }

    pub fn contains_key(&self, class: &str) -> bool {
        self.edges.contains_key(class)
    }

    /// Every key, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = self.edges.keys().cloned().collect::<Vec<String>>();
        keys.sort();
        keys
    }

    /// Every class reachable from `root`, `root` included.
    ///
    /// Uses an explicit stack, so cyclic or very deep graphs cannot exhaust the call stack.
    pub fn reachable_from(&self, root: &str) -> HashSet<String> {
        let mut visited = HashSet::new();
        let mut stack = vec![String::from(root)];

        while let Some(class) = stack.pop() {
            if !visited.insert(class.clone()) {
                continue;
            }
            if let Some(children) = self.edges.get(&class) {
                stack.extend(children.iter().filter(|child| !visited.contains(*child)).cloned());
            }
        }

        visited
    }

    /// Whether `child` is `parent` or one of its descendants.
    pub fn is_child(&self, child: &str, parent: &str) -> bool {
        if child == parent {
            return true;
        }

        let mut visited = HashSet::new();
        let mut stack = vec![parent];

        while let Some(class) = stack.pop() {
            if !visited.insert(class) {
                continue;
            }
            let Some(children) = self.edges.get(class) else {
                continue;
            };
            if children.contains(child) {
                return true;
            }
            stack.extend(children.iter().map(String::as_str));
        }

        false
    }
}
