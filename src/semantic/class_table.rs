use std::collections::HashMap;

use crate::{
    ast::ast::ClassDef,
    errors::errors::{Error, ErrorImpl},
};

/// Every class of the program by name, in declaration order with the
/// built-ins first.
#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    classes: Vec<ClassDef>,
    class_lookup: HashMap<String, usize>,
    expanded: bool,
}

impl ClassTable {
    pub fn new() -> Self {
        ClassTable::default()
    }

    pub fn insert(&mut self, class: ClassDef) -> Result<(), Error> {
        if self.class_lookup.contains_key(&class.name) {
            return Err(Error::new(
                ErrorImpl::DuplicateClass { class: class.name },
                class.span.start,
            ));
        }

        self.class_lookup.insert(class.name.clone(), self.classes.len());
        self.classes.push(class);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ClassDef> {
        self.class_lookup.get(name).map(|index| &self.classes[*index])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ClassDef> {
        match self.class_lookup.get(name) {
            Some(index) => Some(&mut self.classes[*index]),
            None => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.class_lookup.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassDef> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The class sequence, consuming the table.
    pub fn into_classes(self) -> Vec<ClassDef> {
        self.classes
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub(crate) fn mark_expanded(&mut self) {
        self.expanded = true;
    }
}
