use std::collections::HashMap;

use tracing::debug;

use crate::errors::errors::{Error, ErrorImpl};

use super::class_table::ClassTable;

/// (method name, class name) to declared return type, over expanded classes.
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    methods: HashMap<(String, String), String>,
}

impl MethodTable {
    pub fn return_type(&self, method: &str, class: &str) -> Option<&str> {
        self.methods
            .get(&(String::from(method), String::from(class)))
            .map(String::as_str)
    }

    pub fn contains(&self, method: &str, class: &str) -> bool {
        self.return_type(method, class).is_some()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

#[tracing::instrument(skip_all)]
pub fn build(table: &ClassTable) -> Result<MethodTable, Error> {
    let mut methods = HashMap::new();

    for class in table.iter() {
        for method in class.methods() {
            let key = (method.name.clone(), class.name.clone());
            if methods.contains_key(&key) {
                return Err(Error::new(
                    ErrorImpl::DuplicateMethod {
                        class: class.name.clone(),
                        method: method.name.clone(),
                    },
                    method.span.start.clone(),
                ));
            }
            methods.insert(key, method.return_type.clone());
        }
    }

    debug!(entries = methods.len(), "method table built");
    Ok(MethodTable { methods })
}
