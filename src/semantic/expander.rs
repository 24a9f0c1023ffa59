use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    ast::{
        ast::{ClassDef, Feature, Method},
        types::OBJECT,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{class_graph::ClassGraph, class_table::ClassTable};

/// What an override has to preserve: every formal's name and type, and the
/// return type. Formal order is not compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub formals: BTreeMap<String, String>,
    pub return_type: String,
}

impl MethodSignature {
    pub fn of(method: &Method) -> Self {
        MethodSignature {
            formals: method
                .formals
                .iter()
                .map(|formal| (formal.name.clone(), formal.declared_type.clone()))
                .collect(),
            return_type: method.return_type.clone(),
        }
    }
}

/// Expands every class reachable from `Object`, parents before children.
///
/// Runs at most once per table.
#[tracing::instrument(skip_all)]
pub fn expand(table: &mut ClassTable, graph: &ClassGraph) -> Result<(), Error> {
    if table.is_expanded() {
        debug!("features already expanded, skipping");
        return Ok(());
    }

    let mut worklist = vec![String::from(OBJECT)];
    while let Some(parent) = worklist.pop() {
        for child in graph.children(&parent)? {
            expand_class(table, child, &parent)?;
            worklist.push(child.clone());
        }
    }

    table.mark_expanded();
    debug!(classes = table.len(), "features expanded");
    Ok(())
}

/// Copies the features of `parent` into `class`.
///
/// `parent` must already be expanded. Calling this twice for the same pair
/// leaves `class` unchanged the second time.
pub fn expand_class(table: &mut ClassTable, class: &str, parent: &str) -> Result<(), Error> {
    let parent_class = lookup(table, parent)?;
    let inherited: Vec<(Feature, String)> = parent_class
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| (feature.clone(), String::from(parent_class.origin(index))))
        .collect();
    let child = table.get_mut(class).ok_or_else(|| unregistered(class))?;

    for attribute in child.own_attributes() {
        let redefined = inherited
            .iter()
            .filter_map(|(feature, _)| feature.as_attribute())
            .any(|inherited| inherited.name == attribute.name);

        if redefined {
            return Err(Error::new(
                ErrorImpl::AttributeRedefinition {
                    class: child.name.clone(),
                    attribute: attribute.name.clone(),
                },
                attribute.span.start.clone(),
            ));
        }
    }

    for method in child.own_methods() {
        let Some(overridden) = inherited
            .iter()
            .filter_map(|(feature, _)| feature.as_method())
            .find(|inherited| inherited.name == method.name)
        else {
            continue;
        };

        if MethodSignature::of(method) != MethodSignature::of(overridden) {
            return Err(Error::new(
                ErrorImpl::MethodSignatureMismatch {
                    class: child.name.clone(),
                    method: method.name.clone(),
                },
                method.span.start.clone(),
            ));
        }
    }

    // Methods first, then attributes
    let (methods, attributes): (Vec<_>, Vec<_>) = inherited
        .iter()
        .partition(|(feature, _)| feature.as_method().is_some());
    let mut appended = 0;
    for (feature, origin) in methods.into_iter().chain(attributes) {
        appended += child.inherit(feature, origin) as usize;
    }

    debug!(class, parent, appended, "class expanded");
    Ok(())
}

fn lookup<'a>(table: &'a ClassTable, class: &str) -> Result<&'a ClassDef, Error> {
    table.get(class).ok_or_else(|| unregistered(class))
}

fn unregistered(class: &str) -> Error {
    Error::new(
        ErrorImpl::UnregisteredClass {
            class: String::from(class),
        },
        Position::null(),
    )
}
