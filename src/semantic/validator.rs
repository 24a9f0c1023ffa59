use std::collections::HashSet;

use tracing::{debug, warn};

use crate::{
    ast::types::{OBJECT, SEALED_CLASSES},
    errors::errors::{Error, ErrorImpl, Warning, WarningImpl},
    Position,
};

use super::{class_graph::ClassGraph, class_table::ClassTable};

/// Runs the three inheritance checks in order. Orphan warnings are appended
/// to `warnings` even when a later check fails.
#[tracing::instrument(skip_all)]
pub fn validate(
    table: &ClassTable,
    graph: &mut ClassGraph,
    warnings: &mut Vec<Warning>,
) -> Result<(), Error> {
    check_sealed_parents(table, graph)?;
    warnings.extend(reconcile_undefined_parents(table, graph));
    check_for_inheritance_cycles(table, graph)?;
    Ok(())
}

/// `Int`, `String` and `Bool` may not have children.
pub fn check_sealed_parents(table: &ClassTable, graph: &ClassGraph) -> Result<(), Error> {
    for parent in SEALED_CLASSES {
        let Some(child) = graph.children(parent)?.iter().next() else {
            continue;
        };

        return Err(Error::new(
            ErrorImpl::IllegalInheritance {
                class: child.clone(),
                parent: String::from(parent),
            },
            declared_at(table, child),
        ));
    }

    Ok(())
}

/// Moves the children of every undefined parent under `Object`.
///
/// Only the graph changes; the children keep their declared `parent`.
pub fn reconcile_undefined_parents(table: &ClassTable, graph: &mut ClassGraph) -> Vec<Warning> {
    let mut warnings = vec![];

    for parent in graph.keys() {
        if table.contains(&parent) || parent == OBJECT {
            continue;
        }

        let Some(children) = graph.reparent_to_object(&parent) else {
            continue;
        };
        let children = children.into_iter().collect::<Vec<String>>();

        warn!(parent = %parent, ?children, "undefined parent class, reparenting to Object");

        let position = children
            .first()
            .map(|child| declared_at(table, child))
            .unwrap_or_else(Position::null);
        warnings.push(Warning::new(
            WarningImpl::OrphanClass { parent, children },
            position,
        ));
    }

    warnings
}

/// Every class must be reachable from `Object`.
///
/// With single inheritance each class has at most one parent, so a class the
/// walk never reaches sits on, or below, a cycle.
pub fn check_for_inheritance_cycles(
    table: &ClassTable,
    graph: &ClassGraph,
) -> Result<HashSet<String>, Error> {
    let visited = graph.reachable_from(OBJECT);

    if let Some(class) = table.iter().find(|class| !visited.contains(&class.name)) {
        return Err(Error::new(
            ErrorImpl::CyclicInheritance {
                class: class.name.clone(),
            },
            class.span.start.clone(),
        ));
    }

    debug!(visited = visited.len(), "inheritance graph is acyclic");
    Ok(visited)
}

fn declared_at(table: &ClassTable, class: &str) -> Position {
    table
        .get(class)
        .map(|class| class.span.start.clone())
        .unwrap_or_else(Position::null)
}
