use tracing::debug;

use crate::{
    ast::{
        ast::{Attribute, ClassDef, Formal, Method},
        types::{BOOL, INT, IO, OBJECT, SELF_TYPE, STRING},
    },
    errors::errors::Error,
    Span,
};

use super::{class_graph::ClassGraph, class_table::ClassTable};

/// The five classes every program starts with, in registration order.
pub fn builtin_classes() -> Vec<ClassDef> {
    let object = ClassDef::new(
        OBJECT,
        None,
        vec![
            Method::new("abort", OBJECT, vec![], None),
            Method::new("copy", SELF_TYPE, vec![], None),
            Method::new("type_name", SELF_TYPE, vec![], None),
        ],
        Span::null(),
    );

    let io = ClassDef::new(
        IO,
        Some(OBJECT),
        vec![
            Method::new("input_integer", SELF_TYPE, vec![], None),
            Method::new("input_string", SELF_TYPE, vec![], None),
            Method::new("output_int", SELF_TYPE, vec![Formal::new("arg", INT)], None),
            Method::new("out_string", SELF_TYPE, vec![Formal::new("arg", STRING)], None),
        ],
        Span::null(),
    );

    let integer = ClassDef::new(
        INT,
        Some(OBJECT),
        vec![Attribute::new("_val", INT, None)],
        Span::null(),
    );

    let boolean = ClassDef::new(
        BOOL,
        Some(OBJECT),
        vec![Attribute::new("_val", BOOL, None)],
        Span::null(),
    );

    // `concat` takes an `Int`, kept as the runtime declares it
    let string = ClassDef::new(
        STRING,
        Some(OBJECT),
        vec![
            Attribute::new("_val", INT, None),
            Attribute::new("_str_field", SELF_TYPE, None),
            Method::new("length", INT, vec![], None),
            Method::new("concat", STRING, vec![Formal::new("arg", INT)], None),
            Method::new(
                "substr",
                STRING,
                vec![Formal::new("arg1", INT), Formal::new("arg2", INT)],
                None,
            ),
        ],
        Span::null(),
    );

    vec![object, io, integer, boolean, string]
}

/// Prepends the built-ins, registers every class and records each
/// parent → child edge. Classes without a declared parent hang off `Object`.
#[tracing::instrument(skip_all, fields(classes = classes.len()))]
pub fn build(classes: Vec<ClassDef>) -> Result<(ClassTable, ClassGraph), Error> {
    let mut table = ClassTable::new();
    let mut graph = ClassGraph::new();

    for class in builtin_classes().into_iter().chain(classes) {
        let name = class.name.clone();
        let parent = class.parent.clone();
        table.insert(class)?;

        graph.register(&name);
        if name != OBJECT {
            graph.add_edge(parent.as_deref().unwrap_or(OBJECT), &name);
        }
    }

    debug!(registered = table.len(), "class graph built");
    Ok((table, graph))
}
