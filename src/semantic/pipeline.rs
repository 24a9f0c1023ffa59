use thiserror::Error;
use tracing::{debug, info};

use crate::{
    ast::ast::ClassDef,
    errors::errors::{Error, Warning},
};

use super::{
    builder, checker,
    class_graph::ClassGraph,
    class_table::ClassTable,
    expander, inference,
    method_table::{self, MethodTable},
    options::SemanticOptions,
    typed_ast::TypedProgram,
    validator,
};

/// A program that passed every stage.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Built-ins first, every feature list inheritance-complete.
    pub classes: ClassTable,
    pub graph: ClassGraph,
    pub methods: MethodTable,
    pub program: TypedProgram,
    pub warnings: Vec<Warning>,
}

/// Everything reported by a failed analysis.
#[derive(Error, Debug, Clone)]
#[error("semantic analysis failed with {} error(s)", .errors.len())]
pub struct Diagnostics {
    pub errors: Vec<Error>,
    pub warnings: Vec<Warning>,
}

impl Diagnostics {
    fn fatal(error: Error, warnings: Vec<Warning>) -> Self {
        Diagnostics {
            errors: vec![error],
            warnings,
        }
    }
}

/// Runs every semantic stage over `classes`.
///
/// Building, validation, expansion and the method table stop at their first
/// error. Inference and checking report every failing feature unless
/// `options.fail_fast` is set.
#[tracing::instrument(skip_all, fields(classes = classes.len()))]
pub fn analyze(classes: Vec<ClassDef>, options: &SemanticOptions) -> Result<Analysis, Diagnostics> {
    let mut warnings = vec![];

    let (mut table, mut graph) =
        builder::build(classes).map_err(|error| Diagnostics::fatal(error, vec![]))?;

    if let Err(error) = validator::validate(&table, &mut graph, &mut warnings) {
        return Err(Diagnostics::fatal(error, warnings));
    }
    if let Err(error) = expander::expand(&mut table, &graph) {
        return Err(Diagnostics::fatal(error, warnings));
    }
    let methods = match method_table::build(&table) {
        Ok(methods) => methods,
        Err(error) => return Err(Diagnostics::fatal(error, warnings)),
    };

    let mut errors = vec![];
    let program = inference::infer_program(&table, &methods, options, &mut errors);
    if !(options.fail_fast && !errors.is_empty()) {
        checker::check_program(&table, &graph, &program, options, &mut errors);
    }

    if !errors.is_empty() {
        let errors = deduplicate(errors);
        debug!(errors = errors.len(), "semantic analysis failed");
        return Err(Diagnostics { errors, warnings });
    }

    info!(classes = table.len(), warnings = warnings.len(), "semantic analysis succeeded");
    Ok(Analysis {
        classes: table,
        graph,
        methods,
        program,
        warnings,
    })
}

/// An inherited feature is inferred and checked once per subclass, so a
/// fault in it is reported by each of them. Those reports name the declaring
/// class and feature, so they compare equal; faults of unrelated classes never do.
fn deduplicate(errors: Vec<Error>) -> Vec<Error> {
    let mut unique: Vec<Error> = vec![];

    for error in errors {
        let seen = unique.iter().any(|other| {
            other.get_kind() == error.get_kind() && other.get_position() == error.get_position()
        });
        if !seen {
            unique.push(error);
        }
    }

    unique
}
