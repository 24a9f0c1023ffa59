//! Integration tests for end-to-end analysis.
//!
//! These tests run complete Cool programs through tokenization, parsing and
//! every semantic stage, and inspect the resulting analysis or diagnostics.

use coolc::{
    analyze_source,
    ast::types::{INT, OBJECT},
    semantic::{
        options::SemanticOptions,
        pipeline::{Analysis, Diagnostics},
        typed_ast::TypedExprKind,
    },
};

const HELLO_WORLD: &str = r#"
class Main inherits IO {
    main(): SELF_TYPE {
        out_string("Hello, World.\n")
    };
};
"#;

const LIST: &str = r#"
(* A linked list of integers *)
class List {
    isNil(): Bool { true };
    head(): Int { { abort(); 0; } };
    tail(): List { { abort(); self; } };
    cons(i: Int): List { (new Cons).init(i, self) };
};

class Cons inherits List {
    car: Int;
    cdr: List;
    isNil(): Bool { false };
    head(): Int { car };
    tail(): List { cdr };
    init(i: Int, rest: List): List {
        {
            car <- i;
            cdr <- rest;
            self;
        }
    };
};

class Main inherits IO {
    mylist: List;

    print_list(l: List): Object {
        if l.isNil() then out_string("\n")
        else {
            out_int(l.head());
            out_string(" ");
            print_list(l.tail());
        }
        fi
    };

    main(): Object {
        {
            mylist <- new List.cons(1).cons(2).cons(3);
            while not mylist.isNil() loop
                {
                    print_list(mylist);
                    mylist <- mylist.tail();
                }
            pool;
        }
    };
};
"#;

fn analyze(source: &str) -> Result<Analysis, Diagnostics> {
    analyze_source(source, "test.cl", &SemanticOptions::default())
}

#[test]
fn test_hello_world() {
    let analysis = analyze(HELLO_WORLD).unwrap();
    assert!(analysis.warnings.is_empty());

    let main = analysis.program.class("Main").unwrap();
    let body = main.find_method("main").unwrap().body.as_ref().unwrap();
    assert_eq!(body.ty, "Main");
    assert!(matches!(
        body.kind,
        TypedExprKind::FunctionCall { ref dispatch_class, .. } if dispatch_class == "Main"
    ));
}

#[test]
fn test_list_program_reports_unknown_method() {
    // `out_int` is not a method of IO; the built-in is `output_int`
    let diagnostics = analyze(LIST).unwrap_err();
    assert_eq!(diagnostics.errors.len(), 1);
    assert_eq!(diagnostics.errors[0].get_error_name(), "UndefinedMethodError");
}

#[test]
fn test_list_program() {
    let source = LIST.replace("out_int", "output_int");
    let analysis = analyze(&source).unwrap();

    let cons = analysis.classes.get("Cons").unwrap();
    assert_eq!(cons.own_features().len(), 6);
    // cons is inherited from List; the other List methods are overridden
    assert!(cons.inherited_features().iter().any(|feature| feature.name() == "cons"));
    assert_eq!(cons.methods().filter(|method| method.name == "head").count(), 1);

    let main = analysis.program.class("Main").unwrap();
    let print_list = main.find_method("print_list").unwrap();
    assert_eq!(print_list.body.as_ref().unwrap().ty, OBJECT);
}

#[test]
fn test_every_expression_is_annotated() {
    let source = LIST.replace("out_int", "output_int");
    let analysis = analyze(&source).unwrap();

    let mut nodes = 0;
    for class in &analysis.program.classes {
        for feature in &class.features {
            if let Some(expression) = feature.expression() {
                for node in expression.nodes() {
                    assert!(
                        analysis.classes.contains(&node.ty),
                        "{} has type {} in class {}",
                        feature.name(),
                        node.ty,
                        class.name
                    );
                    nodes += 1;
                }
            }
        }
    }
    assert!(nodes > 0);
}

#[test]
fn test_lexer_error_is_reported() {
    let diagnostics = analyze("class Main { main(): Int { # }; };").unwrap_err();
    assert_eq!(diagnostics.errors[0].get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_parser_error_is_reported() {
    let diagnostics = analyze("class Main { main(): Int { 1 + }; };").unwrap_err();
    assert_eq!(diagnostics.errors.len(), 1);
}

#[test]
fn test_error_positions_point_into_source() {
    let source = "class Main {\n    main(): Int { undefined_name };\n};\n";
    let diagnostics = analyze(source).unwrap_err();

    let position = diagnostics.errors[0].get_position();
    assert_eq!(*position.1, "test.cl");
    let (line, text, _) = coolc::get_line_at_position(source, position.0).unwrap();
    assert_eq!(line, 2);
    assert!(text.contains("undefined_name"));
}

#[test]
fn test_orphan_warning_then_success() {
    let analysis = analyze("class A inherits Missing { x: Int <- 2; }; class B inherits A {};").unwrap();
    assert_eq!(analysis.warnings.len(), 1);
    assert!(analysis.graph.is_child("B", OBJECT));
    assert!(analysis.classes.get("B").unwrap().find_attribute("x").is_some());

    let b = analysis.program.class("B").unwrap();
    let x = b.find_attribute("x").unwrap();
    assert_eq!(x.initializer.as_ref().unwrap().ty, INT);
}

#[test]
fn test_repeated_analysis_is_stable() {
    let first = analyze(HELLO_WORLD).unwrap();
    let second = analyze(HELLO_WORLD).unwrap();

    for (a, b) in first.classes.iter().zip(second.classes.iter()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.features.len(), b.features.len());
    }
    assert_eq!(first.methods.len(), second.methods.len());
}

#[test]
fn test_deeply_nested_source_is_rejected() {
    let depth = 10_000;
    let source = format!(
        "class Main {{ main(): Int {{ {}1{} }}; }};",
        "(".repeat(depth),
        ")".repeat(depth)
    );

    let diagnostics = analyze(&source).unwrap_err();
    assert_eq!(diagnostics.errors.len(), 1);
    assert_eq!(diagnostics.errors[0].get_error_name(), "RecursionLimitError");
}

#[test]
fn test_max_depth_applies_to_parsing() {
    let source = format!("class Main {{ main(): Int {{ {}1{} }}; }};", "(".repeat(20), ")".repeat(20));
    assert!(analyze(&source).is_ok());

    let options = SemanticOptions {
        max_depth: 10,
        ..SemanticOptions::default()
    };
    let diagnostics = analyze_source(&source, "test.cl", &options).unwrap_err();
    assert_eq!(diagnostics.errors[0].get_error_name(), "RecursionLimitError");
}
