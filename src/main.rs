use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use coolc::{
    analyze_source, display_error, display_warning,
    semantic::{
        options::SemanticOptions,
        pipeline::Analysis,
        typed_ast::{TypedExprKind, TypedFeature},
    },
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Semantic checker for Cool programs
#[derive(Parser)]
#[command(name = "coolc")]
#[command(version = "0.1.0")]
#[command(about = "Type checks a Cool source file", long_about = None)]
struct Cli {
    /// Path to the .cl file to check
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Stop at the first type error
    #[arg(long)]
    fail_fast: bool,

    /// Deepest expression nesting accepted
    #[arg(long, default_value_t = SemanticOptions::default().max_depth)]
    max_depth: usize,

    /// Print the inferred type of every method body and initializer
    #[arg(long)]
    dump_types: bool,
}

fn main() -> ExitCode {
    // Initialize tracing if COOL_LOG is set
    if let Ok(filter) = EnvFilter::try_from_env("COOL_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    let options = SemanticOptions {
        max_depth: cli.max_depth,
        fail_fast: cli.fail_fast,
    };

    let content = match read_to_string(&cli.file) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("Error: could not read {}: {}", cli.file.display(), error);
            return ExitCode::FAILURE;
        }
    };
    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.to_string_lossy().into_owned());

    let start = Instant::now();
    let result = analyze_source(&content, &file_name, &options);
    info!(elapsed = ?start.elapsed(), "analysis finished");

    match result {
        Ok(analysis) => {
            for warning in &analysis.warnings {
                display_warning(warning, &cli.file);
            }
            if cli.dump_types {
                dump_types(&analysis);
            }
            ExitCode::SUCCESS
        }
        Err(diagnostics) => {
            for warning in &diagnostics.warnings {
                display_warning(warning, &cli.file);
            }
            for error in &diagnostics.errors {
                display_error(error, &content, &cli.file);
            }
            eprintln!("{}", diagnostics);
            ExitCode::FAILURE
        }
    }
}

fn dump_types(analysis: &Analysis) {
    for class in &analysis.program.classes {
        let Some(declared) = analysis.classes.get(&class.name) else {
            continue;
        };
        // Built-ins have no source and nothing to show
        if declared.span.is_null() {
            continue;
        }

        println!("class {}", class.name);
        for feature in &class.features {
            let Some(expression) = feature.expression() else {
                continue;
            };
            let kind = match feature {
                TypedFeature::Attribute(_) => "attribute",
                TypedFeature::Method(_) => "method",
            };
            let calls = expression
                .nodes()
                .into_iter()
                .filter(|node| {
                    matches!(
                        node.kind,
                        TypedExprKind::FunctionCall { .. } | TypedExprKind::MethodCall { .. }
                    )
                })
                .count();

            println!(
                "  {} {}: {} ({} nodes, {} calls)",
                kind,
                feature.name(),
                expression.ty,
                expression.nodes().len(),
                calls
            );
        }
    }
}
