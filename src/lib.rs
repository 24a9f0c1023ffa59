#![allow(clippy::module_inception)]

use std::{path::Path, rc::Rc};

use crate::{
    errors::errors::{Error, ErrorTip, Warning},
    lexer::lexer::tokenize,
    parser::parser::parse,
    semantic::{
        options::SemanticOptions,
        pipeline::{analyze, Analysis, Diagnostics},
    },
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod semantic;

extern crate regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }

    /// Whether this span belongs to a synthesized node rather than source text.
    pub fn is_null(&self) -> bool {
        *self == Span::null()
    }
}

/// Finds the line containing byte offset `position`.
///
/// Returns the 1-based line number, the line text and the offset within that line.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos >= content.len() {
        return None;
    }

    let mut start = 0;

    for (index, line) in content.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line.to_string(), pos - start));
        }

        start = end;
    }

    None
}

/// Tokenizes, parses and analyses one source file.
///
/// A lexer or parser error is returned as the only error of the diagnostics.
/// `options.max_depth` also bounds expression nesting in the parser.
pub fn analyze_source(
    source: &str,
    file: &str,
    options: &SemanticOptions,
) -> Result<Analysis, Diagnostics> {
    let front_end_failed = |error: Error| Diagnostics {
        errors: vec![error],
        warnings: vec![],
    };

    let tokens =
        tokenize(String::from(source), Some(String::from(file))).map_err(front_end_failed)?;
    let classes = parse(tokens, Rc::new(String::from(file)), options.max_depth).map_err(front_end_failed)?;

    analyze(classes, options)
}

#[cfg(test)]
mod tests {
    const CONTENT: &str = "Hello, world!\nclass A {\n};\n   Testing { }\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = super::get_line_at_position(CONTENT, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(CONTENT, 35).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "   Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_past_end() {
        assert!(super::get_line_at_position(CONTENT, 500).is_none());
    }
}

pub fn display_error(error: &Error, content: &str, file: &Path) {
    /*
        error: message
        -> main.cl
           |
        20 | x <- #;
           | -----^
    */

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    eprintln!("-> {}", file.as_os_str().to_string_lossy());

    // Built-in classes and synthesized nodes have no source position
    let Some((line, line_text, line_pos)) = get_line_at_position(content, error.get_position().0)
    else {
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

pub fn display_warning(warning: &Warning, file: &Path) {
    eprintln!(
        "Warning: {} ({})",
        warning.get_warning_name(),
        warning.get_tip()
    );
    eprintln!("-> {}", file.as_os_str().to_string_lossy());
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (String::from(&string[start..]), start)
}
