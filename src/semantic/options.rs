/// Settings for a semantic analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticOptions {
    /// Deepest expression nesting the parser and inferencer accept before failing.
    pub max_depth: usize,
    /// Stop inference and checking at the first error instead of collecting
    /// errors across independent features and classes.
    pub fail_fast: bool,
}

impl Default for SemanticOptions {
    fn default() -> Self {
        SemanticOptions {
            max_depth: 256,
            fail_fast: false,
        }
    }
}
