use std::collections::HashMap;

/// One level of name → type bindings.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    variable_lookup: HashMap<String, String>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    /// Adds a binding. Returns `false`, leaving the scope unchanged, if the
    /// name is already bound here.
    pub fn declare(&mut self, name: &str, ty: &str) -> bool {
        if self.variable_lookup.contains_key(name) {
            return false;
        }
        self.variable_lookup.insert(String::from(name), String::from(ty));
        true
    }

    /// Adds or replaces a binding.
    pub fn bind(&mut self, name: &str, ty: &str) {
        self.variable_lookup.insert(String::from(name), String::from(ty));
    }

    pub fn get_variable(&self, name: &str) -> Option<&str> {
        self.variable_lookup.get(name).map(String::as_str)
    }
}

/// Scopes, innermost last.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack::default()
    }

    pub fn push(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    pub fn pop(&mut self) -> Option<Scope> {
        self.scopes.pop()
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn current_mut(&mut self) -> Option<&mut Scope> {
        self.scopes.last_mut()
    }

    /// Innermost binding of `name`.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get_variable(name))
    }
}
