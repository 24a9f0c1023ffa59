use crate::Span;

use super::expressions::Expr;

/// A class definition.
///
/// `features` starts out as the class's own declarations. Feature expansion
/// appends inherited copies behind them and never reorders or removes entries,
/// so the first `declared` features are always the class's own.
#[derive(Debug, Clone)]
pub struct ClassDef {
    pub name: String,
    /// Declared parent. `None` means the class implicitly inherits `Object`.
    pub parent: Option<String>,
    pub features: Vec<Feature>,
    declared: usize,
    /// Declaring class of each inherited feature, in `inherited_features` order.
    origins: Vec<String>,
    pub span: Span,
}

impl ClassDef {
    pub fn new(name: &str, parent: Option<&str>, features: Vec<Feature>, span: Span) -> Self {
        ClassDef {
            name: String::from(name),
            parent: parent.map(String::from),
            declared: features.len(),
            features,
            origins: vec![],
            span,
        }
    }

    /// Features written on this class itself, before any inherited copies.
    pub fn own_features(&self) -> &[Feature] {
        &self.features[..self.declared]
    }

    /// Copies appended by feature expansion.
    pub fn inherited_features(&self) -> &[Feature] {
        &self.features[self.declared..]
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.features.iter().filter_map(Feature::as_attribute)
    }

    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.features.iter().filter_map(Feature::as_method)
    }

    pub fn own_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.own_features().iter().filter_map(Feature::as_attribute)
    }

    pub fn own_methods(&self) -> impl Iterator<Item = &Method> {
        self.own_features().iter().filter_map(Feature::as_method)
    }

    pub fn find_method(&self, name: &str) -> Option<&Method> {
        self.methods().find(|method| method.name == name)
    }

    pub fn find_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes().find(|attribute| attribute.name == name)
    }

    /// The class whose source declares `features[index]`.
    pub fn origin(&self, index: usize) -> &str {
        index
            .checked_sub(self.declared)
            .and_then(|inherited| self.origins.get(inherited))
            .map_or(self.name.as_str(), String::as_str)
    }

    /// Appends a feature declared on `origin` unless one of the same kind and
    /// name is present.
    ///
    /// Returns whether the feature was appended.
    pub fn inherit(&mut self, feature: &Feature, origin: &str) -> bool {
        let present = match feature {
            Feature::Attribute(attribute) => self.find_attribute(&attribute.name).is_some(),
            Feature::Method(method) => self.find_method(&method.name).is_some(),
        };

        if !present {
            self.features.push(feature.clone());
            self.origins.push(String::from(origin));
        }
        !present
    }
}

#[derive(Debug, Clone)]
pub enum Feature {
    Attribute(Attribute),
    Method(Method),
}

impl Feature {
    pub fn name(&self) -> &str {
        match self {
            Feature::Attribute(attribute) => &attribute.name,
            Feature::Method(method) => &method.name,
        }
    }

    pub fn as_attribute(&self) -> Option<&Attribute> {
        match self {
            Feature::Attribute(attribute) => Some(attribute),
            Feature::Method(_) => None,
        }
    }

    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Feature::Method(method) => Some(method),
            Feature::Attribute(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub declared_type: String,
    pub initializer: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub return_type: String,
    pub formals: Vec<Formal>,
    /// Built-in methods have no body.
    pub body: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formal {
    pub name: String,
    pub declared_type: String,
    pub span: Span,
}

impl Attribute {
    pub fn new(name: &str, declared_type: &str, initializer: Option<Expr>) -> Feature {
        Feature::Attribute(Attribute {
            name: String::from(name),
            declared_type: String::from(declared_type),
            initializer,
            span: Span::null(),
        })
    }
}

impl Method {
    pub fn new(name: &str, return_type: &str, formals: Vec<Formal>, body: Option<Expr>) -> Feature {
        Feature::Method(Method {
            name: String::from(name),
            return_type: String::from(return_type),
            formals,
            body,
            span: Span::null(),
        })
    }
}

impl Formal {
    pub fn new(name: &str, declared_type: &str) -> Self {
        Formal {
            name: String::from(name),
            declared_type: String::from(declared_type),
            span: Span::null(),
        }
    }
}
