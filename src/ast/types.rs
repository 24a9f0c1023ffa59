//! Names of the built-in classes and the self type.

pub const OBJECT: &str = "Object";
pub const IO: &str = "IO";
pub const INT: &str = "Int";
pub const BOOL: &str = "Bool";
pub const STRING: &str = "String";

/// The type of `self`, resolved to the enclosing class wherever it is allowed.
pub const SELF_TYPE: &str = "SELF_TYPE";

/// Classes that may not be inherited from.
pub const SEALED_CLASSES: [&str; 3] = [INT, STRING, BOOL];

/// Resolves `SELF_TYPE` to `class_name`, leaving every other type untouched.
pub fn resolve_self_type<'a>(type_name: &'a str, class_name: &'a str) -> &'a str {
    if type_name == SELF_TYPE {
        class_name
    } else {
        type_name
    }
}
