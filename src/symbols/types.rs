use std::fmt::Display;

/// The closed set of types. `Error` marks an expression that already failed to bind and
/// `Void` is the return type of functions without a value.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TypeSymbol {
    Error,
    Bool,
    Int,
    String,
    Void,
}

impl TypeSymbol {
    pub fn name(&self) -> &'static str {
        match self {
            TypeSymbol::Error => "?",
            TypeSymbol::Bool => "bool",
            TypeSymbol::Int => "int",
            TypeSymbol::String => "string",
            TypeSymbol::Void => "void",
        }
    }

    /// Resolves a type name written in source. `void` and the error type cannot be named.
    pub fn lookup(name: &str) -> Option<TypeSymbol> {
        match name {
            "bool" => Some(TypeSymbol::Bool),
            "int" => Some(TypeSymbol::Int),
            "string" => Some(TypeSymbol::String),
            _ => None,
        }
    }
}

impl Display for TypeSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
